//! Room adjacency graph
//!
//! Rooms are adjacent when a corridor runs between them. A corridor's two
//! ends are attributed to the nearest room by center distance, so corridors
//! that start at a fixed room's door still count for that room.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::corridor::Corridor;
use super::rect::Point;
use super::room::{Room, RoomId};

/// Undirected adjacency between rooms, one neighbor list per room
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomGraph {
    adjacency: Vec<Vec<RoomId>>,
}

impl RoomGraph {
    /// A graph over `room_count` rooms with no edges
    pub fn new(room_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); room_count],
        }
    }

    /// Build the graph from scratch for the given corridors.
    ///
    /// Corridors whose ends resolve to the same room add no edge.
    pub fn build(rooms: &[Room], corridors: &[Corridor]) -> Self {
        let mut graph = Self::new(rooms.len());
        for corridor in corridors {
            let from = nearest_room(corridor.start, rooms);
            let to = nearest_room(corridor.end, rooms);
            if let (Some(a), Some(b)) = (from, to)
                && a != b
            {
                graph.add_edge(a, b);
            }
        }
        graph
    }

    /// Add an undirected edge, ignoring duplicates and self-loops
    pub fn add_edge(&mut self, a: RoomId, b: RoomId) {
        let n = self.adjacency.len();
        if a == b || a >= n || b >= n {
            return;
        }
        if !self.adjacency[a].contains(&b) {
            self.adjacency[a].push(b);
        }
        if !self.adjacency[b].contains(&a) {
            self.adjacency[b].push(a);
        }
    }

    /// Number of rooms
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Neighbors of a room, empty for unknown ids
    pub fn neighbors(&self, room: RoomId) -> &[RoomId] {
        self.adjacency.get(room).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_edge(&self, a: RoomId, b: RoomId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Check that every edge is present in both directions
    pub fn is_symmetric(&self) -> bool {
        self.adjacency
            .iter()
            .enumerate()
            .all(|(a, ns)| ns.iter().all(|&b| self.contains_edge(b, a)))
    }

    /// Rooms reachable from `start`, including itself
    pub fn reachable_from(&self, start: RoomId) -> Vec<RoomId> {
        if start >= self.adjacency.len() {
            return Vec::new();
        }
        let mut seen = vec![false; self.adjacency.len()];
        let mut order = Vec::new();
        let mut queue = VecDeque::from([start]);
        seen[start] = true;
        while let Some(room) = queue.pop_front() {
            order.push(room);
            for &next in &self.adjacency[room] {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        order
    }

    /// Check if every room can reach every other room
    pub fn is_connected(&self) -> bool {
        self.adjacency.is_empty() || self.reachable_from(0).len() == self.adjacency.len()
    }
}

/// Room whose center is closest to `point`; ties go to the lowest id
pub fn nearest_room(point: Point, rooms: &[Room]) -> Option<RoomId> {
    let mut best: Option<(RoomId, f64)> = None;
    for room in rooms {
        let d = point.distance(room.center());
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((room.id, d));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::rect::Rect;

    fn rooms() -> Vec<Room> {
        vec![
            Room::new(0, Rect::new(0, 0, 4, 4)),
            Room::new(1, Rect::new(10, 0, 4, 4)),
            Room::new(2, Rect::new(20, 0, 4, 4)),
        ]
    }

    #[test]
    fn test_nearest_room() {
        let rooms = rooms();
        assert_eq!(nearest_room(Point::new(2, 2), &rooms), Some(0));
        assert_eq!(nearest_room(Point::new(13, 1), &rooms), Some(1));
        // Equidistant from rooms 0 and 1: first wins
        assert_eq!(nearest_room(Point::new(7, 2), &rooms), Some(0));
        assert_eq!(nearest_room(Point::new(0, 0), &[]), None);
    }

    #[test]
    fn test_build_dedups_and_skips_self_loops() {
        let rooms = rooms();
        let corridors = [
            Corridor::new(Point::new(2, 2), Point::new(12, 2), Point::new(12, 2)),
            Corridor::new(Point::new(12, 2), Point::new(2, 2), Point::new(2, 2)),
            Corridor::new(Point::new(21, 2), Point::new(22, 2), Point::new(22, 3)),
        ];
        let graph = RoomGraph::build(&rooms, &corridors);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0]);
        assert!(graph.neighbors(2).is_empty());
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.is_symmetric());
        assert!(!graph.is_connected());
    }

    #[test]
    fn test_reachability() {
        let mut graph = RoomGraph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        assert_eq!(graph.reachable_from(0), vec![0, 1, 2]);
        assert!(!graph.is_connected());
        graph.add_edge(3, 2);
        assert!(graph.is_connected());
        assert!(graph.neighbors(99).is_empty());
        assert!(graph.reachable_from(99).is_empty());
    }
}
