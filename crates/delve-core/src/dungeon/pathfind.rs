//! A* search over the room graph
//!
//! Every edge costs 1 and the heuristic is the Manhattan distance between
//! room centers. The heuristic overestimates hop counts, so paths follow it
//! greedily and are not always the fewest hops. The open set allows stale
//! duplicates; entries for nodes that were already expanded are skipped when
//! popped. Neighbors without a matching room are ignored.

use hashbrown::{HashMap, HashSet};
use tracing::trace;

use crate::algorithm::PriorityQueue;

use super::graph::RoomGraph;
use super::room::{Room, RoomId};

/// Path search over a room graph
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'a> {
    rooms: &'a [Room],
    graph: &'a RoomGraph,
}

impl<'a> PathFinder<'a> {
    pub fn new(rooms: &'a [Room], graph: &'a RoomGraph) -> Self {
        Self { rooms, graph }
    }

    fn heuristic(&self, a: RoomId, b: RoomId) -> i64 {
        i64::from(self.rooms[a].center().manhattan(self.rooms[b].center()))
    }

    /// Room ids from `start` to `goal` inclusive, or `None` if unreachable.
    ///
    /// Invalid ids yield `None`; `start == goal` yields `[start]`.
    pub fn find_path(&self, start: RoomId, goal: RoomId) -> Option<Vec<RoomId>> {
        let n = self.rooms.len();
        if start >= n || goal >= n {
            return None;
        }

        let mut open = PriorityQueue::new();
        let mut came_from: HashMap<RoomId, RoomId> = HashMap::new();
        let mut g_score: HashMap<RoomId, i64> = HashMap::new();
        let mut closed: HashSet<RoomId> = HashSet::new();

        g_score.insert(start, 0);
        open.push(start, self.heuristic(start, goal));

        while let Some(current) = open.pop() {
            if current == goal {
                let path = reconstruct(&came_from, current);
                trace!(start, goal, len = path.len(), "path found");
                return Some(path);
            }
            if !closed.insert(current) {
                continue;
            }

            let current_g = g_score.get(&current).copied().unwrap_or(i64::MAX);
            for &next in self.graph.neighbors(current) {
                if next >= n || closed.contains(&next) {
                    continue;
                }
                let tentative = current_g + 1;
                if g_score.get(&next).is_none_or(|&g| tentative < g) {
                    came_from.insert(next, current);
                    g_score.insert(next, tentative);
                    open.push(next, tentative + self.heuristic(next, goal));
                }
            }
        }

        trace!(start, goal, "no path");
        None
    }
}

fn reconstruct(came_from: &HashMap<RoomId, RoomId>, mut current: RoomId) -> Vec<RoomId> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
