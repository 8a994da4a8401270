//! Read-only queries over a generated dungeon

use super::bsp::NodeId;
use super::generation::Dungeon;
use super::pathfind::PathFinder;
use super::rect::Point;
use super::room::{AreaType, Room, RoomId};
use super::tile::Tile;

impl Dungeon {
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// First room whose rectangle contains the point
    pub fn room_at(&self, p: Point) -> Option<&Room> {
        self.rooms.iter().find(|r| r.rect.contains(p))
    }

    pub fn is_in_any_room(&self, p: Point) -> bool {
        self.room_at(p).is_some()
    }

    /// Check if any corridor passes through `p`, inside rooms included
    pub fn is_in_corridor(&self, p: Point) -> bool {
        self.corridors.iter().any(|c| c.points().contains(&p))
    }

    pub fn tile(&self, p: Point) -> Option<&Tile> {
        self.tiles.get(p)
    }

    /// Rooms joined to `id` by a corridor; empty for unknown ids
    pub fn adjacent_rooms(&self, id: RoomId) -> &[RoomId] {
        self.graph.neighbors(id)
    }

    pub fn room_center(&self, id: RoomId) -> Option<Point> {
        self.room(id).map(Room::center)
    }

    /// Rooms whose center lies within `range` of `p`
    pub fn rooms_in_range(&self, p: Point, range: f64) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|r| r.center().distance(p) <= range)
            .collect()
    }

    pub fn area_type(&self, id: RoomId) -> Option<AreaType> {
        self.area_types.get(id)
    }

    pub fn is_room_of_type(&self, id: RoomId, area_type: AreaType) -> bool {
        self.area_type(id) == Some(area_type)
    }

    /// Rooms tagged with the given type, by ascending id
    pub fn rooms_of_type(&self, area_type: AreaType) -> Vec<&Room> {
        self.area_types
            .rooms_of(area_type)
            .into_iter()
            .filter_map(|id| self.room(id))
            .collect()
    }

    /// A* path over the corridor graph under the Manhattan-center heuristic
    pub fn find_path(&self, start: RoomId, goal: RoomId) -> Option<Vec<RoomId>> {
        PathFinder::new(&self.rooms, &self.graph).find_path(start, goal)
    }

    /// Path from the entrance room to the exit room
    pub fn entrance_to_exit(&self) -> Option<Vec<RoomId>> {
        self.find_path(self.start_room?, self.end_room?)
    }

    /// Center of a subtree.
    ///
    /// A node with a room uses that room's center. Otherwise the centers of
    /// its two subtrees are averaged, or whichever one exists is used.
    pub fn subtree_center(&self, node: NodeId) -> Option<(f64, f64)> {
        let n = self.tree.node(node)?;
        if let Some(center) = n.room.and_then(|id| self.room_center(id)) {
            return Some((f64::from(center.x), f64::from(center.y)));
        }
        let (left, right) = n.children?;
        match (self.subtree_center(left), self.subtree_center(right)) {
            (Some(a), Some(b)) => Some(((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)),
            (a, b) => a.or(b),
        }
    }

    pub fn render_ascii(&self) -> String {
        self.tiles.render_ascii()
    }
}
