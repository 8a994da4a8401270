//! Room placement
//!
//! Every leaf of the partition tree gets at most one room, either a random
//! rectangle inset from the leaf's border or a fixed room picked from the
//! catalogue. Internal nodes are then given a representative room drawn from
//! their children.

use tracing::{debug, trace};

use crate::rng::DungeonRng;

use super::area::{AreaTypeAssigner, QuotaDraw};
use super::bsp::{BspTree, NodeId};
use super::fixed::FixedRoomManager;
use super::rect::{Point, Rect};
use super::room::Room;

/// Random rooms take at most this fraction of their leaf, per axis
const MAX_ROOM_FRACTION: f64 = 0.75;

/// Places rooms into the leaves of a partition tree
#[derive(Debug)]
pub struct RoomPlacer<'a> {
    min_room_size: i32,
    fixed_room_insertion_chance: f64,
    fixed_rooms: &'a FixedRoomManager,
}

impl<'a> RoomPlacer<'a> {
    pub fn new(
        min_room_size: i32,
        fixed_room_insertion_chance: f64,
        fixed_rooms: &'a FixedRoomManager,
    ) -> Self {
        Self {
            min_room_size,
            fixed_room_insertion_chance,
            fixed_rooms,
        }
    }

    /// Place rooms into the tree's leaves and pick representatives.
    ///
    /// Leaves are visited in post-order. Room ids are assigned densely in
    /// creation order.
    pub fn place(
        &self,
        tree: &mut BspTree,
        assigner: &mut AreaTypeAssigner,
        rng: &mut DungeonRng,
    ) -> Vec<Room> {
        let mut rooms = Vec::new();
        let root = tree.root();
        self.place_node(tree, root, &mut rooms, assigner, rng);
        debug!(rooms = rooms.len(), "rooms placed");
        rooms
    }

    fn place_node(
        &self,
        tree: &mut BspTree,
        id: NodeId,
        rooms: &mut Vec<Room>,
        assigner: &mut AreaTypeAssigner,
        rng: &mut DungeonRng,
    ) {
        let Some((left, right)) = tree.children(id) else {
            self.place_leaf(tree, id, rooms, assigner, rng);
            return;
        };

        self.place_node(tree, left, rooms, assigner, rng);
        self.place_node(tree, right, rooms, assigner, rng);

        let representative = match (tree.room(left), tree.room(right)) {
            (Some(l), Some(r)) => Some(if rng.coin() { l } else { r }),
            (l, r) => l.or(r),
        };
        if let Some(node) = tree.node_mut(id) {
            node.room = representative;
        }
    }

    fn place_leaf(
        &self,
        tree: &mut BspTree,
        id: NodeId,
        rooms: &mut Vec<Room>,
        assigner: &mut AreaTypeAssigner,
        rng: &mut DungeonRng,
    ) {
        let Some(bounds) = tree.node(id).map(|n| n.rect) else {
            return;
        };

        let mut draw: Option<QuotaDraw> = None;
        let room = if !self.fixed_rooms.is_empty() && rng.chance(self.fixed_room_insertion_chance)
        {
            let quota_draw = assigner.draw(rng);
            draw = Some(quota_draw);
            match self.fixed_rooms.select(
                bounds.width,
                bounds.height,
                quota_draw.area_type,
                rng,
            ) {
                Some(descriptor) => {
                    let origin = Point::new(
                        bounds.x + rng.range(0, bounds.width - descriptor.width + 1),
                        bounds.y + rng.range(0, bounds.height - descriptor.height + 1),
                    );
                    let candidate = Room::fixed(rooms.len(), origin, descriptor);
                    if rooms.iter().any(|r| r.overlaps(&candidate.rect)) {
                        trace!(node = id, "fixed room overlaps, skipped");
                        None
                    } else {
                        Some(candidate)
                    }
                }
                None => self.random_room(bounds, rooms, rng),
            }
        } else {
            self.random_room(bounds, rooms, rng)
        };

        match (room, draw) {
            (Some(room), draw) => {
                let room_id = room.id;
                debug!(node = id, room = room_id, fixed = room.is_fixed(), "room placed");
                rooms.push(room);
                if let Some(node) = tree.node_mut(id) {
                    node.room = Some(room_id);
                    node.area_type = draw.map(|d| d.area_type);
                }
                if let Some(draw) = draw {
                    assigner.preassign(room_id, draw);
                }
            }
            (None, Some(draw)) => assigner.refund(draw),
            (None, None) => {}
        }
    }

    /// Random rectangle inset by at least one cell from the leaf's border
    fn random_room(&self, bounds: Rect, rooms: &[Room], rng: &mut DungeonRng) -> Option<Room> {
        let max_width = (f64::from(bounds.width) * MAX_ROOM_FRACTION).ceil() as i32;
        let max_height = (f64::from(bounds.height) * MAX_ROOM_FRACTION).ceil() as i32;
        let width = rng.range(self.min_room_size, max_width);
        let height = rng.range(self.min_room_size, max_height);
        let x = bounds.x + rng.range(1, bounds.width - width - 1);
        let y = bounds.y + rng.range(1, bounds.height - height - 1);

        let rect = Rect::new(x, y, width, height);
        if rooms.iter().any(|r| r.overlaps(&rect)) {
            trace!(?rect, "random room overlaps, skipped");
            return None;
        }
        Some(Room::new(rooms.len(), rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AreaTypeSetting;
    use crate::dungeon::bsp::SplitParams;
    use crate::dungeon::fixed::FixedRoom;
    use crate::dungeon::room::AreaType;

    fn partition(seed: u64) -> (BspTree, DungeonRng) {
        let mut rng = DungeonRng::new(seed);
        let tree = BspTree::partition(
            Rect::new(0, 0, 80, 80),
            SplitParams {
                min_split_size: 20,
                max_split_depth: 5,
                leaf_cap: None,
            },
            &mut rng,
        );
        (tree, rng)
    }

    #[test]
    fn test_random_rooms_stay_inside_leaves() {
        let empty = FixedRoomManager::default();
        let placer = RoomPlacer::new(10, 0.0, &empty);
        for seed in 0..10 {
            let (mut tree, mut rng) = partition(seed);
            let mut assigner = AreaTypeAssigner::new(&[], AreaType::Standard);
            let rooms = placer.place(&mut tree, &mut assigner, &mut rng);
            assert!(!rooms.is_empty());

            for (i, room) in rooms.iter().enumerate() {
                assert_eq!(room.id, i);
                assert!(room.rect.width >= 10);
                assert!(room.rect.height >= 10);
            }
            for leaf in tree.leaves() {
                let node = tree.node(leaf).unwrap();
                if let Some(room) = node.room {
                    let rect = rooms[room].rect;
                    assert!(node.rect.contains_rect(&rect), "{rect:?} in {:?}", node.rect);
                    assert!(rect.x > node.rect.x && rect.y > node.rect.y);

                    let max_width = (f64::from(node.rect.width) * 0.75).ceil() as i32;
                    let max_height = (f64::from(node.rect.height) * 0.75).ceil() as i32;
                    if max_width > 10 {
                        assert!(rect.width < max_width, "{rect:?} in {:?}", node.rect);
                    }
                    if max_height > 10 {
                        assert!(rect.height < max_height, "{rect:?} in {:?}", node.rect);
                    }
                }
            }
        }
    }

    #[test]
    fn test_representatives_come_from_children() {
        let empty = FixedRoomManager::default();
        let placer = RoomPlacer::new(10, 0.0, &empty);
        let (mut tree, mut rng) = partition(7);
        let mut assigner = AreaTypeAssigner::new(&[], AreaType::Standard);
        placer.place(&mut tree, &mut assigner, &mut rng);

        for node in tree.nodes() {
            if let Some((l, r)) = node.children {
                let (lr, rr) = (tree.room(l), tree.room(r));
                if lr.is_some() || rr.is_some() {
                    let rep = node.room.unwrap();
                    assert!(Some(rep) == lr || Some(rep) == rr);
                }
            }
        }
    }

    #[test]
    fn test_fixed_rooms_used_when_always_inserted() {
        let layout = FixedRoom::parse_layout(&["#..#", "....", "....", "#..#"]);
        let descriptors = FixedRoomManager::new(vec![
            FixedRoom::new("vault", AreaType::Boss, 1, layout.clone(), vec![], vec![])
                .unwrap(),
            FixedRoom::new("hall", AreaType::Standard, 1, layout, vec![], vec![]).unwrap(),
        ]);
        let placer = RoomPlacer::new(10, 1.0, &descriptors);
        let (mut tree, mut rng) = partition(3);
        let mut assigner = AreaTypeAssigner::new(
            &[AreaTypeSetting::new(AreaType::Boss, 1)],
            AreaType::Standard,
        );
        let rooms = placer.place(&mut tree, &mut assigner, &mut rng);

        // Every leaf draws: one boss, then the default type
        assert!(rooms.iter().all(Room::is_fixed));
        let bosses = tree
            .leaves()
            .into_iter()
            .filter(|&l| tree.node(l).unwrap().area_type == Some(AreaType::Boss))
            .count();
        assert_eq!(bosses, 1);
        for room in &rooms {
            assert_eq!((room.rect.width, room.rect.height), (4, 4));
        }
    }

    #[test]
    fn test_missing_descriptor_falls_back_to_random_room() {
        let layout = FixedRoom::parse_layout(&["..", ".."]);
        let descriptors = FixedRoomManager::new(vec![
            FixedRoom::new("closet", AreaType::Shop, 1, layout, vec![], vec![]).unwrap(),
        ]);
        let placer = RoomPlacer::new(10, 1.0, &descriptors);
        let (mut tree, mut rng) = partition(5);
        let mut assigner = AreaTypeAssigner::new(
            &[AreaTypeSetting::new(AreaType::Plaza, 1)],
            AreaType::Standard,
        );
        let rooms = placer.place(&mut tree, &mut assigner, &mut rng);

        // No descriptor for Plaza or Standard: every room is random but keeps its draw
        assert!(rooms.iter().all(|r| !r.is_fixed()));
        let plaza = tree
            .leaves()
            .into_iter()
            .filter(|&l| tree.node(l).unwrap().area_type == Some(AreaType::Plaza))
            .count();
        assert_eq!(plaza, 1);
        assert_eq!(assigner.remaining(AreaType::Plaza), 0);
    }
}
