//! Corridor connection strategies
//!
//! `direct` and `bsp` walk the partition tree bottom-up and join the two
//! children's representative rooms at every internal node. `mst` ignores
//! the tree and joins rooms along a minimum spanning tree of their centers.
//!
//! After connecting, the entrance and exit are placed and a single repair
//! corridor is dug if the exit cannot be reached from the entrance.

use tracing::{debug, trace, warn};

use crate::algorithm::{Edge, minimum_spanning_tree};
use crate::config::CorridorType;
use crate::rng::DungeonRng;

use super::bsp::{BspTree, NodeId};
use super::corridor::{Corridor, connection_point};
use super::graph::RoomGraph;
use super::pathfind::PathFinder;
use super::rect::Point;
use super::room::{AreaType, AreaTypes, Room, RoomId};

/// Joins rooms with corridors
#[derive(Debug, Clone, Copy)]
pub struct CorridorConnector<'a> {
    tree: &'a BspTree,
    rooms: &'a [Room],
}

impl<'a> CorridorConnector<'a> {
    pub fn new(tree: &'a BspTree, rooms: &'a [Room]) -> Self {
        Self { tree, rooms }
    }

    /// Connect rooms using the given strategy
    pub fn connect(&self, strategy: CorridorType, rng: &mut DungeonRng) -> Vec<Corridor> {
        let corridors = match strategy {
            CorridorType::Direct => self.connect_siblings(false, rng),
            CorridorType::Bsp => self.connect_siblings(true, rng),
            CorridorType::Mst => self.connect_mst(rng),
        };
        debug!(%strategy, corridors = corridors.len(), "rooms connected");
        corridors
    }

    /// One corridor per internal node whose children both hold a room
    fn connect_siblings(&self, across_split: bool, rng: &mut DungeonRng) -> Vec<Corridor> {
        let mut corridors = Vec::new();
        self.connect_node(self.tree.root(), across_split, &mut corridors, rng);
        corridors
    }

    fn connect_node(
        &self,
        id: NodeId,
        across_split: bool,
        corridors: &mut Vec<Corridor>,
        rng: &mut DungeonRng,
    ) {
        let Some((left, right)) = self.tree.children(id) else {
            return;
        };
        self.connect_node(left, across_split, corridors, rng);
        self.connect_node(right, across_split, corridors, rng);

        let (Some(a), Some(b)) = (self.tree.room(left), self.tree.room(right)) else {
            return;
        };
        let from = connection_point(&self.rooms[a], rng);
        let to = connection_point(&self.rooms[b], rng);
        if across_split && let Some(split) = self.tree.node(id).and_then(|n| n.split) {
            trace!(
                node = id,
                orientation = %split.orientation,
                position = split.position,
                "joining across split"
            );
        }
        debug!(node = id, from = a, to = b, "siblings joined");
        corridors.push(Corridor::between(from, to, rng));
    }

    /// One corridor per edge of the minimum spanning tree over room centers
    fn connect_mst(&self, rng: &mut DungeonRng) -> Vec<Corridor> {
        let n = self.rooms.len();
        let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in i + 1..n {
                let weight = self.rooms[i].center().distance(self.rooms[j].center());
                edges.push(Edge::new(i, j, weight));
            }
        }

        minimum_spanning_tree(n, edges)
            .into_iter()
            .map(|edge| {
                let from = connection_point(&self.rooms[edge.from], rng);
                let to = connection_point(&self.rooms[edge.to], rng);
                debug!(
                    from = edge.from,
                    to = edge.to,
                    weight = edge.weight,
                    "spanning edge joined"
                );
                Corridor::between(from, to, rng)
            })
            .collect()
    }
}

/// Where the player enters and leaves the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub start_room: RoomId,
    pub end_room: RoomId,
    pub entrance: Point,
    pub exit: Point,
}

/// Pick the entrance and exit rooms.
///
/// The entrance is the first `Entrance` room, falling back to the leftmost
/// room. The exit is the first `Boss` room, falling back to the rightmost.
/// Both points are room centers. `None` when there are no rooms.
pub fn place_entrance_and_exit(rooms: &[Room], area_types: &AreaTypes) -> Option<Endpoints> {
    let of_type = |t: AreaType| rooms.iter().find(|r| area_types.get(r.id) == Some(t));

    let start = of_type(AreaType::Entrance).or_else(|| {
        rooms
            .iter()
            .reduce(|best, r| if r.rect.x < best.rect.x { r } else { best })
    })?;
    let end = of_type(AreaType::Boss).or_else(|| {
        rooms
            .iter()
            .reduce(|best, r| if r.rect.x > best.rect.x { r } else { best })
    })?;

    let endpoints = Endpoints {
        start_room: start.id,
        end_room: end.id,
        entrance: start.center(),
        exit: end.center(),
    };
    debug!(
        start = endpoints.start_room,
        end = endpoints.end_room,
        "entrance and exit placed"
    );
    Some(endpoints)
}

/// Dig a corridor from entrance to exit if the graph does not connect them.
///
/// The graph is rebuilt after the repair. Returns whether a corridor was
/// added.
pub fn ensure_connected(
    endpoints: &Endpoints,
    rooms: &[Room],
    corridors: &mut Vec<Corridor>,
    graph: &mut RoomGraph,
    rng: &mut DungeonRng,
) -> bool {
    let finder = PathFinder::new(rooms, graph);
    if finder
        .find_path(endpoints.start_room, endpoints.end_room)
        .is_some()
    {
        return false;
    }

    warn!(
        start = endpoints.start_room,
        end = endpoints.end_room,
        "exit unreachable, adding repair corridor"
    );
    corridors.push(Corridor::between(endpoints.entrance, endpoints.exit, rng));
    *graph = RoomGraph::build(rooms, corridors);
    true
}
