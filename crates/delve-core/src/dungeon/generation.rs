//! Dungeon generation pipeline
//!
//! Runs the stages in a fixed order against a single RNG stream:
//! partition, room placement, area typing, corridors, adjacency, entrance
//! and exit, connectivity repair and finally rasterization.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::DungeonConfig;
use crate::error::DungeonError;
use crate::rng::DungeonRng;

use super::area::AreaTypeAssigner;
use super::bsp::{BspTree, SplitParams};
use super::connect::{CorridorConnector, ensure_connected, place_entrance_and_exit};
use super::corridor::Corridor;
use super::fixed::{FixedRoom, FixedRoomManager};
use super::graph::RoomGraph;
use super::placement::RoomPlacer;
use super::rect::{Point, Rect};
use super::room::{AreaTypes, Room, RoomId};
use super::tile::TileMap;

/// A generated dungeon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub config: DungeonConfig,
    pub tree: BspTree,
    /// Rooms indexed by id
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub graph: RoomGraph,
    pub area_types: AreaTypes,
    pub entrance: Option<Point>,
    pub exit: Option<Point>,
    pub start_room: Option<RoomId>,
    pub end_room: Option<RoomId>,
    /// Whether a repair corridor had to be added between entrance and exit
    pub repaired: bool,
    pub tiles: TileMap,
}

/// Validated generation inputs
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    config: DungeonConfig,
    fixed_rooms: FixedRoomManager,
}

impl DungeonGenerator {
    /// Create a generator with no fixed rooms
    pub fn new(config: DungeonConfig) -> Result<Self, DungeonError> {
        config.validate()?;
        Ok(Self {
            config,
            fixed_rooms: FixedRoomManager::default(),
        })
    }

    /// Make fixed-room descriptors available to placement
    pub fn with_fixed_rooms(mut self, rooms: Vec<FixedRoom>) -> Result<Self, DungeonError> {
        let manager = FixedRoomManager::new(rooms);
        manager.validate()?;
        self.fixed_rooms = manager;
        Ok(self)
    }

    pub fn config(&self) -> &DungeonConfig {
        &self.config
    }

    pub fn fixed_rooms(&self) -> &FixedRoomManager {
        &self.fixed_rooms
    }

    /// Generate from the configured seed
    pub fn generate(&self) -> Dungeon {
        let mut rng = DungeonRng::new(self.config.seed);
        self.generate_with_rng(&mut rng)
    }

    /// Generate from an existing RNG stream
    pub fn generate_with_rng(&self, rng: &mut DungeonRng) -> Dungeon {
        let config = &self.config;
        info!(
            width = config.width,
            height = config.height,
            seed = rng.seed(),
            corridor_type = %config.corridor_type,
            "generating dungeon"
        );

        let bounds = Rect::new(0, 0, config.width, config.height);
        let mut tree = BspTree::partition(
            bounds,
            SplitParams {
                min_split_size: config.min_split_size,
                max_split_depth: config.max_split_depth,
                leaf_cap: config.room_cap(),
            },
            rng,
        );
        debug!(
            nodes = tree.len(),
            leaves = tree.leaves().len(),
            "space partitioned"
        );

        let mut assigner =
            AreaTypeAssigner::new(&config.area_type_settings, config.default_area_type);
        let placer = RoomPlacer::new(
            config.min_room_size,
            config.fixed_room_insertion_chance,
            &self.fixed_rooms,
        );
        let rooms = placer.place(&mut tree, &mut assigner, rng);
        if rooms.is_empty() {
            warn!("no rooms could be placed");
        }

        let area_types = assigner.assign(&mut tree, rng);

        let mut corridors = CorridorConnector::new(&tree, &rooms).connect(config.corridor_type, rng);
        let mut graph = RoomGraph::build(&rooms, &corridors);

        let endpoints = place_entrance_and_exit(&rooms, &area_types);
        let repaired = endpoints.as_ref().is_some_and(|ends| {
            ensure_connected(ends, &rooms, &mut corridors, &mut graph, rng)
        });

        let tiles = TileMap::rasterize(
            config.width,
            config.height,
            &rooms,
            &area_types,
            &corridors,
            endpoints.map(|e| e.entrance),
            endpoints.map(|e| e.exit),
        );

        info!(
            rooms = rooms.len(),
            corridors = corridors.len(),
            edges = graph.edge_count(),
            repaired,
            "dungeon generated"
        );

        Dungeon {
            config: config.clone(),
            tree,
            rooms,
            corridors,
            graph,
            area_types,
            entrance: endpoints.map(|e| e.entrance),
            exit: endpoints.map(|e| e.exit),
            start_room: endpoints.map(|e| e.start_room),
            end_room: endpoints.map(|e| e.end_room),
            repaired,
            tiles,
        }
    }
}

/// Validate `config` and generate a dungeon from its seed
pub fn generate(config: DungeonConfig) -> Result<Dungeon, DungeonError> {
    Ok(DungeonGenerator::new(config)?.generate())
}
