//! Dungeon layout
//!
//! Partition tree, rooms, corridors, the room graph and the final tile grid,
//! plus the pipeline that produces them.

mod area;
mod bsp;
mod connect;
mod corridor;
mod fixed;
mod generation;
mod graph;
mod pathfind;
mod placement;
mod query;
mod rect;
mod room;
mod tile;

pub use area::{AreaTypeAssigner, QuotaDraw};
pub use bsp::{BspNode, BspTree, NodeId, Orientation, SplitLine, SplitParams};
pub use connect::{CorridorConnector, Endpoints, ensure_connected, place_entrance_and_exit};
pub use corridor::{Corridor, connection_point, line_points};
pub use fixed::{FixedRoom, FixedRoomManager};
pub use generation::{Dungeon, DungeonGenerator, generate};
pub use graph::{RoomGraph, nearest_room};
pub use pathfind::PathFinder;
pub use placement::RoomPlacer;
pub use rect::{Point, Rect};
pub use room::{AreaType, AreaTypes, Room, RoomId};
pub use tile::{Tile, TileMap, TileType};
