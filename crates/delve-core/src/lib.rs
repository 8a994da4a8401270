//! delve-core: Seeded BSP dungeon generation
//!
//! Splits a rectangle into a binary space partition, places one room per
//! leaf, tags rooms with area types, joins them with L-shaped corridors and
//! rasterizes the result into a tile grid. The same configuration and seed
//! always produce the same dungeon.
//!
//! This crate has no I/O; callers own logging setup and output.

pub mod algorithm;
pub mod config;
pub mod dungeon;
pub mod error;

mod rng;

pub use config::{AreaTypeSetting, CorridorType, DungeonConfig};
pub use dungeon::{Dungeon, DungeonGenerator, generate};
pub use error::{ConfigError, DungeonError, FixedRoomError};
pub use rng::DungeonRng;
