//! Error types
//!
//! Generation itself never fails: degenerate outcomes (no split, no room,
//! no path) are ordinary results. Errors only come from validating inputs
//! before a run starts.

use thiserror::Error;

/// Invalid configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Dungeon bounds must be positive, got {width}x{height}")]
    EmptyBounds { width: i32, height: i32 },

    #[error("{field} must be at least 1, got {value}")]
    NonPositive { field: &'static str, value: i32 },

    #[error("max_split_depth must not be negative, got {0}")]
    NegativeDepth(i32),

    #[error("Fixed room insertion chance must be within [0, 1], got {0}")]
    InvalidChance(f64),

    #[error("Desired count for {area_type} must not be negative, got {count}")]
    NegativeCount { area_type: String, count: i32 },
}

/// Malformed fixed-room descriptor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixedRoomError {
    #[error("Fixed room '{name}' has an empty footprint ({width}x{height})")]
    EmptyFootprint {
        name: String,
        width: i32,
        height: i32,
    },

    #[error("Fixed room '{name}' layout is {rows}x{cols}, expected {height}x{width}")]
    LayoutMismatch {
        name: String,
        width: i32,
        height: i32,
        rows: usize,
        cols: usize,
    },

    #[error("Fixed room '{name}' point ({x}, {y}) lies outside its footprint")]
    PointOutOfBounds { name: String, x: i32, y: i32 },
}

/// Any input error that prevents a generation run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DungeonError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid fixed room: {0}")]
    FixedRoom(#[from] FixedRoomError),
}
