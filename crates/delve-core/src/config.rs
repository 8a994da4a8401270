//! Generation configuration
//!
//! All values are fixed for the duration of one run. Missing fields in a
//! serialized configuration fall back to the defaults below.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::dungeon::AreaType;
use crate::error::ConfigError;

/// Corridor connection strategy
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CorridorType {
    /// Connect sibling representatives through their centers
    Direct,
    /// Connect sibling representatives across the recorded split line
    Bsp,
    /// Minimum spanning tree over room centers
    #[default]
    Mst,
}

/// Desired number of rooms of one area type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaTypeSetting {
    pub area_type: AreaType,
    pub count: i32,
}

impl AreaTypeSetting {
    pub const fn new(area_type: AreaType, count: i32) -> Self {
        Self { area_type, count }
    }
}

/// Dungeon generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub width: i32,
    pub height: i32,
    pub min_room_size: i32,
    pub min_split_size: i32,
    pub max_split_depth: i32,
    pub corridor_type: CorridorType,
    pub seed: u64,
    /// Upper bound on BSP leaves (and so on rooms); 0 means unbounded
    pub room_count: usize,
    pub fixed_room_insertion_chance: f64,
    pub area_type_settings: Vec<AreaTypeSetting>,
    pub default_area_type: AreaType,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 80,
            min_room_size: 10,
            min_split_size: 20,
            max_split_depth: 5,
            corridor_type: CorridorType::Mst,
            seed: 98,
            room_count: 15,
            fixed_room_insertion_chance: 0.2,
            area_type_settings: vec![
                AreaTypeSetting::new(AreaType::Entrance, 1),
                AreaTypeSetting::new(AreaType::Boss, 1),
                AreaTypeSetting::new(AreaType::Plaza, 2),
                AreaTypeSetting::new(AreaType::TreasureRoom, 2),
                AreaTypeSetting::new(AreaType::SmallRoom, 5),
            ],
            default_area_type: AreaType::Standard,
        }
    }
}

impl DungeonConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::EmptyBounds {
                width: self.width,
                height: self.height,
            });
        }
        if self.min_room_size < 1 {
            return Err(ConfigError::NonPositive {
                field: "min_room_size",
                value: self.min_room_size,
            });
        }
        if self.min_split_size < 1 {
            return Err(ConfigError::NonPositive {
                field: "min_split_size",
                value: self.min_split_size,
            });
        }
        if self.max_split_depth < 0 {
            return Err(ConfigError::NegativeDepth(self.max_split_depth));
        }
        if !(0.0..=1.0).contains(&self.fixed_room_insertion_chance) {
            return Err(ConfigError::InvalidChance(self.fixed_room_insertion_chance));
        }
        if let Some(bad) = self.area_type_settings.iter().find(|s| s.count < 0) {
            return Err(ConfigError::NegativeCount {
                area_type: bad.area_type.to_string(),
                count: bad.count,
            });
        }
        Ok(())
    }

    /// Room-count cap, `None` when unbounded
    pub fn room_cap(&self) -> Option<usize> {
        (self.room_count > 0).then_some(self.room_count)
    }
}
