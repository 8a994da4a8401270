//! Fixed (author-defined) rooms
//!
//! A fixed room carries a precomputed walkability grid and entrance/exit
//! offsets. Descriptors are shared read-only data: rooms placed from the
//! same descriptor hold the same `Arc`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::FixedRoomError;
use crate::rng::DungeonRng;

use super::rect::Point;
use super::room::AreaType;

/// Author-defined room descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedRoom {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub area_type: AreaType,
    /// Higher priority wins when several descriptors fit a node
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Entrance offsets relative to the room origin
    #[serde(default)]
    pub entrance_points: Vec<Point>,
    /// Exit offsets relative to the room origin
    #[serde(default)]
    pub exit_points: Vec<Point>,
    /// Walkability grid, indexed `layout[y][x]`
    pub layout: Vec<Vec<bool>>,
}

fn default_priority() -> i32 {
    1
}

impl FixedRoom {
    /// Create a descriptor, checking that the layout matches the size
    pub fn new(
        name: impl Into<String>,
        area_type: AreaType,
        priority: i32,
        layout: Vec<Vec<bool>>,
        entrance_points: Vec<Point>,
        exit_points: Vec<Point>,
    ) -> Result<Self, FixedRoomError> {
        let height = i32::try_from(layout.len()).unwrap_or(i32::MAX);
        let width = layout
            .first()
            .map_or(0, |row| i32::try_from(row.len()).unwrap_or(i32::MAX));
        let room = Self {
            name: name.into(),
            width,
            height,
            area_type,
            priority,
            entrance_points,
            exit_points,
            layout,
        };
        room.validate()?;
        Ok(room)
    }

    /// Parse a layout from text rows: `.` is walkable, anything else is wall
    pub fn parse_layout(rows: &[&str]) -> Vec<Vec<bool>> {
        rows.iter()
            .map(|row| row.chars().map(|c| c == '.').collect())
            .collect()
    }

    /// Check the descriptor's internal consistency
    pub fn validate(&self) -> Result<(), FixedRoomError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(FixedRoomError::EmptyFootprint {
                name: self.name.clone(),
                width: self.width,
                height: self.height,
            });
        }

        let rows = self.layout.len();
        let ragged = self
            .layout
            .iter()
            .find(|row| row.len() != self.width as usize);
        if rows != self.height as usize || ragged.is_some() {
            return Err(FixedRoomError::LayoutMismatch {
                name: self.name.clone(),
                width: self.width,
                height: self.height,
                rows,
                cols: ragged.or(self.layout.first()).map_or(0, Vec::len),
            });
        }

        for p in self.entrance_points.iter().chain(&self.exit_points) {
            if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
                return Err(FixedRoomError::PointOutOfBounds {
                    name: self.name.clone(),
                    x: p.x,
                    y: p.y,
                });
            }
        }

        Ok(())
    }

    /// Walkability at a local offset; out-of-range cells are walls
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.layout
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Entrance and exit offsets, entrances first
    pub fn connection_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.entrance_points.iter().chain(&self.exit_points).copied()
    }

    /// Check if the descriptor fits in a `width` x `height` area
    pub fn fits(&self, width: i32, height: i32) -> bool {
        self.width <= width && self.height <= height
    }
}

/// Catalogue of fixed-room descriptors available to a generation run
#[derive(Debug, Clone, Default)]
pub struct FixedRoomManager {
    rooms: Vec<Arc<FixedRoom>>,
}

impl FixedRoomManager {
    pub fn new(rooms: Vec<FixedRoom>) -> Self {
        Self {
            rooms: rooms.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn rooms(&self) -> &[Arc<FixedRoom>] {
        &self.rooms
    }

    /// Validate every descriptor
    pub fn validate(&self) -> Result<(), FixedRoomError> {
        self.rooms.iter().try_for_each(|r| r.validate())
    }

    /// Pick a descriptor for a `width` x `height` node of the given area type.
    ///
    /// Among descriptors that fit and match the type, only the highest
    /// priority ones are candidates; ties are broken uniformly at random.
    /// Returns `None` without drawing when nothing matches.
    pub fn select(
        &self,
        width: i32,
        height: i32,
        area_type: AreaType,
        rng: &mut DungeonRng,
    ) -> Option<Arc<FixedRoom>> {
        let suitable: Vec<&Arc<FixedRoom>> = self
            .rooms
            .iter()
            .filter(|r| r.fits(width, height) && r.area_type == area_type)
            .collect();

        let highest = suitable.iter().map(|r| r.priority).max()?;
        let best: Vec<&Arc<FixedRoom>> = suitable
            .into_iter()
            .filter(|r| r.priority == highest)
            .collect();

        rng.choose(&best).map(|r| Arc::clone(r))
    }
}
