//! Rooms and area types
//!
//! A room is a rectangle with a dense, sequential id equal to its index in
//! the dungeon's room list. Rooms are immutable once placed; their area type
//! lives in a separate [`AreaTypes`] mapping.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::fixed::FixedRoom;
use super::rect::{Point, Rect};

/// Index of a room in the dungeon's room list
pub type RoomId = usize;

/// Semantic category of a room
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
#[repr(u8)]
pub enum AreaType {
    Entrance = 0,
    Boss = 1,
    Plaza = 2,
    TreasureRoom = 3,
    SmallRoom = 4,
    Standard = 5,
    /// Not part of any room
    #[default]
    UnKnown = 6,
    Puzzle = 7,
    Shop = 8,
    Rest = 9,
}

impl AreaType {
    /// Map symbol used by the text dump
    pub const fn symbol(&self) -> char {
        match self {
            AreaType::Entrance => 'E',
            AreaType::Boss => 'B',
            AreaType::TreasureRoom => 'T',
            AreaType::Puzzle => 'P',
            AreaType::Shop => '$',
            AreaType::Rest => 'R',
            AreaType::Plaza
            | AreaType::SmallRoom
            | AreaType::Standard
            | AreaType::UnKnown => '.',
        }
    }
}

/// A placed room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub rect: Rect,
    /// Author-defined descriptor, shared with every room built from it
    pub fixed: Option<Arc<FixedRoom>>,
}

impl Room {
    /// Create a randomly sized room
    pub fn new(id: RoomId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            fixed: None,
        }
    }

    /// Create a room from a fixed-room descriptor placed at `origin`
    pub fn fixed(id: RoomId, origin: Point, descriptor: Arc<FixedRoom>) -> Self {
        Self {
            id,
            rect: Rect::new(origin.x, origin.y, descriptor.width, descriptor.height),
            fixed: Some(descriptor),
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Check if this room overlaps a candidate rectangle
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.rect.overlaps(other)
    }
}

/// Total mapping from room id to area type, ordered by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaTypes {
    types: BTreeMap<RoomId, AreaType>,
}

impl AreaTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: RoomId) -> Option<AreaType> {
        self.types.get(&id).copied()
    }

    /// Area type of a room, `UnKnown` when the room has none
    pub fn get_or_unknown(&self, id: RoomId) -> AreaType {
        self.get(id).unwrap_or(AreaType::UnKnown)
    }

    /// Set a room's type, returning the previous one
    pub fn insert(&mut self, id: RoomId, area_type: AreaType) -> Option<AreaType> {
        self.types.insert(id, area_type)
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.types.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of rooms tagged with the given type
    pub fn count(&self, area_type: AreaType) -> usize {
        self.types.values().filter(|t| **t == area_type).count()
    }

    /// Room ids with the given type, in ascending order
    pub fn rooms_of(&self, area_type: AreaType) -> Vec<RoomId> {
        self.types
            .iter()
            .filter(|(_, t)| **t == area_type)
            .map(|(id, _)| *id)
            .collect()
    }
}
