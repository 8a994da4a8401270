//! Area type assignment
//!
//! Types are handed out from a quota built from the configured settings.
//! Assignment happens in two stages. During room placement a leaf may draw a
//! type up front to choose a matching fixed room. Once every room exists,
//! [`AreaTypeAssigner::assign`] forces the root's representative to be the
//! entrance, gives every untyped leaf room a type from the remaining quota,
//! and lets untyped representatives inherit their parent's type.

use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::config::AreaTypeSetting;
use crate::rng::DungeonRng;

use super::bsp::{BspTree, NodeId};
use super::room::{AreaType, AreaTypes, RoomId};

/// A type drawn from the quota
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaDraw {
    pub area_type: AreaType,
    /// False when the quota was exhausted and the default type was used
    counted: bool,
}

/// Hands out area types from a finite quota
#[derive(Debug, Clone)]
pub struct AreaTypeAssigner {
    /// Remaining count per type, in order of first appearance in the settings
    quota: Vec<(AreaType, i32)>,
    default_type: AreaType,
    types: AreaTypes,
    /// Rooms whose current type was taken out of the quota
    counted: HashSet<RoomId>,
}

impl AreaTypeAssigner {
    /// Build the quota from the settings, summing repeated types.
    ///
    /// One entrance is reserved immediately; the root's representative room
    /// always becomes the entrance.
    pub fn new(settings: &[AreaTypeSetting], default_type: AreaType) -> Self {
        let mut quota: Vec<(AreaType, i32)> = Vec::new();
        for setting in settings {
            match quota.iter_mut().find(|(t, _)| *t == setting.area_type) {
                Some((_, count)) => *count += setting.count,
                None => quota.push((setting.area_type, setting.count)),
            }
        }

        let mut assigner = Self {
            quota,
            default_type,
            types: AreaTypes::new(),
            counted: HashSet::new(),
        };
        if let Some(count) = assigner.quota_mut(AreaType::Entrance) {
            *count -= 1;
        }
        assigner
    }

    fn quota_mut(&mut self, area_type: AreaType) -> Option<&mut i32> {
        self.quota
            .iter_mut()
            .find(|(t, _)| *t == area_type)
            .map(|(_, count)| count)
    }

    /// Remaining quota for a type
    pub fn remaining(&self, area_type: AreaType) -> i32 {
        self.quota
            .iter()
            .find(|(t, _)| *t == area_type)
            .map_or(0, |(_, count)| *count)
    }

    pub fn default_type(&self) -> AreaType {
        self.default_type
    }

    /// Draw uniformly among types with quota left, or the default type
    pub fn draw(&mut self, rng: &mut DungeonRng) -> QuotaDraw {
        let available: Vec<AreaType> = self
            .quota
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(t, _)| *t)
            .collect();

        match rng.choose(&available).copied() {
            Some(area_type) => {
                if let Some(count) = self.quota_mut(area_type) {
                    *count -= 1;
                }
                QuotaDraw {
                    area_type,
                    counted: true,
                }
            }
            None => QuotaDraw {
                area_type: self.default_type,
                counted: false,
            },
        }
    }

    /// Return an unused draw to the quota
    pub fn refund(&mut self, draw: QuotaDraw) {
        if !draw.counted {
            return;
        }
        if let Some(count) = self.quota_mut(draw.area_type) {
            *count += 1;
        }
    }

    /// Record a type drawn for a room during placement
    pub fn preassign(&mut self, room: RoomId, draw: QuotaDraw) {
        self.types.insert(room, draw.area_type);
        if draw.counted {
            self.counted.insert(room);
        }
    }

    /// Finish typing every room of the tree and return the mapping.
    ///
    /// Node `area_type` fields are updated to match the final mapping.
    pub fn assign(mut self, tree: &mut BspTree, rng: &mut DungeonRng) -> AreaTypes {
        let root = tree.root();
        let Some(entrance) = tree.room(root) else {
            debug!("no rooms placed, nothing to type");
            return self.types;
        };

        let previous = self.types.insert(entrance, AreaType::Entrance);
        if self.counted.remove(&entrance)
            && let Some(area_type) = previous
        {
            self.refund(QuotaDraw {
                area_type,
                counted: true,
            });
        }
        debug!(room = entrance, "entrance room forced at root");

        self.assign_node(tree, root, rng);

        for id in tree.post_order() {
            if let Some(node) = tree.node_mut(id)
                && let Some(room) = node.room
            {
                node.area_type = self.types.get(room);
            }
        }
        self.types
    }

    fn assign_node(&mut self, tree: &BspTree, id: NodeId, rng: &mut DungeonRng) {
        match tree.children(id) {
            Some((left, right)) => {
                self.assign_node(tree, left, rng);
                self.assign_node(tree, right, rng);

                let Some(room) = tree.room(id) else { return };
                let parent_type = match self.types.get(room) {
                    Some(t) => t,
                    None => {
                        self.types.insert(room, self.default_type);
                        self.default_type
                    }
                };
                // Children are typed by their own visit first, so on trees
                // from the partitioner this inserts nothing; fill only
                for child in [left, right] {
                    if let Some(child_room) = tree.room(child)
                        && !self.types.contains(child_room)
                    {
                        self.types.insert(child_room, parent_type);
                    }
                }
            }
            None => {
                if let Some(room) = tree.room(id)
                    && !self.types.contains(room)
                {
                    let draw = self.draw(rng);
                    trace!(room, area_type = %draw.area_type, "leaf typed");
                    self.types.insert(room, draw.area_type);
                }
            }
        }
    }
}
