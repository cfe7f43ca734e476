//! Drag-and-drop between inventory slots
//!
//! A drag only records where it started. Nothing changes until the drop,
//! which becomes exactly one engine call: `swap_slots` onto a slot, or
//! `remove_item` onto the trash.

use tracing::debug;

use crate::inventory::{InventoryEngine, InventoryError, SlotRef, SlotStore};
use crate::save::KeyValueStore;

/// Where a dragged item can be released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Slot(SlotRef),
    Trash,
}

impl From<SlotRef> for DropTarget {
    fn from(slot: SlotRef) -> Self {
        DropTarget::Slot(slot)
    }
}

/// Which placements the UI allows before asking the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementPolicy {
    /// Equipment slots only accept their own category, in both directions
    #[default]
    Strict,
    /// Forward every drop as-is
    Trusting,
}

/// What a drop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Swapped,
    Removed,
    /// Policy refused the placement; nothing changed
    Rejected,
    /// There was no drag in progress
    NoDrag,
}

/// Tracks the slot being dragged
#[derive(Debug, Clone, Default)]
pub struct DragController {
    policy: PlacementPolicy,
    source: Option<SlotRef>,
}

impl DragController {
    pub fn new(policy: PlacementPolicy) -> Self {
        DragController { policy, source: None }
    }

    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// The slot currently being dragged
    pub fn dragging(&self) -> Option<SlotRef> {
        self.source
    }

    /// Starts dragging from `source`; empty slots can't be picked up
    pub fn begin_drag(&mut self, source: SlotRef, slots: &SlotStore) -> bool {
        let occupied = slots.get(source).is_some_and(|slot| !slot.is_empty());
        self.source = occupied.then_some(source);
        occupied
    }

    /// Drag released outside any target
    pub fn cancel_drag(&mut self) {
        self.source = None;
    }

    /// Releases the drag on `target`
    pub fn drop_on<S: KeyValueStore>(
        &mut self,
        target: impl Into<DropTarget>,
        engine: &mut InventoryEngine<'_, S>,
    ) -> Result<DropOutcome, InventoryError> {
        let Some(source) = self.source.take() else {
            return Ok(DropOutcome::NoDrag);
        };

        match target.into() {
            DropTarget::Trash => {
                engine.remove_item(source)?;
                Ok(DropOutcome::Removed)
            }
            DropTarget::Slot(target) => {
                if !self.allows(source, target, engine.slots()) {
                    debug!(%source, %target, "Drop refused by placement policy");
                    return Ok(DropOutcome::Rejected);
                }
                engine.swap_slots(source, target)?;
                Ok(DropOutcome::Swapped)
            }
        }
    }

    /// Checks both directions of the exchange against equipment categories
    pub fn allows(&self, source: SlotRef, target: SlotRef, slots: &SlotStore) -> bool {
        if self.policy == PlacementPolicy::Trusting {
            return true;
        }

        let fits = |moving: SlotRef, into: SlotRef| {
            let Some(role) = into.equipment_role() else {
                return true;
            };
            match slots.get(moving).and_then(|slot| slot.item()) {
                Some(item) => item.category == role.category(),
                None => true,
            }
        };

        fits(source, target) && fits(target, source)
    }
}
