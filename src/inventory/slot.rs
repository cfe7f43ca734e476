use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::{ItemCategory, ItemRef};

/// A single storage cell
///
/// Holds at most one item identity. `count == 0` exactly when the slot
/// is empty; a non-stackable item always has count 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slot {
    item: Option<ItemRef>,
    count: u32,
}

impl Slot {
    /// Creates an empty slot
    pub fn empty() -> Self {
        Slot { item: None, count: 0 }
    }

    /// Creates an occupied slot
    ///
    /// A zero count yields an empty slot, and non-stackable items are
    /// clamped to a count of 1.
    pub fn with_item(item: ItemRef, count: u32) -> Self {
        if count == 0 {
            return Slot::empty();
        }
        let count = if item.stackable { count } else { 1 };
        Slot {
            item: Some(item),
            count,
        }
    }

    pub fn item(&self) -> Option<&ItemRef> {
        self.item.as_ref()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// Key of the held item, if any
    pub fn item_key(&self) -> Option<&str> {
        self.item.as_deref().map(|item| item.id.as_str())
    }

    /// Returns true if both slots hold the same stackable item
    pub fn stacks_with(&self, other: &Slot) -> bool {
        match (&self.item, &other.item) {
            (Some(a), Some(b)) => a.can_stack_with(b),
            _ => false,
        }
    }

    /// Returns true if the stack cannot take another unit
    pub fn is_saturated(&self) -> bool {
        self.count == u32::MAX
    }

    /// Adds one unit of an already-held stackable item
    ///
    /// Returns false and leaves the slot alone if the count would overflow.
    pub(crate) fn increment(&mut self) -> bool {
        debug_assert!(self.item.as_ref().is_some_and(|item| item.stackable));
        match self.count.checked_add(1) {
            Some(count) => {
                self.count = count;
                true
            }
            None => false,
        }
    }

    /// Removes one unit, emptying the slot when none are left
    pub(crate) fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
        if self.count == 0 {
            self.clear();
        }
    }

    pub(crate) fn clear(&mut self) {
        self.item = None;
        self.count = 0;
    }
}

/// Named, singly-purposed equipment slots
///
/// The declaration order is the canonical order used when saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentRole {
    Weapon,
    Shield,
    Helmet,
    Chest,
    Pauldrons,
    ElbowPads,
    KneePads,
    QuickSlot,
}

impl EquipmentRole {
    pub const COUNT: usize = 8;

    /// Every role in canonical order
    pub const ALL: [EquipmentRole; EquipmentRole::COUNT] = [
        EquipmentRole::Weapon,
        EquipmentRole::Shield,
        EquipmentRole::Helmet,
        EquipmentRole::Chest,
        EquipmentRole::Pauldrons,
        EquipmentRole::ElbowPads,
        EquipmentRole::KneePads,
        EquipmentRole::QuickSlot,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// The item category this slot is meant for
    pub fn category(self) -> ItemCategory {
        match self {
            EquipmentRole::Weapon => ItemCategory::Weapon,
            EquipmentRole::Shield => ItemCategory::Shield,
            EquipmentRole::Helmet => ItemCategory::Helmet,
            EquipmentRole::Chest => ItemCategory::Chest,
            EquipmentRole::Pauldrons => ItemCategory::Pauldrons,
            EquipmentRole::ElbowPads => ItemCategory::ElbowPads,
            EquipmentRole::KneePads => ItemCategory::KneePads,
            EquipmentRole::QuickSlot => ItemCategory::Consumable,
        }
    }

    /// Weapon and shield visuals are spawned into a socket; armor toggles meshes
    pub fn is_socketed(self) -> bool {
        matches!(self, EquipmentRole::Weapon | EquipmentRole::Shield)
    }
}

impl fmt::Display for EquipmentRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            EquipmentRole::Weapon => "weapon",
            EquipmentRole::Shield => "shield",
            EquipmentRole::Helmet => "helmet",
            EquipmentRole::Chest => "chest",
            EquipmentRole::Pauldrons => "pauldrons",
            EquipmentRole::ElbowPads => "elbow_pads",
            EquipmentRole::KneePads => "knee_pads",
            EquipmentRole::QuickSlot => "quick_slot",
        };
        f.write_str(name)
    }
}

/// Addresses one slot in a [`SlotStore`](super::SlotStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRef {
    /// General inventory slot by index
    General(usize),
    Equipment(EquipmentRole),
}

impl SlotRef {
    pub fn equipment_role(self) -> Option<EquipmentRole> {
        match self {
            SlotRef::Equipment(role) => Some(role),
            SlotRef::General(_) => None,
        }
    }

    pub fn is_equipment(self) -> bool {
        matches!(self, SlotRef::Equipment(_))
    }
}

impl From<EquipmentRole> for SlotRef {
    fn from(role: EquipmentRole) -> Self {
        SlotRef::Equipment(role)
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SlotRef::General(index) => write!(f, "slot {}", index),
            SlotRef::Equipment(role) => write!(f, "{}", role),
        }
    }
}
