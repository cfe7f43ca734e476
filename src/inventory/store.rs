use super::error::InventoryError;
use super::slot::{EquipmentRole, Slot, SlotRef};
use crate::item::ItemRef;

/// Fixed-capacity slot storage
///
/// An ordered run of general slots plus one slot per equipment role.
/// General slot indices never move (no compaction), and the store
/// never grows or shrinks after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotStore {
    general: Vec<Slot>,
    equipment: [Slot; EquipmentRole::COUNT],
}

impl SlotStore {
    /// Creates a new empty store with `capacity` general slots
    pub fn new(capacity: usize) -> Self {
        SlotStore {
            general: vec![Slot::empty(); capacity],
            equipment: Default::default(),
        }
    }

    /// Number of general slots
    pub fn capacity(&self) -> usize {
        self.general.len()
    }

    /// General slots in index order
    pub fn general(&self) -> &[Slot] {
        &self.general
    }

    pub fn equipment(&self, role: EquipmentRole) -> &Slot {
        &self.equipment[role.index()]
    }

    /// Returns the slot behind a reference, or None if the index is out of range
    pub fn get(&self, slot: SlotRef) -> Option<&Slot> {
        match slot {
            SlotRef::General(index) => self.general.get(index),
            SlotRef::Equipment(role) => Some(&self.equipment[role.index()]),
        }
    }

    pub(crate) fn equipment_mut(&mut self, role: EquipmentRole) -> &mut Slot {
        &mut self.equipment[role.index()]
    }

    pub(crate) fn get_mut(&mut self, slot: SlotRef) -> Result<&mut Slot, InventoryError> {
        let capacity = self.capacity();
        match slot {
            SlotRef::General(index) => self
                .general
                .get_mut(index)
                .ok_or(InventoryError::InvalidSlot { index, capacity }),
            SlotRef::Equipment(role) => Ok(&mut self.equipment[role.index()]),
        }
    }

    /// Checks that a reference points inside this store
    pub fn validate(&self, slot: SlotRef) -> Result<(), InventoryError> {
        match slot {
            SlotRef::General(index) if index >= self.capacity() => Err(InventoryError::InvalidSlot {
                index,
                capacity: self.capacity(),
            }),
            _ => Ok(()),
        }
    }

    /// Every slot reference: general slots in index order, then equipment in canonical order
    pub fn slot_refs(&self) -> impl Iterator<Item = SlotRef> + '_ {
        (0..self.capacity())
            .map(SlotRef::General)
            .chain(EquipmentRole::ALL.into_iter().map(SlotRef::Equipment))
    }

    /// Returns true if no slot holds anything
    pub fn is_empty(&self) -> bool {
        self.general.iter().chain(self.equipment.iter()).all(Slot::is_empty)
    }

    /// Returns true if every general slot is occupied
    pub fn is_full(&self) -> bool {
        self.general.iter().all(|slot| !slot.is_empty())
    }

    /// Counts how many of a specific item are held, equipment included (saturating)
    pub fn count_item(&self, item_key: &str) -> u32 {
        self.general
            .iter()
            .chain(self.equipment.iter())
            .filter(|slot| slot.item_key() == Some(item_key))
            .fold(0u32, |total, slot| total.saturating_add(slot.count()))
    }

    /// Finds the first empty general slot index
    pub fn find_empty_slot(&self) -> Option<usize> {
        self.general.iter().position(Slot::is_empty)
    }

    /// Finds the first general slot already stacking this item with room for one more
    pub fn find_stackable_slot(&self, item: &ItemRef) -> Option<usize> {
        if !item.stackable {
            return None;
        }

        self.general.iter().position(|slot| {
            !slot.is_saturated() && slot.item().is_some_and(|held| held.id == item.id)
        })
    }

    /// Places one unit of `item` into the general slots
    ///
    /// Stacks onto an existing slot first, then falls back to the first
    /// empty slot. Returns the index used, or None if nothing fit (in
    /// which case the store is unchanged).
    pub(crate) fn insert_one(&mut self, item: &ItemRef) -> Option<usize> {
        if let Some(index) = self.find_stackable_slot(item) {
            if self.general[index].increment() {
                return Some(index);
            }
        }

        let index = self.find_empty_slot()?;
        self.general[index] = Slot::with_item(ItemRef::clone(item), 1);
        Some(index)
    }

    /// Moves `source` onto `target`
    ///
    /// Same stackable item on both sides: target absorbs source's count
    /// and source empties. If the combined count would overflow, target
    /// fills to `u32::MAX` and the remainder stays in source. Anything
    /// else: the two slots trade contents. Returns true if the move merged.
    pub(crate) fn transfer(&mut self, source: SlotRef, target: SlotRef) -> Result<bool, InventoryError> {
        self.validate(source)?;
        self.validate(target)?;
        if source == target {
            return Ok(false);
        }

        let moving = std::mem::take(self.get_mut(source)?);
        let resident = self.get_mut(target)?;

        if let Some(item) = moving.item().cloned().filter(|_| moving.stacks_with(resident)) {
            let room = u32::MAX - resident.count();
            let absorbed = moving.count().min(room);
            *resident = Slot::with_item(ItemRef::clone(&item), resident.count() + absorbed);
            *self.get_mut(source)? = Slot::with_item(item, moving.count() - absorbed);
            return Ok(true);
        }

        let displaced = std::mem::replace(resident, moving);
        *self.get_mut(source)? = displaced;
        Ok(false)
    }

    /// Overwrites a slot directly (used when restoring a save)
    pub(crate) fn set(&mut self, slot: SlotRef, value: Slot) -> Result<(), InventoryError> {
        *self.get_mut(slot)? = value;
        Ok(())
    }

    /// Clears every slot
    pub fn clear(&mut self) {
        self.general.fill(Slot::empty());
        self.equipment = Default::default();
    }

    /// Returns an iterator over all occupied general slots with their index
    pub fn iter_items(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.general
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_empty())
    }
}
