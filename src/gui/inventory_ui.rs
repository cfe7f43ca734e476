//! Inventory UI System
//!
//! Headless model of the inventory screen: what each slot shows (icon,
//! stack count, tooltip) and whether the window is open. A renderer
//! draws from these views; it never reads the store directly.

use tracing::warn;

use crate::inventory::{EquipmentRole, InventoryEngine, InventoryObserver, Slot, SlotRef, SlotStore};
use crate::save::KeyValueStore;

/// Name and description shown when hovering an item
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub name: String,
    pub description: String,
}

/// What one slot displays
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub slot: SlotRef,
    /// Icon path, None when the slot is empty
    pub icon: Option<String>,
    /// Stack count text; blank unless more than one unit is held
    pub count_label: String,
    pub tooltip: Option<Tooltip>,
}

impl SlotView {
    fn from_slot(slot_ref: SlotRef, slot: &Slot) -> Self {
        match slot.item() {
            Some(item) => SlotView {
                slot: slot_ref,
                icon: Some(item.icon.clone()),
                count_label: if slot.count() > 1 {
                    slot.count().to_string()
                } else {
                    String::new()
                },
                tooltip: Some(Tooltip {
                    name: item.name.clone(),
                    description: item.description.clone(),
                }),
            },
            None => SlotView {
                slot: slot_ref,
                icon: None,
                count_label: String::new(),
                tooltip: None,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.icon.is_none()
    }
}

/// The inventory window
///
/// Registered as an observer: every change notification rebuilds every
/// view from scratch.
#[derive(Debug, Clone, Default)]
pub struct InventoryScreen {
    pub is_open: bool,
    general: Vec<SlotView>,
    equipment: Vec<SlotView>,
    refreshes: usize,
}

impl InventoryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the initial views from the current store
    pub fn with_slots(slots: &SlotStore) -> Self {
        let mut screen = Self::new();
        screen.refresh(slots);
        screen
    }

    /// Rebuilds every slot view
    pub fn refresh(&mut self, slots: &SlotStore) {
        self.general = slots
            .general()
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotView::from_slot(SlotRef::General(index), slot))
            .collect();
        self.equipment = EquipmentRole::ALL
            .iter()
            .map(|&role| SlotView::from_slot(SlotRef::Equipment(role), slots.equipment(role)))
            .collect();
        self.refreshes += 1;
    }

    pub fn general_views(&self) -> &[SlotView] {
        &self.general
    }

    pub fn equipment_views(&self) -> &[SlotView] {
        &self.equipment
    }

    pub fn view(&self, slot: SlotRef) -> Option<&SlotView> {
        match slot {
            SlotRef::General(index) => self.general.get(index),
            SlotRef::Equipment(role) => self.equipment.get(role.index()),
        }
    }

    /// Tooltip for the hovered slot, if it holds anything
    pub fn hover(&self, slot: SlotRef) -> Option<&Tooltip> {
        self.view(slot)?.tooltip.as_ref()
    }

    /// How many times the views were rebuilt
    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Closes the window and saves the inventory
    pub fn close<S: KeyValueStore>(&mut self, engine: &mut InventoryEngine<'_, S>) {
        self.is_open = false;
        if let Err(e) = engine.save() {
            warn!(error = %e, "Failed to save inventory on close");
        }
    }

    pub fn toggle<S: KeyValueStore>(&mut self, engine: &mut InventoryEngine<'_, S>) {
        if self.is_open {
            self.close(engine);
        } else {
            self.open();
        }
    }
}

impl InventoryObserver for InventoryScreen {
    fn on_inventory_changed(&mut self, slots: &SlotStore) {
        self.refresh(slots);
    }
}
