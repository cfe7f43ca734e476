// Inventory system module
//
// This module provides inventory management, including:
// - Slots and the fixed-capacity slot store (general + equipment)
// - The engine that mutates the store, notifies observers and persists
// - Observer registration for UI and gameplay listeners

pub mod engine;
pub mod error;
pub mod events;
pub mod slot;
pub mod store;

// Re-export main types
pub use engine::InventoryEngine;
pub use error::InventoryError;
pub use events::{InventoryObserver, ObserverHandle, ObserverId, Observers};
pub use slot::{EquipmentRole, Slot, SlotRef};
pub use store::SlotStore;
