//! Slot-based inventory and equipment for a single character.
//!
//! - [`item`]: read-only item catalog, categories, loot tables
//! - [`inventory`]: slot store and the engine that mutates it
//! - [`save`]: versioned save records and key-value storage
//! - [`visual`]: equipment visuals driven by inventory changes
//! - [`gui`]: headless inventory screen and drag-and-drop
//! - [`health`]: the health collaborator used by the quick slot
//! - [`config`]: TOML configuration

pub mod config;
pub mod gui;
pub mod health;
pub mod inventory;
pub mod item;
pub mod save;
pub mod visual;

pub use config::InventoryConfig;
pub use inventory::{EquipmentRole, InventoryEngine, Slot, SlotRef, SlotStore};
pub use item::{ItemCatalog, ItemCategory, ItemDefinition, ItemRef};
