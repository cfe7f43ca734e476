// Item system module
//
// This module provides the item side of the inventory, including:
// - Item definitions and categories
// - Item catalog for centralized, read-only lookup
// - Loot tables that roll catalog items

pub mod catalog;
pub mod category;
pub mod definition;
pub mod loot;

// Re-export main types for convenient access
pub use catalog::{CatalogError, ItemCatalog};
pub use category::ItemCategory;
pub use definition::{ItemDefinition, ItemRef};
pub use loot::{LootEntry, LootTable};
