//! Save/Load system for the inventory
//!
//! This module provides:
//! - JSON save records (human-readable, debuggable) with a version tag
//! - Positional encoding of every slot, empty ones included
//! - Tolerant restore: items missing from the catalog load as empty slots
//! - A small key-value storage trait with file and in-memory backends
//!
//! # Architecture
//!
//! - `types`: Save record structures and error types
//! - `codec`: SlotStore <-> record conversion and JSON encoding
//! - `store`: KeyValueStore trait, FileStore, MemoryStore
//!
//! # Example Usage
//!
//! ```
//! use satchel::inventory::SlotStore;
//! use satchel::item::ItemCatalog;
//! use satchel::save::{codec, KeyValueStore, MemoryStore};
//!
//! let catalog = ItemCatalog::create_default();
//! let store = SlotStore::new(20);
//! let mut storage = MemoryStore::new();
//!
//! let json = codec::encode(&codec::serialize(&store))?;
//! storage.put("inventory", &json)?;
//!
//! let mut loaded = SlotStore::new(20);
//! let record = codec::decode(&storage.get("inventory")?.unwrap_or_default())?;
//! codec::deserialize(&record, &catalog, &mut loaded)?;
//! assert_eq!(loaded, store);
//! # Ok::<(), satchel::save::SaveError>(())
//! ```

pub mod codec;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use types::*;
