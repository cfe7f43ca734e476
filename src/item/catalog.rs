use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::category::ItemCategory;
use super::definition::{ItemDefinition, ItemRef};

/// Errors raised while building a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Item '{0}' already registered")]
    Duplicate(String),

    #[error("Item key must not be empty")]
    EmptyKey,

    #[error("Could not read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Authored catalog file layout (`[[items]]` tables)
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<ItemDefinition>,
}

/// Central registry of all item definitions
///
/// This is the single source of truth for what items exist. Slots and
/// save records refer to items by key, and the key resolves here.
/// The catalog is read-only once the game is running.
#[derive(Debug, Default, Clone)]
pub struct ItemCatalog {
    items: HashMap<String, ItemRef>,
}

impl ItemCatalog {
    /// Creates a new empty catalog
    pub fn new() -> Self {
        ItemCatalog {
            items: HashMap::new(),
        }
    }

    /// Creates a catalog with all built-in items registered
    pub fn create_default() -> Self {
        let mut catalog = Self::new();
        for item in base_items() {
            let registered = catalog.register(item);
            debug_assert!(registered.is_ok(), "duplicate built-in item: {:?}", registered.err());
        }
        catalog
    }

    /// Parses an authored TOML catalog
    pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut catalog = Self::new();
        for item in file.items {
            catalog.register(item)?;
        }
        info!(items = catalog.len(), "Item catalog parsed");
        Ok(catalog)
    }

    /// Loads an authored TOML catalog from disk
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "Loading item catalog");
        Self::from_toml_str(&source)
    }

    /// Registers a new item definition
    ///
    /// Returns error if an item with this key already exists.
    pub fn register(&mut self, item: ItemDefinition) -> Result<ItemRef, CatalogError> {
        if item.id.is_empty() {
            return Err(CatalogError::EmptyKey);
        }
        if self.items.contains_key(&item.id) {
            return Err(CatalogError::Duplicate(item.id));
        }

        let item = Arc::new(item);
        self.items.insert(item.id.clone(), Arc::clone(&item));
        Ok(item)
    }

    /// Looks up an item definition by key
    pub fn get(&self, key: &str) -> Option<ItemRef> {
        self.items.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns all definitions, sorted by key
    pub fn all_items(&self) -> Vec<ItemRef> {
        let mut items: Vec<_> = self.items.values().cloned().collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        items
    }
}

// ======================================================================
// Base Game Items
// ======================================================================

fn base_items() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new(
            "health_potion",
            "Health Potion",
            "Restores 25 health when consumed.",
            ItemCategory::Consumable,
            true,
            25.0,
        )
        .with_icon("icons/health_potion.png"),
        ItemDefinition::new(
            "iron_sword",
            "Iron Sword",
            "A plain but reliable blade.",
            ItemCategory::Weapon,
            false,
            25.0,
        )
        .with_icon("icons/iron_sword.png")
        .with_visual_prefab("prefabs/iron_sword"),
        ItemDefinition::new(
            "wooden_shield",
            "Wooden Shield",
            "Stops arrows, mostly.",
            ItemCategory::Shield,
            false,
            5.0,
        )
        .with_icon("icons/wooden_shield.png")
        .with_visual_prefab("prefabs/wooden_shield"),
        ItemDefinition::new(
            "leather_cap",
            "Leather Cap",
            "Better than nothing.",
            ItemCategory::Helmet,
            false,
            2.0,
        )
        .with_icon("icons/leather_cap.png")
        .with_visual_id("helmet_leather"),
        ItemDefinition::new(
            "iron_helmet",
            "Iron Helmet",
            "Heavy, dented, protective.",
            ItemCategory::Helmet,
            false,
            5.0,
        )
        .with_icon("icons/iron_helmet.png")
        .with_visual_id("helmet_iron"),
        ItemDefinition::new(
            "chain_mail",
            "Chain Mail",
            "Rings of iron linked together.",
            ItemCategory::Chest,
            false,
            8.0,
        )
        .with_icon("icons/chain_mail.png")
        .with_visual_id("chest_chain"),
        ItemDefinition::new(
            "iron_pauldrons",
            "Iron Pauldrons",
            "Shoulder guards.",
            ItemCategory::Pauldrons,
            false,
            3.0,
        )
        .with_icon("icons/iron_pauldrons.png")
        .with_visual_id("pauldrons_iron"),
        ItemDefinition::new(
            "leather_elbow_pads",
            "Leather Elbow Pads",
            "Soft padding for the elbows.",
            ItemCategory::ElbowPads,
            false,
            1.0,
        )
        .with_icon("icons/leather_elbow_pads.png")
        .with_visual_id("elbows_leather"),
        ItemDefinition::new(
            "leather_knee_pads",
            "Leather Knee Pads",
            "Soft padding for the knees.",
            ItemCategory::KneePads,
            false,
            1.0,
        )
        .with_icon("icons/leather_knee_pads.png")
        .with_visual_id("knees_leather"),
        ItemDefinition::new(
            "bone_fragment",
            "Bone Fragment",
            "Left behind by something unlucky.",
            ItemCategory::General,
            true,
            0.0,
        )
        .with_icon("icons/bone_fragment.png"),
    ]
}
