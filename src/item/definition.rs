use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::category::ItemCategory;

/// Shared handle to a catalog entry.
///
/// Many slots may point at the same definition at once; identity is the
/// definition's `id`, not the allocation.
pub type ItemRef = Arc<ItemDefinition>;

/// The blueprint for an item type
///
/// This defines the static properties of an item that are shared
/// across every slot holding it. Definitions are authored once, loaded
/// into the [`ItemCatalog`](super::ItemCatalog) and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique key (used for lookups and saves)
    pub id: String,

    /// Display name shown in UI
    pub name: String,

    /// Description shown in tooltips
    #[serde(default)]
    pub description: String,

    /// Path to the item icon
    #[serde(default)]
    pub icon: String,

    pub category: ItemCategory,

    /// Whether several units share one slot
    #[serde(default)]
    pub stackable: bool,

    /// Damage, healing or defense depending on `category`
    #[serde(default)]
    pub value: f32,

    /// Mesh id toggled on static equipment groups (armor)
    #[serde(default)]
    pub visual_id: Option<String>,

    /// Prefab instantiated on socketed equipment groups (weapon, shield)
    #[serde(default)]
    pub visual_prefab: Option<String>,
}

impl ItemDefinition {
    /// Creates a new item definition with no visuals or icon
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: ItemCategory,
        stackable: bool,
        value: f32,
    ) -> Self {
        ItemDefinition {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            icon: String::new(),
            category,
            stackable,
            value,
            visual_id: None,
            visual_prefab: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_visual_id(mut self, visual_id: impl Into<String>) -> Self {
        self.visual_id = Some(visual_id.into());
        self
    }

    pub fn with_visual_prefab(mut self, prefab: impl Into<String>) -> Self {
        self.visual_prefab = Some(prefab.into());
        self
    }

    /// Returns true if this item can share a slot with another
    pub fn can_stack_with(&self, other: &ItemDefinition) -> bool {
        self.id == other.id && self.stackable
    }

    /// Damage dealt when wielded (weapons only)
    pub fn damage(&self) -> Option<f32> {
        (self.category == ItemCategory::Weapon).then_some(self.value)
    }

    /// Health restored when consumed (consumables only)
    pub fn healing(&self) -> Option<f32> {
        (self.category == ItemCategory::Consumable).then_some(self.value)
    }

    /// Defense granted when worn (shield and armor pieces)
    pub fn defense(&self) -> Option<f32> {
        self.category.is_protective().then_some(self.value)
    }
}
