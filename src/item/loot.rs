use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::catalog::ItemCatalog;
use super::definition::ItemRef;

/// One possible drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    /// Catalog key of the dropped item
    pub item: String,

    /// Percent chance (0-100) that this entry drops
    pub drop_chance: f32,
}

/// Drops rolled when something dies
///
/// Every entry is rolled on its own, so one roll can drop nothing,
/// everything, or anything in between.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    #[serde(default)]
    pub entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn new() -> Self {
        LootTable { entries: Vec::new() }
    }

    /// Adds an entry, clamping the chance into 0-100
    pub fn with_entry(mut self, item: impl Into<String>, drop_chance: f32) -> Self {
        self.entries.push(LootEntry {
            item: item.into(),
            drop_chance: drop_chance.clamp(0.0, 100.0),
        });
        self
    }

    /// Rolls every entry and returns the items that dropped, in table order
    pub fn roll<R: Rng + ?Sized>(&self, catalog: &ItemCatalog, rng: &mut R) -> Vec<ItemRef> {
        let mut drops = Vec::new();

        for entry in &self.entries {
            let roll: f32 = rng.gen_range(0.0..100.0);
            if roll > entry.drop_chance {
                continue;
            }

            match catalog.get(&entry.item) {
                Some(item) => drops.push(item),
                None => warn!(item = %entry.item, "Loot entry refers to unknown item"),
            }
        }

        drops
    }
}
