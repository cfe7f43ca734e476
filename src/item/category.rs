use serde::{Deserialize, Serialize};

/// Categories of items
///
/// The category decides how an item's `value` is read (damage, healing
/// or defense) and which equipment slot the UI lets it into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Basic item with no special behavior
    #[default]
    General,
    Weapon,
    Shield,
    Helmet,
    Chest,
    Pauldrons,
    ElbowPads,
    KneePads,
    /// Usable from the quick slot
    Consumable,
}

impl ItemCategory {
    /// Returns true for shield and armor pieces, whose value is defense
    pub fn is_protective(self) -> bool {
        matches!(
            self,
            ItemCategory::Shield
                | ItemCategory::Helmet
                | ItemCategory::Chest
                | ItemCategory::Pauldrons
                | ItemCategory::ElbowPads
                | ItemCategory::KneePads
        )
    }
}
