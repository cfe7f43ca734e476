//! Save data types for the inventory
//!
//! This module defines the persisted form of a [`SlotStore`](crate::inventory::SlotStore).
//! It uses Serde for serialization/deserialization to JSON format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::EquipmentRole;

/// Current save record version
pub const CURRENT_SAVE_VERSION: u32 = 1;

/// One persisted slot
///
/// An empty slot is an empty key with a zero count; it is never omitted,
/// since restore is positional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub item_key: String,
    pub count: u32,
}

impl SlotRecord {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(item_key: impl Into<String>, count: u32) -> Self {
        SlotRecord {
            item_key: item_key.into(),
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_key.is_empty()
    }
}

/// The root save record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    /// One entry per general slot, in index order
    pub general_slots: Vec<SlotRecord>,
    pub weapon: SlotRecord,
    pub shield: SlotRecord,
    pub helmet: SlotRecord,
    pub chest: SlotRecord,
    pub pauldrons: SlotRecord,
    pub elbow_pads: SlotRecord,
    pub knee_pads: SlotRecord,
    pub quick_slot: SlotRecord,
}

impl InventoryRecord {
    /// Creates an all-empty record for `capacity` general slots
    pub fn empty(capacity: usize) -> Self {
        InventoryRecord {
            version: CURRENT_SAVE_VERSION,
            saved_at: Utc::now(),
            general_slots: vec![SlotRecord::empty(); capacity],
            weapon: SlotRecord::empty(),
            shield: SlotRecord::empty(),
            helmet: SlotRecord::empty(),
            chest: SlotRecord::empty(),
            pauldrons: SlotRecord::empty(),
            elbow_pads: SlotRecord::empty(),
            knee_pads: SlotRecord::empty(),
            quick_slot: SlotRecord::empty(),
        }
    }

    pub fn equipment(&self, role: EquipmentRole) -> &SlotRecord {
        match role {
            EquipmentRole::Weapon => &self.weapon,
            EquipmentRole::Shield => &self.shield,
            EquipmentRole::Helmet => &self.helmet,
            EquipmentRole::Chest => &self.chest,
            EquipmentRole::Pauldrons => &self.pauldrons,
            EquipmentRole::ElbowPads => &self.elbow_pads,
            EquipmentRole::KneePads => &self.knee_pads,
            EquipmentRole::QuickSlot => &self.quick_slot,
        }
    }

    pub fn equipment_mut(&mut self, role: EquipmentRole) -> &mut SlotRecord {
        match role {
            EquipmentRole::Weapon => &mut self.weapon,
            EquipmentRole::Shield => &mut self.shield,
            EquipmentRole::Helmet => &mut self.helmet,
            EquipmentRole::Chest => &mut self.chest,
            EquipmentRole::Pauldrons => &mut self.pauldrons,
            EquipmentRole::ElbowPads => &mut self.elbow_pads,
            EquipmentRole::KneePads => &mut self.knee_pads,
            EquipmentRole::QuickSlot => &mut self.quick_slot,
        }
    }
}

/// Summary of a restore
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Slots that came back occupied
    pub restored: usize,
    /// Keys that no longer resolve in the catalog (their slots load empty)
    pub unresolved: Vec<String>,
    /// General entries beyond the store's capacity that were dropped
    pub truncated: usize,
}

/// Error types for save/load operations
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported save version: {0} (newest known: {CURRENT_SAVE_VERSION})")]
    InvalidVersion(u32),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}
