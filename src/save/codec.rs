//! Conversion between a [`SlotStore`] and its persisted [`InventoryRecord`]

use tracing::{debug, warn};

use super::types::*;
use crate::inventory::{EquipmentRole, Slot, SlotRef, SlotStore};
use crate::item::ItemCatalog;

fn slot_record(slot: &Slot) -> SlotRecord {
    match slot.item() {
        Some(item) => SlotRecord::new(item.id.clone(), slot.count()),
        None => SlotRecord::empty(),
    }
}

/// Captures every slot of the store, empty ones included
pub fn serialize(store: &SlotStore) -> InventoryRecord {
    let mut record = InventoryRecord::empty(0);
    record.general_slots = store.general().iter().map(slot_record).collect();

    for role in EquipmentRole::ALL {
        *record.equipment_mut(role) = slot_record(store.equipment(role));
    }

    record
}

/// Restores a record into `store`
///
/// Keys that no longer resolve in the catalog load as empty slots and
/// are listed in the report; the rest of the record still applies. The
/// store is only touched once the record is known to be readable.
pub fn deserialize(
    record: &InventoryRecord,
    catalog: &ItemCatalog,
    store: &mut SlotStore,
) -> Result<RestoreReport, SaveError> {
    if record.version > CURRENT_SAVE_VERSION {
        return Err(SaveError::InvalidVersion(record.version));
    }

    let mut restored = SlotStore::new(store.capacity());
    let mut report = RestoreReport::default();

    if record.general_slots.len() > restored.capacity() {
        report.truncated = record.general_slots.len() - restored.capacity();
        warn!(
            saved = record.general_slots.len(),
            capacity = restored.capacity(),
            "Save has more general slots than the inventory; extras dropped"
        );
    }

    let general = record
        .general_slots
        .iter()
        .take(restored.capacity())
        .enumerate()
        .map(|(index, entry)| (SlotRef::General(index), entry));
    let equipment = EquipmentRole::ALL
        .into_iter()
        .map(|role| (SlotRef::Equipment(role), record.equipment(role)));

    for (slot, entry) in general.chain(equipment) {
        if entry.is_empty() {
            continue;
        }

        let Some(item) = catalog.get(&entry.item_key) else {
            warn!(%slot, item = %entry.item_key, "Saved item no longer exists; slot left empty");
            report.unresolved.push(entry.item_key.clone());
            continue;
        };

        if entry.count == 0 {
            debug!(%slot, item = %entry.item_key, "Saved slot has zero count; left empty");
            continue;
        }
        if !item.stackable && entry.count > 1 {
            warn!(%slot, item = %entry.item_key, count = entry.count, "Non-stackable item saved with count > 1");
        }

        if restored.set(slot, Slot::with_item(item, entry.count)).is_ok() {
            report.restored += 1;
        }
    }

    *store = restored;
    Ok(report)
}

/// Encodes a record as pretty JSON
pub fn encode(record: &InventoryRecord) -> Result<String, SaveError> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Decodes a record from JSON, rejecting versions newer than this build knows
pub fn decode(json: &str) -> Result<InventoryRecord, SaveError> {
    let record: InventoryRecord = serde_json::from_str(json)?;
    if record.version > CURRENT_SAVE_VERSION {
        return Err(SaveError::InvalidVersion(record.version));
    }
    Ok(record)
}
