use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::error::InventoryError;
use super::events::{InventoryObserver, ObserverId, Observers};
use super::slot::{EquipmentRole, Slot, SlotRef};
use super::store::SlotStore;
use crate::health::HealthPool;
use crate::item::{ItemCatalog, ItemCategory, ItemRef};
use crate::save::{codec, KeyValueStore, RestoreReport, SaveError};
use crate::visual::VisualSync;

/// The operations layer over a [`SlotStore`]
///
/// Owns the store outright. Every completed mutation is followed, in
/// this order, by:
/// 1. one change notification to every observer
/// 2. a synchronous write of the full store to `storage`
/// 3. visual updates for any equipment role the mutation touched
///
/// Rejected requests (inventory full, unusable quick slot) change
/// nothing and notify nobody.
pub struct InventoryEngine<'a, S: KeyValueStore> {
    slots: SlotStore,
    catalog: &'a ItemCatalog,
    storage: S,
    save_key: String,
    observers: Observers,
    visuals: Option<Rc<RefCell<dyn VisualSync>>>,
}

impl<'a, S: KeyValueStore> InventoryEngine<'a, S> {
    /// Creates an engine over an empty store with `capacity` general slots
    pub fn new(capacity: usize, save_key: impl Into<String>, catalog: &'a ItemCatalog, storage: S) -> Self {
        InventoryEngine {
            slots: SlotStore::new(capacity),
            catalog,
            storage,
            save_key: save_key.into(),
            observers: Observers::new(),
            visuals: None,
        }
    }

    // ======================================================================
    // Read access
    // ======================================================================

    pub fn slots(&self) -> &SlotStore {
        &self.slots
    }

    pub fn slot(&self, slot: SlotRef) -> Option<&Slot> {
        self.slots.get(slot)
    }

    pub fn catalog(&self) -> &'a ItemCatalog {
        self.catalog
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save_key(&self) -> &str {
        &self.save_key
    }

    // ======================================================================
    // Collaborators
    // ======================================================================

    /// Registers an observer; it is called after every mutation, in registration order
    pub fn subscribe<O: InventoryObserver + 'static>(&mut self, observer: Rc<RefCell<O>>) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Attaches the equipment visual layer, replacing any previous one
    pub fn attach_visuals<V: VisualSync + 'static>(&mut self, visuals: Rc<RefCell<V>>) {
        self.visuals = Some(visuals);
    }

    // ======================================================================
    // Operations
    // ======================================================================

    /// Adds one unit of `item`
    ///
    /// Stackable items join the first general slot already holding them;
    /// otherwise the first empty general slot is used. Returns false,
    /// leaving everything untouched, when no slot can take the item.
    pub fn add_item(&mut self, item: &ItemRef) -> bool {
        match self.slots.insert_one(item) {
            Some(index) => {
                debug!(item = %item.id, slot = index, count = self.slots.general()[index].count(), "Item added");
                self.commit();
                true
            }
            None => {
                info!(item = %item.id, "Inventory full; item not added");
                false
            }
        }
    }

    /// Resolves a world pickup by catalog key and adds it
    pub fn pick_up(&mut self, item_key: &str) -> Result<bool, InventoryError> {
        let item = self
            .catalog
            .get(item_key)
            .ok_or_else(|| InventoryError::UnknownItem(item_key.to_string()))?;
        Ok(self.add_item(&item))
    }

    /// Moves `source` onto `target`
    ///
    /// The same stackable item on both sides merges into `target` and
    /// empties `source`. Anything else trades contents, which is how
    /// items get equipped and unequipped. Item categories are NOT
    /// checked here; a caller that wants a helmet kept out of the weapon
    /// slot must check before calling.
    ///
    /// Dropping a slot onto itself does nothing and is the one swap that
    /// sends no notification and writes nothing; merging a stack into
    /// itself would otherwise empty it.
    pub fn swap_slots(&mut self, source: SlotRef, target: SlotRef) -> Result<(), InventoryError> {
        if source == target {
            self.slots.validate(source)?;
            return Ok(());
        }

        let merged = self.slots.transfer(source, target)?;
        debug!(%source, %target, merged, "Slots swapped");

        self.commit();
        self.sync_visuals([source, target]);
        Ok(())
    }

    /// Empties a slot unconditionally
    pub fn remove_item(&mut self, slot: SlotRef) -> Result<(), InventoryError> {
        let target = self.slots.get_mut(slot)?;
        if let Some(item) = target.item() {
            debug!(%slot, item = %item.id, count = target.count(), "Slot cleared");
        }
        target.clear();

        self.commit();
        self.sync_visuals([slot]);
        Ok(())
    }

    /// Consumes one unit from the quick slot to heal
    ///
    /// Only acts when the quick slot holds a consumable and `health` is
    /// alive and not full. Returns true if something was consumed.
    pub fn use_quick_slot(&mut self, health: &mut impl HealthPool) -> bool {
        let Some(item) = self.slots.equipment(EquipmentRole::QuickSlot).item().cloned() else {
            return false;
        };
        if item.category != ItemCategory::Consumable || health.is_dead() || health.is_full() {
            return false;
        }

        let healed = health.heal(item.value);
        self.slots.equipment_mut(EquipmentRole::QuickSlot).decrement();
        debug!(item = %item.id, healed, remaining = self.slots.equipment(EquipmentRole::QuickSlot).count(), "Quick slot used");

        self.commit();
        true
    }

    // ======================================================================
    // Persistence
    // ======================================================================

    /// Writes the full store under the save key
    pub fn save(&mut self) -> Result<(), SaveError> {
        let json = codec::encode(&codec::serialize(&self.slots))?;
        self.storage.put(&self.save_key, &json)
    }

    /// Restores the store from storage
    ///
    /// A missing save leaves an empty inventory and is not an error. On
    /// success every equipment visual is refreshed and observers get one
    /// notification. On error the store is left as it was.
    pub fn load(&mut self) -> Result<RestoreReport, SaveError> {
        let Some(json) = self.storage.get(&self.save_key)? else {
            info!(key = %self.save_key, "No saved inventory; starting empty");
            return Ok(RestoreReport::default());
        };

        let record = codec::decode(&json)?;
        let report = codec::deserialize(&record, self.catalog, &mut self.slots)?;
        info!(
            key = %self.save_key,
            restored = report.restored,
            unresolved = report.unresolved.len(),
            "Inventory loaded"
        );

        self.refresh_visuals();
        self.observers.notify(&self.slots);
        Ok(report)
    }

    /// Pushes the current item of every equipment role to the visual layer
    pub fn refresh_visuals(&self) {
        self.sync_visuals(EquipmentRole::ALL.map(SlotRef::Equipment));
    }

    /// Notifies observers, then persists; a failed write is logged and retried on the next mutation
    fn commit(&mut self) {
        self.observers.notify(&self.slots);

        if let Err(e) = self.save() {
            warn!(key = %self.save_key, error = %e, "Failed to persist inventory; keeping in-memory state");
        }
    }

    fn sync_visuals<I: IntoIterator<Item = SlotRef>>(&self, touched: I) {
        let Some(visuals) = &self.visuals else {
            return;
        };

        let mut visuals = visuals.borrow_mut();
        for role in touched.into_iter().filter_map(SlotRef::equipment_role) {
            visuals.update_visual(role, self.slots.equipment(role).item());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::Health;
    use crate::item::ItemDefinition;
    use crate::save::{InventoryRecord, MemoryStore, SlotRecord};
    use crate::visual::{CharacterVisuals, VisualGroup};

    #[derive(Default)]
    struct ChangeCounter {
        notifications: usize,
        last_count_in_slot0: u32,
    }

    impl InventoryObserver for ChangeCounter {
        fn on_inventory_changed(&mut self, slots: &SlotStore) {
            self.notifications += 1;
            self.last_count_in_slot0 = slots.general().first().map(Slot::count).unwrap_or(0);
        }
    }

    fn engine(catalog: &ItemCatalog, capacity: usize) -> (InventoryEngine<'_, MemoryStore>, MemoryStore, Rc<RefCell<ChangeCounter>>) {
        let storage = MemoryStore::new();
        let mut engine = InventoryEngine::new(capacity, "inventory", catalog, storage.clone());
        let counter = Rc::new(RefCell::new(ChangeCounter::default()));
        engine.subscribe(counter.clone());
        (engine, storage, counter)
    }

    fn item(catalog: &ItemCatalog, key: &str) -> ItemRef {
        catalog.get(key).unwrap()
    }

    #[test]
    fn test_stackable_items_share_a_slot() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, counter) = engine(&catalog, 2);
        let potion = item(&catalog, "health_potion");

        assert!(engine.add_item(&potion));
        assert!(engine.add_item(&potion));

        assert_eq!(engine.slots().general()[0].item_key(), Some("health_potion"));
        assert_eq!(engine.slots().general()[0].count(), 2);
        assert!(engine.slots().general()[1].is_empty());
        assert_eq!(counter.borrow().notifications, 2);
        assert_eq!(counter.borrow().last_count_in_slot0, 2);
    }

    #[test]
    fn test_non_stackable_items_take_new_slots() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, _) = engine(&catalog, 3);
        let sword = item(&catalog, "iron_sword");

        assert!(engine.add_item(&sword));
        assert!(engine.add_item(&sword));

        assert_eq!(engine.slots().general()[0].count(), 1);
        assert_eq!(engine.slots().general()[1].count(), 1);
        assert!(engine.slots().general()[2].is_empty());
    }

    #[test]
    fn test_full_inventory_rejects_without_side_effects() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, storage, counter) = engine(&catalog, 1);
        assert!(engine.add_item(&item(&catalog, "iron_sword")));
        let before = engine.slots().clone();
        let writes = storage.write_count();

        assert!(!engine.add_item(&item(&catalog, "health_potion")));

        assert_eq!(engine.slots(), &before);
        assert_eq!(counter.borrow().notifications, 1);
        assert_eq!(storage.write_count(), writes);
    }

    #[test]
    fn test_full_inventory_still_stacks_existing_items() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, _) = engine(&catalog, 1);
        let potion = item(&catalog, "health_potion");

        assert!(engine.add_item(&potion));
        assert!(engine.add_item(&potion));
        assert_eq!(engine.slots().general()[0].count(), 2);
    }

    #[test]
    fn test_pick_up_by_key() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, _) = engine(&catalog, 2);

        assert_eq!(engine.pick_up("bone_fragment"), Ok(true));
        assert_eq!(
            engine.pick_up("moon_rock"),
            Err(InventoryError::UnknownItem("moon_rock".to_string()))
        );
    }

    #[test]
    fn test_every_mutation_persists() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, storage, _) = engine(&catalog, 2);

        engine.add_item(&item(&catalog, "iron_sword"));
        engine
            .swap_slots(SlotRef::General(0), EquipmentRole::Weapon.into())
            .unwrap();

        assert_eq!(storage.write_count(), 2);
        let json = storage.get("inventory").unwrap().unwrap();
        let record = codec::decode(&json).unwrap();
        assert_eq!(record.weapon, SlotRecord::new("iron_sword", 1));
        assert_eq!(record.general_slots[0], SlotRecord::empty());
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, storage, counter) = engine(&catalog, 2);
        storage.set_fail_writes(true);

        assert!(engine.add_item(&item(&catalog, "bone_fragment")));
        assert_eq!(engine.slots().general()[0].count(), 1);
        assert_eq!(counter.borrow().notifications, 1);
        assert_eq!(storage.get("inventory").unwrap(), None);

        // The next mutation writes the whole store again
        storage.set_fail_writes(false);
        engine.add_item(&item(&catalog, "bone_fragment"));
        let record = codec::decode(&storage.get("inventory").unwrap().unwrap()).unwrap();
        assert_eq!(record.general_slots[0], SlotRecord::new("bone_fragment", 2));
    }

    #[test]
    fn test_swap_twice_restores() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, _) = engine(&catalog, 3);
        engine.add_item(&item(&catalog, "iron_sword"));
        engine.add_item(&item(&catalog, "health_potion"));
        engine.add_item(&item(&catalog, "health_potion"));
        let before = engine.slots().clone();

        engine.swap_slots(SlotRef::General(0), SlotRef::General(1)).unwrap();
        assert_eq!(engine.slots().general()[0].item_key(), Some("health_potion"));
        engine.swap_slots(SlotRef::General(0), SlotRef::General(1)).unwrap();

        assert_eq!(engine.slots(), &before);
    }

    #[test]
    fn test_swap_merges_same_stackable_item() {
        let mut catalog = ItemCatalog::new();
        let arrow = catalog
            .register(ItemDefinition::new("arrow", "Arrow", "", ItemCategory::General, true, 0.0))
            .unwrap();
        let (mut engine, _, counter) = engine(&catalog, 2);
        engine.add_item(&arrow);
        engine.add_item(&arrow);
        // Split by hand so both slots hold arrows
        engine.slots.set(SlotRef::General(1), Slot::with_item(arrow.clone(), 3)).unwrap();

        engine.swap_slots(SlotRef::General(1), SlotRef::General(0)).unwrap();

        assert!(engine.slots().general()[1].is_empty());
        assert_eq!(engine.slots().general()[0].count(), 5);
        assert_eq!(counter.borrow().notifications, 3);
    }

    fn engine_with_saved_bones<'a>(catalog: &'a ItemCatalog, counts: &[u32]) -> InventoryEngine<'a, MemoryStore> {
        let mut record = InventoryRecord::empty(counts.len());
        for (entry, &count) in record.general_slots.iter_mut().zip(counts) {
            *entry = SlotRecord::new("bone_fragment", count);
        }
        let mut storage = MemoryStore::new();
        storage.put("inventory", &codec::encode(&record).unwrap()).unwrap();

        let mut engine = InventoryEngine::new(counts.len() + 1, "inventory", catalog, storage);
        engine.load().unwrap();
        engine
    }

    #[test]
    fn test_add_to_full_stack_opens_new_slot() {
        let catalog = ItemCatalog::create_default();
        let mut engine = engine_with_saved_bones(&catalog, &[u32::MAX]);
        let bone = item(&catalog, "bone_fragment");

        assert!(engine.add_item(&bone));
        assert_eq!(engine.slots().general()[0].count(), u32::MAX);
        assert_eq!(engine.slots().general()[1].count(), 1);

        engine.swap_slots(SlotRef::General(1), SlotRef::General(0)).unwrap();
        assert_eq!(engine.slots().general()[0].count(), u32::MAX);
        assert_eq!(engine.slots().general()[1].count(), 1);
    }

    #[test]
    fn test_merge_into_nearly_full_stack_keeps_remainder() {
        let catalog = ItemCatalog::create_default();
        let mut engine = engine_with_saved_bones(&catalog, &[u32::MAX - 1, 5]);

        engine.swap_slots(SlotRef::General(1), SlotRef::General(0)).unwrap();

        assert_eq!(engine.slots().general()[0].count(), u32::MAX);
        assert_eq!(engine.slots().general()[1].item_key(), Some("bone_fragment"));
        assert_eq!(engine.slots().general()[1].count(), 4);
    }

    #[test]
    fn test_swap_onto_itself_is_silent() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, counter) = engine(&catalog, 2);
        engine.add_item(&item(&catalog, "health_potion"));
        engine.add_item(&item(&catalog, "health_potion"));

        engine.swap_slots(SlotRef::General(0), SlotRef::General(0)).unwrap();

        assert_eq!(engine.slots().general()[0].count(), 2);
        assert_eq!(counter.borrow().notifications, 2);
        assert!(engine.swap_slots(SlotRef::General(9), SlotRef::General(9)).is_err());
    }

    #[test]
    fn test_swap_does_not_check_categories() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, _) = engine(&catalog, 2);
        engine.add_item(&item(&catalog, "iron_helmet"));

        engine
            .swap_slots(SlotRef::General(0), EquipmentRole::Weapon.into())
            .unwrap();

        assert_eq!(
            engine.slots().equipment(EquipmentRole::Weapon).item_key(),
            Some("iron_helmet")
        );
    }

    #[test]
    fn test_swap_out_of_range_is_rejected() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, storage, counter) = engine(&catalog, 2);

        let result = engine.swap_slots(SlotRef::General(0), SlotRef::General(2));

        assert_eq!(result, Err(InventoryError::InvalidSlot { index: 2, capacity: 2 }));
        assert_eq!(counter.borrow().notifications, 0);
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_equip_and_unequip_update_visuals() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, _) = engine(&catalog, 2);
        let visuals = Rc::new(RefCell::new(
            CharacterVisuals::new().with_group(EquipmentRole::Weapon, VisualGroup::socket("hand_r")),
        ));
        engine.attach_visuals(visuals.clone());
        engine.add_item(&item(&catalog, "iron_sword"));
        assert!(visuals.borrow().equipped_weapon().is_none());

        engine
            .swap_slots(SlotRef::General(0), EquipmentRole::Weapon.into())
            .unwrap();
        assert_eq!(visuals.borrow().equipped_weapon().map(|w| w.value), Some(25.0));

        engine
            .swap_slots(EquipmentRole::Weapon.into(), SlotRef::General(1))
            .unwrap();
        assert!(visuals.borrow().equipped_weapon().is_none());
        assert_eq!(engine.slots().general()[1].item_key(), Some("iron_sword"));
    }

    #[test]
    fn test_remove_item_clears_slot_and_visual() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, counter) = engine(&catalog, 2);
        let visuals = Rc::new(RefCell::new(
            CharacterVisuals::new().with_group(EquipmentRole::Weapon, VisualGroup::socket("hand_r")),
        ));
        engine.attach_visuals(visuals.clone());
        engine.add_item(&item(&catalog, "iron_sword"));
        engine
            .swap_slots(SlotRef::General(0), EquipmentRole::Weapon.into())
            .unwrap();

        engine.remove_item(EquipmentRole::Weapon.into()).unwrap();

        assert!(engine.slots().equipment(EquipmentRole::Weapon).is_empty());
        assert!(visuals.borrow().equipped_weapon().is_none());
        assert_eq!(counter.borrow().notifications, 3);
    }

    #[test]
    fn test_remove_empty_slot_still_notifies() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, storage, counter) = engine(&catalog, 2);

        engine.remove_item(SlotRef::General(1)).unwrap();

        assert_eq!(counter.borrow().notifications, 1);
        assert_eq!(storage.write_count(), 1);
        assert!(engine.remove_item(SlotRef::General(2)).is_err());
    }

    fn equip_quick_slot(engine: &mut InventoryEngine<'_, MemoryStore>, potion: &ItemRef, count: u32) {
        for _ in 0..count {
            engine.add_item(potion);
        }
        engine
            .swap_slots(SlotRef::General(0), EquipmentRole::QuickSlot.into())
            .unwrap();
    }

    #[test]
    fn test_quick_slot_heals_and_clamps() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, counter) = engine(&catalog, 2);
        equip_quick_slot(&mut engine, &item(&catalog, "health_potion"), 2);
        let mut health = Health::with_current(80.0, 100.0);
        let notifications = counter.borrow().notifications;

        assert!(engine.use_quick_slot(&mut health));

        assert_eq!(health.current(), 100.0);
        assert_eq!(engine.slots().equipment(EquipmentRole::QuickSlot).count(), 1);
        assert_eq!(counter.borrow().notifications, notifications + 1);
    }

    #[test]
    fn test_quick_slot_at_full_health_is_noop() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, storage, counter) = engine(&catalog, 2);
        equip_quick_slot(&mut engine, &item(&catalog, "health_potion"), 1);
        let mut health = Health::new(100.0);
        let notifications = counter.borrow().notifications;
        let writes = storage.write_count();

        assert!(!engine.use_quick_slot(&mut health));

        assert_eq!(engine.slots().equipment(EquipmentRole::QuickSlot).count(), 1);
        assert_eq!(counter.borrow().notifications, notifications);
        assert_eq!(storage.write_count(), writes);
    }

    #[test]
    fn test_quick_slot_last_unit_empties_slot() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, _) = engine(&catalog, 2);
        equip_quick_slot(&mut engine, &item(&catalog, "health_potion"), 1);
        let mut health = Health::with_current(10.0, 100.0);

        assert!(engine.use_quick_slot(&mut health));

        assert_eq!(health.current(), 35.0);
        assert!(engine.slots().equipment(EquipmentRole::QuickSlot).is_empty());
        assert!(!engine.use_quick_slot(&mut health));
    }

    #[test]
    fn test_quick_slot_refuses_dead_or_non_consumable() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, _) = engine(&catalog, 2);
        equip_quick_slot(&mut engine, &item(&catalog, "health_potion"), 1);
        let mut dead = Health::with_current(0.0, 100.0);
        assert!(!engine.use_quick_slot(&mut dead));

        let (mut engine, _, _) = self::engine(&catalog, 2);
        engine.add_item(&item(&catalog, "iron_sword"));
        engine
            .swap_slots(SlotRef::General(0), EquipmentRole::QuickSlot.into())
            .unwrap();
        let mut hurt = Health::with_current(50.0, 100.0);
        assert!(!engine.use_quick_slot(&mut hurt));
        assert_eq!(hurt.current(), 50.0);
    }

    #[test]
    fn test_load_restores_and_refreshes_visuals() {
        let catalog = ItemCatalog::create_default();
        let storage = MemoryStore::new();
        {
            let mut engine = InventoryEngine::new(4, "inventory", &catalog, storage.clone());
            engine.add_item(&item(&catalog, "iron_sword"));
            engine.add_item(&item(&catalog, "health_potion"));
            engine
                .swap_slots(SlotRef::General(0), EquipmentRole::Weapon.into())
                .unwrap();
        }

        let mut engine = InventoryEngine::new(4, "inventory", &catalog, storage.clone());
        let counter = Rc::new(RefCell::new(ChangeCounter::default()));
        engine.subscribe(counter.clone());
        let visuals = Rc::new(RefCell::new(
            CharacterVisuals::new().with_group(EquipmentRole::Weapon, VisualGroup::socket("hand_r")),
        ));
        engine.attach_visuals(visuals.clone());

        let report = engine.load().unwrap();

        assert_eq!(report.restored, 2);
        assert_eq!(engine.slots().general()[1].item_key(), Some("health_potion"));
        assert_eq!(counter.borrow().notifications, 1);
        assert_eq!(visuals.borrow().equipped_weapon().map(|w| w.prefab.as_str()), Some("prefabs/iron_sword"));
    }

    #[test]
    fn test_load_without_save_starts_empty() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, _, counter) = engine(&catalog, 4);

        let report = engine.load().unwrap();

        assert_eq!(report, RestoreReport::default());
        assert!(engine.slots().is_empty());
        assert_eq!(counter.borrow().notifications, 0);
    }

    #[test]
    fn test_load_corrupt_save_keeps_state() {
        let catalog = ItemCatalog::create_default();
        let (mut engine, mut storage, _) = engine(&catalog, 2);
        engine.add_item(&item(&catalog, "bone_fragment"));
        storage.put("inventory", "definitely not json").unwrap();

        assert!(matches!(engine.load(), Err(SaveError::Serialization(_))));
        assert_eq!(engine.slots().general()[0].item_key(), Some("bone_fragment"));
    }
}
