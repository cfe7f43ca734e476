use std::cell::RefCell;
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use satchel::gui::{DragController, DropTarget, InventoryScreen};
use satchel::health::{Health, HealthPool};
use satchel::inventory::{EquipmentRole, InventoryEngine, SlotRef};
use satchel::item::{ItemCatalog, LootTable};
use satchel::save::FileStore;
use satchel::visual::{CharacterVisuals, VisualGroup};
use satchel::InventoryConfig;

/// Load config from the first CLI argument, or fall back to defaults
fn load_config() -> Result<InventoryConfig, Box<dyn Error>> {
    match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!(path = %path.display(), "Loading config");
            Ok(InventoryConfig::from_file(&path)?)
        }
        None => Ok(InventoryConfig::default()),
    }
}

fn load_catalog(config: &InventoryConfig) -> Result<ItemCatalog, Box<dyn Error>> {
    match &config.catalog_path {
        Some(path) => Ok(ItemCatalog::load_file(path)?),
        None => Ok(ItemCatalog::create_default()),
    }
}

/// The player's equipment visuals: socketed hands, toggled armor meshes
fn player_visuals() -> CharacterVisuals {
    CharacterVisuals::new()
        .with_group(EquipmentRole::Weapon, VisualGroup::socket("hand_r"))
        .with_group(EquipmentRole::Shield, VisualGroup::socket("hand_l"))
        .with_group(
            EquipmentRole::Helmet,
            VisualGroup::static_meshes(["helmet_none", "helmet_leather", "helmet_iron"]),
        )
        .with_group(EquipmentRole::Chest, VisualGroup::static_meshes(["chest_cloth", "chest_chain"]))
        .with_group(EquipmentRole::Pauldrons, VisualGroup::static_meshes(["pauldrons_none", "pauldrons_iron"]))
        .with_group(EquipmentRole::ElbowPads, VisualGroup::static_meshes(["elbows_none", "elbows_leather"]))
        .with_group(EquipmentRole::KneePads, VisualGroup::static_meshes(["knees_none", "knees_leather"]))
}

fn print_inventory(screen: &InventoryScreen) {
    println!("Inventory:");
    for view in screen.general_views().iter().chain(screen.equipment_views()) {
        if let Some(tooltip) = &view.tooltip {
            println!("  [{}] {} {}", view.slot, tooltip.name, view.count_label);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("satchel=info")),
        )
        .init();

    let config = load_config()?;
    let catalog = load_catalog(&config)?;
    let storage = FileStore::new(config.resolved_save_dir()?)?;
    info!(items = catalog.len(), dir = %storage.directory().display(), "Inventory starting");

    let mut engine = InventoryEngine::new(config.capacity, config.save_key.clone(), &catalog, storage);
    let screen = Rc::new(RefCell::new(InventoryScreen::with_slots(engine.slots())));
    let visuals = Rc::new(RefCell::new(player_visuals()));
    engine.subscribe(screen.clone());
    engine.attach_visuals(visuals.clone());

    match engine.load() {
        Ok(report) if !report.unresolved.is_empty() => {
            warn!(missing = ?report.unresolved, "Some saved items no longer exist");
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Could not load saved inventory; starting empty"),
    }

    // Something dies and drops loot
    let loot = LootTable::new()
        .with_entry("health_potion", 100.0)
        .with_entry("health_potion", 60.0)
        .with_entry("iron_sword", 35.0)
        .with_entry("leather_cap", 35.0)
        .with_entry("bone_fragment", 80.0);
    for item in loot.roll(&catalog, &mut rand::thread_rng()) {
        if !engine.add_item(&item) {
            warn!(item = %item.name, "Inventory full; left on the ground");
        }
    }

    // Equip the first weapon and consumable found, the way a player would drag them
    let mut drag = DragController::default();
    for (role, category) in [
        (EquipmentRole::Weapon, satchel::ItemCategory::Weapon),
        (EquipmentRole::QuickSlot, satchel::ItemCategory::Consumable),
    ] {
        let found = engine
            .slots()
            .iter_items()
            .find(|(_, slot)| slot.item().is_some_and(|item| item.category == category))
            .map(|(index, _)| index);
        if let Some(index) = found {
            drag.begin_drag(SlotRef::General(index), engine.slots());
            drag.drop_on(DropTarget::Slot(role.into()), &mut engine)?;
        }
    }

    let mut health = Health::with_current(60.0, 100.0);
    if engine.use_quick_slot(&mut health) {
        info!(health = health.current(), "Drank from the quick slot");
    }
    if let Some(weapon) = visuals.borrow().equipped_weapon() {
        info!(prefab = %weapon.prefab, damage = weapon.value, "Weapon in hand");
    }

    print_inventory(&screen.borrow());
    screen.borrow_mut().close(&mut engine);
    Ok(())
}
