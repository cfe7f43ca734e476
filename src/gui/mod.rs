//! Screen-Space GUI System
//!
//! Headless presentation of the inventory. These components hold what
//! the screen should show and turn finished gestures into engine calls;
//! drawing them is left to whatever renderer hosts the game.
//!
//! # Architecture
//!
//! - Views are rebuilt in full on every inventory change notification
//! - Gestures reach the engine only on drop, never mid-drag
//! - The only rule the UI enforces is the optional category policy
//!
//! # Available Components
//!
//! - [`InventoryScreen`] - Slot views, tooltips, open/close (saves on close)
//! - [`DragController`] - Drag-and-drop into swap/remove requests
//!
//! # Example Usage
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use satchel::gui::{DragController, DropOutcome, InventoryScreen};
//! use satchel::inventory::{EquipmentRole, InventoryEngine, SlotRef};
//! use satchel::item::ItemCatalog;
//! use satchel::save::MemoryStore;
//!
//! let catalog = ItemCatalog::create_default();
//! let mut engine = InventoryEngine::new(20, "inventory", &catalog, MemoryStore::new());
//! let screen = Rc::new(RefCell::new(InventoryScreen::with_slots(engine.slots())));
//! engine.subscribe(screen.clone());
//!
//! engine.pick_up("iron_sword")?;
//!
//! let mut drag = DragController::default();
//! drag.begin_drag(SlotRef::General(0), engine.slots());
//! let outcome = drag.drop_on(SlotRef::from(EquipmentRole::Weapon), &mut engine)?;
//!
//! assert_eq!(outcome, DropOutcome::Swapped);
//! assert!(screen.borrow().hover(EquipmentRole::Weapon.into()).is_some());
//! # Ok::<(), satchel::inventory::InventoryError>(())
//! ```

pub mod drag;
pub mod inventory_ui;

pub use drag::{DragController, DropOutcome, DropTarget, PlacementPolicy};
pub use inventory_ui::{InventoryScreen, SlotView, Tooltip};
