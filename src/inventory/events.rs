use std::cell::RefCell;
use std::rc::Rc;

use super::store::SlotStore;

/// Receives a notification after every completed inventory mutation
///
/// The notification carries no payload; observers re-read whatever they
/// need from the store they are handed. They only ever see a finished
/// mutation, never one in progress.
pub trait InventoryObserver {
    fn on_inventory_changed(&mut self, slots: &SlotStore);
}

/// Shared observer handle
pub type ObserverHandle = Rc<RefCell<dyn InventoryObserver>>;

/// Identifies a registration so it can be removed later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered list of registered observers
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, ObserverHandle)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: ObserverHandle) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Removes a registration; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes every observer in registration order
    pub fn notify(&self, slots: &SlotStore) {
        for (_, observer) in &self.entries {
            observer.borrow_mut().on_inventory_changed(slots);
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
