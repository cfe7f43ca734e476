use thiserror::Error;

/// Errors that can occur during inventory operations
///
/// A full inventory is not an error: `add_item` reports it through its
/// boolean result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// General slot index out of bounds
    #[error("Invalid slot index: {index} (capacity {capacity})")]
    InvalidSlot { index: usize, capacity: usize },

    /// Item key doesn't exist in the catalog
    #[error("Unknown item: {0}")]
    UnknownItem(String),
}
