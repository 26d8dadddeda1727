use super::DocumentStore;
use crate::error::{CatalogError, Result};
use crate::model::StorageDocument;
use std::cell::RefCell;

/// In-memory document store for testing.
///
/// Uses `RefCell` for interior mutability since the catalog is
/// single-threaded. This keeps the `DocumentStore` trait on `&self`
/// without the overhead of a lock.
pub struct MemDocumentStore {
    document: RefCell<Option<StorageDocument>>,
    simulate_write_error: RefCell<bool>,
}

impl Default for MemDocumentStore {
    fn default() -> Self {
        Self {
            document: RefCell::new(None),
            simulate_write_error: RefCell::new(false),
        }
    }
}

impl MemDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl DocumentStore for MemDocumentStore {
    fn load(&self) -> Result<StorageDocument> {
        Ok(self.document.borrow().clone().unwrap_or_default())
    }

    fn save(&self, doc: &StorageDocument) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(CatalogError::Store("Simulated write error".to_string()));
        }
        *self.document.borrow_mut() = Some(doc.clone());
        Ok(())
    }
}
