//! # Document Storage Layer
//!
//! The catalog persists as a **single JSON document**: the ordered
//! recipe list plus its `meta` block. The [`DocumentStore`] trait is the
//! only mutation surface, and [`DocumentStore::save`] is a whole-document
//! overwrite, not a merge. Callers own the read-modify-write ordering.
//!
//! ## First Run
//!
//! `load` never fails for "no data yet": a missing document is the
//! expected first-run state and yields an empty, uninitialized
//! [`StorageDocument`]. `initialize_if_needed` flips the
//! `meta.initialized` flag exactly once and is a no-op afterwards.
//!
//! ## Known Limitation
//!
//! There is no locking. Two callers racing load → mutate → save will
//! lose the earlier write (last-write-wins). The application has a
//! single foreground writer, so this is documented and tested rather
//! than guarded. If a second writer ever appears, add an optimistic
//! version stamp to the document and fail `save` on mismatch.
//!
//! ## Implementations
//!
//! - [`fs::FsDocumentStore`]: one `catalog.json` under the data root,
//!   written atomically (tmp file + rename).
//! - [`memory::MemDocumentStore`]: `RefCell`-backed, for testing logic
//!   without filesystem I/O.

use crate::error::Result;
use crate::model::StorageDocument;

pub mod fs;
pub mod memory;

/// Abstract interface for the persisted catalog document.
pub trait DocumentStore {
    /// Load the persisted document, or a fresh empty one on first run.
    fn load(&self) -> Result<StorageDocument>;

    /// Persist the full document, replacing any prior value.
    fn save(&self, doc: &StorageDocument) -> Result<()>;

    /// On the first call ever, persist an empty document with
    /// `meta.initialized = true`. Subsequent calls leave data untouched.
    fn initialize_if_needed(&self) -> Result<()> {
        let mut doc = self.load()?;
        if !doc.meta.initialized {
            doc.meta.initialized = true;
            self.save(&doc)?;
        }
        Ok(())
    }
}
