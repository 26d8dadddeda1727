//! # forkfulapp
//!
//! A local-first recipe catalog: CRUD over a single persisted JSON
//! document, photo files in one managed directory, and a portable JSON
//! backup format that inlines images as base64 data URIs.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │  RecipeRepository (repository.rs)              │
//! │  create / update / delete / list / clear / gc  │
//! └───────────────┬───────────────┬────────────────┘
//!                 │               │
//!        ┌────────▼──────┐ ┌──────▼────────┐
//!        │ DocumentStore │ │  ImageStore   │
//!        │  (store/)     │ │  (images/)    │
//!        └────────▲──────┘ └──────▲────────┘
//!                 │               │
//! ┌───────────────┴───────────────┴────────────────┐
//! │  Backup codec (backup.rs): export / import     │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! The repository is the single source of truth for UI clients; the
//! backup codec bypasses it and talks to the stores directly. Both
//! store layers are traits with a file-backed and a non-filesystem
//! implementation, selected once at startup.
//!
//! Concurrency model: single-threaded, one writer by convention. Every
//! mutation is a whole-document read-modify-write with no locking;
//! racing writers lose updates (last-write-wins), which is documented
//! and demonstrated in tests rather than guarded.

pub mod backup;
pub mod config;
pub mod error;
pub mod images;
pub mod model;
pub mod repository;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use error::{CatalogError, Result};
pub use model::{DocumentMeta, Recipe, StorageDocument};
pub use repository::{Mutation, RecipeDraft, RecipePatch, RecipeRepository};
