//! # Image Storage Layer
//!
//! Recipe photos live as flat `.jpg` files in one managed directory,
//! keyed by a generated file name rather than by recipe id (re-picking
//! a photo yields a new file, so the name must be free to change over a
//! recipe's lifetime). At most one recipe references a given file;
//! files referenced by no recipe are orphans, reclaimed by an explicit
//! cleanup pass rather than eagerly.
//!
//! The [`ImageStore`] trait is a capability interface: targets with a
//! filesystem get [`fs::FsImageStore`], targets without one get
//! [`null::NullImageStore`], selected once at startup instead of
//! branching on a platform flag throughout the codebase.
//!
//! Incoming photos are re-encoded on save: bounded to a maximum
//! dimension and compressed as lossy JPEG so on-disk size stays small.
//! A source that fails to decode is stored verbatim instead, matching
//! how the app has always degraded when compression was unavailable.

use crate::error::Result;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod null;

/// Bound on the longest image edge after re-encoding, in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 800;

/// JPEG quality factor used when re-encoding, 0-100.
pub const JPEG_QUALITY: u8 = 60;

/// Abstract interface for the managed image directory.
pub trait ImageStore {
    /// Idempotent creation of the managed directory. Must never fail if
    /// the directory already exists.
    fn ensure_dir(&self) -> Result<()>;

    /// Copy and compress the source image into the managed directory
    /// under a freshly generated name; returns that name.
    fn save(&self, source: &Path) -> Result<String>;

    /// Map a stored reference to a displayable path. Pure.
    fn resolve(&self, name: &str) -> PathBuf;

    /// Remove the file. Idempotent: an already-absent file is not an
    /// error. Real I/O faults still surface.
    fn delete(&self, name: &str) -> Result<()>;

    /// Files in the managed directory referenced by no live recipe.
    fn orphans(&self, live: &HashSet<String>) -> Result<Vec<String>>;

    /// Read the stored bytes of an image (for backup export).
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Write raw image bytes under a freshly generated name (for backup
    /// import); returns that name.
    fn write(&self, bytes: &[u8]) -> Result<String>;
}
