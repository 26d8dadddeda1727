//! # Configuration
//!
//! Catalog configuration lives in an optional `forkful.toml` next to
//! the data, loaded via [`confique`] with compiled defaults as the
//! fallback layer. Everything here has a sensible default; the file
//! only exists for people who want to tune image handling.

use crate::error::{CatalogError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the catalog, stored in `forkful.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ForkfulConfig {
    /// Bound on the longest image edge after re-encoding, in pixels.
    #[config(default = 800)]
    pub max_image_dimension: u32,

    /// JPEG quality factor used when re-encoding images, 0-100.
    #[config(default = 60)]
    pub jpeg_quality: u8,

    /// Directory name for stored images, under the data root.
    #[config(default = "recipe-images")]
    pub image_dir: String,
}

impl Default for ForkfulConfig {
    fn default() -> Self {
        Self {
            max_image_dimension: 800,
            jpeg_quality: 60,
            image_dir: "recipe-images".to_string(),
        }
    }
}

impl ForkfulConfig {
    /// Load configuration, layering an optional TOML file over the
    /// compiled defaults. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self> {
        let mut builder = ForkfulConfig::builder().env();
        if path.exists() {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| CatalogError::Store(format!("Failed to load config: {}", e)))
    }
}
