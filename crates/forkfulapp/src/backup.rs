//! # Backup Codec
//!
//! Serializes the whole catalog to a single, self-contained JSON
//! artifact and back. On export, every referenced image file is read
//! and inlined as a `data:image/jpeg;base64,` URI so the artifact has
//! no external file dependencies. On import the payload is
//! shape-validated at the boundary, inlined images are materialized as
//! fresh files, and the resulting document **replaces** the entire
//! prior catalog. Import is destructive by design, not a merge.
//!
//! The codec talks to the [`DocumentStore`] and [`ImageStore`]
//! directly; it does not go through the repository.

use crate::error::{CatalogError, Result};
use crate::images::ImageStore;
use crate::model::{DocumentMeta, Recipe, StorageDocument};
use crate::store::DocumentStore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Prefix marking an inlined image payload in a backup file.
pub const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupMeta {
    exported_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct BackupDocument {
    recipes: Vec<Recipe>,
    meta: BackupMeta,
}

/// Default file name for a backup written at `now`.
pub fn backup_filename(now: DateTime<Utc>) -> String {
    format!("RecipeBackup_{}.json", now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Serialize the current catalog to portable JSON text, inlining every
/// referenced image. Does not touch the live document: callers stamp
/// the backup time via [`mark_backed_up`] once the artifact has
/// actually been written somewhere.
pub fn export_document<D: DocumentStore, I: ImageStore>(docs: &D, images: &I) -> Result<String> {
    let doc = docs.load()?;

    let mut recipes = doc.recipes.clone();
    for recipe in &mut recipes {
        if let Some(image) = &recipe.image {
            // An already-inlined value can appear if a backup was
            // imported on a target that cannot materialize files.
            if image.starts_with(DATA_URI_PREFIX) {
                continue;
            }
            let bytes = images.read(image)?;
            recipe.image = Some(format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(&bytes)));
        }
    }

    let backup = BackupDocument {
        recipes,
        meta: BackupMeta {
            exported_at: Utc::now(),
        },
    };
    let payload = serde_json::to_string_pretty(&backup).map_err(CatalogError::Serialization)?;
    Ok(payload)
}

/// Record a successful backup on the live document. Called after the
/// exported artifact has been durably written, so a failed write never
/// leaves a bogus `lastBackupTime` behind.
pub fn mark_backed_up<D: DocumentStore>(docs: &D) -> Result<()> {
    let mut doc = docs.load()?;
    doc.meta.last_backup_time = Some(Utc::now());
    docs.save(&doc)
}

/// Parse a backup payload and replace the entire catalog with it.
///
/// Inlined images are decoded and written as fresh files; bare stored
/// references pass through unchanged (a document that never went
/// through export's inlining step imports fine). Malformed payloads
/// fail with [`CatalogError::InvalidFormat`] before anything is
/// persisted.
pub fn import_document<D: DocumentStore, I: ImageStore>(
    docs: &D,
    images: &I,
    payload: &str,
) -> Result<StorageDocument> {
    let recipes_value = parse_recipes(payload)?;
    let mut recipes: Vec<Recipe> = serde_json::from_value(recipes_value)
        .map_err(|e| CatalogError::InvalidFormat(format!("Malformed recipe entry: {}", e)))?;

    let mut seen = HashSet::new();
    for recipe in &recipes {
        if !seen.insert(recipe.id) {
            return Err(CatalogError::InvalidFormat(format!(
                "Duplicate recipe id: {}",
                recipe.id
            )));
        }
    }

    images.ensure_dir()?;
    for recipe in &mut recipes {
        if let Some(image) = &recipe.image {
            if let Some(encoded) = image.strip_prefix(DATA_URI_PREFIX) {
                let bytes = STANDARD.decode(encoded).map_err(|e| {
                    CatalogError::InvalidFormat(format!("Bad base64 image payload: {}", e))
                })?;
                recipe.image = Some(images.write(&bytes)?);
            }
        }
    }

    let doc = StorageDocument {
        recipes,
        meta: DocumentMeta {
            initialized: true,
            last_backup_time: Some(Utc::now()),
        },
    };
    docs.save(&doc)?;
    Ok(doc)
}

/// Boundary validation: the payload must be a JSON object with an
/// array-shaped `recipes` field. The parsed JSON is not assumed to
/// match the target structure.
fn parse_recipes(payload: &str) -> Result<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| CatalogError::InvalidFormat(format!("Not valid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| CatalogError::InvalidFormat("Top level must be an object".to_string()))?;
    let recipes = object
        .get("recipes")
        .ok_or_else(|| CatalogError::InvalidFormat("Missing `recipes` field".to_string()))?;
    if !recipes.is_array() {
        return Err(CatalogError::InvalidFormat(
            "`recipes` must be an array".to_string(),
        ));
    }
    Ok(recipes.clone())
}
