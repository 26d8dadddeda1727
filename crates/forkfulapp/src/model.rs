//! # Domain Model: Recipes and the Storage Document
//!
//! This module defines the core data structures: [`Recipe`],
//! [`StorageDocument`], and [`DocumentMeta`].
//!
//! ## The Schema
//!
//! A recipe is a small, flat record:
//!
//! ```text
//! id          UUID, generated at creation, immutable
//! name        required, non-empty after trim, max 30 chars
//! notes       optional free text, max 500 chars
//! ingredients optional list of lines
//! steps       optional list of lines
//! image       optional stored-file reference ("<uuid>.jpg")
//! createdAt   ISO-8601 creation timestamp, immutable
//! ```
//!
//! The on-disk casing is camelCase so documents written by earlier
//! builds of the app load unchanged.
//!
//! ## Legacy Documents
//!
//! Older catalogs used a divergent shape: a `description` field instead
//! of `notes`, always paired with `ingredients`/`steps`. We unify on the
//! `notes` schema and migrate on read: when `notes` is absent,
//! `description` is folded into it. `ingredients`/`steps` are kept as
//! optional lists, omitted from output when empty. Serialization only
//! ever produces the unified shape, so a document is migrated the first
//! time it is written back.
//!
//! ## The Storage Document
//!
//! [`StorageDocument`] is the single root persisted object: the ordered
//! recipe list plus a `meta` block holding the one-shot `initialized`
//! flag and the last backup timestamp. There is no other persisted
//! structure; insertion order is display order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CatalogError, Result};

/// Maximum length of a recipe name, in characters.
pub const MAX_NAME_LEN: usize = 30;

/// Maximum length of the free-text notes, in characters.
pub const MAX_NOTES_LEN: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ingredients: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Custom deserializer to handle legacy documents where the free text
// lived in `description` rather than `notes`. If `notes` is missing,
// `description` takes its place.
impl<'de> Deserialize<'de> for Recipe {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = RecipeHelper::deserialize(deserializer)?;

        Ok(Recipe {
            id: helper.id,
            name: helper.name,
            notes: helper.notes.or(helper.description),
            ingredients: helper.ingredients,
            steps: helper.steps,
            image: helper.image,
            created_at: helper.created_at,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeHelper {
    id: Uuid,
    name: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    image: Option<String>,
    created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(name: String, notes: Option<String>, image: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            notes,
            ingredients: Vec::new(),
            steps: Vec::new(),
            image,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    #[serde(default)]
    pub initialized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_backup_time: Option<DateTime<Utc>>,
}

/// The single root persisted object: the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageDocument {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub meta: DocumentMeta,
}

/// Validate and normalize a recipe name: trimmed, non-empty, bounded.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::Validation(
            "Recipe name must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CatalogError::Validation(format!(
            "Recipe name exceeds {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate notes length. `None` is always valid.
pub fn validate_notes(notes: Option<&str>) -> Result<()> {
    if let Some(text) = notes {
        if text.chars().count() > MAX_NOTES_LEN {
            return Err(CatalogError::Validation(format!(
                "Notes exceed {} characters",
                MAX_NOTES_LEN
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_and_omits_empty_fields() {
        let recipe = Recipe::new("Tomato Soup".into(), None, None);
        let json = serde_json::to_value(&recipe).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("notes").is_none());
        assert!(json.get("ingredients").is_none());
        assert!(json.get("image").is_none());
    }

    #[test]
    fn deserializes_legacy_description_into_notes() {
        let raw = r#"{
            "id": "7f2f7a36-55a8-4b0c-8c2f-07a3b1e0f111",
            "name": "Pancakes",
            "description": "Weekend breakfast",
            "ingredients": ["flour", "milk"],
            "steps": ["mix", "fry"],
            "createdAt": "2024-03-01T08:00:00Z"
        }"#;
        let recipe: Recipe = serde_json::from_str(raw).unwrap();

        assert_eq!(recipe.notes.as_deref(), Some("Weekend breakfast"));
        assert_eq!(recipe.ingredients, vec!["flour", "milk"]);
        assert_eq!(recipe.steps, vec!["mix", "fry"]);
    }

    #[test]
    fn notes_wins_over_description_when_both_present() {
        let raw = r#"{
            "id": "7f2f7a36-55a8-4b0c-8c2f-07a3b1e0f111",
            "name": "Pancakes",
            "notes": "new",
            "description": "old",
            "createdAt": "2024-03-01T08:00:00Z"
        }"#;
        let recipe: Recipe = serde_json::from_str(raw).unwrap();
        assert_eq!(recipe.notes.as_deref(), Some("new"));
    }

    #[test]
    fn validate_name_trims_and_bounds() {
        assert_eq!(validate_name("  Soup  ").unwrap(), "Soup");
        assert!(matches!(
            validate_name("   "),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            validate_name(&"x".repeat(MAX_NAME_LEN + 1)),
            Err(CatalogError::Validation(_))
        ));
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn validate_notes_bounds() {
        assert!(validate_notes(None).is_ok());
        assert!(validate_notes(Some(&"n".repeat(MAX_NOTES_LEN))).is_ok());
        assert!(matches!(
            validate_notes(Some(&"n".repeat(MAX_NOTES_LEN + 1))),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn empty_document_round_trips() {
        let doc = StorageDocument::default();
        let json = serde_json::to_string(&doc).unwrap();
        let back: StorageDocument = serde_json::from_str(&json).unwrap();
        assert!(back.recipes.is_empty());
        assert!(!back.meta.initialized);
    }
}
