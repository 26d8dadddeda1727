//! # Recipe Repository
//!
//! The repository composes a [`DocumentStore`] and an [`ImageStore`]
//! into the catalog's CRUD surface, keeping image files and recipe
//! records consistent with each other. It is the **single source of
//! truth**: every mutating operation performs a full load → mutate →
//! save cycle against the persisted document and returns a [`Mutation`]
//! carrying the affected record plus the authoritative post-operation
//! list, so no caller ever needs a separate refresh step that can
//! drift.
//!
//! ## Image Lifecycle Rules
//!
//! - A new image is saved **before** the document is touched. If the
//!   save fails, the operation aborts and no record ever references a
//!   nonexistent file.
//! - Replacing a recipe's image leaves the old file behind as an
//!   orphan. Orphans are reclaimed by [`RecipeRepository::cleanup_images`],
//!   never eagerly.
//! - Deleting a recipe best-effort deletes its image: a failure there
//!   is logged and swallowed so a missing file can never make a record
//!   unreclaimable.

use crate::error::{CatalogError, Result};
use crate::images::ImageStore;
use crate::model::{validate_name, validate_notes, Recipe};
use crate::store::DocumentStore;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::warn;
use uuid::Uuid;

/// Input for creating a recipe. `image` is a source path to a picked
/// photo, not a stored reference; the repository owns saving it.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub name: String,
    pub notes: Option<String>,
    pub image: Option<PathBuf>,
}

impl RecipeDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notes: None,
            image: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_image(mut self, source: impl Into<PathBuf>) -> Self {
        self.image = Some(source.into());
        self
    }
}

/// Partial update: fields left as `None` are preserved verbatim.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub image: Option<PathBuf>,
}

impl RecipePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_image(mut self, source: impl Into<PathBuf>) -> Self {
        self.image = Some(source.into());
        self
    }
}

/// Outcome of a mutating repository operation: the affected record (if
/// one exists after the operation) and the authoritative recipe list.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub record: Option<Recipe>,
    pub recipes: Vec<Recipe>,
}

pub struct RecipeRepository<D: DocumentStore, I: ImageStore> {
    docs: D,
    images: I,
}

impl<D: DocumentStore, I: ImageStore> RecipeRepository<D, I> {
    pub fn new(docs: D, images: I) -> Self {
        Self { docs, images }
    }

    pub fn documents(&self) -> &D {
        &self.docs
    }

    pub fn images(&self) -> &I {
        &self.images
    }

    /// First-run setup: managed image directory plus the one-shot
    /// `initialized` flag. Safe to call on every startup.
    pub fn init(&self) -> Result<()> {
        self.images.ensure_dir()?;
        self.docs.initialize_if_needed()
    }

    /// The current persisted sequence, in stored order.
    pub fn list(&self) -> Result<Vec<Recipe>> {
        Ok(self.docs.load()?.recipes)
    }

    pub fn create(&self, draft: RecipeDraft) -> Result<Mutation> {
        let name = validate_name(&draft.name)?;
        validate_notes(draft.notes.as_deref())?;

        // Save the image before touching the document: a failed save
        // must abort the create with nothing persisted.
        let image = match &draft.image {
            Some(source) => Some(self.images.save(source)?),
            None => None,
        };

        let mut doc = self.docs.load()?;
        let recipe = Recipe::new(name, draft.notes, image);
        doc.recipes.push(recipe.clone());
        self.docs.save(&doc)?;

        Ok(Mutation {
            record: Some(recipe),
            recipes: doc.recipes,
        })
    }

    pub fn update(&self, id: Uuid, patch: RecipePatch) -> Result<Mutation> {
        let name = match &patch.name {
            Some(raw) => Some(validate_name(raw)?),
            None => None,
        };
        validate_notes(patch.notes.as_deref())?;

        // Resolve the record before writing anything: an unknown id
        // must leave no trace, image files included.
        let mut doc = self.docs.load()?;
        if !doc.recipes.iter().any(|r| r.id == id) {
            return Err(CatalogError::NotFound(id));
        }

        // Image save happens before the document is persisted and
        // aborts the whole update on failure. The replaced file stays
        // behind as an orphan for the cleanup pass.
        let image = match &patch.image {
            Some(source) => Some(self.images.save(source)?),
            None => None,
        };

        let recipe = doc
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CatalogError::NotFound(id))?;

        if let Some(name) = name {
            recipe.name = name;
        }
        if let Some(notes) = patch.notes {
            recipe.notes = Some(notes);
        }
        if let Some(image) = image {
            recipe.image = Some(image);
        }

        let record = recipe.clone();
        self.docs.save(&doc)?;

        Ok(Mutation {
            record: Some(record),
            recipes: doc.recipes,
        })
    }

    /// Idempotent: deleting an id that is already absent is a no-op.
    pub fn delete(&self, id: Uuid) -> Result<Mutation> {
        let mut doc = self.docs.load()?;

        let Some(position) = doc.recipes.iter().position(|r| r.id == id) else {
            return Ok(Mutation {
                record: None,
                recipes: doc.recipes,
            });
        };

        let removed = doc.recipes.remove(position);
        if let Some(image) = &removed.image {
            // Best effort: a missing or undeletable image must never
            // block removal of the record.
            if let Err(err) = self.images.delete(image) {
                warn!(%image, %err, "failed to delete recipe image");
            }
        }
        self.docs.save(&doc)?;

        Ok(Mutation {
            record: None,
            recipes: doc.recipes,
        })
    }

    /// Empty the recipe list. Image files are left alone; reclaiming
    /// them is the cleanup pass's job.
    pub fn clear_all(&self) -> Result<Mutation> {
        let mut doc = self.docs.load()?;
        doc.recipes.clear();
        self.docs.save(&doc)?;

        Ok(Mutation {
            record: None,
            recipes: doc.recipes,
        })
    }

    /// Delete every image file referenced by no recipe. Returns the
    /// reclaimed file names; individual delete failures are logged and
    /// skipped.
    pub fn cleanup_images(&self) -> Result<Vec<String>> {
        let doc = self.docs.load()?;
        let live: HashSet<String> = doc.recipes.iter().filter_map(|r| r.image.clone()).collect();

        let mut reclaimed = Vec::new();
        for name in self.images.orphans(&live)? {
            match self.images.delete(&name) {
                Ok(()) => reclaimed.push(name),
                Err(err) => warn!(image = %name, %err, "failed to delete orphan image"),
            }
        }
        Ok(reclaimed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::null::NullImageStore;
    use crate::store::memory::MemDocumentStore;
    use crate::store::DocumentStore;

    fn repo() -> RecipeRepository<MemDocumentStore, NullImageStore> {
        RecipeRepository::new(MemDocumentStore::new(), NullImageStore)
    }

    #[test]
    fn create_appends_and_returns_authoritative_list() {
        let repo = repo();
        let first = repo.create(RecipeDraft::new("Tomato Soup")).unwrap();
        let second = repo
            .create(RecipeDraft::new("Pancakes").with_notes("weekend"))
            .unwrap();

        assert_eq!(second.recipes.len(), 2);
        assert_eq!(second.recipes[0].name, "Tomato Soup");
        assert_eq!(second.recipes[1].name, "Pancakes");
        assert_ne!(
            first.record.unwrap().id,
            second.record.as_ref().unwrap().id
        );
        assert_eq!(repo.list().unwrap(), second.recipes);
    }

    #[test]
    fn create_trims_name_and_sets_created_at() {
        let repo = repo();
        let record = repo
            .create(RecipeDraft::new("  Soup  "))
            .unwrap()
            .record
            .unwrap();
        assert_eq!(record.name, "Soup");
        assert!(record.created_at <= chrono::Utc::now());
    }

    #[test]
    fn create_with_blank_name_fails_and_persists_nothing() {
        let repo = repo();
        repo.create(RecipeDraft::new("Keep")).unwrap();
        let before = repo.documents().load().unwrap();

        let err = repo.create(RecipeDraft::new("   ")).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(repo.documents().load().unwrap(), before);
    }

    #[test]
    fn create_with_overlong_notes_fails() {
        let repo = repo();
        let err = repo
            .create(RecipeDraft::new("Soup").with_notes("n".repeat(501)))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn update_merges_only_provided_fields() {
        let repo = repo();
        let record = repo
            .create(
                RecipeDraft::new("Tomato Soup")
                    .with_notes("simmer 20 min")
                    .with_image("picked.jpg"),
            )
            .unwrap()
            .record
            .unwrap();

        let updated = repo
            .update(record.id, RecipePatch::new().with_notes("simmer 25 min"))
            .unwrap()
            .record
            .unwrap();

        assert_eq!(updated.notes.as_deref(), Some("simmer 25 min"));
        assert_eq!(updated.name, record.name);
        assert_eq!(updated.image, record.image);
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.created_at, record.created_at);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let repo = repo();
        let id = Uuid::new_v4();
        let err = repo
            .update(id, RecipePatch::new().with_name("Ghost"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(e) if e == id));
    }

    #[test]
    fn update_with_image_on_unknown_id_writes_no_file() {
        let tmp = tempfile::tempdir().unwrap();
        let images = crate::images::fs::FsImageStore::new(tmp.path().join("imgs"));
        let repo = RecipeRepository::new(MemDocumentStore::new(), images);

        let source = tmp.path().join("photo.png");
        image::RgbImage::from_pixel(8, 8, image::Rgb([10, 20, 30]))
            .save(&source)
            .unwrap();

        let id = Uuid::new_v4();
        let err = repo
            .update(id, RecipePatch::new().with_image(&source))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(e) if e == id));

        // NotFound must leave persisted state untouched: no image file
        // may appear in the managed directory.
        assert!(repo.images().orphans(&HashSet::new()).unwrap().is_empty());
    }

    #[test]
    fn update_with_invalid_name_leaves_document_unchanged() {
        let repo = repo();
        let record = repo
            .create(RecipeDraft::new("Soup"))
            .unwrap()
            .record
            .unwrap();
        let before = repo.documents().load().unwrap();

        let err = repo
            .update(record.id, RecipePatch::new().with_name(""))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(repo.documents().load().unwrap(), before);
    }

    #[test]
    fn delete_is_idempotent() {
        let repo = repo();
        let record = repo
            .create(RecipeDraft::new("Soup"))
            .unwrap()
            .record
            .unwrap();

        let first = repo.delete(record.id).unwrap();
        assert!(first.recipes.is_empty());

        let second = repo.delete(record.id).unwrap();
        assert!(second.recipes.is_empty());
    }

    #[test]
    fn clear_all_empties_the_list() {
        let repo = repo();
        repo.create(RecipeDraft::new("A")).unwrap();
        repo.create(RecipeDraft::new("B")).unwrap();

        let cleared = repo.clear_all().unwrap();
        assert!(cleared.recipes.is_empty());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn failed_image_save_aborts_create_before_persisting() {
        // A file-backed image store with a missing source fails the
        // save; the document must be untouched afterwards.
        let tmp = tempfile::tempdir().unwrap();
        let images = crate::images::fs::FsImageStore::new(tmp.path().join("imgs"));
        let repo = RecipeRepository::new(MemDocumentStore::new(), images);

        let err = repo
            .create(RecipeDraft::new("Soup").with_image(tmp.path().join("missing.png")))
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn failed_document_write_surfaces() {
        let repo = repo();
        repo.documents().set_simulate_write_error(true);
        let err = repo.create(RecipeDraft::new("Soup")).unwrap_err();
        assert!(matches!(err, CatalogError::Store(_)));
    }

    #[test]
    fn file_backed_repository_persists_across_instances() {
        let env = crate::test_utils::TestEnv::new();
        env.repo.init().unwrap();
        env.repo.create(RecipeDraft::new("Soup")).unwrap();

        let reopened = RecipeRepository::new(
            crate::store::fs::FsDocumentStore::new(env.root.clone()),
            crate::images::fs::FsImageStore::new(env.root.join("recipe-images")),
        );
        assert_eq!(reopened.list().unwrap().len(), 1);
    }

    #[test]
    fn init_is_safe_to_call_repeatedly() {
        let repo = repo();
        repo.init().unwrap();
        repo.create(RecipeDraft::new("Survivor")).unwrap();
        repo.init().unwrap();
        assert_eq!(repo.list().unwrap().len(), 1);
    }
}
