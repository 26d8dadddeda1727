use super::DocumentStore;
use crate::error::{CatalogError, Result};
use crate::model::StorageDocument;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File name of the persisted catalog document under the data root.
pub const DOCUMENT_FILE: &str = "catalog.json";

/// File-backed document store: one `catalog.json` under the data root.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn document_path(&self) -> PathBuf {
        self.root.join(DOCUMENT_FILE)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(CatalogError::Io)?;
        }
        Ok(())
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self) -> Result<StorageDocument> {
        let path = self.document_path();
        if !path.exists() {
            return Ok(StorageDocument::default());
        }
        let content = fs::read_to_string(path).map_err(CatalogError::Io)?;
        let doc: StorageDocument =
            serde_json::from_str(&content).map_err(CatalogError::Serialization)?;
        Ok(doc)
    }

    fn save(&self, doc: &StorageDocument) -> Result<()> {
        self.ensure_dir(&self.root)?;

        let content = serde_json::to_string_pretty(doc).map_err(CatalogError::Serialization)?;

        // Atomic write: tmp file in the same directory, then rename.
        let tmp_file = self.root.join(format!(".catalog-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(CatalogError::Io)?;
        fs::rename(&tmp_file, self.document_path()).map_err(CatalogError::Io)?;

        Ok(())
    }
}
