use super::ImageStore;
use crate::error::{CatalogError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Passthrough image store for targets without a filesystem.
///
/// `save` hands the source reference back unchanged and nothing is ever
/// written or deleted. Byte access is unavailable, so backup export
/// cannot inline images on such a target.
pub struct NullImageStore;

impl ImageStore for NullImageStore {
    fn ensure_dir(&self) -> Result<()> {
        Ok(())
    }

    fn save(&self, source: &Path) -> Result<String> {
        Ok(source.to_string_lossy().into_owned())
    }

    fn resolve(&self, name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    fn delete(&self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn orphans(&self, _live: &HashSet<String>) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        Err(CatalogError::Store(format!(
            "Image bytes for {} are not available without a filesystem",
            name
        )))
    }

    fn write(&self, _bytes: &[u8]) -> Result<String> {
        Err(CatalogError::Store(
            "Cannot materialize image files without a filesystem".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_is_a_passthrough() {
        let store = NullImageStore;
        let name = store.save(Path::new("picked/photo.png")).unwrap();
        assert_eq!(name, "picked/photo.png");
        assert_eq!(store.resolve(&name), PathBuf::from("picked/photo.png"));
    }

    #[test]
    fn delete_and_orphans_are_no_ops() {
        let store = NullImageStore;
        store.delete("anything.jpg").unwrap();
        assert!(store.orphans(&HashSet::new()).unwrap().is_empty());
    }
}
