use crate::images::fs::FsImageStore;
use crate::repository::RecipeRepository;
use crate::store::fs::FsDocumentStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub repo: RecipeRepository<FsDocumentStore, FsImageStore>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let repo = RecipeRepository::new(
            FsDocumentStore::new(root.clone()),
            FsImageStore::new(root.join("recipe-images")),
        );
        Self {
            _temp_dir: temp_dir,
            repo,
            root,
        }
    }
}
