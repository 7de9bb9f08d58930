use crate::{
    error::{Result, TaskboardError},
    storage::Storage,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File-based storage: one JSON file per key inside a hidden project directory
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const TASKBOARD_DIR: &'static str = ".taskboard";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::TASKBOARD_DIR),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn slot_file(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(TaskboardError::StorageError(format!(
                "invalid storage key '{}'",
                key
            )));
        }
        Ok(self.root_path.join(format!("{}.json", key)))
    }

    fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path)?;
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.slot_file(key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&file_path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let file_path = self.slot_file(key)?;
        self.ensure_directory_exists()?;

        // Write beside the target and rename so a reader never sees half a file
        let tmp_path = file_path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &file_path)?;
        Ok(())
    }
}
