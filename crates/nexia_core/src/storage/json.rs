//! JSON file storage.

use crate::model::notebook::Notebook;
use crate::storage::{Storage, StorageError, StorageResult};
use log::{info, warn};
use std::path::Path;

/// Stores one notebook per file as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStorage;

impl JsonStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for JsonStorage {
    fn save(&self, notebook: &Notebook, path: &Path) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(notebook)?;
        std::fs::write(path, json)?;
        info!(
            "event=notebook_save module=storage status=ok notes={}",
            notebook.len()
        );
        Ok(())
    }

    fn load(&self, path: &Path) -> StorageResult<Notebook> {
        if !path.exists() {
            return Err(StorageError::NotFound(path.to_path_buf()));
        }

        let json = std::fs::read_to_string(path)?;
        let mut notebook: Notebook = serde_json::from_str(&json)?;
        let rewritten = notebook.align_note_ids();
        if rewritten > 0 {
            warn!("event=notebook_load module=storage status=repaired rewritten_ids={rewritten}");
        }
        let dropped = notebook.rebuild_backlinks();
        if dropped > 0 {
            warn!("event=notebook_load module=storage status=repaired dropped_links={dropped}");
        }
        info!(
            "event=notebook_load module=storage status=ok notes={}",
            notebook.len()
        );
        Ok(notebook)
    }
}

#[cfg(test)]
mod tests {
    use super::JsonStorage;
    use crate::storage::{Storage, StorageError};
    use std::path::Path;

    #[test]
    fn load_missing_file_reports_not_found() {
        let result = JsonStorage::new().load(Path::new("/nonexistent/notebook.nexia.json"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("broken.nexia.json");
        std::fs::write(&path, "{ not json").expect("fixture should be written");

        let err = JsonStorage::new()
            .load(&path)
            .expect_err("malformed json must fail");
        assert!(matches!(err, StorageError::Json(_)));
        assert!(err.to_string().starts_with("JSON serialization error"));
    }
}
