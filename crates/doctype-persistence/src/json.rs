//! JSON directory store.
//!
//! Each result is written to `<dir>/<result-id>.json` as pretty JSON.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use doctype_model::ClassificationResult;

use crate::error::{Result, StoreError};
use crate::store::{ResultStore, sort_oldest_first};

/// Store that writes one JSON file per result.
#[derive(Debug, Clone)]
pub struct JsonResultStore {
    dir: PathBuf,
}

impl JsonResultStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding a result.
    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId { id: id.to_string() });
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    /// Save a result on the blocking thread pool.
    pub async fn save_async(&self, result: ClassificationResult) -> Result<()> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.save(&result))
            .await
            .map_err(|e| StoreError::Task {
                message: e.to_string(),
            })?
    }

    /// Load a result on the blocking thread pool.
    pub async fn get_async(&self, id: String) -> Result<Option<ClassificationResult>> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.get(&id))
            .await
            .map_err(|e| StoreError::Task {
                message: e.to_string(),
            })?
    }

    fn read_file(path: &Path) -> Result<ClassificationResult> {
        let contents = fs::read_to_string(path).map_err(|e| StoreError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| StoreError::Deserialization {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write bytes via a temp file and rename.
    fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(bytes).map_err(|e| StoreError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })
    }
}

impl ResultStore for JsonResultStore {
    fn save(&self, result: &ClassificationResult) -> Result<()> {
        let path = self.path_for(&result.id)?;
        let json = serde_json::to_vec_pretty(result).map_err(|e| StoreError::Serialization {
            id: result.id.clone(),
            source: e,
        })?;
        Self::write_atomic(&path, &json)?;
        tracing::info!(
            result_id = %result.id,
            path = %path.display(),
            "Saved classification result"
        );
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<ClassificationResult>> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(None);
        }
        Self::read_file(&path).map(Some)
    }

    fn find_by_document_id(&self, document_id: &str) -> Result<Vec<ClassificationResult>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::Io {
            operation: "read",
            path: self.dir.clone(),
            source: e,
        })?;

        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io {
                operation: "read",
                path: self.dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let result = Self::read_file(&path)?;
            if result.document_id == document_id {
                found.push(result);
            }
        }
        sort_oldest_first(&mut found);
        Ok(found)
    }
}
