//! JSON file backend: one file per collection under a data directory.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Backend;
use crate::error::{DbError, DbResult};

/// Stores `<data_dir>/<name>.json` and `<data_dir>/<receipt_dir>/<file>`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    data_dir: PathBuf,
    receipt_dir: PathBuf,
}

impl FileBackend {
    /// Creates the backend. Directories are created on first write.
    pub fn new(data_dir: impl Into<PathBuf>, receipt_dir_name: &str) -> Self {
        let data_dir = data_dir.into();
        let receipt_dir = data_dir.join(receipt_dir_name);
        FileBackend {
            data_dir,
            receipt_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn receipt_dir(&self) -> &Path {
        &self.receipt_dir
    }

    /// Path of the file holding collection `name`.
    pub fn collection_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.json"))
    }

    fn ensure_dir(dir: &Path) -> DbResult<()> {
        fs::create_dir_all(dir).map_err(|e| DbError::io(dir.display().to_string(), e))
    }
}

impl Backend for FileBackend {
    fn read(&self, name: &str) -> DbResult<Option<Vec<u8>>> {
        let path = self.collection_path(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DbError::io(path.display().to_string(), e)),
        }
    }

    /// Writes `<name>.json.tmp`, syncs it, then renames it over the target,
    /// so readers see either the old collection or the new one.
    fn write(&self, name: &str, bytes: &[u8]) -> DbResult<()> {
        Self::ensure_dir(&self.data_dir)?;

        let target = self.collection_path(name);
        let tmp = self.data_dir.join(format!("{name}.json.tmp"));
        let tmp_label = tmp.display().to_string();

        let mut file = fs::File::create(&tmp).map_err(|e| DbError::io(&tmp_label, e))?;
        file.write_all(bytes)
            .and_then(|_| file.sync_all())
            .map_err(|e| DbError::io(&tmp_label, e))?;
        drop(file);

        fs::rename(&tmp, &target).map_err(|e| DbError::io(target.display().to_string(), e))?;
        debug!(path = %target.display(), bytes = bytes.len(), "Collection file written");
        Ok(())
    }

    fn export_text(&self, file_name: &str, contents: &str) -> DbResult<String> {
        Self::ensure_dir(&self.receipt_dir)?;
        let path = self.receipt_dir.join(file_name);
        fs::write(&path, contents).map_err(|e| DbError::io(path.display().to_string(), e))?;
        Ok(path.display().to_string())
    }
}
