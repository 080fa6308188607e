use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use models::StudentRecord;
use tracing::debug;
use uuid::Uuid;

use crate::{errors::ServiceError, storage::RosterStorage};

/// JSON file-backed roster storage.
///
/// Persists the roster as a pretty-printed JSON array in roster order. Each
/// write produces a complete sibling temp file which is then renamed over the
/// target, so readers see either the previous roster or the new one.
/// No locking: two processes writing the same file will overwrite each other.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    file_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> Result<PathBuf, ServiceError> {
        let file_name = self
            .file_path
            .file_name()
            .ok_or_else(|| ServiceError::persistence(format!("{} has no file name", self.file_path.display())))?;
        let tmp_name = format!(".{}.{}.tmp", file_name.to_string_lossy(), Uuid::new_v4());
        Ok(self.file_path.with_file_name(tmp_name))
    }

    fn io_error(&self, action: &str, e: impl std::fmt::Display) -> ServiceError {
        ServiceError::persistence(format!("cannot {action} {}: {e}", self.file_path.display()))
    }
}

impl RosterStorage for JsonFileStorage {
    fn read(&self) -> Result<Option<Vec<StudentRecord>>, ServiceError> {
        let bytes = match fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error("read", e)),
        };
        // a truncated-to-empty file is treated as an empty roster
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Some(Vec::new()));
        }
        let records: Vec<StudentRecord> = serde_json::from_slice(&bytes).map_err(|e| self.io_error("parse", e))?;
        Ok(Some(records))
    }

    fn write(&self, records: &[StudentRecord]) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error("create directory for", e))?;
        }
        let data = serde_json::to_vec_pretty(records).map_err(|e| self.io_error("serialize", e))?;
        let tmp = self.temp_path()?;
        if let Err(e) = fs::write(&tmp, &data) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error("write", e));
        }
        if let Err(e) = fs::rename(&tmp, &self.file_path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error("replace", e));
        }
        debug!(path = %self.file_path.display(), records = records.len(), bytes = data.len(), "roster written");
        Ok(())
    }

    fn location(&self) -> String {
        self.file_path.display().to_string()
    }
}
