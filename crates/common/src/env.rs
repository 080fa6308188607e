//! Environment/runtime helpers
//!
//! Sanity checks run before the roster file is opened. Nothing is created
//! here; the storage creates directories on its first write.

use std::path::Path;

use tracing::{info, warn};

/// Reject a directory in place of the roster file; warn when the file is
/// read-only and note when it is absent so an empty roster is explained.
pub fn ensure_env(data_file: &Path) -> anyhow::Result<()> {
    match std::fs::metadata(data_file) {
        Ok(meta) if meta.is_dir() => {
            return Err(anyhow::anyhow!("{} is a directory, expected a roster file", data_file.display()));
        }
        Ok(meta) if meta.permissions().readonly() => {
            warn!(path = %data_file.display(), "roster file is read-only; changes will fail to save");
        }
        Ok(_) => {}
        Err(_) => info!(path = %data_file.display(), "roster file not found; it will be created on first change"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_creates_nothing() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("roster_env_{}", uuid::Uuid::new_v4()));
        let file = dir.join("a").join("students.json");
        ensure_env(&file)?;
        assert!(!dir.exists());
        Ok(())
    }

    #[test]
    fn existing_file_is_accepted() -> anyhow::Result<()> {
        let file = std::env::temp_dir().join(format!("roster_env_{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&file, "[]")?;
        ensure_env(&file)?;
        let _ = std::fs::remove_file(&file);
        Ok(())
    }

    #[test]
    fn rejects_directory_in_place_of_file() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("roster_env_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir)?;
        assert!(ensure_env(&dir).is_err());
        let _ = std::fs::remove_dir_all(&dir);
        Ok(())
    }
}
