use std::path::{Path, PathBuf};

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DATA_FILE_ENV: &str = "ROSTER_DATA_FILE";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_data_file() -> PathBuf { PathBuf::from("data/students.json") }
fn default_log_format() -> String { "compact".into() }

/// Path from `CONFIG_PATH`, falling back to `config.toml`.
pub fn default_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_or_default(default_path())
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

/// Like [`load_from_file`] but a missing file yields the defaults.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(path).map_err(|e| anyhow!("cannot load {}: {e}", path.display()))
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => load_from_file(p).map_err(|e| anyhow!("cannot load {}: {e}", p.display()))?,
            None => load_default()?,
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.apply_override(std::env::var(DATA_FILE_ENV).ok());
        self.storage.validate()?;
        self.logging.normalize()?;
        Ok(())
    }
}

impl StorageConfig {
    /// A non-blank override replaces the configured data file.
    pub fn apply_override(&mut self, data_file: Option<String>) {
        if let Some(path) = data_file.filter(|p| !p.trim().is_empty()) {
            self.data_file = PathBuf::from(path.trim());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(anyhow!("storage.data_file must not be empty"));
        }
        if self.data_file.file_name().is_none() {
            return Err(anyhow!("storage.data_file must name a file, got {}", self.data_file.display()));
        }
        Ok(())
    }
}

impl LoggingConfig {
    fn normalize(&mut self) -> Result<()> {
        let format = self.format.trim().to_ascii_lowercase();
        if format.is_empty() {
            self.format = default_log_format();
        } else if format == "compact" || format == "json" {
            self.format = format;
        } else {
            return Err(anyhow!("logging.format must be `compact` or `json`, got `{format}`"));
        }
        Ok(())
    }

    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() -> Result<()> {
        let cfg = parse("")?;
        assert_eq!(cfg.storage.data_file, PathBuf::from("data/students.json"));
        assert_eq!(cfg.logging.format, "compact");
        Ok(())
    }

    #[test]
    fn sections_are_read() -> Result<()> {
        let mut cfg = parse("[storage]\ndata_file = \"/var/lib/roster/class.json\"\n\n[logging]\nformat = \"JSON\"\n")?;
        cfg.logging.normalize()?;
        assert_eq!(cfg.storage.data_file, PathBuf::from("/var/lib/roster/class.json"));
        assert!(cfg.logging.is_json());
        Ok(())
    }

    #[test]
    fn override_replaces_data_file_unless_blank() {
        let mut storage = StorageConfig::default();
        storage.apply_override(Some("  ".into()));
        assert_eq!(storage.data_file, PathBuf::from("data/students.json"));
        storage.apply_override(Some(" other.json ".into()));
        assert_eq!(storage.data_file, PathBuf::from("other.json"));
        storage.apply_override(None);
        assert_eq!(storage.data_file, PathBuf::from("other.json"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let storage = StorageConfig { data_file: PathBuf::new() };
        assert!(storage.validate().is_err());
        let storage = StorageConfig { data_file: PathBuf::from("..") };
        assert!(storage.validate().is_err());

        let mut logging = LoggingConfig { format: "xml".into() };
        assert!(logging.normalize().is_err());
    }

    #[test]
    fn missing_file_loads_defaults() -> Result<()> {
        let cfg = load_or_default("/nonexistent/roster/config.toml")?;
        assert_eq!(cfg.logging.format, "compact");
        Ok(())
    }
}
