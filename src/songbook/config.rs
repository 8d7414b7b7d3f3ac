use crate::error::{Result, SongbookError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CATALOG: &str = "playlist.json";
const DEFAULT_EXPORT_NAME: &str = "花玲歌单";

/// Overrides the directory holding `config.json`.
pub const CONFIG_DIR_ENV: &str = "SONGBOOK_CONFIG_DIR";

/// Configuration for songbook, stored in `config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SongbookConfig {
    /// Catalog file, relative to the working directory unless absolute
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// Base name of exported files
    #[serde(default = "default_export_name")]
    pub export_name: String,
}

fn default_catalog() -> String {
    DEFAULT_CATALOG.to_string()
}

fn default_export_name() -> String {
    DEFAULT_EXPORT_NAME.to_string()
}

impl Default for SongbookConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            export_name: default_export_name(),
        }
    }
}

impl SongbookConfig {
    pub const KEYS: [&'static str; 2] = ["catalog", "export-name"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(SongbookError::Io)?;
        let config: SongbookConfig =
            serde_json::from_str(&content).map_err(SongbookError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(SongbookError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(SongbookError::Serialization)?;
        fs::write(config_path, content).map_err(SongbookError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalog" => Some(self.catalog.clone()),
            "export-name" => Some(self.export_name.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("Value for {} must not be empty", key));
        }
        match key {
            "catalog" => self.catalog = value.to_string(),
            "export-name" => self.export_name = value.to_string(),
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.catalog)
    }
}

/// Directory holding `config.json`: `$SONGBOOK_CONFIG_DIR` or the OS config dir.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    ProjectDirs::from("", "", "songbook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SongbookError::Store("Could not determine config directory".to_string()))
}
