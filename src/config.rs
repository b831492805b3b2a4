use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use tracing::Level;

use crate::repository::Storage;

pub const DEFAULT_CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Unknown log level '{0}'")]
    InvalidLogLevel(String),
}

/// Which backend the repositories persist to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryKind {
    #[default]
    InMemory,
    TextFiles,
    BinaryFiles,
}

impl RepositoryKind {
    fn extension(&self) -> &'static str {
        match self {
            RepositoryKind::InMemory => "",
            RepositoryKind::TextFiles => "csv",
            RepositoryKind::BinaryFiles => "bin",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub repository: RepositoryKind,
    pub clients: Option<PathBuf>,
    pub movies: Option<PathBuf>,
    pub rentals: Option<PathBuf>,
    /// Generate random data at start-up; unset means "only when in memory"
    pub seed: Option<bool>,
    pub color: bool,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repository: RepositoryKind::InMemory,
            clients: None,
            movies: None,
            rentals: None,
            seed: None,
            color: true,
            log_level: "warn".to_string(),
            log_file: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    settings: Settings,
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(content)?;
        Ok(file.settings)
    }

    /// Load settings from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Like `from_file`, but a missing file just means defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn should_seed(&self) -> bool {
        self.seed.unwrap_or(self.repository == RepositoryKind::InMemory)
    }

    fn storage_for(&self, path: &Option<PathBuf>, name: &str) -> Storage {
        let path = path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.{}", name, self.repository.extension())));
        match self.repository {
            RepositoryKind::InMemory => Storage::Memory,
            RepositoryKind::TextFiles => Storage::Text(path),
            RepositoryKind::BinaryFiles => Storage::Binary(path),
        }
    }

    /// Storage for the client, movie and rental repositories, in that order
    pub fn storages(&self) -> (Storage, Storage, Storage) {
        (
            self.storage_for(&self.clients, "clients"),
            self.storage_for(&self.movies, "movies"),
            self.storage_for(&self.rentals, "rentals"),
        )
    }
}
