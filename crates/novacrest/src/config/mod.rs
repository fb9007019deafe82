//! Configuration management for novacrest using the prefer crate.

mod geocoder;
mod loader;
mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{Branch, BranchRegistry};

pub use geocoder::GeocoderConfig;
pub use loader::{load_settings_with_options, LoadOptions};
pub use settings::{GeocoderSettings, Settings};

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "novacrest.db";

/// Default bind address for the HTTP server.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    #[error("Invalid branch {id}: {message}")]
    InvalidBranch { id: i64, message: String },
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Database filename or URL.
    /// Accepts a plain filename (e.g. "novacrest.db") which is joined with data_dir,
    /// or a database URL (e.g. "sqlite:///path/to/db").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Server bind address (host, port, or host:port).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Address geocoding settings.
    #[serde(default, skip_serializing_if = "GeocoderConfig::is_default")]
    #[prefer(default)]
    pub geocoder: GeocoderConfig,
    /// Branch registry override. Empty means the built-in Lagos branches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[prefer(skip)]
    pub branches: Vec<Branch>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers novacrest config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("novacrest").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => Self::load_from_path(path).await.unwrap_or_else(|e| {
                    tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                    Self::default()
                }),
                None => Self::default(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path).await?;
        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "TOML",
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "YAML",
                message: e.to_string(),
            }),
            _ => serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "JSON",
                message: e.to_string(),
            }),
        }
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Build the branch registry, validating any configured override.
    pub fn branch_registry(&self) -> Result<BranchRegistry, ConfigError> {
        if self.branches.is_empty() {
            return Ok(BranchRegistry::lagos());
        }
        for branch in &self.branches {
            branch
                .location
                .validate()
                .map_err(|e| ConfigError::InvalidBranch {
                    id: branch.id,
                    message: e.to_string(),
                })?;
        }
        Ok(BranchRegistry::new(self.branches.clone()))
    }

    /// Apply configuration to settings.
    /// `base_dir` is used to resolve relative paths (typically config file dir or CWD).
    pub fn apply_to_settings(
        &self,
        settings: &mut Settings,
        base_dir: &Path,
    ) -> Result<(), ConfigError> {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
        }
        if let Some(ref database) = self.database {
            if database.starts_with("sqlite:") {
                settings.database_url = Some(database.clone());
            } else {
                settings.database_filename = database.clone();
            }
        }
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
        self.geocoder.apply_to(&mut settings.geocoder);
        settings.branches = self.branch_registry()?;
        Ok(())
    }
}
