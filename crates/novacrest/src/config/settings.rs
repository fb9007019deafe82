//! Application settings.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::geo::{BranchRegistry, Coordinate};
use crate::repository::context::DbContext;
use crate::repository::migrations;
use crate::repository::pool::DbError;

use super::{DEFAULT_BIND, DEFAULT_DATABASE_FILENAME};

/// Default public Nominatim endpoint.
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Resolved geocoder settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub static_addresses: HashMap<String, Coordinate>,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODER_URL.to_string(),
            user_agent: concat!("novacrest/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            max_retries: 2,
            static_addresses: HashMap::new(),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    /// Set via DATABASE_URL env var or the `database` field in config files.
    pub database_url: Option<String>,
    /// HTTP bind address.
    pub bind: String,
    /// Geocoder settings.
    pub geocoder: GeocoderSettings,
    /// Branch registry served by the locator.
    pub branches: BranchRegistry,
}

impl Default for Settings {
    fn default() -> Self {
        // Falls back gracefully: data dir -> home dir -> current dir
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("novacrest");

        Self::with_data_dir(data_dir)
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            bind: DEFAULT_BIND.to_string(),
            geocoder: GeocoderSettings::default(),
            branches: BranchRegistry::lagos(),
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        match self.database_url {
            Some(ref url) => url.clone(),
            None => format!("sqlite:{}", self.database_path().display()),
        }
    }

    /// Get the full path to the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }

    /// Create a database context using the configured database URL or path.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::from_url(&self.database_url())
    }

    /// Create the data directory and bring the schema up to date.
    pub async fn prepare_database(&self) -> Result<DbContext, DbError> {
        if self.database_url.is_none() {
            self.ensure_directories()
                .map_err(crate::repository::util::to_diesel_error)?;
        }
        migrations::run_migrations(&self.database_url()).await?;
        Ok(self.create_db_context())
    }
}
