//! Configuration loading and merging logic.

use std::path::{Path, PathBuf};

use super::{Config, ConfigError, Settings};

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
    /// Data directory or database file (--target flag).
    pub data: Option<PathBuf>,
}

/// Look for a config file inside the data directory.
fn find_config_in_data_dir(data_dir: &Path) -> Option<PathBuf> {
    let extensions = ["json", "yaml", "yml", "toml"];
    let basenames = ["novacrest", "config"];

    for basename in basenames {
        for ext in extensions {
            let path = data_dir.join(format!("{}.{}", basename, ext));
            if path.exists() {
                return Some(path);
            }
        }
    }
    None
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn is_db_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "db" || ext == "sqlite" || ext == "sqlite3")
}

/// Split a --target value into a data directory and optional database filename.
fn resolve_target(path: &Path) -> (PathBuf, Option<String>) {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        current_dir().join(path)
    };

    if is_db_file(&path) {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string());
        let dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        (dir, filename)
    } else {
        (path, None)
    }
}

async fn load_file_config(options: &LoadOptions, data_dir: Option<&Path>) -> Config {
    // Priority 1: Explicit --config flag
    if let Some(ref config_path) = options.config_path {
        return Config::load_from_path(config_path)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("{}: {}", config_path.display(), e);
                Config::default()
            });
    }

    // Priority 2: Config inside the data dir
    if let Some(dir) = data_dir {
        if let Some(config_path) = find_config_in_data_dir(dir) {
            tracing::debug!("Found config in data dir: {}", config_path.display());
            return Config::load_from_path(&config_path)
                .await
                .unwrap_or_default();
        }
    }

    // Priority 3: Auto-discover via prefer
    Config::load().await
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(
    options: LoadOptions,
) -> Result<(Settings, Config), ConfigError> {
    let target = options.data.as_deref().map(resolve_target);

    let config = load_file_config(&options, target.as_ref().map(|(d, _)| d.as_path())).await;

    let mut settings = Settings::default();

    let base_dir = if options.use_cwd {
        current_dir()
    } else {
        config.base_dir().unwrap_or_else(current_dir)
    };

    config.apply_to_settings(&mut settings, &base_dir)?;

    // --target takes precedence over the config file
    if let Some((dir, filename)) = target {
        settings.data_dir = dir;
        if let Some(filename) = filename {
            settings.database_filename = filename;
        }
    }

    // Environment variables take highest precedence
    if let Some(database_url) = env_override("DATABASE_URL") {
        tracing::debug!("Using DATABASE_URL from environment");
        settings.database_url = Some(database_url);
    }
    if let Some(bind) = env_override("NOVACREST_BIND") {
        tracing::debug!("Using NOVACREST_BIND from environment: {}", bind);
        settings.bind = bind;
    }
    if let Some(url) = env_override("GEOCODER_URL") {
        tracing::debug!("Using GEOCODER_URL from environment: {}", url);
        settings.geocoder.base_url = url;
    }

    Ok((settings, config))
}
