use std::fs;
use std::path::{Path, PathBuf};

use navtree_types::WidgetConfig;
use thiserror::Error;
use tracing::warn;

use crate::path_processing::config_file_path;

/// Environment variable overriding the widget config location.
pub const CONFIG_PATH_ENV: &str = "NAVTREE_CONFIG_PATH";

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Get the default path for the widget configuration file.
pub fn default_config_path() -> PathBuf {
    config_file_path(CONFIG_PATH_ENV, CONFIG_FILE_NAME)
}

/// Loads the widget configuration from the default path.
pub fn load_widget_config() -> Result<WidgetConfig, ConfigError> {
    load_widget_config_from(&default_config_path())
}

/// Loads the widget configuration from `path`.
///
/// A missing file yields the defaults; an unparsable file is reported and also
/// yields the defaults. Only genuine I/O failures are returned as errors.
pub fn load_widget_config_from(path: &Path) -> Result<WidgetConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Failed to parse widget config; using defaults");
                Ok(WidgetConfig::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(WidgetConfig::default()),
        Err(error) => Err(ConfigError::Io(error)),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
pub fn save_widget_config(config: &WidgetConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}
