//! Application configuration for ATOC.
//!
//! User config lives at `~/.atoc/atoc.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AtocError, Result};
use crate::types::DEFAULT_DOCUMENT_NAME;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "atoc.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".atoc";

// ---------------------------------------------------------------------------
// Config structs (matching atoc.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default document name for generated KML.
    #[serde(default = "default_document_name")]
    pub document_name: String,

    /// Group placemarks into per-category folders.
    #[serde(default = "default_use_folders")]
    pub use_folders: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            document_name: default_document_name(),
            use_folders: default_use_folders(),
        }
    }
}

fn default_document_name() -> String {
    DEFAULT_DOCUMENT_NAME.into()
}
fn default_use_folders() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.atoc/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AtocError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.atoc/atoc.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AtocError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| AtocError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| AtocError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| AtocError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| AtocError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
