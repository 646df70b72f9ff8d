use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ContactGraphError, Result};

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/configuration.json";

/// Default number of expansion rounds for `reveal_contacts`.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Default cap on paths returned by the presentation layer.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactGraphConfig {
    pub data: DataConfig,
    pub search: SearchConfig,
    pub log: LogConfig,
    pub server: ServerConfig,
}

/// Where the edge list comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the `source,destination` edge list.
    pub file: Option<PathBuf>,
}

/// Settings for [`PathSearchEngine`](crate::graph::PathSearchEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Upper bound on expansion rounds in `reveal_contacts`.
    pub max_depth: usize,
    /// Accepted and stored; no search consults it.
    pub first_hit_only: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            first_hit_only: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    pub name: String,
    pub log_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            name: "contactgraph".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Maximum number of paths included in a reveal response.
    pub max_results: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("toml")
}

/// Loads the configuration from `path`.
///
/// A missing file yields the defaults. Files ending in `.toml` are parsed as
/// TOML, everything else as JSON.
pub fn load_config(path: &Path) -> Result<ContactGraphConfig> {
    if !path.exists() {
        return Ok(ContactGraphConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| ContactGraphError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let parsed = if is_toml(path) {
        toml::from_str(&contents).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&contents).map_err(|e| e.to_string())
    };

    parsed.map_err(|e| ContactGraphError::Config {
        message: format!("failed to parse config file '{}': {}", path.display(), e),
    })
}

/// Saves the configuration using an atomic write (temp file, then rename).
pub fn save_config(path: &Path, config: &ContactGraphConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ContactGraphError::Config {
            message: format!(
                "failed to create config directory '{}': {}",
                parent.display(),
                e
            ),
        })?;
    }

    let rendered: std::result::Result<String, String> = if is_toml(path) {
        toml::to_string_pretty(config).map_err(|e| e.to_string())
    } else {
        serde_json::to_string_pretty(config).map_err(|e| e.to_string())
    };
    let serialized = rendered.map_err(|e| ContactGraphError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, &serialized).map_err(|e| ContactGraphError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, path).map_err(|e| ContactGraphError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}
