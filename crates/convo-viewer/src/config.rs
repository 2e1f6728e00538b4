//! Viewer configuration, read from TOML.
//!
//! Lookup order: an explicit `--config` path, then
//! `<config_dir>/convo-viewer/config.toml` if it exists, then defaults.
//! Every section and field is optional.

use std::path::{Path, PathBuf};

use convo_tree::{LayoutConfig, DEFAULT_ROOT_ID};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub chains: ChainsSourceConfig,
    pub tree: TreeSourceConfig,
    pub fetch: FetchConfig,
    pub layout: LayoutConfig,
    pub canvas: CanvasConfig,
    pub log: LogConfig,
}

/// Endpoint serving precomputed conversation chains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainsSourceConfig {
    pub url: String,
}

impl Default for ChainsSourceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:3000/data".to_string(),
        }
    }
}

/// Endpoint serving the flat node list of a conversation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSourceConfig {
    pub url: String,
    pub root_id: String,
}

impl Default for TreeSourceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080/trees.json".to_string(),
            root_id: DEFAULT_ROOT_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Whole-request timeout. Unset means wait forever.
    pub timeout_secs: Option<u64>,
}

/// Diagram viewport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// World units per terminal column. Rows are twice as tall.
    pub zoom: f64,
    /// World units moved per pan key press.
    pub pan_step: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            zoom: 10.0,
            pan_step: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Log file. Without one, interactive sessions log nowhere.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: None,
        }
    }
}

impl ViewerConfig {
    /// `<config_dir>/convo-viewer/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("convo-viewer").join("config.toml"))
    }

    /// Load from `path`, or from the default location if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded viewer config");
        Ok(config)
    }
}
