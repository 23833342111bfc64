//! Application configuration, loadable from TOML.
//!
//! ```toml
//! [board]
//! preset = "english"
//! # layout = ["xxoooxx", "xxoooxx", "ooooooo", "ooo.ooo", "ooooooo", "xxoooxx", "xxoooxx"]
//! # layout_file = "boards/diamond.txt"
//!
//! [remote]
//! enabled = true
//! host = "127.0.0.1"
//! port = 7878
//! max_pending_commands = 10
//! # log_path = "wire.jsonl"
//!
//! [view]
//! cell_width = 2
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapter::{ServerConfig, DEFAULT_HOST, DEFAULT_MAX_PENDING, DEFAULT_PORT};
use crate::core::{preset_layout, Layout, Preset};
use crate::error::ConfigError;

pub const DEFAULT_CONFIG_PATH: &str = "peg-solitaire.toml";
pub const MAX_CELL_WIDTH: u16 = 4;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub remote: RemoteConfig,
    pub view: ViewConfig,
}

/// Which layout a new game starts from. An inline `layout` wins over
/// `layout_file`, which wins over `preset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub preset: String,
    /// Inline layout rows in the `o` / `.` / `x` text format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_file: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            preset: Preset::English.as_str().to_string(),
            layout: None,
            layout_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub max_pending_commands: usize,
    /// JSONL file receiving every line sent or received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_pending_commands: DEFAULT_MAX_PENDING,
            log_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Terminal columns per board cell.
    pub cell_width: u16,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { cell_width: 2 }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    ///
    /// An inline layout is parsed here; a layout file is only read by
    /// [`board_layout`](Self::board_layout).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Preset::from_str(&self.board.preset).is_none() {
            return Err(ConfigError::Validation(format!(
                "board.preset '{}' is not one of english, european, mini",
                self.board.preset
            )));
        }
        if let Some(rows) = &self.board.layout {
            Layout::parse(&rows.join("\n"))?;
        }
        if self.remote.host.trim().is_empty() {
            return Err(ConfigError::Validation("remote.host must not be empty".into()));
        }
        if self.remote.max_pending_commands == 0 {
            return Err(ConfigError::Validation(
                "remote.max_pending_commands must be at least 1".into(),
            ));
        }
        if self.view.cell_width == 0 || self.view.cell_width > MAX_CELL_WIDTH {
            return Err(ConfigError::Validation(format!(
                "view.cell_width must be in 1..={}",
                MAX_CELL_WIDTH
            )));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }

    /// Resolve the starting layout.
    pub fn board_layout(&self) -> Result<Layout, ConfigError> {
        if let Some(rows) = &self.board.layout {
            return Ok(Layout::parse(&rows.join("\n"))?);
        }
        if let Some(path) = &self.board.layout_file {
            let text = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
                path: path.clone(),
                source: e,
            })?;
            return Ok(Layout::parse(&text)?);
        }
        Ok(preset_layout(&self.board.preset)?)
    }

    /// Adapter settings from `[remote]`, before any environment overrides.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.remote.host.clone(),
            port: self.remote.port,
            max_pending_commands: self.remote.max_pending_commands,
            log_path: self.remote.log_path.clone(),
            disabled: !self.remote.enabled,
            ..ServerConfig::default()
        }
    }
}
