//! Configuration file parsing.
//!
//! Each `.expertise.toml` is parsed into a [`RawConfig`] whose fields are all optional, so
//! partial files can be layered during merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Configuration as written in one file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Remote service section.
    pub service: Option<RawServiceSettings>,
    /// Graph view section.
    pub graph: Option<RawGraphSettings>,
    /// Share link section.
    pub share: Option<RawShareSettings>,
}

/// Raw `[service]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawServiceSettings {
    /// Base URL of the directory endpoints.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Raw `[graph]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawGraphSettings {
    /// Column budget for node labels.
    pub wrap_width: Option<usize>,
}

/// Raw `[share]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawShareSettings {
    /// Page that share links point to.
    pub page_url: Option<String>,
    /// Query length above which links are shortened.
    pub threshold: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string; `path` is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration without path context (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Whether the file at `path` sets `root = true`.
///
/// Unreadable or malformed files count as not root; loading reports them properly.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    toml::from_str::<RawConfig>(&contents).is_ok_and(|config| config.root == Some(true))
}
