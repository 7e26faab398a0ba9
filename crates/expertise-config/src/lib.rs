//! Configuration system for the expertise directory client.
//!
//! Settings live in TOML files named `.expertise.toml`. They are collected walking up the
//! directory tree from the current working directory, then `~/.expertise.toml` is loaded as
//! the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawGraphSettings, RawServiceSettings, RawShareSettings, parse_config_file,
    parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Merged configuration of the client.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Remote service settings.
    pub service: ServiceSettings,
    /// Graph view settings.
    pub graph: GraphSettings,
    /// Share link settings.
    pub share: ShareSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging every `.expertise.toml` that applies
    /// to `cwd`.
    ///
    /// Returns the defaults if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_from_files(&discover_config_files(cwd))
    }

    /// Loads configuration from explicit files, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Checks the configuration for settings that would misbehave.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Renders the effective settings in `.expertise.toml` format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            service: &self.service,
            graph: &self.graph,
            share: &self.share,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Remote service settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Base URL the `persons`, `graph` and `share` endpoints hang off.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8000/expertise"),
            timeout_secs: 10,
        }
    }
}

/// Graph view settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Column budget for node labels.
    pub wrap_width: usize,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self { wrap_width: 22 }
    }
}

/// Share link settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShareSettings {
    /// Page that share links point to.
    pub page_url: String,
    /// Query length above which links are shortened.
    pub threshold: usize,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            page_url: String::from("http://localhost:8000/expertise/"),
            threshold: 1500,
        }
    }
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Remote service settings.
    service: &'a ServiceSettings,
    /// Graph view settings.
    graph: &'a GraphSettings,
    /// Share link settings.
    share: &'a ShareSettings,
}
