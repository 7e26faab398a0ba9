//! Configuration merging.
//!
//! Layers parsed files into one [`Config`]. Every scalar takes the value from the closest
//! file that sets it, falling back to the built-in default.

use std::path::{Path, PathBuf};

use crate::{
    Config, GraphSettings, ServiceSettings, ShareSettings,
    parse::{RawConfig, RawGraphSettings, RawServiceSettings, RawShareSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges parsed files given closest first (highest precedence) and global last.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config {
        config_root: configs
            .first()
            .and_then(|parsed| parsed.path.parent())
            .map(Path::to_path_buf),
        ..Config::default()
    };

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(service) = &raw.service {
            apply_service(&mut config.service, service);
        }
        if let Some(graph) = &raw.graph {
            apply_graph(&mut config.graph, graph);
        }
        if let Some(share) = &raw.share {
            apply_share(&mut config.share, share);
        }
    }

    config
}

/// Applies the values present in a raw `[service]` section.
fn apply_service(result: &mut ServiceSettings, raw: &RawServiceSettings) {
    if let Some(v) = &raw.base_url {
        result.base_url.clone_from(v);
    }
    if let Some(v) = raw.timeout_secs {
        result.timeout_secs = v;
    }
}

/// Applies the values present in a raw `[graph]` section.
fn apply_graph(result: &mut GraphSettings, raw: &RawGraphSettings) {
    if let Some(v) = raw.wrap_width {
        result.wrap_width = v;
    }
}

/// Applies the values present in a raw `[share]` section.
fn apply_share(result: &mut ShareSettings, raw: &RawShareSettings) {
    if let Some(v) = &raw.page_url {
        result.page_url.clone_from(v);
    }
    if let Some(v) = raw.threshold {
        result.threshold = v;
    }
}
