//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use expertise_config::Config;
use expertise_graph::GraphViewModelBuilder;
use expertise_session::{SessionContext, ShareCodec};

use crate::remote::HttpDirectory;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Opens an HTTP client for the configured service.
    pub fn directory(&self) -> Result<HttpDirectory, ExitCode> {
        let service = &self.config.service;
        if service.base_url.trim().is_empty() {
            eprintln!("error: service.base_url is not configured");
            eprintln!("Run 'expertise init' to create a configuration file.");
            return Err(ExitCode::FAILURE);
        }
        HttpDirectory::new(&service.base_url, Duration::from_secs(service.timeout_secs)).map_err(
            |e| {
                eprintln!("error: failed to create HTTP client: {e}");
                ExitCode::FAILURE
            },
        )
    }

    /// Graph builder configured with the label wrap width.
    pub fn graph_builder(&self) -> GraphViewModelBuilder {
        GraphViewModelBuilder::new().wrap_width(self.config.graph.wrap_width)
    }

    /// Share codec configured with the shortening threshold.
    pub fn share_codec(&self) -> ShareCodec {
        ShareCodec::new(self.config.share.threshold)
    }

    /// A fresh session using the configured builder and codec.
    pub fn session(&self) -> SessionContext {
        SessionContext::new(self.graph_builder(), self.share_codec())
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
