//! Command-line interface for the `expertise` directory client.

use std::{io, process::ExitCode};

use clap::Parser;
use expertise::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "EXPERTISE_LOG";

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    // init must work even when an existing config file is broken
    let ctx = match cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}

/// Installs a stderr subscriber filtered by `EXPERTISE_LOG`, warnings only by default.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
