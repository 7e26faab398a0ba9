//! Command implementations and dispatch.

pub mod config;
pub mod decode;
pub mod filter;
pub mod graph;
pub mod init;
pub mod search;
pub mod session;
pub mod share;
pub mod status;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Filter(cmd) => filter::run(ctx, &cmd),
        Commands::Graph(cmd) => graph::run(ctx, &cmd),
        Commands::Share(cmd) => share::run(ctx, &cmd),
        Commands::Decode(cmd) => decode::run(&cmd),
        Commands::Session => session::run(ctx),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Status => status::run(ctx),
    }
}
