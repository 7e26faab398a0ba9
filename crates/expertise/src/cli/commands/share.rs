//! Implementation of `expertise share`.

use std::process::ExitCode;

use expertise_session::{Selection, ShareState, Shortener, share_url};

use crate::cli::{args::ShareCommand, context::CommandContext};

/// Prints a share link for the given selection.
pub fn run(ctx: &CommandContext, cmd: &ShareCommand) -> ExitCode {
    let phrases = cmd
        .selection
        .phrases
        .iter()
        .map(|phrase| phrase.trim().to_string())
        .filter(|phrase| !phrase.is_empty())
        .collect();
    let selection = Selection::from_parts(cmd.selection.filters.clone(), phrases);
    let state = ShareState::capture(&selection, cmd.graph.as_deref());

    let directory = if cmd.offline {
        None
    } else {
        match ctx.directory() {
            Ok(directory) => Some(directory),
            Err(code) => return code,
        }
    };

    let query = ctx
        .share_codec()
        .encode(&state, directory.as_ref().map(|d| d as &dyn Shortener));
    println!("{}", share_url(&ctx.config.share.page_url, &query));
    ExitCode::SUCCESS
}
