//! Implementation of `expertise filter`.

use std::{fs, process::ExitCode};

use expertise_session::{SearchOutcome, SelectionState, SessionContext, SharedView};

use super::search::json_results;
use crate::cli::{
    args::FilterCommand,
    context::CommandContext,
    output::{describe_tokens, dim, print_json, print_results},
};

/// Filters a saved result set locally.
pub fn run(ctx: &CommandContext, cmd: &FilterCommand) -> ExitCode {
    let json = match fs::read_to_string(&cmd.input) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", cmd.input.display());
            return ExitCode::FAILURE;
        }
    };
    let view = match SharedView::from_json(&json) {
        Ok(view) => view,
        Err(e) => {
            eprintln!("error: {} is not a result set: {e}", cmd.input.display());
            return ExitCode::FAILURE;
        }
    };

    let total = view.persons.len();
    let mut session =
        match SessionContext::from_shared_view(view, ctx.graph_builder(), ctx.share_codec()) {
            Ok(session) => session,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        };

    for token in &cmd.selection.filters {
        if let Err(e) = session.select(token.clone()) {
            eprintln!("error: {token}: {e}");
            return ExitCode::FAILURE;
        }
    }
    // Phrases only highlight here; the saved rows are never searched again.
    let mut phrases = session.selection().active_search_phrases();
    phrases.extend(cmd.selection.phrases.iter().cloned());

    if cmd.json {
        return print_json(&json_results(&session, &SearchOutcome::Cached { count: total }));
    }

    if !session.selection().is_empty() {
        println!(
            "{}",
            dim(&format!(
                "Selection: {}",
                describe_tokens(session.selection().tokens())
            ))
        );
    }
    print_results(&session.filtered(), &phrases);
    ExitCode::SUCCESS
}
