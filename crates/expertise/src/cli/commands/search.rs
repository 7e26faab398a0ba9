//! Implementation of `expertise search`.

use std::process::ExitCode;

use expertise_session::{SearchOutcome, SelectionState, SessionContext};

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{JsonResults, print_json, print_results},
};

/// Searches the directory, filters the result and prints it.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let directory = match ctx.directory() {
        Ok(directory) => directory,
        Err(code) => return code,
    };

    let mut session = ctx.session();
    for phrase in &cmd.phrases {
        if let Err(e) = session.select_search(phrase) {
            eprintln!("error: {phrase:?}: {e}");
            return ExitCode::FAILURE;
        }
    }
    for token in &cmd.filters {
        if let Err(e) = session.select(token.clone()) {
            eprintln!("error: {token}: {e}");
            return ExitCode::FAILURE;
        }
    }

    let outcome = session.search(&directory);
    if cmd.json {
        if let SearchOutcome::Failed(e) = &outcome {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        return print_json(&json_results(&session, &outcome));
    }

    println!("{outcome}");
    if outcome.result_count().is_none() {
        return ExitCode::FAILURE;
    }
    let phrases = session.selection().active_search_phrases();
    print_results(&session.filtered(), &phrases);
    ExitCode::SUCCESS
}

/// JSON document for a completed search.
pub fn json_results<'a>(session: &'a SessionContext, outcome: &SearchOutcome) -> JsonResults<'a> {
    let selection = session.selection();
    JsonResults {
        search: selection.active_search_phrases(),
        filters: selection
            .active_filters()
            .iter()
            .map(|token| token.id().to_string())
            .collect(),
        total: outcome.result_count().unwrap_or_default(),
        persons: session.filtered(),
    }
}
