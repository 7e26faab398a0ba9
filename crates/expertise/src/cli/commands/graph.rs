//! Implementation of `expertise graph`.

use std::process::ExitCode;

use expertise_session::GraphOutcome;

use crate::cli::{
    args::GraphCommand,
    context::CommandContext,
    output::{dim, print_graph, print_json},
};

/// Fetches the relationship graph around a node and prints its view model.
pub fn run(ctx: &CommandContext, cmd: &GraphCommand) -> ExitCode {
    let directory = match ctx.directory() {
        Ok(directory) => directory,
        Err(code) => return code,
    };

    let mut session = ctx.session();
    match session.show_graph(&directory, &cmd.id) {
        GraphOutcome::Shown { .. } => {}
        GraphOutcome::Empty => {
            println!("{}", dim("No graph data."));
            return ExitCode::SUCCESS;
        }
        GraphOutcome::Failed(e) => {
            eprintln!("error: could not load graph for {}: {e}", cmd.id);
            return ExitCode::FAILURE;
        }
        GraphOutcome::Stale => return ExitCode::FAILURE,
    }

    let Some(view) = session.graph() else {
        return ExitCode::FAILURE;
    };
    if cmd.json {
        return print_json(view);
    }
    print_graph(view);
    ExitCode::SUCCESS
}
