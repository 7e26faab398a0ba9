//! Implementation of `expertise decode`.

use std::process::ExitCode;

use expertise_session::{DecodedShare, ShareCodec};

use crate::cli::{
    args::DecodeCommand,
    output::{describe_tokens, dim, subheader},
};

/// Decodes a share query string or URL and prints what it selects.
pub fn run(cmd: &DecodeCommand) -> ExitCode {
    let query = cmd
        .query
        .split_once('?')
        .map_or(cmd.query.as_str(), |(_, query)| query);
    let query = query.split_once('#').map_or(query, |(query, _)| query);

    let state = match ShareCodec::decode(query) {
        Ok(DecodedShare::Expanded(state)) => state,
        Ok(DecodedShare::Shortened(key)) => {
            println!("{} {key}", subheader("Shortened link, key:"));
            println!("{}", dim("The key is resolved by the directory page."));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e}");
            if let Some(hint) = e.suggestion() {
                eprintln!("{hint}");
            }
            return ExitCode::FAILURE;
        }
    };

    if state.is_empty() {
        println!("{}", dim("Empty selection."));
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Filters:"));
    if state.filters.is_empty() {
        println!("   {}", dim("(none)"));
    } else {
        println!("   {}", describe_tokens(&state.filters));
    }
    println!("{}", subheader("Search:"));
    if state.search_phrases.is_empty() {
        println!("   {}", dim("(none)"));
    }
    for phrase in &state.search_phrases {
        println!("   {phrase}");
    }
    if let Some(focus) = &state.focus_node_id {
        println!("{} {focus}", subheader("Graph:"));
    }
    ExitCode::SUCCESS
}
