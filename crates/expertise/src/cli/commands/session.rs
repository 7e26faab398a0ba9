//! Implementation of `expertise session`.
//!
//! Reads one command per line and keeps a [`SessionContext`] across them, so repeated
//! searches reuse the cached result and filters apply locally.

use std::{
    fmt,
    io::{self, BufRead, IsTerminal, Write},
    process::ExitCode,
};

use expertise_filter::{FilterToken, TokenError};
use expertise_session::{
    GraphOutcome, GraphSource, PersonSearch, SelectionState, SessionContext, Shortener, share_url,
};

use crate::cli::{
    context::CommandContext,
    output::{describe_tokens, results_table},
};

/// One parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Replace the search phrases and search.
    Search(Vec<String>),
    /// Add a filter token.
    AddFilter(FilterToken),
    /// Remove a token by id.
    RemoveFilter(String),
    /// Show the graph around a node.
    Graph(String),
    /// Print a share link.
    Share,
    /// Print the filtered results.
    Show,
    /// Leave the session.
    Quit,
}

/// Why a session line was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The first word is not a session command.
    UnknownCommand(String),
    /// The command is missing its argument or has a malformed one.
    Usage(&'static str),
    /// A filter token did not parse.
    Token(TokenError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(word) => write!(f, "unknown command '{word}'"),
            Self::Usage(usage) => write!(f, "usage: {usage}"),
            Self::Token(e) => write!(f, "{e}"),
        }
    }
}

/// Parses one input line; blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Result<SessionCommand, ParseError>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    Some(match word {
        "search" => Ok(SessionCommand::Search(
            rest.split(',')
                .map(str::trim)
                .filter(|phrase| !phrase.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        "filter" => parse_filter(rest),
        "graph" if !rest.is_empty() => Ok(SessionCommand::Graph(rest.to_string())),
        "graph" => Err(ParseError::Usage("graph ID")),
        "share" => Ok(SessionCommand::Share),
        "show" => Ok(SessionCommand::Show),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    })
}

/// Parses the argument of `filter`.
fn parse_filter(arg: &str) -> Result<SessionCommand, ParseError> {
    if let Some(id) = arg.strip_prefix('+') {
        return FilterToken::parse(id)
            .map(SessionCommand::AddFilter)
            .map_err(ParseError::Token);
    }
    match arg.strip_prefix('-').map(str::trim) {
        Some(id) if !id.is_empty() => Ok(SessionCommand::RemoveFilter(id.to_string())),
        _ => Err(ParseError::Usage("filter +ID | -ID")),
    }
}

/// Remote endpoints used by a session.
pub struct Services<'a> {
    /// Person search.
    pub search: &'a dyn PersonSearch,
    /// Graph fetch.
    pub graph: &'a dyn GraphSource,
    /// Link shortening, if allowed.
    pub shortener: Option<&'a dyn Shortener>,
}

/// Runs the session against stdin and stdout.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let directory = match ctx.directory() {
        Ok(directory) => directory,
        Err(code) => return code,
    };
    let services = Services {
        search: &directory,
        graph: &directory,
        shortener: Some(&directory),
    };

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut session = ctx.session();
    let result = run_loop(
        &mut session,
        &services,
        &ctx.config.share.page_url,
        stdin.lock(),
        &mut io::stdout().lock(),
        prompt,
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reads commands from `input` until `quit` or end of input.
pub fn run_loop(
    session: &mut SessionContext,
    services: &Services<'_>,
    page_url: &str,
    input: impl BufRead,
    out: &mut impl Write,
    prompt: bool,
) -> io::Result<()> {
    if prompt {
        write!(out, "> ")?;
        out.flush()?;
    }
    for line in input.lines() {
        match parse_line(&line?) {
            None => {}
            Some(Ok(SessionCommand::Quit)) => break,
            Some(Ok(command)) => execute(session, services, page_url, command, out)?,
            Some(Err(e)) => writeln!(out, "error: {e}")?,
        }
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Executes one command.
fn execute(
    session: &mut SessionContext,
    services: &Services<'_>,
    page_url: &str,
    command: SessionCommand,
    out: &mut impl Write,
) -> io::Result<()> {
    match command {
        SessionCommand::Search(phrases) => {
            if let Err(e) = session.set_search_phrases(&phrases) {
                return writeln!(out, "error: {e}");
            }
            let outcome = session.search(services.search);
            writeln!(out, "{outcome}")?;
            if outcome.result_count().is_some() {
                show(session, out)?;
            }
        }
        SessionCommand::AddFilter(token) => {
            if let Err(e) = session.select(token) {
                return writeln!(out, "error: {e}");
            }
            show(session, out)?;
        }
        SessionCommand::RemoveFilter(id) => {
            if !session.deselect(&id) {
                return writeln!(out, "error: '{id}' is not selected");
            }
            show(session, out)?;
        }
        SessionCommand::Graph(id) => match session.show_graph(services.graph, &id) {
            GraphOutcome::Shown { nodes, edges } => {
                writeln!(out, "Graph for {id}: {nodes} node(s), {edges} edge(s).")?;
            }
            GraphOutcome::Empty => writeln!(out, "No graph data.")?,
            GraphOutcome::Failed(e) => writeln!(out, "error: could not load graph: {e}")?,
            GraphOutcome::Stale => {}
        },
        SessionCommand::Share => {
            let query = session.share(services.shortener);
            writeln!(out, "{}", share_url(page_url, &query))?;
        }
        SessionCommand::Show => show(session, out)?,
        SessionCommand::Quit => {}
    }
    Ok(())
}

/// Writes the selection and the filtered results.
fn show(session: &SessionContext, out: &mut impl Write) -> io::Result<()> {
    let selection = session.selection();
    if !selection.is_empty() {
        writeln!(out, "Selection: {}", describe_tokens(selection.tokens()))?;
    }
    if session.cache().get().is_none() {
        return writeln!(out, "No search yet.");
    }
    let filtered = session.filtered();
    if filtered.is_empty() {
        return writeln!(out, "No results match the selected filters.");
    }
    let phrases = selection.active_search_phrases();
    writeln!(out, "{}", results_table(&filtered, &phrases))?;
    writeln!(out, "{} shown", filtered.len())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use expertise_filter::{Entity, PersonRecord};
    use expertise_graph::RawGraph;
    use expertise_session::ServiceError;

    use super::*;

    /// In-memory directory with two people.
    struct FakeDirectory {
        /// Number of search calls.
        searches: Cell<usize>,
    }

    impl PersonSearch for FakeDirectory {
        fn search_persons(&self, _phrases: &[String]) -> Result<Vec<PersonRecord>, ServiceError> {
            self.searches.set(self.searches.get() + 1);
            let mut max = PersonRecord::new("1", "Max Muster");
            max.institutes = vec![Entity::new("4", "TU Dresden")];
            Ok(vec![max, PersonRecord::new("2", "Jana Schuster")])
        }
    }

    impl GraphSource for FakeDirectory {
        fn fetch_graph(&self, _node_id: &str) -> Result<RawGraph, ServiceError> {
            Ok(RawGraph::default())
        }
    }

    /// Runs a script and returns the output.
    fn run_script(directory: &FakeDirectory, script: &str) -> String {
        let services = Services {
            search: directory,
            graph: directory,
            shortener: None,
        };
        let mut session = SessionContext::default();
        let mut out = Vec::new();
        run_loop(
            &mut session,
            &services,
            "https://x.org/",
            script.as_bytes(),
            &mut out,
            false,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("  "), None);
        assert_eq!(
            parse_line("search nlp, machine learning"),
            Some(Ok(SessionCommand::Search(vec![
                "nlp".into(),
                "machine learning".into()
            ])))
        );
        assert_eq!(
            parse_line("search"),
            Some(Ok(SessionCommand::Search(Vec::new())))
        );
        assert_eq!(
            parse_line("filter +inst-4"),
            Some(Ok(SessionCommand::AddFilter(
                FilterToken::parse("inst-4").unwrap()
            )))
        );
        assert_eq!(
            parse_line("filter -inst-4"),
            Some(Ok(SessionCommand::RemoveFilter("inst-4".into())))
        );
        assert_eq!(parse_line("exit"), Some(Ok(SessionCommand::Quit)));
    }

    #[test]
    fn rejects_bad_lines() {
        assert_eq!(
            parse_line("frobnicate"),
            Some(Err(ParseError::UnknownCommand("frobnicate".into())))
        );
        assert_eq!(
            parse_line("filter inst-4"),
            Some(Err(ParseError::Usage("filter +ID | -ID")))
        );
        assert!(matches!(
            parse_line("filter +bogus-1"),
            Some(Err(ParseError::Token(_)))
        ));
        assert_eq!(parse_line("graph"), Some(Err(ParseError::Usage("graph ID"))));
    }

    #[test]
    fn parse_errors_display_for_the_prompt() {
        assert_eq!(ParseError::Usage("graph ID").to_string(), "usage: graph ID");
        assert_eq!(
            ParseError::UnknownCommand("frobnicate".into()).to_string(),
            "unknown command 'frobnicate'"
        );
    }

    #[test]
    fn filters_reuse_cached_search() {
        let directory = FakeDirectory {
            searches: Cell::new(0),
        };
        let out = run_script(&directory, "search\nfilter +inst-4\nsearch\nquit\nsearch x\n");

        assert_eq!(directory.searches.get(), 1);
        assert!(out.contains("2 results found (before filtering)."));
        assert!(out.contains("1 shown"));
        assert!(out.contains("Selection: inst-4"));
    }

    #[test]
    fn share_and_empty_graph() {
        let directory = FakeDirectory {
            searches: Cell::new(0),
        };
        let out = run_script(&directory, "filter +offe-7\ngraph pers-1\nshare\n");

        assert!(out.contains("No search yet."));
        assert!(out.contains("No graph data."));
        assert!(out.contains("https://x.org/?filter=offe-7&graph=pers-1"));
    }

    #[test]
    fn reports_errors_and_continues() {
        let directory = FakeDirectory {
            searches: Cell::new(0),
        };
        let out = run_script(&directory, "nope\nfilter -inst-9\nshow\n");

        assert!(out.contains("error: unknown command 'nope'"));
        assert!(out.contains("error: 'inst-9' is not selected"));
        assert!(out.contains("No search yet."));
    }
}
