//! Clap argument definitions for the `expertise` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use expertise_filter::FilterToken;

/// Parses a referential filter token such as `inst-12`.
fn parse_token(s: &str) -> Result<FilterToken, String> {
    FilterToken::parse(s).map_err(|err| match err.suggestion() {
        Some(hint) => format!("{err}. {hint}"),
        None => err.to_string(),
    })
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "expertise")]
#[command(about = "Expertise directory - find people by what they know")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Filter tokens and search phrases shared by several commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Filter token, e.g. inst-12 or offe-3 (repeatable)
    #[arg(short = 'f', long = "filter", value_parser = parse_token)]
    pub filters: Vec<FilterToken>,

    /// Search phrase (repeatable)
    #[arg(short = 's', long = "search")]
    pub phrases: Vec<String>,
}

/// Arguments for `expertise search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search phrases; none lists everyone
    pub phrases: Vec<String>,

    /// Filter token, e.g. inst-12 or offe-3 (repeatable)
    #[arg(short = 'f', long = "filter", value_parser = parse_token)]
    pub filters: Vec<FilterToken>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `expertise filter`.
#[derive(Args, Debug, Clone)]
pub struct FilterCommand {
    /// Saved result set (output of `search --json` or a shared view document)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Additional filters and phrases.
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `expertise graph`.
#[derive(Args, Debug, Clone)]
pub struct GraphCommand {
    /// Node to center the graph on, e.g. pers-12
    pub id: String,

    /// Output the view model as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `expertise share`.
#[derive(Args, Debug, Clone)]
pub struct ShareCommand {
    /// Filters and phrases to share.
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Graph focus node to include
    #[arg(long)]
    pub graph: Option<String>,

    /// Never call the shortening service
    #[arg(long)]
    pub offline: bool,
}

/// Arguments for `expertise decode`.
#[derive(Args, Debug, Clone)]
pub struct DecodeCommand {
    /// Share query string or full share URL
    pub query: String,
}

/// Arguments for `expertise init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.expertise.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `expertise` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search the directory and show filtered results
    #[command(after_help = "\
FILTER TOKENS:
  pers-ID   person (also matches people advised by them)
  advi-ID   advisor (also matches the advisor themselves)
  inte-ID   research interest
  inst-ID   institute
  facu-ID   faculty
  depa-ID   department
  role-ID   role
  offe-ID   expertise offered (also matches expertise wanted)
  want-ID   expertise wanted (also matches expertise offered)

Tokens of one kind are ORed; different kinds are ANDed.

EXAMPLES:
  expertise search nlp
  expertise search 'machine learning' -f inst-4
  expertise search -f offe-12 -f facu-2 --json")]
    Search(SearchCommand),

    /// Filter a saved result set without querying the service
    Filter(FilterCommand),

    /// Show the relationship graph around a node
    Graph(GraphCommand),

    /// Print a share link for a selection
    Share(ShareCommand),

    /// Decode a share link
    Decode(DecodeCommand),

    /// Interactive session reading commands from stdin
    #[command(after_help = "\
SESSION COMMANDS:
  search [PHRASE, ..] Replace the search phrases and run the search
  filter +ID | -ID    Add or remove a filter token
  graph ID            Show the graph around a node
  share               Print a share link for the session
  show                Print the current filtered results
  quit                Leave the session")]
    Session,

    /// Initialize configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Show configuration files and diagnose issues
    Status,
}
