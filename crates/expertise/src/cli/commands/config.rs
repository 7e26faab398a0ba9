//! Implementation of `expertise config`.

use std::process::ExitCode;

use expertise_highlight::SyntaxHighlighter;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    match ctx.config.settings_to_toml() {
        Ok(toml) => {
            print!("{}", SyntaxHighlighter::new().highlight_toml(&toml));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
