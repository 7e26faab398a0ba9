//! Search phrase highlighting and terminal colors for the expertise directory.
//!
//! The core of this crate is [`highlight`], which splits a text into plain and highlighted
//! [`Segment`]s for a list of search phrases, using [`merge_ranges`] to fold overlapping
//! matches together. The rest covers terminal presentation: ANSI rendering of segments,
//! styled headers and status lines, and syntax highlighting of TOML configuration.

#![warn(missing_docs)]

mod phrase;
mod ranges;

pub use phrase::{Segment, find_phrase_ranges, highlight};
pub use ranges::{MatchRange, merge_ranges};
use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter for configuration shown in the terminal.
pub struct SyntaxHighlighter {
    /// The syntax set containing language definitions (including TOML).
    syntax_set: SyntaxSet,
    /// The theme set containing color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Creates a new highlighter with the default theme (Dracula).
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content for terminal output.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights content with the specified syntax for terminal output.
    ///
    /// If the syntax is not found, the content is rendered as plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Green text (for success).
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text (for warnings and phrase matches).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Renders segments for the terminal, with highlighted segments in bold yellow.
pub fn render_ansi(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.highlighted {
            out.push_str(colors::BOLD);
            out.push_str(colors::YELLOW);
            out.push_str(segment.text);
            out.push_str(colors::RESET);
        } else {
            out.push_str(segment.text);
        }
    }
    out
}

/// Highlights `phrases` in `text` and renders the result for the terminal.
pub fn highlight_ansi<S: AsRef<str>>(text: &str, phrases: &[S]) -> String {
    render_ansi(&highlight(text, phrases))
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    format!("{}{}{}{}", colors::BOLD, colors::CYAN, text, colors::RESET)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a success message (green).
pub fn success(text: &str) -> String {
    format!("{}{}{}", colors::GREEN, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}
