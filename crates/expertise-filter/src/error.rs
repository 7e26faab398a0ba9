//! Error types for filter token parsing.

use thiserror::Error;

/// Errors produced when parsing a referential filter token such as `inst-12`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token was empty or whitespace.
    #[error("filter token is empty")]
    Empty,

    /// The token has no `-` separator or nothing after it.
    #[error("filter token '{token}' has no key after the category prefix")]
    MissingKey {
        /// The offending token.
        token: String,
    },

    /// The category prefix is not one of the known facet prefixes.
    #[error("unknown filter category '{prefix}' in token '{token}'")]
    UnknownPrefix {
        /// The prefix found before the separator.
        prefix: String,
        /// The offending token.
        token: String,
    },
}

impl TokenError {
    /// Returns a suggestion for fixing the token, if one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnknownPrefix { .. } => Some(
                "Valid prefixes are: pers, advi, inte, inst, facu, depa, role, offe, want",
            ),
            Self::MissingKey { .. } => Some("Tokens look like 'inst-12': prefix, '-', key"),
            Self::Empty => None,
        }
    }
}
