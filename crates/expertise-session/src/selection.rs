//! The user's current filter and search selection.

use expertise_filter::{FilterToken, partition_tokens};

use crate::error::SelectionError;

/// Maximum number of tokens a selection may hold.
pub const MAX_SELECTIONS: usize = 20;

/// Read access to the active selection, as seen by the engine.
pub trait SelectionState {
    /// Referential filter tokens, in selection order.
    fn active_filters(&self) -> Vec<FilterToken>;

    /// Search phrases, in selection order.
    fn active_search_phrases(&self) -> Vec<String>;
}

/// An ordered set of selected tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected tokens, filters and phrases interleaved in selection order.
    tokens: Vec<FilterToken>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection from filters followed by search phrases.
    ///
    /// Duplicates are dropped and the size limit is not enforced, since the state was
    /// produced by an earlier, already limited selection.
    pub fn from_parts(filters: Vec<FilterToken>, phrases: Vec<String>) -> Self {
        let mut selection = Self::new();
        let tokens = filters
            .into_iter()
            .chain(phrases.into_iter().map(FilterToken::search));
        for token in tokens {
            if !selection.tokens.contains(&token) {
                selection.tokens.push(token);
            }
        }
        selection
    }

    /// All selected tokens.
    pub fn tokens(&self) -> &[FilterToken] {
        &self.tokens
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Adds a token at the end of the selection.
    pub fn add(&mut self, token: FilterToken) -> Result<(), SelectionError> {
        if self.tokens.contains(&token) {
            return Err(SelectionError::Duplicate(token.id().to_string()));
        }
        if self.tokens.len() >= MAX_SELECTIONS {
            return Err(SelectionError::Full {
                limit: MAX_SELECTIONS,
            });
        }
        self.tokens.push(token);
        Ok(())
    }

    /// Adds a free-text search phrase, trimmed.
    pub fn add_search(&mut self, phrase: &str) -> Result<(), SelectionError> {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return Err(SelectionError::EmptyPhrase);
        }
        self.add(FilterToken::search(phrase))
    }

    /// Removes the token with the given id; returns whether one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|token| token.id() != id);
        self.tokens.len() != before
    }

    /// Removes every token.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

impl SelectionState for Selection {
    fn active_filters(&self) -> Vec<FilterToken> {
        partition_tokens(&self.tokens).0
    }

    fn active_search_phrases(&self) -> Vec<String> {
        partition_tokens(&self.tokens).1
    }
}
