//! The last search's results, kept to avoid refetching identical searches.

use expertise_filter::PersonRecord;

/// A stored search: the phrases it was made with and what came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSearch {
    /// Search phrases, in selection order.
    pub phrases: Vec<String>,
    /// The unfiltered result set.
    pub persons: Vec<PersonRecord>,
}

/// Holds at most one search result for the current session.
///
/// A new cache is empty, so a fresh session never shows stale results without a search.
#[derive(Debug, Clone, Default)]
pub struct SearchSessionCache {
    /// The last stored search.
    entry: Option<CachedSearch>,
}

impl SearchSessionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a search for `phrases` must go to the remote endpoint.
    ///
    /// Only an exactly equal phrase list (same phrases, same order) reuses the cached result.
    pub fn should_refetch(&self, phrases: &[String]) -> bool {
        self.entry
            .as_ref()
            .is_none_or(|entry| entry.phrases.as_slice() != phrases)
    }

    /// Returns the cached search, if any.
    pub fn get(&self) -> Option<&CachedSearch> {
        self.entry.as_ref()
    }

    /// The cached result set, or an empty slice.
    pub fn persons(&self) -> &[PersonRecord] {
        self.entry
            .as_ref()
            .map(|entry| entry.persons.as_slice())
            .unwrap_or(&[])
    }

    /// Replaces the cached search wholesale.
    pub fn store(&mut self, phrases: Vec<String>, persons: Vec<PersonRecord>) {
        self.entry = Some(CachedSearch { phrases, persons });
    }

    /// Drops the cached search.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
