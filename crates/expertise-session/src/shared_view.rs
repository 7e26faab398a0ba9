//! Initial state embedded in a page opened from a share link.
//!
//! The server resolves a share key and embeds the expanded state together with the result
//! rows, so the view can be reproduced without querying search again.

use expertise_filter::{FilterToken, PersonRecord, TokenError};
use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::share::ShareState;

/// Page-embedded state of a shared view.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SharedView {
    /// Search phrases. Accepts either a single string or an array of strings.
    #[serde_as(as = "OneOrMany<_>")]
    pub search: Vec<String>,
    /// Filter token ids.
    pub filters: Vec<String>,
    /// Result rows of the original search, before filtering.
    pub persons: Vec<PersonRecord>,
    /// Graph focus node, if the shared view showed a graph.
    pub graph: Option<String>,
}

impl SharedView {
    /// Parses the embedded JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses the filter ids into tokens.
    pub fn filter_tokens(&self) -> Result<Vec<FilterToken>, TokenError> {
        self.filters.iter().map(|id| FilterToken::parse(id)).collect()
    }

    /// The share state this view represents, without the result rows.
    pub fn share_state(&self) -> Result<ShareState, TokenError> {
        Ok(ShareState {
            filters: self.filter_tokens()?,
            search_phrases: self
                .search
                .iter()
                .filter(|phrase| !phrase.trim().is_empty())
                .cloned()
                .collect(),
            focus_node_id: self.graph.clone().filter(|id| !id.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_document() {
        let json = r#"{
            "search": ["nlp", "data"],
            "filters": ["inst-4"],
            "persons": [{"person": {"pk": "1", "name": "Max Muster"}}],
            "graph": "pers-1"
        }"#;
        let view = SharedView::from_json(json).unwrap();
        let state = view.share_state().unwrap();

        assert_eq!(state.search_phrases, vec!["nlp", "data"]);
        assert_eq!(state.filters[0].id(), "inst-4");
        assert_eq!(state.focus_node_id.as_deref(), Some("pers-1"));
        assert_eq!(view.persons.len(), 1);
    }

    #[test]
    fn single_search_string_is_accepted() {
        let view = SharedView::from_json(r#"{"search": "nlp"}"#).unwrap();
        assert_eq!(view.search, vec!["nlp"]);
        assert!(view.persons.is_empty());
    }

    #[test]
    fn empty_values_are_dropped_from_state() {
        let view = SharedView::from_json(r#"{"search": ["", "ai"], "graph": ""}"#).unwrap();
        let state = view.share_state().unwrap();
        assert_eq!(state.search_phrases, vec!["ai"]);
        assert_eq!(state.focus_node_id, None);
    }

    #[test]
    fn bad_filter_is_reported() {
        let view = SharedView::from_json(r#"{"filters": ["bogus-1"]}"#).unwrap();
        assert!(view.share_state().is_err());
    }
}
