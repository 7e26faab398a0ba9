//! Shareable links for the current search, filter and graph selection.
//!
//! The state is written as a query string with one `filter` parameter per token, one `search`
//! parameter per phrase and an optional `graph` parameter for the focus node. Query strings
//! longer than a threshold are handed to the shortening endpoint and replaced by a single
//! `share` parameter carrying the returned key; resolving that key is done server-side.

use expertise_filter::{FilterToken, TokenError};
use tracing::{debug, error};
use url::form_urlencoded;

use crate::{
    selection::{Selection, SelectionState},
    service::Shortener,
};

/// Parameter carrying one filter token id.
pub const FILTER_PARAM: &str = "filter";
/// Parameter carrying one search phrase.
pub const SEARCH_PARAM: &str = "search";
/// Parameter carrying the graph focus node.
pub const GRAPH_PARAM: &str = "graph";
/// Parameter carrying a shortened-state key.
pub const SHARE_PARAM: &str = "share";

/// Query strings longer than this are shortened by default.
pub const DEFAULT_SHARE_THRESHOLD: usize = 1500;

/// The state captured by a share link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareState {
    /// Referential filter tokens, in selection order.
    pub filters: Vec<FilterToken>,
    /// Search phrases, in selection order.
    pub search_phrases: Vec<String>,
    /// Node the relationship graph is centered on.
    pub focus_node_id: Option<String>,
}

impl ShareState {
    /// Captures the current selection and graph focus.
    pub fn capture(selection: &dyn SelectionState, focus_node_id: Option<&str>) -> Self {
        Self {
            filters: selection.active_filters(),
            search_phrases: selection.active_search_phrases(),
            focus_node_id: focus_node_id.map(str::to_string),
        }
    }

    /// Rebuilds a selection from this state.
    pub fn to_selection(&self) -> Selection {
        Selection::from_parts(self.filters.clone(), self.search_phrases.clone())
    }

    /// Whether the state carries nothing to share.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.search_phrases.is_empty() && self.focus_node_id.is_none()
    }
}

/// A decoded share query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedShare {
    /// The query carried the full state.
    Expanded(ShareState),
    /// The query carried only a shortened-state key.
    Shortened(String),
}

/// Encodes and decodes share query strings.
#[derive(Debug, Clone)]
pub struct ShareCodec {
    /// Length above which the query string is shortened.
    threshold: usize,
}

impl Default for ShareCodec {
    fn default() -> Self {
        Self::new(DEFAULT_SHARE_THRESHOLD)
    }
}

impl ShareCodec {
    /// Creates a codec shortening query strings longer than `threshold`.
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// The shortening threshold.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Encodes the full state without shortening.
    pub fn encode_full(&self, state: &ShareState) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for token in &state.filters {
            query.append_pair(FILTER_PARAM, token.id());
        }
        for phrase in &state.search_phrases {
            query.append_pair(SEARCH_PARAM, phrase);
        }
        if let Some(focus) = &state.focus_node_id {
            query.append_pair(GRAPH_PARAM, focus);
        }
        query.finish()
    }

    /// Encodes the state, shortening it through `shortener` when it exceeds the threshold.
    ///
    /// Without a shortener, or when shortening fails, the full query string is returned so
    /// the share action still produces a working link.
    pub fn encode(&self, state: &ShareState, shortener: Option<&dyn Shortener>) -> String {
        let full = self.encode_full(state);
        if full.len() <= self.threshold {
            return full;
        }

        let Some(shortener) = shortener else {
            debug!(len = full.len(), "no shortener available, sharing full query");
            return full;
        };

        match shortener.shorten(&full) {
            Ok(key) => form_urlencoded::Serializer::new(String::new())
                .append_pair(SHARE_PARAM, &key)
                .finish(),
            Err(err) => {
                error!(error = %err, "shortening share link failed, sharing full query");
                full
            }
        }
    }

    /// Decodes a share query string, with or without a leading `?`.
    ///
    /// A `share` parameter takes precedence over everything else. Unknown parameters and empty
    /// search phrases are ignored; the last `graph` parameter wins.
    pub fn decode(query: &str) -> Result<DecodedShare, TokenError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = ShareState::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                SHARE_PARAM => return Ok(DecodedShare::Shortened(value.into_owned())),
                FILTER_PARAM => state.filters.push(FilterToken::parse(&value)?),
                SEARCH_PARAM if !value.trim().is_empty() => {
                    state.search_phrases.push(value.into_owned());
                }
                GRAPH_PARAM if !value.is_empty() => state.focus_node_id = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(DecodedShare::Expanded(state))
    }
}

/// Joins a page URL and a share query string.
pub fn share_url(page_url: &str, query: &str) -> String {
    if query.is_empty() {
        return page_url.to_string();
    }
    let separator = if page_url.contains('?') { '&' } else { '?' };
    format!("{page_url}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use tracing_test::traced_test;

    use super::*;
    use crate::error::ServiceError;

    /// Shortener returning a fixed key and recording what it was asked to store.
    struct FixedShortener {
        /// Key to hand out.
        key: &'static str,
        /// Queries received.
        seen: RefCell<Vec<String>>,
    }

    impl Shortener for FixedShortener {
        fn shorten(&self, query: &str) -> Result<String, ServiceError> {
            self.seen.borrow_mut().push(query.to_string());
            Ok(self.key.to_string())
        }
    }

    /// Shortener that always fails.
    struct FailingShortener;

    impl Shortener for FailingShortener {
        fn shorten(&self, _query: &str) -> Result<String, ServiceError> {
            Err(ServiceError::Status {
                endpoint: "share",
                status: 500,
            })
        }
    }

    /// A small state with two filters, two phrases and a focus node.
    fn state() -> ShareState {
        ShareState {
            filters: vec![
                FilterToken::parse("inst-4").unwrap(),
                FilterToken::parse("pers-1").unwrap(),
            ],
            search_phrases: vec!["machine learning".into(), "nlp".into()],
            focus_node_id: Some("pers-1".into()),
        }
    }

    /// Values of a parameter in a query string, in order.
    fn values(query: &str, name: &str) -> Vec<String> {
        form_urlencoded::parse(query.as_bytes())
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
            .collect()
    }

    #[test]
    fn encodes_one_parameter_per_token_and_phrase() {
        let query = ShareCodec::default().encode(&state(), None);
        assert_eq!(values(&query, FILTER_PARAM), vec!["inst-4", "pers-1"]);
        assert_eq!(values(&query, SEARCH_PARAM), vec!["machine learning", "nlp"]);
        assert_eq!(values(&query, GRAPH_PARAM), vec!["pers-1"]);
        assert!(values(&query, SHARE_PARAM).is_empty());
    }

    #[test]
    fn short_state_is_not_sent_to_shortener() {
        let shortener = FixedShortener {
            key: "abc",
            seen: RefCell::new(Vec::new()),
        };
        let query = ShareCodec::default().encode(&state(), Some(&shortener));
        assert!(shortener.seen.borrow().is_empty());
        assert!(query.contains("filter=inst-4"));
    }

    #[test]
    fn long_state_is_shortened() {
        let shortener = FixedShortener {
            key: "k9",
            seen: RefCell::new(Vec::new()),
        };
        let codec = ShareCodec::new(10);
        let query = codec.encode(&state(), Some(&shortener));

        assert_eq!(query, "share=k9");
        assert!(values(&query, FILTER_PARAM).is_empty());
        assert!(values(&query, SEARCH_PARAM).is_empty());
        assert_eq!(shortener.seen.borrow()[0], codec.encode_full(&state()));
    }

    #[test]
    #[traced_test]
    fn failed_shortening_falls_back_to_full_query() {
        let codec = ShareCodec::new(10);
        let query = codec.encode(&state(), Some(&FailingShortener));
        assert_eq!(query, codec.encode_full(&state()));
        assert!(logs_contain("shortening share link failed"));
    }

    #[test]
    fn without_shortener_long_state_stays_full() {
        let codec = ShareCodec::new(10);
        assert_eq!(codec.encode(&state(), None), codec.encode_full(&state()));
    }

    #[test]
    fn decode_reverses_encode() {
        let query = ShareCodec::default().encode_full(&state());
        let decoded = ShareCodec::decode(&format!("?{query}")).unwrap();
        assert_eq!(decoded, DecodedShare::Expanded(state()));
    }

    #[test]
    fn decode_share_key() {
        assert_eq!(
            ShareCodec::decode("share=k9&filter=inst-1").unwrap(),
            DecodedShare::Shortened("k9".into())
        );
    }

    #[test]
    fn decode_ignores_unknown_and_empty_values() {
        let decoded = ShareCodec::decode("utm=x&search=&graph=&search=ai").unwrap();
        let DecodedShare::Expanded(state) = decoded else {
            panic!("expected expanded state");
        };
        assert_eq!(state.search_phrases, vec!["ai"]);
        assert_eq!(state.focus_node_id, None);
    }

    #[test]
    fn decode_rejects_bad_filter() {
        assert!(matches!(
            ShareCodec::decode("filter=nope"),
            Err(TokenError::MissingKey { .. })
        ));
    }

    #[test]
    fn capture_reads_selection() {
        let selection = state().to_selection();
        let captured = ShareState::capture(&selection, Some("pers-1"));
        assert_eq!(captured, state());
        assert!(ShareState::default().is_empty());
    }

    #[test]
    fn share_url_joins_query() {
        assert_eq!(share_url("https://x.org/", ""), "https://x.org/");
        assert_eq!(share_url("https://x.org/", "share=a"), "https://x.org/?share=a");
        assert_eq!(share_url("https://x.org/?lang=de", "share=a"), "https://x.org/?lang=de&share=a");
    }
}
