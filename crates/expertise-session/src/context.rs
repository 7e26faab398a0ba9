//! The explicit session object handed to every interaction handler.
//!
//! A [`SessionContext`] owns the search cache, the selection, and the graph currently on
//! display. Remote calls are split into a `begin_*` step that hands out a ticket and a
//! `complete_*` step that applies the response; a response whose ticket was superseded by a
//! later request is discarded.

use std::fmt;

use expertise_filter::{FacetFilter, FilterToken, PersonRecord, TokenError};
use expertise_graph::{GraphView, GraphViewModelBuilder, RawGraph};
use tracing::{debug, error};

use crate::{
    cache::SearchSessionCache,
    error::{SelectionError, ServiceError},
    selection::{Selection, SelectionState},
    service::{GraphSource, PersonSearch, Shortener},
    share::{ShareCodec, ShareState},
    shared_view::SharedView,
};

/// Result of a search action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The remote endpoint returned `count` persons.
    Found {
        /// Number of persons before filtering.
        count: usize,
    },
    /// The phrases were unchanged and the cached result was reused.
    Cached {
        /// Number of persons before filtering.
        count: usize,
    },
    /// The remote call failed; the cache was cleared.
    Failed(ServiceError),
    /// A later search was started before this response arrived.
    Stale,
}

impl SearchOutcome {
    /// Result count before filtering, or `None` when the search failed or was superseded.
    pub fn result_count(&self) -> Option<usize> {
        match self {
            Self::Found { count } | Self::Cached { count } => Some(*count),
            Self::Failed(_) | Self::Stale => None,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result_count() {
            Some(count) => {
                let noun = if count == 1 { "result" } else { "results" };
                write!(f, "{count} {noun} found (before filtering).")
            }
            None if matches!(self, Self::Stale) => f.write_str("Search superseded."),
            None => f.write_str("Search failed!"),
        }
    }
}

/// Result of a graph action.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphOutcome {
    /// A graph was built and is now on display.
    Shown {
        /// Number of nodes.
        nodes: usize,
        /// Number of edges.
        edges: usize,
    },
    /// The endpoint had no graph data for the node.
    Empty,
    /// The remote call failed; the previous graph stays on display.
    Failed(ServiceError),
    /// A later graph request was started before this response arrived.
    Stale,
}

/// Identifies one in-flight search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    /// Request generation.
    generation: u64,
    /// Phrases the request was made with.
    phrases: Vec<String>,
}

impl SearchTicket {
    /// Phrases to send to the search endpoint.
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

/// What a search action needs to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPlan {
    /// The cached result answers the search.
    Cached(SearchOutcome),
    /// The remote endpoint must be called.
    Fetch(SearchTicket),
}

/// Identifies one in-flight graph request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphTicket {
    /// Request generation.
    generation: u64,
    /// Node the graph is requested for.
    focus: String,
}

impl GraphTicket {
    /// Node to fetch the graph for.
    pub fn focus(&self) -> &str {
        &self.focus
    }
}

/// Mutable state of one interactive session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Last search result.
    cache: SearchSessionCache,
    /// Selected filter tokens and search phrases.
    selection: Selection,
    /// Node the displayed graph is centered on.
    focus: Option<String>,
    /// Graph currently on display.
    graph: Option<GraphView>,
    /// Generation of the latest search request.
    search_generation: u64,
    /// Generation of the latest graph request.
    graph_generation: u64,
    /// Facet evaluation policy.
    filter: FacetFilter,
    /// Graph view model builder.
    builder: GraphViewModelBuilder,
    /// Share link codec.
    codec: ShareCodec,
}

impl SessionContext {
    /// Creates a session with an empty cache and selection.
    pub fn new(builder: GraphViewModelBuilder, codec: ShareCodec) -> Self {
        Self {
            builder,
            codec,
            ..Self::default()
        }
    }

    /// Seeds a session from a shared view without querying search.
    ///
    /// The embedded rows are cached under the embedded phrases, so re-running the same search
    /// reuses them. A focus node is recorded but its graph is not fetched.
    pub fn from_shared_view(
        view: SharedView,
        builder: GraphViewModelBuilder,
        codec: ShareCodec,
    ) -> Result<Self, TokenError> {
        let state = view.share_state()?;
        let mut session = Self::new(builder, codec);
        session.selection = state.to_selection();
        session
            .cache
            .store(session.selection.active_search_phrases(), view.persons);
        session.focus = state.focus_node_id;
        Ok(session)
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Adds a token to the selection.
    pub fn select(&mut self, token: FilterToken) -> Result<(), SelectionError> {
        self.selection.add(token)
    }

    /// Adds a search phrase to the selection.
    pub fn select_search(&mut self, phrase: &str) -> Result<(), SelectionError> {
        self.selection.add_search(phrase)
    }

    /// Replaces the search phrases, keeping the filters. On error the selection is unchanged.
    pub fn set_search_phrases<S: AsRef<str>>(
        &mut self,
        phrases: &[S],
    ) -> Result<(), SelectionError> {
        let mut selection = Selection::from_parts(self.selection.active_filters(), Vec::new());
        for phrase in phrases {
            selection.add_search(phrase.as_ref())?;
        }
        self.selection = selection;
        Ok(())
    }

    /// Removes a token from the selection by id.
    pub fn deselect(&mut self, id: &str) -> bool {
        self.selection.remove(id)
    }

    /// The search cache.
    pub fn cache(&self) -> &SearchSessionCache {
        &self.cache
    }

    /// Starts a search for the selected phrases.
    pub fn begin_search(&mut self) -> SearchPlan {
        let phrases = self.selection.active_search_phrases();
        self.search_generation += 1;
        if !self.cache.should_refetch(&phrases) {
            let count = self.cache.persons().len();
            debug!(count, "search phrases unchanged, reusing cached result");
            return SearchPlan::Cached(SearchOutcome::Cached { count });
        }
        SearchPlan::Fetch(SearchTicket {
            generation: self.search_generation,
            phrases,
        })
    }

    /// Applies the response to a search request.
    pub fn complete_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<PersonRecord>, ServiceError>,
    ) -> SearchOutcome {
        if ticket.generation != self.search_generation {
            debug!(
                ticket = ticket.generation,
                current = self.search_generation,
                "discarding stale search response"
            );
            return SearchOutcome::Stale;
        }
        match result {
            Ok(persons) => {
                let count = persons.len();
                self.cache.store(ticket.phrases, persons);
                SearchOutcome::Found { count }
            }
            Err(err) => {
                error!(error = %err, "search failed");
                self.cache.clear();
                SearchOutcome::Failed(err)
            }
        }
    }

    /// Runs a search to completion against `service`.
    pub fn search(&mut self, service: &dyn PersonSearch) -> SearchOutcome {
        match self.begin_search() {
            SearchPlan::Cached(outcome) => outcome,
            SearchPlan::Fetch(ticket) => {
                let result = service.search_persons(ticket.phrases());
                self.complete_search(ticket, result)
            }
        }
    }

    /// Cached persons matching the selected filters, in result order.
    pub fn filtered(&self) -> Vec<&PersonRecord> {
        self.filter.evaluate(self.selection.tokens(), self.cache.persons())
    }

    /// Starts a graph request centered on `focus`.
    pub fn begin_graph(&mut self, focus: &str) -> GraphTicket {
        self.graph_generation += 1;
        GraphTicket {
            generation: self.graph_generation,
            focus: focus.to_string(),
        }
    }

    /// Applies the response to a graph request.
    pub fn complete_graph(
        &mut self,
        ticket: GraphTicket,
        result: Result<RawGraph, ServiceError>,
    ) -> GraphOutcome {
        if ticket.generation != self.graph_generation {
            debug!(focus = %ticket.focus, "discarding stale graph response");
            return GraphOutcome::Stale;
        }
        let raw = match result {
            Ok(raw) => raw,
            Err(err) => {
                error!(error = %err, focus = %ticket.focus, "graph fetch failed");
                return GraphOutcome::Failed(err);
            }
        };

        let view = self.builder.build(&raw, Some(&ticket.focus));
        self.focus = Some(ticket.focus);
        if view.is_empty() {
            self.graph = None;
            return GraphOutcome::Empty;
        }
        let outcome = GraphOutcome::Shown {
            nodes: view.nodes.len(),
            edges: view.edges.len(),
        };
        self.graph = Some(view);
        outcome
    }

    /// Fetches and builds the graph centered on `focus`.
    pub fn show_graph(&mut self, source: &dyn GraphSource, focus: &str) -> GraphOutcome {
        let ticket = self.begin_graph(focus);
        let result = source.fetch_graph(ticket.focus());
        self.complete_graph(ticket, result)
    }

    /// The graph on display.
    pub fn graph(&self) -> Option<&GraphView> {
        self.graph.as_ref()
    }

    /// The node the graph is centered on.
    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// Closes the graph.
    pub fn close_graph(&mut self) {
        self.graph = None;
        self.focus = None;
    }

    /// Captures the current selection and focus for sharing.
    pub fn share_state(&self) -> ShareState {
        ShareState::capture(&self.selection, self.focus())
    }

    /// Encodes the current state as a share query string.
    pub fn share(&self, shortener: Option<&dyn Shortener>) -> String {
        self.codec.encode(&self.share_state(), shortener)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use expertise_filter::Entity;
    use tracing_test::traced_test;

    use super::*;

    /// Search service returning a fixed directory and counting calls.
    struct FakeSearch {
        /// Number of calls made.
        calls: Cell<usize>,
        /// Whether calls fail.
        fail: bool,
    }

    impl FakeSearch {
        /// A working search service.
        fn ok() -> Self {
            Self {
                calls: Cell::new(0),
                fail: false,
            }
        }
    }

    impl PersonSearch for FakeSearch {
        fn search_persons(&self, _phrases: &[String]) -> Result<Vec<PersonRecord>, ServiceError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(ServiceError::Status {
                    endpoint: "persons",
                    status: 500,
                });
            }
            let mut max = PersonRecord::new("1", "Max Muster");
            max.institutes = vec![Entity::new("10", "TU Dresden")];
            Ok(vec![max, PersonRecord::new("2", "Jana Schuster")])
        }
    }

    /// Graph source returning a two-node graph, or nothing for unknown ids.
    struct FakeGraph;

    impl GraphSource for FakeGraph {
        fn fetch_graph(&self, node_id: &str) -> Result<RawGraph, ServiceError> {
            if node_id != "pers-1" {
                return Ok(RawGraph::default());
            }
            let json = r#"{
                "nodes": [
                    {"id": "pers-1", "labels": ["Person"], "properties": {"name": "Max Muster"}},
                    {"id": "inst-10", "labels": ["Institute"], "properties": {"name": "TU Dresden"}}
                ],
                "relationships": [{"startNode": "pers-1", "endNode": "inst-10", "type": "MEMBER_OF"}]
            }"#;
            serde_json::from_str(json).map_err(|err| ServiceError::Decode {
                endpoint: "graph",
                message: err.to_string(),
            })
        }
    }

    #[test]
    fn fresh_session_is_empty() {
        let session = SessionContext::default();
        assert!(session.cache().get().is_none());
        assert!(session.filtered().is_empty());
        assert!(session.graph().is_none());
        assert!(session.share_state().is_empty());
    }

    #[test]
    fn repeated_search_uses_cache() {
        let service = FakeSearch::ok();
        let mut session = SessionContext::default();
        session.selection.add_search("nlp").unwrap();

        assert_eq!(session.search(&service), SearchOutcome::Found { count: 2 });
        assert_eq!(session.search(&service), SearchOutcome::Cached { count: 2 });
        assert_eq!(service.calls.get(), 1);

        session.selection.add_search("data").unwrap();
        session.search(&service);
        assert_eq!(service.calls.get(), 2);
    }

    #[test]
    fn filters_apply_without_refetch() {
        let service = FakeSearch::ok();
        let mut session = SessionContext::default();
        session.search(&service);
        session.select(FilterToken::parse("inst-10").unwrap()).unwrap();

        assert_eq!(session.search(&service), SearchOutcome::Cached { count: 2 });
        let names: Vec<_> = session.filtered().iter().map(|r| r.display_name()).collect();
        assert_eq!(names, vec!["Max Muster"]);
        assert_eq!(service.calls.get(), 1);
    }

    #[test]
    #[traced_test]
    fn failed_search_has_no_count_and_clears_cache() {
        let mut session = SessionContext::default();
        session.search(&FakeSearch::ok());

        session.selection.add_search("nlp").unwrap();
        let failing = FakeSearch {
            calls: Cell::new(0),
            fail: true,
        };
        let outcome = session.search(&failing);

        assert_eq!(outcome.result_count(), None);
        assert_eq!(outcome.to_string(), "Search failed!");
        assert!(session.cache().get().is_none());
        assert!(logs_contain("search failed"));
    }

    #[test]
    fn replacing_phrases_keeps_filters() {
        let mut session = SessionContext::default();
        session.select(FilterToken::parse("inst-10").unwrap()).unwrap();
        session.select_search("old").unwrap();

        session.set_search_phrases(&["nlp", "data"]).unwrap();
        assert_eq!(session.selection().active_search_phrases(), vec!["nlp", "data"]);
        assert_eq!(session.selection().active_filters().len(), 1);

        assert!(session.set_search_phrases(&["ai", " "]).is_err());
        assert_eq!(session.selection().active_search_phrases(), vec!["nlp", "data"]);
    }

    #[test]
    fn zero_results_differ_from_failure() {
        let outcome = SearchOutcome::Found { count: 0 };
        assert_eq!(outcome.result_count(), Some(0));
        assert_eq!(outcome.to_string(), "0 results found (before filtering).");
    }

    #[test]
    fn result_count_message_is_pluralized() {
        let one = SearchOutcome::Found { count: 1 };
        assert_eq!(one.to_string(), "1 result found (before filtering).");
        let two = SearchOutcome::Found { count: 2 };
        assert_eq!(two.to_string(), "2 results found (before filtering).");
    }

    #[test]
    fn stale_search_response_is_discarded() {
        let mut session = SessionContext::default();
        session.selection.add_search("first").unwrap();
        let SearchPlan::Fetch(first) = session.begin_search() else {
            panic!("expected fetch");
        };
        session.selection.add_search("second").unwrap();
        let SearchPlan::Fetch(second) = session.begin_search() else {
            panic!("expected fetch");
        };

        let outcome = session.complete_search(second, Ok(vec![PersonRecord::new("2", "B")]));
        assert_eq!(outcome, SearchOutcome::Found { count: 1 });

        let outcome = session.complete_search(first, Ok(vec![PersonRecord::new("1", "A")]));
        assert_eq!(outcome, SearchOutcome::Stale);
        assert_eq!(session.cache().persons()[0].person.pk, "2");
    }

    #[test]
    fn graph_is_built_and_focus_is_shared() {
        let mut session = SessionContext::default();
        let outcome = session.show_graph(&FakeGraph, "pers-1");

        assert_eq!(outcome, GraphOutcome::Shown { nodes: 2, edges: 1 });
        let graph = session.graph().unwrap();
        assert_eq!(graph.edges[0].display_label, "member of");
        assert_eq!(session.share_state().focus_node_id.as_deref(), Some("pers-1"));
        assert!(session.share(None).contains("graph=pers-1"));
    }

    #[test]
    fn empty_graph_is_not_a_failure() {
        let mut session = SessionContext::default();
        assert_eq!(session.show_graph(&FakeGraph, "pers-99"), GraphOutcome::Empty);
        assert!(session.graph().is_none());
    }

    #[test]
    fn stale_graph_response_is_discarded() {
        let mut session = SessionContext::default();
        let first = session.begin_graph("pers-1");
        let second = session.begin_graph("pers-2");

        assert_eq!(
            session.complete_graph(first, FakeGraph.fetch_graph("pers-1")),
            GraphOutcome::Stale
        );
        assert_eq!(
            session.complete_graph(second, Ok(RawGraph::default())),
            GraphOutcome::Empty
        );
        assert_eq!(session.focus(), Some("pers-2"));
    }

    #[test]
    fn failed_graph_keeps_previous_view() {
        let mut session = SessionContext::default();
        session.show_graph(&FakeGraph, "pers-1");
        let ticket = session.begin_graph("pers-2");
        let err = ServiceError::Transport {
            endpoint: "graph",
            message: "connection refused".into(),
        };
        let outcome = session.complete_graph(ticket, Err(err.clone()));

        assert_eq!(outcome, GraphOutcome::Failed(err));
        assert_eq!(session.focus(), Some("pers-1"));
        assert!(session.graph().is_some());
    }

    #[test]
    fn shared_view_seeds_session_without_search() {
        let view = SharedView::from_json(
            r#"{
                "search": "nlp",
                "filters": ["inst-10"],
                "persons": [
                    {"person": {"pk": "1", "name": "Max"}, "institutes": [{"pk": 10, "name": "TU"}]},
                    {"person": {"pk": "2", "name": "Jana"}}
                ],
                "graph": "pers-1"
            }"#,
        )
        .unwrap();
        let mut session = SessionContext::from_shared_view(
            view,
            GraphViewModelBuilder::default(),
            ShareCodec::default(),
        )
        .unwrap();

        assert_eq!(session.filtered().len(), 1);
        assert_eq!(session.focus(), Some("pers-1"));

        let service = FakeSearch::ok();
        assert_eq!(session.search(&service), SearchOutcome::Cached { count: 2 });
        assert_eq!(service.calls.get(), 0);
    }
}
