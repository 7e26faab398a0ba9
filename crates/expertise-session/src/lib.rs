//! Session state for the expertise directory.
//!
//! A session runs searches through a [`PersonSearch`] endpoint, caches the last result in a
//! [`SearchSessionCache`], narrows it with the selected filter tokens, shows relationship
//! graphs fetched from a [`GraphSource`], and shares its state as a query string, shortened
//! through a [`Shortener`] when it grows long. [`SessionContext`] holds all of this and is
//! passed explicitly to whatever drives the interaction.

#![warn(missing_docs)]

mod cache;
mod context;
mod error;
mod selection;
mod service;
mod share;
mod shared_view;

pub use cache::{CachedSearch, SearchSessionCache};
pub use context::{
    GraphOutcome, GraphTicket, SearchOutcome, SearchPlan, SearchTicket, SessionContext,
};
pub use error::{SelectionError, ServiceError};
pub use selection::{MAX_SELECTIONS, Selection, SelectionState};
pub use service::{GraphSource, PersonSearch, Shortener};
pub use share::{
    DEFAULT_SHARE_THRESHOLD, DecodedShare, FILTER_PARAM, GRAPH_PARAM, SEARCH_PARAM, SHARE_PARAM,
    ShareCodec, ShareState, share_url,
};
pub use shared_view::SharedView;
