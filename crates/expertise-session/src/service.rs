//! Seams to the remote endpoints.
//!
//! The session drives these synchronously; each call is one suspension point of the
//! interaction. Implementations decide transport, timeouts and decoding.

use expertise_filter::PersonRecord;
use expertise_graph::RawGraph;

use crate::error::ServiceError;

/// The remote person-search endpoint.
pub trait PersonSearch {
    /// Returns the persons matching any of `phrases`; an empty list means everyone.
    fn search_persons(&self, phrases: &[String]) -> Result<Vec<PersonRecord>, ServiceError>;
}

/// The remote graph-fetch endpoint.
pub trait GraphSource {
    /// Returns the neighbourhood of `node_id`. An empty node list means nothing was found.
    fn fetch_graph(&self, node_id: &str) -> Result<RawGraph, ServiceError>;
}

/// The remote state-shortening endpoint.
pub trait Shortener {
    /// Stores `query` server-side and returns a short opaque key for it.
    fn shorten(&self, query: &str) -> Result<String, ServiceError>;
}
