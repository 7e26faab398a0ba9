//! HTTP client for the directory endpoints.
//!
//! All three endpoints hang off one base URL:
//!
//! - `GET {base}/persons?search=..` answers `{"persons": [..]}`
//! - `GET {base}/graph?personId=..` answers `{"graph": {"nodes": [..], "relationships": [..]}}`
//! - `POST {base}/share` with form field `query` answers `{"value": "<key>"}`
//!
//! Calls block until the response arrives or the configured timeout passes. Nothing is
//! retried.

use std::time::Duration;

use expertise_filter::PersonRecord;
use expertise_graph::RawGraph;
use expertise_session::{GraphSource, PersonSearch, ServiceError, Shortener};
use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

/// Body of a person search response.
#[derive(Deserialize)]
struct PersonsResponse {
    /// Matching persons, unfiltered.
    persons: Vec<PersonRecord>,
}

/// Body of a graph response.
#[derive(Deserialize)]
struct GraphResponse {
    /// The neighbourhood graph.
    graph: RawGraph,
}

/// Body of a shortening response.
#[derive(Deserialize)]
struct ShareResponse {
    /// Key under which the query was stored.
    value: String,
}

/// Blocking client for one directory service.
pub struct HttpDirectory {
    /// Shared HTTP client carrying the timeout.
    client: Client,
    /// Base URL without trailing slash.
    base_url: String,
}

impl HttpDirectory {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of a named endpoint.
    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// Sends a request and decodes a JSON body.
    fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ServiceError> {
        let response = request.send().map_err(|err| ServiceError::Transport {
            endpoint,
            message: err.to_string(),
        })?;

        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "response received");
        if !status.is_success() {
            return Err(ServiceError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|err| ServiceError::Transport {
            endpoint,
            message: err.to_string(),
        })?;
        serde_json::from_str(&body).map_err(|err| ServiceError::Decode {
            endpoint,
            message: err.to_string(),
        })
    }
}

impl PersonSearch for HttpDirectory {
    fn search_persons(&self, phrases: &[String]) -> Result<Vec<PersonRecord>, ServiceError> {
        let params: Vec<(&str, &str)> = phrases
            .iter()
            .map(|phrase| ("search", phrase.as_str()))
            .collect();
        let request = self.client.get(self.url("persons")).query(&params);
        self.fetch::<PersonsResponse>("persons", request)
            .map(|response| response.persons)
    }
}

impl GraphSource for HttpDirectory {
    fn fetch_graph(&self, node_id: &str) -> Result<RawGraph, ServiceError> {
        let request = self
            .client
            .get(self.url("graph"))
            .query(&[("personId", node_id)]);
        self.fetch::<GraphResponse>("graph", request)
            .map(|response| response.graph)
    }
}

impl Shortener for HttpDirectory {
    fn shorten(&self, query: &str) -> Result<String, ServiceError> {
        let request = self.client.post(self.url("share")).form(&[("query", query)]);
        self.fetch::<ShareResponse>("share", request)
            .map(|response| response.value)
    }
}
