//! Filter tokens and faceted matching for the expertise directory.
//!
//! Users narrow a search result with tokens, one per selected facet value:
//!
//! - **Referential tokens**: `inst-12`, a four-character category prefix, `-`, and the primary
//!   key of the referenced node
//! - **Search tokens**: free text that was sent to the person-search endpoint
//!
//! [`FacetFilter`] evaluates a token selection against [`PersonRecord`]s: tokens of one
//! category are ORed, categories are ANDed, and the person/advisor and offered/wanted pairs
//! match when either role does.
//!
//! # Example
//!
//! ```
//! use expertise_filter::{FilterToken, PersonRecord, evaluate};
//!
//! let persons = vec![PersonRecord::new("1", "Max Muster"), PersonRecord::new("2", "Jana")];
//! let tokens = vec![FilterToken::parse("pers-1").unwrap()];
//! assert_eq!(evaluate(&tokens, &persons).len(), 1);
//! ```

#![warn(missing_docs)]

mod error;
mod facet;
mod record;
mod token;

pub use error::TokenError;
pub use facet::{FacetFilter, FacetSelection, POLICY_TABLE, Policy, category_matches, evaluate};
pub use record::{Entity, PersonInfo, PersonRecord};
pub use token::{Category, FilterToken, SEPARATOR, partition_tokens};
