//! expertise: command-line client for the expertise directory
//!
//! The directory service answers person searches and relationship-graph queries. This crate
//! wires the service client in [`remote`] to the filtering, graph and sharing crates and
//! exposes them as the `expertise` binary through [`cli`].

#![warn(missing_docs)]

pub mod cli;
pub mod remote;
