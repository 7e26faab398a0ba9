//! Relationship graph view models for the expertise directory.
//!
//! Selecting a person fetches the neighbourhood of their node as a [`RawGraph`]. The
//! [`GraphViewModelBuilder`] turns that payload into a [`GraphView`]: labels taken from the
//! node `name` property and word-wrapped, colors assigned from a fixed per-category table,
//! edges labelled from a relation-name table, repeated relationships collapsed, parallel
//! edges routed apart, and the focus node emphasized. Layout and drawing are left to the
//! renderer.

#![warn(missing_docs)]

mod build;
mod raw;
mod style;
mod wrap;

pub use build::{
    Curve, EdgeRouting, GraphEdge, GraphNode, GraphView, GraphViewModelBuilder, RELATION_LABELS,
    build, relation_label,
};
pub use raw::{RawGraph, RawNode, RawRelationship};
pub use style::{FOCUS_BORDER_WIDTH, NodeCategory, NodeColor, NodeStyle, UnknownCategory};
pub use wrap::{DEFAULT_WRAP_WIDTH, wrap_label};
