//! Conversion of a raw graph payload into a render-ready view model.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    raw::{RawGraph, RawNode, RawRelationship},
    style::{FOCUS_BORDER_WIDTH, NodeCategory, NodeStyle},
    wrap::{DEFAULT_WRAP_WIDTH, wrap_label},
};

/// Display labels for relationship types. Unlisted types are shown as-is.
pub const RELATION_LABELS: &[(&str, &str)] = &[
    ("ADVISED_BY", "advised by"),
    ("MEMBER_OF", "member of"),
    ("HAS", "has"),
    ("HAS_INTEREST", "interested in"),
    ("OFFERS", "offers"),
    ("WANTS", "wants"),
];

/// Returns the display label for a relationship type.
pub fn relation_label(relation_type: &str) -> &str {
    RELATION_LABELS
        .iter()
        .find(|(raw, _)| *raw == relation_type)
        .map_or(relation_type, |(_, label)| *label)
}

/// A node ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Node id, unique within the view.
    pub id: String,
    /// Word-wrapped display label.
    pub label: String,
    /// Node category, or `None` when the labels were not recognized.
    pub category: Option<NodeCategory>,
    /// Style derived from the category, plus focus emphasis.
    pub style: NodeStyle,
}

/// Which way a curved edge bends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Curve {
    /// Bends clockwise relative to the edge direction.
    #[serde(rename = "curvedCW")]
    Clockwise,
    /// Bends counter-clockwise relative to the edge direction.
    #[serde(rename = "curvedCCW")]
    CounterClockwise,
}

/// Routing hint that keeps parallel edges apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeRouting {
    /// Bend direction.
    pub curve: Curve,
    /// How strongly the edge bends, in `(0, 1]`.
    pub roundness: f32,
}

impl EdgeRouting {
    /// Routing for the `rank`-th edge between the same pair of nodes.
    ///
    /// Ranks alternate sides and bend further every second edge.
    pub fn for_rank(rank: usize) -> Self {
        let curve = if rank % 2 == 0 {
            Curve::Clockwise
        } else {
            Curve::CounterClockwise
        };
        let step = (rank / 2 + 1) as f32;
        Self {
            curve,
            roundness: (0.2 * step).min(1.0),
        }
    }
}

/// An edge ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    /// Edge id, unique within the view.
    pub id: String,
    /// Id of the start node.
    pub source: String,
    /// Id of the end node.
    pub target: String,
    /// Raw relationship type.
    pub relation_type: String,
    /// Label shown on the edge.
    pub display_label: String,
    /// Set when several edges connect the same two nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<EdgeRouting>,
}

/// A render-ready graph.
///
/// An empty view means the graph endpoint found nothing for the requested node; fetch
/// failures are reported separately by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphView {
    /// Nodes, deduplicated by id, in payload order.
    pub nodes: Vec<GraphNode>,
    /// Edges, deduplicated, in payload order.
    pub edges: Vec<GraphEdge>,
}

impl GraphView {
    /// Whether the view holds no graph data.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// The node carrying focus emphasis, if any.
    pub fn focus(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.style.border_width.is_some())
    }
}

/// Builds [`GraphView`]s from raw graph payloads.
#[derive(Debug, Clone)]
pub struct GraphViewModelBuilder {
    /// Column budget for label wrapping.
    wrap_width: usize,
    /// Border width of the focus node.
    focus_border_width: u32,
}

impl Default for GraphViewModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphViewModelBuilder {
    /// Creates a builder with the default wrap width and focus border.
    pub fn new() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            focus_border_width: FOCUS_BORDER_WIDTH,
        }
    }

    /// Sets the label wrap width.
    pub fn wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = width;
        self
    }

    /// Sets the border width used to emphasize the focus node.
    pub fn focus_border_width(mut self, width: u32) -> Self {
        self.focus_border_width = width;
        self
    }

    /// Converts `raw` into a view model, emphasizing the node matching `focus`.
    ///
    /// The focus id names the node whose `pk` property equals it, or failing that the node
    /// whose graph id equals it. At most one node is emphasized.
    pub fn build(&self, raw: &RawGraph, focus: Option<&str>) -> GraphView {
        let focus = focus.and_then(|f| focus_node_id(raw, f));
        let mut seen_nodes = HashSet::new();
        let mut nodes = Vec::with_capacity(raw.nodes.len());
        for node in &raw.nodes {
            if !seen_nodes.insert(node.id.as_str()) {
                continue;
            }
            nodes.push(self.build_node(node, focus));
        }

        let mut seen_edges = HashSet::new();
        let mut edges = Vec::with_capacity(raw.relationships.len());
        for rel in &raw.relationships {
            if !seen_nodes.contains(rel.start_node.as_str())
                || !seen_nodes.contains(rel.end_node.as_str())
            {
                warn!(
                    start = %rel.start_node,
                    end = %rel.end_node,
                    relation = %rel.relation_type,
                    "dropping relationship to a node missing from the payload"
                );
                continue;
            }
            let id = edge_id(rel);
            if !seen_edges.insert(id.clone()) {
                continue;
            }
            edges.push(GraphEdge {
                id,
                source: rel.start_node.clone(),
                target: rel.end_node.clone(),
                relation_type: rel.relation_type.clone(),
                display_label: relation_label(&rel.relation_type).to_string(),
                routing: None,
            });
        }
        assign_routing(&mut edges);

        debug!(nodes = nodes.len(), edges = edges.len(), "built graph view");
        GraphView { nodes, edges }
    }

    /// Builds a single node; `focus` is the graph id of the node to emphasize.
    fn build_node(&self, node: &RawNode, focus: Option<&str>) -> GraphNode {
        let category = categorize(node);
        let mut style = NodeStyle::for_category(category);
        if focus == Some(node.id.as_str()) {
            style = style.emphasized(self.focus_border_width);
        }
        GraphNode {
            id: node.id.clone(),
            label: wrap_label(node.name().unwrap_or_default(), self.wrap_width),
            category,
            style,
        }
    }
}

/// Resolves a focus id to the graph id of the node it names, preferring a `pk` match.
fn focus_node_id<'a>(raw: &'a RawGraph, focus: &str) -> Option<&'a str> {
    raw.nodes
        .iter()
        .find(|node| node.property("pk") == Some(focus))
        .or_else(|| raw.nodes.iter().find(|node| node.id == focus))
        .map(|node| node.id.as_str())
}

/// Picks the first recognized label of a node, warning when there is none.
fn categorize(node: &RawNode) -> Option<NodeCategory> {
    let category = node.labels.iter().find_map(|label| label.parse().ok());
    if category.is_none() {
        warn!(
            node = %node.id,
            labels = ?node.labels,
            "unrecognized node category, using empty style"
        );
    }
    category
}

/// Identity used to collapse repeated relationships.
fn edge_id(rel: &RawRelationship) -> String {
    match &rel.id {
        Some(id) => id.clone(),
        None => format!("{}-{}-{}", rel.start_node, rel.relation_type, rel.end_node),
    }
}

/// Gives every edge that shares its node pair with another edge a distinct routing.
fn assign_routing(edges: &mut [GraphEdge]) {
    let mut pairs: HashMap<(String, String), Vec<usize>> = HashMap::new();
    for (idx, edge) in edges.iter().enumerate() {
        let key = if edge.source <= edge.target {
            (edge.source.clone(), edge.target.clone())
        } else {
            (edge.target.clone(), edge.source.clone())
        };
        pairs.entry(key).or_default().push(idx);
    }

    for indices in pairs.values().filter(|indices| indices.len() > 1) {
        for (rank, &idx) in indices.iter().enumerate() {
            edges[idx].routing = Some(EdgeRouting::for_rank(rank));
        }
    }
}

/// Builds a view with the default builder.
pub fn build(raw: &RawGraph, focus: Option<&str>) -> GraphView {
    GraphViewModelBuilder::new().build(raw, focus)
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    /// Parses a payload from JSON.
    fn graph(json: &str) -> RawGraph {
        serde_json::from_str(json).unwrap()
    }

    /// The example neighbourhood of one person.
    fn sample() -> RawGraph {
        graph(
            r#"{
            "nodes": [
                {"id": 1, "labels": ["Person"], "properties": {"name": "Max Muster", "pk": "p1", "email": "max@example.org"}},
                {"id": 2, "labels": ["Person"], "properties": {"name": "Jana Schuster von Grafhausen die Dritte", "pk": "p2"}},
                {"id": 3, "labels": ["Expertise"], "properties": {"name": "NLP"}},
                {"id": 4, "labels": ["Institute"], "properties": {"name": "TU Dresden"}}
            ],
            "relationships": [
                {"id": 10, "startNode": 1, "endNode": 3, "type": "WANTS"},
                {"id": 11, "startNode": 2, "endNode": 3, "type": "OFFERS"},
                {"id": 12, "startNode": 1, "endNode": 2, "type": "ADVISED_BY"},
                {"id": 13, "startNode": 2, "endNode": 4, "type": "MEMBER_OF"},
                {"id": 14, "startNode": 2, "endNode": 4, "type": "KNOWS_ABOUT"}
            ]
        }"#,
        )
    }

    #[test]
    fn maps_nodes_and_discards_other_properties() {
        let view = build(&sample(), None);
        assert_eq!(view.nodes.len(), 4);

        let max = view.node("1").unwrap();
        assert_eq!(max.label, "Max Muster");
        assert_eq!(max.category, Some(NodeCategory::Person));
        assert_eq!(max.style.color, Some(NodeCategory::Person.color()));
    }

    #[test]
    fn wraps_long_labels() {
        let view = build(&sample(), None);
        assert_eq!(
            view.node("2").unwrap().label,
            "Jana Schuster von\nGrafhausen die Dritte"
        );
    }

    #[test]
    fn custom_wrap_width() {
        let view = GraphViewModelBuilder::new()
            .wrap_width(5)
            .build(&sample(), None);
        assert_eq!(view.node("4").unwrap().label, "TU\nDresden");
    }

    #[test]
    fn maps_relationships_to_labelled_edges() {
        let view = build(&sample(), None);
        let advised = view.edges.iter().find(|e| e.id == "12").unwrap();
        assert_eq!(advised.source, "1");
        assert_eq!(advised.target, "2");
        assert_eq!(advised.display_label, "advised by");

        let unknown = view.edges.iter().find(|e| e.id == "14").unwrap();
        assert_eq!(unknown.display_label, "KNOWS_ABOUT");
    }

    #[test]
    fn focus_node_gets_emphasized_border() {
        let view = build(&sample(), Some("p2"));
        assert_eq!(view.focus().map(|n| n.id.as_str()), Some("2"));
        assert_eq!(
            view.node("2").unwrap().style.border_width,
            Some(FOCUS_BORDER_WIDTH)
        );
        assert_eq!(view.node("1").unwrap().style.border_width, None);

        let view = build(&sample(), Some("3"));
        assert_eq!(view.focus().map(|n| n.id.as_str()), Some("3"));
    }

    #[test]
    fn pk_match_wins_over_graph_id() {
        let raw = graph(
            r#"{
            "nodes": [
                {"id": 7, "labels": ["Person"], "properties": {"name": "Max Muster", "pk": "2"}},
                {"id": 2, "labels": ["Institute"], "properties": {"name": "TU Dresden"}}
            ],
            "relationships": []
        }"#,
        );
        let view = build(&raw, Some("2"));
        let emphasized = view
            .nodes
            .iter()
            .filter(|n| n.style.border_width.is_some())
            .count();
        assert_eq!(emphasized, 1);
        assert_eq!(view.focus().map(|n| n.id.as_str()), Some("7"));
        assert_eq!(view.node("2").unwrap().style.border_width, None);
    }

    #[test]
    fn unknown_focus_emphasizes_nothing() {
        let view = build(&sample(), Some("p9"));
        assert!(view.focus().is_none());
    }

    #[test]
    fn parallel_edges_get_distinct_routing() {
        let view = build(&sample(), None);
        let member = view.edges.iter().find(|e| e.id == "13").unwrap();
        let knows = view.edges.iter().find(|e| e.id == "14").unwrap();
        assert!(member.routing.is_some());
        assert!(knows.routing.is_some());
        assert_ne!(member.routing, knows.routing);

        let single = view.edges.iter().find(|e| e.id == "10").unwrap();
        assert_eq!(single.routing, None);
    }

    #[test]
    fn opposite_direction_edges_count_as_parallel() {
        let raw = graph(
            r#"{
            "nodes": [
                {"id": "a", "labels": ["Person"], "properties": {"name": "A"}},
                {"id": "b", "labels": ["Person"], "properties": {"name": "B"}}
            ],
            "relationships": [
                {"startNode": "a", "endNode": "b", "type": "ADVISED_BY"},
                {"startNode": "b", "endNode": "a", "type": "ADVISED_BY"}
            ]
        }"#,
        );
        let view = build(&raw, None);
        assert_eq!(view.edges.len(), 2);
        assert_eq!(view.edges[0].routing, Some(EdgeRouting::for_rank(0)));
        assert_eq!(view.edges[1].routing, Some(EdgeRouting::for_rank(1)));
    }

    #[test]
    fn repeated_nodes_and_relationships_collapse() {
        let raw = graph(
            r#"{
            "nodes": [
                {"id": 1, "labels": ["Person"], "properties": {"name": "Max"}},
                {"id": 2, "labels": ["Role"], "properties": {"name": "Tutor"}},
                {"id": 1, "labels": ["Person"], "properties": {"name": "Max"}}
            ],
            "relationships": [
                {"id": 5, "startNode": 1, "endNode": 2, "type": "HAS"},
                {"id": 5, "startNode": 1, "endNode": 2, "type": "HAS"},
                {"startNode": 1, "endNode": 2, "type": "HAS"},
                {"startNode": 1, "endNode": 2, "type": "HAS"}
            ]
        }"#,
        );
        let view = build(&raw, None);
        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.edges.len(), 2);
    }

    #[test]
    #[traced_test]
    fn unknown_category_gets_empty_style_and_warns() {
        let raw = graph(
            r#"{"nodes": [{"id": 1, "labels": ["Building"], "properties": {"name": "APB"}}]}"#,
        );
        let view = build(&raw, None);
        let node = view.node("1").unwrap();
        assert_eq!(node.category, None);
        assert!(node.style.is_empty());
        assert!(logs_contain("unrecognized node category"));
    }

    #[test]
    #[traced_test]
    fn dangling_relationships_are_dropped() {
        let raw = graph(
            r#"{
            "nodes": [{"id": 1, "labels": ["Person"], "properties": {"name": "Max"}}],
            "relationships": [{"startNode": 1, "endNode": 99, "type": "HAS"}]
        }"#,
        );
        let view = build(&raw, None);
        assert!(view.edges.is_empty());
        assert!(logs_contain("missing from the payload"));
    }

    #[test]
    fn empty_payload_is_an_empty_view() {
        let view = build(&RawGraph::default(), Some("p1"));
        assert!(view.is_empty());
        assert!(view.edges.is_empty());
    }

    #[test]
    fn missing_name_gives_empty_label() {
        let raw = graph(r#"{"nodes": [{"id": 1, "labels": ["Role"]}]}"#);
        assert_eq!(build(&raw, None).node("1").unwrap().label, "");
    }

    #[test]
    fn relation_label_falls_back_to_raw_name() {
        assert_eq!(relation_label("MEMBER_OF"), "member of");
        assert_eq!(relation_label("HAS_INTEREST"), "interested in");
        assert_eq!(relation_label("SUPERVISES"), "SUPERVISES");
    }

    #[test]
    fn routing_alternates_and_grows() {
        let first = EdgeRouting::for_rank(0);
        let second = EdgeRouting::for_rank(1);
        let third = EdgeRouting::for_rank(2);
        assert_eq!(first.curve, Curve::Clockwise);
        assert_eq!(second.curve, Curve::CounterClockwise);
        assert!(third.roundness > first.roundness);
    }
}
