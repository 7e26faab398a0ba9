//! The relationship graph payload returned by the graph-fetch endpoint.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Node and relationship ids on the wire may be strings or integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    /// String ids.
    Text(String),
    /// Numeric ids, as returned by the graph database.
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

/// Deserializes a required id into its string form.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    WireId::deserialize(deserializer).map(String::from)
}

/// Deserializes an optional id into its string form.
fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<WireId>::deserialize(deserializer)?.map(String::from))
}

/// A graph payload: nodes and the relationships between them.
///
/// An empty `nodes` list is a valid answer meaning nothing was found.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGraph {
    /// All nodes in the neighbourhood.
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    /// All relationships between those nodes.
    #[serde(default)]
    pub relationships: Vec<RawRelationship>,
}

/// A node as stored in the graph database.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    /// Database id of the node.
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    /// Node labels such as `Person` or `Institute`.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Node properties; `name` carries the display text.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl RawNode {
    /// Returns a string property, if present.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// The free-text name of the node.
    pub fn name(&self) -> Option<&str> {
        self.property("name")
    }
}

/// A directed relationship between two nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRelationship {
    /// Database id of the relationship, if the payload carries one.
    #[serde(default, deserialize_with = "opt_id_string")]
    pub id: Option<String>,
    /// Id of the start node.
    #[serde(rename = "startNode", deserialize_with = "id_string")]
    pub start_node: String,
    /// Id of the end node.
    #[serde(rename = "endNode", deserialize_with = "id_string")]
    pub end_node: String,
    /// Relationship type, e.g. `MEMBER_OF`.
    #[serde(rename = "type")]
    pub relation_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_graph_payload() {
        let json = r#"{
            "nodes": [
                {"id": 1, "labels": ["Person"], "properties": {"name": "Max Muster", "pk": "a1"}},
                {"id": "2", "labels": ["Institute"], "properties": {"name": "TU Dresden"}}
            ],
            "relationships": [
                {"id": 7, "startNode": 1, "endNode": "2", "type": "MEMBER_OF"}
            ]
        }"#;
        let graph: RawGraph = serde_json::from_str(json).unwrap();

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].id, "1");
        assert_eq!(graph.nodes[0].name(), Some("Max Muster"));
        assert_eq!(graph.nodes[0].property("pk"), Some("a1"));
        assert_eq!(graph.relationships[0].id.as_deref(), Some("7"));
        assert_eq!(graph.relationships[0].start_node, "1");
        assert_eq!(graph.relationships[0].relation_type, "MEMBER_OF");
    }

    #[test]
    fn empty_payload_is_valid() {
        let graph: RawGraph = serde_json::from_str(r#"{"nodes": [], "relationships": []}"#).unwrap();
        assert!(graph.nodes.is_empty());

        let graph: RawGraph = serde_json::from_str("{}").unwrap();
        assert!(graph.relationships.is_empty());
    }

    #[test]
    fn relationship_without_id() {
        let json = r#"{"startNode": 1, "endNode": 2, "type": "HAS"}"#;
        let rel: RawRelationship = serde_json::from_str(json).unwrap();
        assert_eq!(rel.id, None);
    }
}
