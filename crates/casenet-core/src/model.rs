//! Case network snapshot: the immutable input to every analytics call.
//!
//! A [`Snapshot`] pairs a node list with an edge list exactly as exported by
//! the case-data service:
//!
//! ```json
//! { "nodes": [{"id": "p1", "label": "Alice", "category": "person"}],
//!   "edges": [{"from": "p1", "to": "p2", "label": "calls", "category": "phone"}] }
//! ```
//!
//! Both `nodes` and `edges` are required; an edgeless case sends `[]`.
//! Node ids are validated on construction (non-empty, unique). Edge endpoints
//! are deliberately *not* validated here: dangling references are tolerated
//! and dropped later by the graph model, which counts them.

use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// An entity in the case network. Identity is the `id`; `label` and
/// `category` are display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, alias = "type")]
    pub category: String,
}

impl Node {
    /// Build a node whose label equals its id and with no category.
    #[must_use]
    pub fn bare(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            category: String::new(),
        }
    }
}

/// A relationship between two entities. Stored with a direction, traversed
/// as undirected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, alias = "type")]
    pub category: String,
}

impl Edge {
    /// Build an unlabeled edge.
    #[must_use]
    pub fn bare(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: String::new(),
            category: String::new(),
        }
    }
}

#[derive(Deserialize)]
struct RawSnapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Validated node/edge snapshot of one case network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct Snapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = AnalyticsError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        Self::new(raw.nodes, raw.edges)
    }
}

impl Snapshot {
    /// Build a snapshot, rejecting empty or duplicate node ids.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::EmptyNodeId`] or
    /// [`AnalyticsError::DuplicateNode`].
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, AnalyticsError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if node.id.is_empty() {
                return Err(AnalyticsError::EmptyNodeId { index });
            }
            if !seen.insert(node.id.as_str()) {
                return Err(AnalyticsError::DuplicateNode(node.id.clone()));
            }
        }

        Ok(Self { nodes, edges })
    }

    /// Convenience constructor from bare ids and `(from, to)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`Snapshot::new`].
    pub fn from_pairs(ids: &[&str], pairs: &[(&str, &str)]) -> Result<Self, AnalyticsError> {
        Self::new(
            ids.iter().map(|id| Node::bare(*id)).collect(),
            pairs.iter().map(|(a, b)| Edge::bare(*a, *b)).collect(),
        )
    }

    /// Parse the JSON input contract.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidSnapshot`] for malformed JSON or
    /// missing required fields, or a validation error from [`Snapshot::new`].
    pub fn from_json_str(raw: &str) -> Result<Self, AnalyticsError> {
        let raw: RawSnapshot = serde_json::from_str(raw)
            .map_err(|e| AnalyticsError::InvalidSnapshot(e.to_string()))?;
        Self::try_from(raw)
    }

    /// Parse the JSON input contract from a reader.
    ///
    /// # Errors
    ///
    /// Same as [`Snapshot::from_json_str`].
    pub fn from_reader(reader: impl Read) -> Result<Self, AnalyticsError> {
        let raw: RawSnapshot = serde_json::from_reader(reader)
            .map_err(|e| AnalyticsError::InvalidSnapshot(e.to_string()))?;
        Self::try_from(raw)
    }

    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node's display metadata by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Display label for `id`, falling back to the id itself.
    #[must_use]
    pub fn label_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.node(id)
            .map(|node| node.label.as_str())
            .filter(|label| !label.is_empty())
            .unwrap_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_contract() {
        let snap = Snapshot::from_json_str(
            r#"{
                "nodes": [
                    {"id": "a", "label": "Alice", "category": "person"},
                    {"id": "b", "label": "Bob", "type": "person"}
                ],
                "edges": [{"from": "a", "to": "b", "label": "calls", "category": "phone"}]
            }"#,
        )
        .expect("parse");

        assert_eq!(snap.nodes().len(), 2);
        assert_eq!(snap.edges().len(), 1);
        assert_eq!(snap.node("b").map(|n| n.category.as_str()), Some("person"));
        assert_eq!(snap.label_of("a"), "Alice");
    }

    #[test]
    fn labels_are_optional() {
        let snap = Snapshot::from_json_str(r#"{"nodes": [{"id": "a"}], "edges": []}"#)
            .expect("parse");
        assert_eq!(snap.nodes()[0].label, "");
        assert!(snap.edges().is_empty());
        assert_eq!(snap.label_of("a"), "a");
    }

    #[test]
    fn missing_edges_field_is_input_error() {
        let err = Snapshot::from_json_str(r#"{"nodes": [{"id": "a"}]}"#)
            .expect_err("missing `edges` must fail");
        assert!(matches!(err, AnalyticsError::InvalidSnapshot(ref msg) if msg.contains("edges")));
        assert!(err.is_input_error());
    }

    #[test]
    fn missing_node_id_is_input_error() {
        let err = Snapshot::from_json_str(r#"{"nodes": [{"label": "x"}], "edges": []}"#)
            .expect_err("missing id must fail");
        assert!(matches!(err, AnalyticsError::InvalidSnapshot(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn missing_edge_endpoint_is_input_error() {
        let err = Snapshot::from_json_str(r#"{"nodes": [{"id": "a"}], "edges": [{"from": "a"}]}"#)
            .expect_err("missing `to` must fail");
        assert!(matches!(err, AnalyticsError::InvalidSnapshot(_)));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = Snapshot::from_pairs(&["a", "b", "a"], &[]).expect_err("duplicate");
        assert_eq!(err, AnalyticsError::DuplicateNode("a".to_string()));
    }

    #[test]
    fn empty_id_rejected_through_serde() {
        let err = serde_json::from_str::<Snapshot>(r#"{"nodes": [{"id": "a"}, {"id": ""}], "edges": []}"#)
            .expect_err("empty id");
        assert!(err.to_string().contains("empty id"));
    }

    #[test]
    fn dangling_edges_are_accepted_here() {
        let snap = Snapshot::from_pairs(&["a"], &[("a", "ghost")]).expect("snapshot");
        assert_eq!(snap.edges().len(), 1);
    }
}
