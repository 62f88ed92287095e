//! Graph construction from a case network snapshot.
//!
//! # Overview
//!
//! [`GraphModel::from_snapshot`] turns the caller's node and edge lists into
//! an undirected, deduplicated graph suitable for every analytics pass.
//!
//! ## Node Order
//!
//! Nodes are inserted in ascending id order, so `NodeIndex::index()` order
//! equals id order. Every "smallest id wins" tie-break downstream reduces to
//! "smallest index wins".
//!
//! ## Edge Canonicalization
//!
//! Stored edges carry a direction but are traversed both ways. Edges are
//! deduplicated on their unordered endpoint pair; later edges between the
//! same two nodes are counted in `duplicate_edges` and skipped. The
//! canonical key `min(id)|max(id)` orders edges and breaks ties only: ids
//! may themselves contain `|`, so two distinct pairs can share a key.
//!
//! ## Partial Data
//!
//! Edges naming an id absent from the node list are dropped and counted in
//! `dropped_edges`. Self-loops are dropped and counted in `self_loops`.
//! Neither is an error: upstream case data may be partially inconsistent.
//!
//! ## Cache Invalidation
//!
//! [`GraphModel::content_hash`] is a BLAKE3 hash of the node ids and
//! edge endpoint ids. Callers that run analytics off-thread can compare it
//! against the current snapshot's hash and discard stale results.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use casenet_core::model::Snapshot;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::graph::adjacency::Adjacency;

/// Separator between the two endpoint ids of a canonical edge key.
pub const KEY_DELIMITER: char = '|';

/// Build the canonical key for an undirected edge.
#[must_use]
pub fn canonical_key(a: &str, b: &str) -> String {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    format!("{lo}{KEY_DELIMITER}{hi}")
}

// ---------------------------------------------------------------------------
// CanonicalEdge
// ---------------------------------------------------------------------------

/// One deduplicated undirected edge. `a < b` by node index (and so by id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEdge {
    pub a: usize,
    pub b: usize,
    /// `min(id)|max(id)`; the deterministic tie-break key.
    pub key: String,
}

/// Counts of snapshot entries that did not make it into the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildDiagnostics {
    /// Edges with at least one endpoint missing from the node list.
    pub dropped_edges: usize,
    /// Edges between two nodes already joined by an earlier edge.
    pub duplicate_edges: usize,
    /// Edges from a node to itself.
    pub self_loops: usize,
}

// ---------------------------------------------------------------------------
// GraphModel
// ---------------------------------------------------------------------------

/// An undirected case network built from a [`Snapshot`].
#[derive(Debug)]
pub struct GraphModel {
    /// Undirected graph: node weight = id, edge weight = position in `edges`.
    pub graph: UnGraph<String, usize>,
    /// Mapping from node id to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// Canonical edges, sorted by key then endpoint indices.
    pub edges: Vec<CanonicalEdge>,
    /// Symmetric adjacency over all canonical edges.
    pub adjacency: Adjacency,
    pub diagnostics: BuildDiagnostics,
    /// BLAKE3 content hash of node ids and edge endpoints.
    pub content_hash: String,
}

impl GraphModel {
    /// Build a [`GraphModel`] from a validated snapshot.
    ///
    /// Never fails: an empty or single-node snapshot yields a trivially empty
    /// model, and inconsistent edges are dropped and counted.
    #[must_use]
    #[instrument(skip(snapshot), fields(nodes = snapshot.nodes().len(), edges = snapshot.edges().len()))]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut ids: Vec<&str> = snapshot.nodes().iter().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();

        let mut graph = UnGraph::<String, usize>::with_capacity(ids.len(), snapshot.edges().len());
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(ids.len());

        for id in &ids {
            let idx = graph.add_node((*id).to_string());
            node_map.insert((*id).to_string(), idx);
        }

        let mut diagnostics = BuildDiagnostics::default();
        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(snapshot.edges().len());
        let mut edges: Vec<CanonicalEdge> = Vec::with_capacity(snapshot.edges().len());

        for edge in snapshot.edges() {
            let (Some(&from), Some(&to)) = (node_map.get(&edge.from), node_map.get(&edge.to))
            else {
                diagnostics.dropped_edges += 1;
                continue;
            };

            if from == to {
                diagnostics.self_loops += 1;
                continue;
            }

            let (a, b) = if from.index() < to.index() {
                (from.index(), to.index())
            } else {
                (to.index(), from.index())
            };
            if !seen.insert((a, b)) {
                diagnostics.duplicate_edges += 1;
                continue;
            }

            let key = canonical_key(&edge.from, &edge.to);
            edges.push(CanonicalEdge { a, b, key });
        }

        edges.sort_unstable_by(|x, y| x.key.cmp(&y.key).then((x.a, x.b).cmp(&(y.a, y.b))));

        for (pos, edge) in edges.iter().enumerate() {
            graph.add_edge(NodeIndex::new(edge.a), NodeIndex::new(edge.b), pos);
        }

        if diagnostics.dropped_edges > 0 {
            warn!(
                dropped = diagnostics.dropped_edges,
                "snapshot edges reference unknown nodes; analysing the valid subgraph"
            );
        }

        let adjacency = Adjacency::from_edges(ids.len(), &edges, 0..edges.len());
        let content_hash = compute_content_hash(&ids, &edges);

        Self {
            graph,
            node_map,
            edges,
            adjacency,
            diagnostics,
            content_hash,
        }
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of canonical edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Dense index of a node id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.node_map.get(id).map(|idx| idx.index())
    }

    /// The id of the node at dense index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is out of range; indices come from this model.
    #[must_use]
    pub fn id(&self, idx: usize) -> &str {
        self.graph[NodeIndex::new(idx)].as_str()
    }

    /// Map dense indices back to owned ids.
    #[must_use]
    pub fn ids(&self, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| self.id(i).to_string()).collect()
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute a BLAKE3 hash of sorted node ids and each edge's endpoint ids.
fn compute_content_hash(sorted_ids: &[&str], edges: &[CanonicalEdge]) -> String {
    let mut hasher = blake3::Hasher::new();
    for id in sorted_ids {
        hasher.update(id.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for edge in edges {
        hasher.update(sorted_ids[edge.a].as_bytes());
        hasher.update(b"\x00");
        hasher.update(sorted_ids[edge.b].as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use casenet_core::model::{Edge, Node};

    fn model(ids: &[&str], pairs: &[(&str, &str)]) -> GraphModel {
        GraphModel::from_snapshot(&Snapshot::from_pairs(ids, pairs).expect("snapshot"))
    }

    fn neighbor_ids<'a>(g: &'a GraphModel, id: &str) -> Vec<&'a str> {
        let v = g.index_of(id).expect("known id");
        g.adjacency.neighbors(v).iter().map(|&(w, _)| g.id(w)).collect()
    }

    #[test]
    fn empty_snapshot_produces_empty_model() {
        let g = model(&[], &[]);
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.content_hash.starts_with("blake3:"));
    }

    #[test]
    fn single_node_is_valid() {
        let g = model(&["a"], &[]);
        assert_eq!(g.node_count(), 1);
        assert!(g.adjacency.neighbors(0).is_empty());
    }

    #[test]
    fn nodes_indexed_in_id_order() {
        let g = model(&["c", "a", "b"], &[]);
        assert_eq!(g.id(0), "a");
        assert_eq!(g.id(1), "b");
        assert_eq!(g.id(2), "c");
        assert_eq!(g.index_of("c"), Some(2));
    }

    #[test]
    fn canonical_key_ignores_direction() {
        assert_eq!(canonical_key("b", "a"), "a|b");
        assert_eq!(canonical_key("a", "b"), "a|b");
    }

    #[test]
    fn reversed_duplicate_is_counted_once() {
        let g = model(&["a", "b"], &[("a", "b"), ("b", "a"), ("a", "b")]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.diagnostics.duplicate_edges, 2);
        assert_eq!(g.edges[0].key, "a|b");
    }

    #[test]
    fn ids_containing_delimiter_keep_distinct_edges() {
        // Both pairs render as the key "a|b|c".
        let g = model(&["a", "a|b", "b|c", "c"], &[("a|b", "c"), ("a", "b|c")]);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.diagnostics.duplicate_edges, 0);
        assert_eq!(g.edges[0].key, g.edges[1].key);
        assert_eq!((g.edges[0].a, g.edges[0].b), (0, 2));
        assert_eq!((g.edges[1].a, g.edges[1].b), (1, 3));

        assert_eq!(neighbor_ids(&g, "a"), vec!["b|c"]);
        assert_eq!(neighbor_ids(&g, "c"), vec!["a|b"]);
    }

    #[test]
    fn dangling_edges_dropped_and_counted() {
        let g = model(&["a", "b"], &[("a", "b"), ("a", "ghost"), ("phantom", "b")]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.diagnostics.dropped_edges, 2);
    }

    #[test]
    fn self_loops_dropped() {
        let g = model(&["a", "b"], &[("a", "a"), ("a", "b")]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.diagnostics.self_loops, 1);
        assert_eq!(neighbor_ids(&g, "a"), vec!["b"]);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = model(&["a", "b", "c"], &[("c", "a"), ("b", "c")]);
        for v in 0..g.node_count() {
            for &(w, e) in g.adjacency.neighbors(v) {
                assert!(
                    g.adjacency.neighbors(w).iter().any(|&(x, f)| x == v && f == e),
                    "{} -> {} missing reverse entry",
                    g.id(v),
                    g.id(w)
                );
            }
        }
        assert_eq!(neighbor_ids(&g, "c"), vec!["a", "b"]);
    }

    #[test]
    fn edges_sorted_by_key() {
        let g = model(&["a", "b", "c"], &[("c", "b"), ("b", "a"), ("a", "c")]);
        let keys: Vec<&str> = g.edges.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a|b", "a|c", "b|c"]);
        for (edge, pos) in g.graph.edge_indices().zip(0..) {
            assert_eq!(g.graph[edge], pos);
        }
    }

    #[test]
    fn content_hash_ignores_edge_direction_and_order() {
        let a = model(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        let b = model(&["c", "b", "a"], &[("c", "b"), ("b", "a")]);
        assert_eq!(a.content_hash, b.content_hash);

        let c = model(&["a", "b", "c"], &[("a", "b")]);
        assert_ne!(a.content_hash, c.content_hash, "hash must change when edges change");
    }

    #[test]
    fn labels_do_not_affect_identity() {
        let snap = Snapshot::new(
            vec![
                Node {
                    id: "a".into(),
                    label: "Alice".into(),
                    category: "person".into(),
                },
                Node::bare("b"),
            ],
            vec![Edge {
                from: "a".into(),
                to: "b".into(),
                label: "calls".into(),
                category: "phone".into(),
            }],
        )
        .expect("snapshot");
        let g = GraphModel::from_snapshot(&snap);
        assert_eq!(g.edges[0].key, "a|b");
    }
}
