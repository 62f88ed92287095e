//! Basic statistics for a case network.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: size of the canonical graph.
//! - **density**: `edge_count / (n * (n - 1) / 2)` for an undirected graph.
//!   Zero for graphs with 0 or 1 node.
//! - **average_degree**: `2 * edge_count / n`; zero for an empty graph.
//! - **component_count**: number of connected components.
//! - **isolated_node_count**: nodes with no relationships at all.
//! - **max_degree**: the most connected entity's degree.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::GraphModel;

/// Summary statistics for a case network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Ranges from 0.0 (no edges) to 1.0 (complete graph).
    pub density: f64,
    pub average_degree: f64,
    pub component_count: usize,
    pub isolated_node_count: usize,
    pub max_degree: usize,
}

impl NetworkStats {
    /// Compute statistics from a [`GraphModel`].
    #[must_use]
    pub fn from_model(model: &GraphModel) -> Self {
        let node_count = model.node_count();
        let edge_count = model.edge_count();

        let degrees = (0..node_count).map(|v| model.adjacency.degree(v));
        let isolated_node_count = degrees.clone().filter(|&d| d == 0).count();
        let max_degree = degrees.max().unwrap_or(0);

        Self {
            node_count,
            edge_count,
            density: undirected_density(node_count, edge_count),
            average_degree: average_degree(node_count, edge_count),
            component_count: connected_components(&model.graph),
            isolated_node_count,
            max_degree,
        }
    }

}

/// Density of an undirected simple graph with `node_count` nodes.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn undirected_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (node_count * (node_count - 1)) as f64 / 2.0;
    edge_count as f64 / max_edges
}

#[allow(clippy::cast_precision_loss)]
fn average_degree(node_count: usize, edge_count: usize) -> f64 {
    if node_count == 0 {
        return 0.0_f64;
    }
    (2 * edge_count) as f64 / node_count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use casenet_core::model::Snapshot;

    fn stats(ids: &[&str], pairs: &[(&str, &str)]) -> NetworkStats {
        let snap = Snapshot::from_pairs(ids, pairs).expect("snapshot");
        NetworkStats::from_model(&GraphModel::from_snapshot(&snap))
    }

    #[test]
    fn empty_network() {
        let s = stats(&[], &[]);
        assert_eq!(s.node_count, 0);
        assert_eq!(s.component_count, 0);
        assert!((s.density - 0.0).abs() < 1e-12);
        assert!((s.average_degree - 0.0).abs() < 1e-12);
        assert_eq!(s.edge_count, 0);
    }

    #[test]
    fn triangle_is_complete() {
        let s = stats(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]);
        assert!((s.density - 1.0).abs() < 1e-12);
        assert!((s.average_degree - 2.0).abs() < 1e-12);
        assert_eq!(s.component_count, 1);
        assert_eq!(s.max_degree, 2);
    }

    #[test]
    fn isolated_nodes_counted() {
        let s = stats(&["a", "b", "c", "d"], &[("a", "b")]);
        assert_eq!(s.isolated_node_count, 2);
        assert_eq!(s.component_count, 3);
        assert!((s.density - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn duplicate_edges_do_not_inflate_density() {
        let s = stats(&["a", "b"], &[("a", "b"), ("b", "a")]);
        assert_eq!(s.edge_count, 1);
        assert!((s.density - 1.0).abs() < 1e-12);
    }
}
