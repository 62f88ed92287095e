//! Index-based undirected adjacency.
//!
//! Every entry is `(neighbor, edge)` where `edge` is the position of the
//! canonical edge in [`GraphModel::edges`](crate::graph::GraphModel). Lists
//! are sorted by neighbor index, which makes every traversal deterministic.
//!
//! An [`Adjacency`] can be built over any subset of the canonical edges; the
//! community detector rebuilds one over the surviving edges after each cut.

use crate::graph::build::CanonicalEdge;

/// Symmetric neighbor lists over a subset of canonical edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    neighbors: Vec<Vec<(usize, usize)>>,
}

impl Adjacency {
    /// Build adjacency for `node_count` nodes from the edges at the given
    /// positions in `edges`. Both directions are inserted.
    #[must_use]
    pub fn from_edges(
        node_count: usize,
        edges: &[CanonicalEdge],
        active: impl IntoIterator<Item = usize>,
    ) -> Self {
        let mut neighbors: Vec<Vec<(usize, usize)>> = vec![Vec::new(); node_count];

        for pos in active {
            let edge = &edges[pos];
            neighbors[edge.a].push((edge.b, pos));
            neighbors[edge.b].push((edge.a, pos));
        }

        for list in &mut neighbors {
            list.sort_unstable();
        }

        Self { neighbors }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.neighbors.len()
    }

    /// `(neighbor, edge)` pairs of `v`, ascending by neighbor.
    #[must_use]
    pub fn neighbors(&self, v: usize) -> &[(usize, usize)] {
        &self.neighbors[v]
    }

    #[must_use]
    pub fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }

}
