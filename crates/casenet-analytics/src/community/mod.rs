//! Community structure of a case network.
//!
//! - [`divisive`]: bounded Girvan–Newman edge removal.
//! - [`GroupSummary`]: density and central member of any node group, used for
//!   both detected communities and plain connected components.

pub mod divisive;

pub use divisive::{Partition, StopReason, detect_communities, target_communities};

use fixedbitset::FixedBitSet;

use crate::graph::build::GraphModel;
use crate::graph::stats::undirected_density;

/// Structural summary of a group of nodes inside the full model.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    /// Canonical edges with both endpoints in the group.
    pub internal_edges: usize,
    /// `internal_edges / (k(k-1)/2)`; 0 for groups of fewer than 2.
    pub density: f64,
    /// Member with the highest internal degree, ties to the smallest index.
    pub central: Option<usize>,
}

impl GroupSummary {
    /// Summarize `members` (node indices) against the model's full edge set.
    #[must_use]
    pub fn of(model: &GraphModel, members: &[usize]) -> Self {
        let mut in_group = FixedBitSet::with_capacity(model.node_count());
        for &m in members {
            in_group.insert(m);
        }

        let mut internal_degree = vec![0_usize; model.node_count()];
        let mut internal_edges = 0;
        for edge in &model.edges {
            if in_group.contains(edge.a) && in_group.contains(edge.b) {
                internal_edges += 1;
                internal_degree[edge.a] += 1;
                internal_degree[edge.b] += 1;
            }
        }

        // min_by_key on (Reverse(degree), index) keeps the smallest index on ties.
        let central = members
            .iter()
            .copied()
            .min_by_key(|&m| (std::cmp::Reverse(internal_degree[m]), m));

        Self {
            internal_edges,
            density: undirected_density(members.len(), internal_edges),
            central,
        }
    }
}
