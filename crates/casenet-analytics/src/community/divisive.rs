//! Divisive community detection by edge-betweenness removal.
//!
//! # Overview
//!
//! A bounded approximation of Girvan–Newman. Starting from the canonical
//! edge list, the detector repeatedly cuts the edge with the highest edge
//! betweenness and re-measures connected components:
//!
//! 1. **Measure** the components of the surviving edges.
//! 2. **A / target reached**: stop once the component count reaches
//!    `target = min(max_target, ceil(n / nodes_per_community))`.
//! 3. **B / no structure**: stop when no edge remains or the best edge
//!    betweenness is 0.
//! 4. **C / iteration cap**: stop after `min(edge_count, max_iterations)`
//!    removals. This is an interactive-latency budget, not convergence.
//! 5. **Cut** the maximum-betweenness edge, ties going to the
//!    lexicographically smallest canonical key, and loop.
//!
//! The partition with the most components seen during the run is kept as the
//! fallback result. Components are then filtered by minimum size, sorted by
//! size descending and smallest member id, and truncated to
//! `max_communities`.
//!
//! # Determinism
//!
//! Nodes are indexed in id order, adjacency lists are sorted, and the tie
//! break is on the canonical key, so identical input yields an identical
//! ordered community list.

use casenet_core::AnalyticsError;
use casenet_core::config::CommunityConfig;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::cancel::CancelToken;
use crate::graph::adjacency::Adjacency;
use crate::graph::build::GraphModel;
use crate::graph::components::{connected_components, sort_by_size_then_member};
use crate::metrics::betweenness::edge_betweenness;

/// Relative tolerance under which two edge-betweenness values are a tie.
///
/// Brandes sums the same shares in different orders for symmetric edges, so
/// exact float equality would let rounding noise override the key order.
const TIE_EPSILON: f64 = 1e-9;

/// Which stop condition ended the removal loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Condition A: the target component count was reached.
    TargetReached,
    /// Condition B: nothing left to cut.
    NoStructure,
    /// Condition C: the iteration budget ran out.
    IterationCap,
}

impl StopReason {
    /// The single-letter condition label (`A`, `B`, `C`).
    #[must_use]
    pub const fn condition(self) -> &'static str {
        match self {
            Self::TargetReached => "A",
            Self::NoStructure => "B",
            Self::IterationCap => "C",
        }
    }

    /// Snake-case name, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TargetReached => "target_reached",
            Self::NoStructure => "no_structure",
            Self::IterationCap => "iteration_cap",
        }
    }

    /// `true` when the run stopped on its budget rather than on structure.
    #[must_use]
    pub const fn is_approximation(self) -> bool {
        matches!(self, Self::IterationCap)
    }
}

/// Outcome of one detection run. Indices refer to the source [`GraphModel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Post-processed communities, each sorted ascending.
    pub communities: Vec<Vec<usize>>,
    pub stop_reason: StopReason,
    /// Number of edges removed.
    pub iterations: usize,
    /// Edge positions in removal order.
    pub removed_edges: Vec<usize>,
    /// Component count of the selected partition before filtering.
    pub component_count: usize,
    /// Target component count for this graph.
    pub target: usize,
}

/// Target component count: `min(max_target, ceil(n / nodes_per_community))`.
#[must_use]
pub fn target_communities(node_count: usize, config: &CommunityConfig) -> usize {
    let per = config.nodes_per_community.max(1);
    config.max_target.min(node_count.div_ceil(per))
}

/// Run divisive community detection over the model's canonical edges.
///
/// # Errors
///
/// Returns [`AnalyticsError::Cancelled`] if `cancel` fires mid-run.
#[instrument(skip(model, config, cancel), fields(nodes = model.node_count(), edges = model.edge_count()))]
pub fn detect_communities(
    model: &GraphModel,
    config: &CommunityConfig,
    cancel: &CancelToken,
) -> Result<Partition, AnalyticsError> {
    let n = model.node_count();
    let edge_total = model.edge_count();
    let target = target_communities(n, config);
    let max_iterations = edge_total.min(config.max_iterations);

    // Positions into `model.edges`; kept in key order.
    let mut remaining: Vec<usize> = (0..edge_total).collect();
    let mut removed_edges: Vec<usize> = Vec::new();
    let mut best: Vec<Vec<usize>> = Vec::new();

    let stop_reason = loop {
        cancel.check()?;

        let adj = Adjacency::from_edges(n, &model.edges, remaining.iter().copied());
        let components = connected_components(&adj);

        if components.len() >= target {
            best = components;
            break StopReason::TargetReached;
        }

        if components.len() > best.len() {
            best = components;
        }

        if remaining.is_empty() {
            break StopReason::NoStructure;
        }

        if removed_edges.len() >= max_iterations {
            break StopReason::IterationCap;
        }

        let scores = edge_betweenness(&adj, edge_total, cancel)?;
        let Some(cut) = select_edge(model, &remaining, &scores) else {
            break StopReason::NoStructure;
        };

        debug!(
            iteration = removed_edges.len() + 1,
            edge = %model.edges[cut].key,
            betweenness = scores[cut],
            "removing edge"
        );

        remaining.retain(|&e| e != cut);
        removed_edges.push(cut);
    };

    let component_count = best.len();
    let communities = post_process(best, config);

    debug!(
        stop = stop_reason.condition(),
        iterations = removed_edges.len(),
        communities = communities.len(),
        "community detection finished"
    );

    Ok(Partition {
        communities,
        stop_reason,
        iterations: removed_edges.len(),
        removed_edges,
        component_count,
        target,
    })
}

/// Pick the maximum-betweenness edge, ties to the smallest canonical key.
/// Returns `None` when the maximum is not positive.
fn select_edge(model: &GraphModel, remaining: &[usize], scores: &[f64]) -> Option<usize> {
    let max = remaining
        .iter()
        .map(|&e| scores[e])
        .fold(f64::NEG_INFINITY, f64::max);

    if !max.is_finite() || max <= 0.0 {
        return None;
    }

    let floor = max - TIE_EPSILON * max.max(1.0);
    remaining
        .iter()
        .copied()
        .filter(|&e| scores[e] >= floor)
        .min_by(|&x, &y| model.edges[x].key.cmp(&model.edges[y].key).then(x.cmp(&y)))
}

/// Filter by minimum size, order, and cap the community list.
fn post_process(mut groups: Vec<Vec<usize>>, config: &CommunityConfig) -> Vec<Vec<usize>> {
    groups.retain(|g| g.len() >= config.min_size);
    sort_by_size_then_member(&mut groups);
    groups.truncate(config.max_communities);
    groups
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
