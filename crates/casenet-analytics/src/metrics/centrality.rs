//! Degree, closeness, and composite centrality.
//!
//! The composite score blends three normalized signals:
//!
//! `S(v) = w_degree * DEG(v) + w_closeness * CL(v) + w_betweenness * BC(v)`
//!
//! - `DEG(v)`: degree divided by the maximum degree in the network.
//! - `CL(v)`: `reachable / total_distance` from a BFS at `v`, divided by the
//!   maximum over all nodes. Isolated nodes score 0.
//! - `BC(v)`: normalized node betweenness from
//!   [`crate::metrics::betweenness`].
//!
//! Every component is clamped to `[0, 1]` before weighting.

use casenet_core::AnalyticsError;
use casenet_core::config::CentralityWeights;
use tracing::instrument;

use crate::cancel::CancelToken;
use crate::graph::build::GraphModel;
use crate::metrics::shortest_path::ShortestPaths;

/// Per-node centrality signals, indexed by node index.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityScores {
    pub degree: Vec<usize>,
    pub degree_normalized: Vec<f64>,
    pub closeness: Vec<f64>,
    pub betweenness: Vec<f64>,
    pub composite: Vec<f64>,
}

/// Closeness centrality (`reachable / total distance`) normalized by its
/// maximum so the most central node scores 1.0.
///
/// # Errors
///
/// Returns [`AnalyticsError::Cancelled`] if `cancel` fires mid-run.
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(
    model: &GraphModel,
    cancel: &CancelToken,
) -> Result<Vec<f64>, AnalyticsError> {
    let n = model.node_count();
    let mut closeness: Vec<f64> = Vec::with_capacity(n);

    for v in 0..n {
        cancel.check()?;

        let sp = ShortestPaths::from_source(&model.adjacency, v);
        let (reachable, total) = sp
            .order()
            .iter()
            .filter_map(|&w| sp.distance(w))
            .filter(|&d| d > 0)
            .fold((0_usize, 0_usize), |(r, t), d| (r + 1, t + d));

        closeness.push(if total > 0 {
            reachable as f64 / total as f64
        } else {
            0.0
        });
    }

    Ok(normalize_by_max(closeness))
}

/// Combine degree, closeness, and precomputed normalized betweenness.
///
/// # Errors
///
/// Returns [`AnalyticsError::Cancelled`] if `cancel` fires mid-run.
#[instrument(skip(model, betweenness, weights, cancel), fields(nodes = model.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn composite_centrality(
    model: &GraphModel,
    betweenness: &[f64],
    weights: &CentralityWeights,
    cancel: &CancelToken,
) -> Result<CentralityScores, AnalyticsError> {
    let n = model.node_count();

    let degree: Vec<usize> = (0..n).map(|v| model.adjacency.degree(v)).collect();
    let max_degree = degree.iter().copied().max().unwrap_or(0);
    let degree_normalized: Vec<f64> = degree
        .iter()
        .map(|&d| {
            if max_degree == 0 {
                0.0
            } else {
                d as f64 / max_degree as f64
            }
        })
        .collect();

    let closeness = closeness_centrality(model, cancel)?;

    let composite = (0..n)
        .map(|v| {
            let bc = betweenness.get(v).copied().unwrap_or(0.0);
            weights.degree * unit(degree_normalized[v])
                + weights.closeness * unit(closeness[v])
                + weights.betweenness * unit(bc)
        })
        .collect();

    Ok(CentralityScores {
        degree,
        degree_normalized,
        closeness,
        betweenness: betweenness.to_vec(),
        composite,
    })
}

fn normalize_by_max(values: Vec<f64>) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 || !max.is_finite() {
        return values;
    }
    values.into_iter().map(|v| v / max).collect()
}

fn unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    value.clamp(0.0, 1.0)
}
