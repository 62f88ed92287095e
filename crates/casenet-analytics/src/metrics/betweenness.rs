//! Node and edge betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node (or edge) lies on
//! shortest paths between other pairs of nodes. High-betweenness entities
//! are "bridges" between otherwise poorly connected parts of a case network;
//! high-betweenness edges are the ones divisive community detection cuts.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted, undirected graphs:
//!
//! 1. For each source node `s`, run BFS ([`ShortestPaths`]) to get distances,
//!    shortest-path counts `sigma` and predecessor sets.
//! 2. Walk nodes in reverse BFS order (farthest first), pushing dependency
//!    onto each predecessor `v` of `w`:
//!    `c = sigma[v] / sigma[w] * (1 + delta[w])`, `delta[v] += c`, and the
//!    edge `(v, w)` receives `c`.
//! 3. Sum `delta[w]` (for `w != s`) into the node total.
//!
//! Complexity: O(V * (V + E)).
//!
//! # Output
//!
//! Every unordered pair is seen once from each endpoint. Node scores are
//! halved to count unordered pairs, then divided by `(n-1)(n-2)/2` so they
//! lie in `[0, 1]`. For `n <= 2` every node score is exactly zero.
//!
//! Edge scores are left unnormalized (ordered-pair sums): the community
//! detector only needs their relative order.

use casenet_core::AnalyticsError;
use tracing::instrument;

use crate::cancel::CancelToken;
use crate::graph::adjacency::Adjacency;
use crate::graph::build::GraphModel;
use crate::metrics::shortest_path::ShortestPaths;

/// Betweenness scores indexed by node index and canonical edge position.
#[derive(Debug, Clone, PartialEq)]
pub struct Betweenness {
    /// Per-node score. Normalized to `[0, 1]` by [`betweenness_centrality`].
    pub node: Vec<f64>,
    /// Per-edge raw dependency sum, indexed by position in the edge list.
    /// Edges not present in the adjacency keep 0.0.
    pub edge: Vec<f64>,
}

/// Compute normalized node betweenness and raw edge betweenness for the
/// full model.
///
/// # Errors
///
/// Returns [`AnalyticsError::Cancelled`] if `cancel` fires mid-run.
#[instrument(skip(model, cancel), fields(nodes = model.node_count(), edges = model.edge_count()))]
pub fn betweenness_centrality(
    model: &GraphModel,
    cancel: &CancelToken,
) -> Result<Betweenness, AnalyticsError> {
    let mut scores = accumulate(&model.adjacency, model.edge_count(), cancel)?;
    normalize_node_scores(&mut scores.node);
    Ok(scores)
}

/// Raw edge betweenness over an arbitrary edge subset.
///
/// `edge_count` is the length of the backing canonical edge list; positions
/// absent from `adj` score 0.0.
///
/// # Errors
///
/// Returns [`AnalyticsError::Cancelled`] if `cancel` fires mid-run.
pub fn edge_betweenness(
    adj: &Adjacency,
    edge_count: usize,
    cancel: &CancelToken,
) -> Result<Vec<f64>, AnalyticsError> {
    accumulate(adj, edge_count, cancel).map(|scores| scores.edge)
}

/// Brandes accumulation over every source. Scores are raw ordered-pair sums.
///
/// # Errors
///
/// Returns [`AnalyticsError::Cancelled`] if `cancel` fires mid-run.
pub fn accumulate(
    adj: &Adjacency,
    edge_count: usize,
    cancel: &CancelToken,
) -> Result<Betweenness, AnalyticsError> {
    let n = adj.node_count();

    let mut node: Vec<f64> = vec![0.0; n];
    let mut edge: Vec<f64> = vec![0.0; edge_count];
    let mut delta: Vec<f64> = vec![0.0; n];

    for s in 0..n {
        cancel.check()?;

        let sp = ShortestPaths::from_source(adj, s);

        for &v in sp.order() {
            delta[v] = 0.0;
        }

        // Accumulate dependencies in reverse BFS order.
        for &w in sp.order().iter().rev() {
            let sigma_w = sp.sigma(w);

            for &(v, e) in sp.predecessor_edges(w) {
                if sigma_w > 0.0 {
                    let contrib = (sp.sigma(v) / sigma_w) * (1.0 + delta[w]);
                    edge[e] += contrib;
                    delta[v] += contrib;
                }
            }

            if w != s {
                node[w] += delta[w];
            }
        }
    }

    Ok(Betweenness { node, edge })
}

/// Map raw ordered-pair node sums to `[0, 1]`.
///
/// Halving turns ordered pairs into unordered ones; dividing by
/// `(n-1)(n-2)/2` (the number of unordered pairs excluding the node
/// itself) normalizes. All scores are zero when `n <= 2`.
#[allow(clippy::cast_precision_loss)]
pub fn normalize_node_scores(scores: &mut [f64]) {
    let n = scores.len();
    if n <= 2 {
        scores.iter_mut().for_each(|s| *s = 0.0);
        return;
    }

    let pairs = ((n - 1) * (n - 2)) as f64 / 2.0;
    for s in scores.iter_mut() {
        *s = (*s / 2.0 / pairs).clamp(0.0, 1.0);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use casenet_core::model::Snapshot;

    fn model(ids: &[&str], pairs: &[(&str, &str)]) -> GraphModel {
        GraphModel::from_snapshot(&Snapshot::from_pairs(ids, pairs).expect("snapshot"))
    }

    fn node_score(g: &GraphModel, bc: &Betweenness, id: &str) -> f64 {
        bc.node[g.index_of(id).expect("known id")]
    }

    fn edge_score(g: &GraphModel, bc: &Betweenness, key: &str) -> f64 {
        let pos = g.edges.iter().position(|e| e.key == key).expect("known edge");
        bc.edge[pos]
    }

    fn run(g: &GraphModel) -> Betweenness {
        betweenness_centrality(g, &CancelToken::new()).expect("not cancelled")
    }

    #[test]
    fn empty_graph_returns_empty() {
        let g = model(&[], &[]);
        let bc = run(&g);
        assert!(bc.node.is_empty());
        assert!(bc.edge.is_empty());
    }

    #[test]
    fn single_node_zero_betweenness() {
        let g = model(&["A"], &[]);
        assert_eq!(run(&g).node, vec![0.0]);
    }

    #[test]
    fn two_nodes_zero_betweenness() {
        let g = model(&["A", "B"], &[("A", "B")]);
        assert_eq!(run(&g).node, vec![0.0, 0.0]);
    }

    #[test]
    fn linear_chain_middle_node_is_full_bridge() {
        // A - B - C: B lies on the only A..C path; 1 pair of 1 possible.
        let g = model(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let bc = run(&g);

        assert!((node_score(&g, &bc, "A") - 0.0).abs() < 1e-10);
        assert!((node_score(&g, &bc, "B") - 1.0).abs() < 1e-10);
        assert!((node_score(&g, &bc, "C") - 0.0).abs() < 1e-10);
    }

    #[test]
    fn chain_of_four_betweenness() {
        // A - B - C - D
        // B is on A..C and A..D → 2 of 3 pairs → 2/3.
        // C is on A..D and B..D → 2/3.
        let g = model(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);
        let bc = run(&g);

        assert!((node_score(&g, &bc, "A") - 0.0).abs() < 1e-10);
        assert!(
            (node_score(&g, &bc, "B") - 2.0 / 3.0).abs() < 1e-10,
            "B betweenness = 2/3, got {}",
            node_score(&g, &bc, "B")
        );
        assert!((node_score(&g, &bc, "C") - 2.0 / 3.0).abs() < 1e-10);
        assert!((node_score(&g, &bc, "D") - 0.0).abs() < 1e-10);
    }

    #[test]
    fn star_center_is_on_every_pair() {
        let g = model(
            &["C", "L1", "L2", "L3", "L4"],
            &[("C", "L1"), ("C", "L2"), ("C", "L3"), ("C", "L4")],
        );
        let bc = run(&g);

        assert!((node_score(&g, &bc, "C") - 1.0).abs() < 1e-10);
        for leaf in ["L1", "L2", "L3", "L4"] {
            assert!((node_score(&g, &bc, leaf) - 0.0).abs() < 1e-10);
        }
    }

    #[test]
    fn diamond_splits_credit_between_parallel_paths() {
        // A - B - D, A - C - D: B and C each carry half of A..D.
        // Pairs excluding B: 3 → B = 0.5 / 3.
        let g = model(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        let bc = run(&g);

        assert!((node_score(&g, &bc, "B") - 0.5 / 3.0).abs() < 1e-10);
        assert!((node_score(&g, &bc, "C") - 0.5 / 3.0).abs() < 1e-10);
        assert!((node_score(&g, &bc, "A") - 0.5 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn disconnected_pairs_have_no_betweenness() {
        let g = model(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D")]);
        assert!(run(&g).node.iter().all(|&s| s.abs() < 1e-12));
    }

    #[test]
    fn edge_betweenness_counts_ordered_pairs() {
        // A - B - C: edge A|B is on A..B and A..C in both directions → 4.
        let g = model(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let bc = run(&g);
        assert!((edge_score(&g, &bc, "A|B") - 4.0).abs() < 1e-10);
        assert!((edge_score(&g, &bc, "B|C") - 4.0).abs() < 1e-10);
    }

    #[test]
    fn bridge_edge_dominates() {
        let g = model(
            &["A", "B", "C", "D", "E", "F"],
            &[
                ("A", "B"),
                ("B", "C"),
                ("C", "A"),
                ("D", "E"),
                ("E", "F"),
                ("F", "D"),
                ("C", "D"),
            ],
        );
        let bc = run(&g);
        let bridge = edge_score(&g, &bc, "C|D");
        // 3 × 3 cross pairs, counted in both directions.
        assert!((bridge - 18.0).abs() < 1e-10);
        for e in &g.edges {
            if e.key != "C|D" {
                assert!(edge_score(&g, &bc, &e.key) < bridge);
            }
        }
    }

    #[test]
    fn cancelled_token_aborts() {
        let g = model(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        let token = CancelToken::new();
        token.cancel();
        assert_eq!(
            betweenness_centrality(&g, &token),
            Err(AnalyticsError::Cancelled)
        );
    }
}
