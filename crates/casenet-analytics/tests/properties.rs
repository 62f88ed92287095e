//! Property tests over randomly generated case networks.

use std::collections::HashSet;

use casenet_analytics::community::detect_communities;
use casenet_analytics::graph::GraphModel;
use casenet_analytics::metrics::betweenness::betweenness_centrality;
use casenet_analytics::metrics::shortest_path::ShortestPaths;
use casenet_analytics::paths::enumerate_simple_paths;
use casenet_analytics::{Analyzer, CancelToken};
use casenet_core::config::{CommunityConfig, PathConfig};
use casenet_core::Snapshot;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// A snapshot with `n` nodes `n00..` and random (possibly repeated, possibly
/// self-looping) edges.
fn arb_snapshot(max_nodes: usize, max_edges: usize) -> impl Strategy<Value = Snapshot> {
    (1..=max_nodes)
        .prop_flat_map(move |n| (Just(n), prop::collection::vec((0..n, 0..n), 0..=max_edges)))
        .prop_map(|(n, pairs)| {
            let ids: Vec<String> = (0..n).map(|i| format!("n{i:02}")).collect();
            let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            let pair_refs: Vec<(&str, &str)> = pairs
                .iter()
                .map(|&(a, b)| (id_refs[a], id_refs[b]))
                .collect();
            Snapshot::from_pairs(&id_refs, &pair_refs).expect("generated ids are unique")
        })
}

// ---------------------------------------------------------------------------
// Brute force reference
// ---------------------------------------------------------------------------

/// Count shortest paths from `source` to every node by exhaustive simple-path
/// search. Returns `(min length, count)` per node; `None` when unreachable.
fn brute_force_shortest(model: &GraphModel, source: usize) -> Vec<Option<(usize, usize)>> {
    fn walk(
        model: &GraphModel,
        node: usize,
        depth: usize,
        on_path: &mut Vec<bool>,
        best: &mut Vec<Option<(usize, usize)>>,
    ) {
        best[node] = match best[node] {
            Some((d, c)) if d == depth => Some((d, c + 1)),
            Some((d, c)) if d < depth => Some((d, c)),
            _ => Some((depth, 1)),
        };
        for &(next, _) in model.adjacency.neighbors(node) {
            if !on_path[next] {
                on_path[next] = true;
                walk(model, next, depth + 1, on_path, best);
                on_path[next] = false;
            }
        }
    }

    let n = model.node_count();
    let mut best = vec![None; n];
    let mut on_path = vec![false; n];
    on_path[source] = true;
    walk(model, source, 0, &mut on_path, &mut best);
    best
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn communities_are_deterministic(snap in arb_snapshot(14, 30)) {
        let analyzer = Analyzer::default();
        let first = analyzer.communities(&snap).expect("first run");
        let second = analyzer.communities(&snap).expect("second run");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn communities_are_disjoint_and_sized(snap in arb_snapshot(14, 30)) {
        let config = CommunityConfig::default();
        let model = GraphModel::from_snapshot(&snap);
        let p = detect_communities(&model, &config, &CancelToken::new()).expect("detect");

        let mut seen = HashSet::new();
        for community in &p.communities {
            prop_assert!(community.len() >= config.min_size);
            for &m in community {
                prop_assert!(seen.insert(m), "node {} in two communities", m);
            }
        }
        prop_assert!(p.communities.len() <= config.max_communities);
        prop_assert!(
            p.communities.windows(2).all(|w| w[0].len() >= w[1].len()),
            "communities not sorted by size"
        );
    }

    #[test]
    fn removal_loop_terminates_within_cap(snap in arb_snapshot(14, 40)) {
        let config = CommunityConfig::default();
        let model = GraphModel::from_snapshot(&snap);
        let p = detect_communities(&model, &config, &CancelToken::new()).expect("detect");

        prop_assert!(p.iterations <= model.edge_count().min(config.max_iterations));
        // Each iteration removes a distinct edge, so the remaining count
        // strictly decreases.
        let distinct: HashSet<usize> = p.removed_edges.iter().copied().collect();
        prop_assert_eq!(distinct.len(), p.removed_edges.len());
        prop_assert_eq!(p.iterations, p.removed_edges.len());
    }

    #[test]
    fn node_betweenness_in_unit_interval(snap in arb_snapshot(16, 40)) {
        let model = GraphModel::from_snapshot(&snap);
        let bc = betweenness_centrality(&model, &CancelToken::new()).expect("bc");
        for &score in &bc.node {
            prop_assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
            if model.node_count() <= 2 {
                prop_assert!(score == 0.0);
            }
        }
    }

    #[test]
    fn sigma_matches_brute_force(snap in arb_snapshot(7, 12)) {
        let model = GraphModel::from_snapshot(&snap);
        for source in 0..model.node_count() {
            let sp = ShortestPaths::from_source(&model.adjacency, source);
            let expected = brute_force_shortest(&model, source);

            for (v, reference) in expected.iter().enumerate() {
                match reference {
                    Some((dist, count)) => {
                        prop_assert_eq!(sp.distance(v), Some(*dist));
                        #[allow(clippy::cast_precision_loss)]
                        let count = *count as f64;
                        prop_assert!((sp.sigma(v) - count).abs() < 1e-9);
                    }
                    None => {
                        prop_assert_eq!(sp.distance(v), None);
                        prop_assert!(sp.sigma(v) == 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn enumerated_paths_are_simple_and_bounded(
        snap in arb_snapshot(8, 16),
        max_depth in 1_usize..6,
    ) {
        let model = GraphModel::from_snapshot(&snap);
        let n = model.node_count();
        let limits = PathConfig { max_depth, ..PathConfig::default() };
        let (from, to) = (0, n - 1);

        let out = enumerate_simple_paths(&model.adjacency, from, to, &limits, &CancelToken::new())
            .expect("enumerate");

        for path in &out.paths {
            prop_assert_eq!(path.first().copied(), Some(from));
            prop_assert_eq!(path.last().copied(), Some(to));
            prop_assert!(path.len() - 1 <= max_depth);
            let unique: HashSet<usize> = path.iter().copied().collect();
            prop_assert_eq!(unique.len(), path.len());
        }
    }
}
