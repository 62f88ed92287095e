//! Single-source shortest paths by breadth-first search.
//!
//! # Overview
//!
//! [`ShortestPaths::from_source`] runs one BFS over an [`Adjacency`] and
//! records, for every node `v`:
//!
//! - `distance(v)`: hop count from the source, `None` when unreachable;
//! - `sigma(v)`: the number of distinct shortest source→`v` paths (0 when
//!   unreachable, 1 for the source itself);
//! - `predecessors(v)`: every immediate predecessor of `v` on *some*
//!   shortest path, with the edge used.
//!
//! It also keeps the BFS visitation order, which is non-decreasing in
//! distance. Brandes' dependency accumulation walks that order backwards
//! (see [`crate::metrics::betweenness`]); path reconstruction backtracks
//! through the predecessor lists.
//!
//! Path counts are stored as `f64`: they grow exponentially on lattice-like
//! graphs and only ever feed ratios.
//!
//! Complexity: O(V + E) per source.

use crate::graph::adjacency::Adjacency;

/// BFS shortest-path data from one source node.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: usize,
    dist: Vec<Option<usize>>,
    sigma: Vec<f64>,
    pred: Vec<Vec<(usize, usize)>>,
    order: Vec<usize>,
}

impl ShortestPaths {
    /// Run BFS from `source`.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not a node of `adj`.
    #[must_use]
    pub fn from_source(adj: &Adjacency, source: usize) -> Self {
        let n = adj.node_count();
        assert!(source < n, "source {source} out of range for {n} nodes");

        let mut dist: Vec<Option<usize>> = vec![None; n];
        let mut sigma: Vec<f64> = vec![0.0; n];
        let mut pred: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
        let mut order: Vec<usize> = Vec::with_capacity(n);

        dist[source] = Some(0);
        sigma[source] = 1.0;

        // `order` doubles as the BFS queue: nodes are appended when first
        // discovered and read back with a moving head.
        order.push(source);
        let mut head = 0;

        while head < order.len() {
            let v = order[head];
            head += 1;
            let next = dist[v].map_or(0, |d| d + 1);

            for &(w, edge) in adj.neighbors(v) {
                if dist[w].is_none() {
                    dist[w] = Some(next);
                    order.push(w);
                }

                if dist[w] == Some(next) {
                    sigma[w] += sigma[v];
                    pred[w].push((v, edge));
                }
            }
        }

        Self {
            source,
            dist,
            sigma,
            pred,
            order,
        }
    }

    /// Hop distance from the source; `None` when unreachable.
    #[must_use]
    pub fn distance(&self, v: usize) -> Option<usize> {
        self.dist[v]
    }

    #[must_use]
    pub fn is_reachable(&self, v: usize) -> bool {
        self.dist[v].is_some()
    }

    /// Number of distinct shortest paths from the source to `v`.
    #[must_use]
    pub fn sigma(&self, v: usize) -> f64 {
        self.sigma[v]
    }

    /// Immediate predecessors of `v` on some shortest path.
    pub fn predecessors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.pred[v].iter().map(|&(u, _)| u)
    }

    /// `(predecessor, edge)` pairs of `v`.
    #[must_use]
    pub fn predecessor_edges(&self, v: usize) -> &[(usize, usize)] {
        &self.pred[v]
    }

    /// Reachable nodes in BFS order (non-decreasing distance), source first.
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Reconstruct up to `limit` shortest paths from the source to `target`
    /// by backtracking through the predecessor sets.
    ///
    /// Paths are returned source-first and sorted lexicographically by node
    /// index. The flag is `true` when more shortest paths exist than were
    /// returned. An unreachable target yields no paths.
    #[must_use]
    pub fn paths_to(&self, target: usize, limit: usize) -> (Vec<Vec<usize>>, bool) {
        if !self.is_reachable(target) || limit == 0 {
            return (Vec::new(), self.is_reachable(target));
        }

        let mut paths: Vec<Vec<usize>> = Vec::new();
        // Each frame holds a partial path from `target` back toward the source.
        let mut stack: Vec<Vec<usize>> = vec![vec![target]];
        let mut truncated = false;

        while let Some(partial) = stack.pop() {
            let Some(&head) = partial.last() else {
                continue;
            };

            if head == self.source {
                if paths.len() == limit {
                    truncated = true;
                    break;
                }
                let mut path = partial;
                path.reverse();
                paths.push(path);
                continue;
            }

            // Push in reverse so the smallest predecessor is expanded first.
            let mut preds: Vec<usize> = self.predecessors(head).collect();
            preds.sort_unstable();
            for &u in preds.iter().rev() {
                let mut next = partial.clone();
                next.push(u);
                stack.push(next);
            }
        }

        paths.sort();
        (paths, truncated)
    }
}
