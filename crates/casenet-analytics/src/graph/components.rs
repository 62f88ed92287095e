//! Connected components over an [`Adjacency`].
//!
//! Uses petgraph's [`UnionFind`] rather than a traversal: the community
//! detector re-measures components after every edge removal, and union-find
//! over the surviving edge list is the cheapest way to do that.

use petgraph::unionfind::UnionFind;

use crate::graph::adjacency::Adjacency;

/// Partition the nodes of `adj` into connected components.
///
/// Each component is sorted ascending; components are ordered by their
/// smallest member. Isolated nodes form singleton components.
#[must_use]
pub fn connected_components(adj: &Adjacency) -> Vec<Vec<usize>> {
    let n = adj.node_count();
    let mut uf: UnionFind<usize> = UnionFind::new(n);

    for v in 0..n {
        for &(w, _) in adj.neighbors(v) {
            if v < w {
                uf.union(v, w);
            }
        }
    }

    // Scanning in index order makes the first-seen member of each component
    // its smallest one, so components come out ordered by smallest member.
    let mut slot_of_root: Vec<Option<usize>> = vec![None; n];
    let mut components: Vec<Vec<usize>> = Vec::new();

    for v in 0..n {
        let root = uf.find_mut(v);
        let slot = *slot_of_root[root].get_or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(v);
    }

    components
}

/// Order groups by size descending, then by smallest member ascending.
///
/// Members are assumed sorted, so `group[0]` is the smallest member; index
/// order equals id order in a [`GraphModel`](crate::graph::GraphModel).
pub fn sort_by_size_then_member(groups: &mut [Vec<usize>]) {
    groups.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));
}
