//! Bounded enumeration of simple paths between two nodes.
//!
//! # Algorithm
//!
//! Iterative depth-first search with an explicit frame stack. Each frame is a
//! node on the current path plus a cursor into its (sorted) neighbor list.
//! An on-path bitset is set on descent and cleared on backtrack, so no node
//! repeats within one path.
//!
//! # Budgets
//!
//! - `max_depth`: paths longer than this many edges are never explored.
//! - `max_paths`: finding one path past this count stops the search.
//! - `max_expansions`: total edge expansions across the whole search.
//!
//! Hitting either of the last two returns the paths found so far with
//! `truncated = true`. The cancel token is polled every
//! [`CANCEL_POLL_INTERVAL`] expansions.

use casenet_core::AnalyticsError;
use casenet_core::config::PathConfig;
use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::cancel::CancelToken;
use crate::graph::adjacency::Adjacency;

/// Expansions between two cancellation checks.
pub const CANCEL_POLL_INTERVAL: usize = 1024;

/// Result of one enumeration. Paths hold node indices, endpoints included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathEnumeration {
    /// Sorted by length, then lexicographically by node index.
    pub paths: Vec<Vec<usize>>,
    pub truncated: bool,
    pub expansions: usize,
}

struct Frame {
    node: usize,
    cursor: usize,
}

/// Enumerate simple paths from `from` to `to` of at most `limits.max_depth`
/// edges.
///
/// `from == to` yields no paths. Unreachable pairs yield no paths and are not
/// truncated.
///
/// # Errors
///
/// Returns [`AnalyticsError::Cancelled`] if `cancel` fires mid-search.
#[instrument(skip(adj, limits, cancel))]
pub fn enumerate_simple_paths(
    adj: &Adjacency,
    from: usize,
    to: usize,
    limits: &PathConfig,
    cancel: &CancelToken,
) -> Result<PathEnumeration, AnalyticsError> {
    cancel.check()?;

    let mut out = PathEnumeration::default();
    if from == to || limits.max_depth == 0 {
        return Ok(out);
    }

    let mut on_path = FixedBitSet::with_capacity(adj.node_count());
    let mut path: Vec<usize> = vec![from];
    let mut stack: Vec<Frame> = vec![Frame {
        node: from,
        cursor: 0,
    }];
    on_path.insert(from);

    'search: while let Some(frame) = stack.last_mut() {
        let neighbors = adj.neighbors(frame.node);

        let Some(&(next, _)) = neighbors.get(frame.cursor) else {
            // Exhausted: backtrack.
            on_path.set(frame.node, false);
            stack.pop();
            path.pop();
            continue;
        };
        frame.cursor += 1;

        out.expansions += 1;
        if out.expansions > limits.max_expansions {
            out.expansions -= 1;
            out.truncated = true;
            break;
        }
        if out.expansions % CANCEL_POLL_INTERVAL == 0 {
            cancel.check()?;
        }

        if on_path.contains(next) {
            continue;
        }

        // Edges used by `path` plus the one to `next`.
        let length = path.len();

        if next == to {
            if out.paths.len() == limits.max_paths {
                out.truncated = true;
                break 'search;
            }
            let mut found = path.clone();
            found.push(to);
            out.paths.push(found);
            continue;
        }

        if length < limits.max_depth {
            on_path.insert(next);
            path.push(next);
            stack.push(Frame {
                node: next,
                cursor: 0,
            });
        }
    }

    out.paths
        .sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    debug!(
        found = out.paths.len(),
        expansions = out.expansions,
        truncated = out.truncated,
        "path enumeration finished"
    );

    Ok(out)
}
