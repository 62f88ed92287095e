//! Case network graph module.
//!
//! # Overview
//!
//! This module turns a caller-supplied [`Snapshot`](casenet_core::Snapshot)
//! into an undirected, deduplicated graph. The graph feeds every analytics
//! pass: shortest paths, betweenness, community detection, and path
//! enumeration.
//!
//! ## Pipeline
//!
//! ```text
//! Snapshot { nodes, edges }
//!        ↓  build::GraphModel::from_snapshot()
//! GraphModel
//!   ├─ edges:     canonical edge list (sorted by `min|max` key)
//!   ├─ adjacency: symmetric (neighbor, edge) lists
//!   └─ graph:     petgraph UnGraph view
//!        ↓  stats::NetworkStats::from_model()
//! NetworkStats (density, component count, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use casenet_core::Snapshot;
//! use casenet_analytics::graph::{GraphModel, NetworkStats};
//!
//! let snapshot = Snapshot::from_json_str(raw)?;
//! let model = GraphModel::from_snapshot(&snapshot);
//! let stats = NetworkStats::from_model(&model);
//!
//! println!("nodes={} edges={} density={:.3} dropped={}",
//!     stats.node_count, stats.edge_count, stats.density,
//!     model.diagnostics.dropped_edges);
//! ```

pub mod adjacency;
pub mod build;
pub mod components;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use adjacency::Adjacency;
pub use build::{BuildDiagnostics, CanonicalEdge, GraphModel, canonical_key};
pub use components::connected_components;
pub use stats::NetworkStats;
