//! Path and centrality metrics for the case network.
//!
//! # Overview
//!
//! - **Shortest paths** (`shortest_path`): single-source BFS with distances,
//!   shortest-path counts and predecessor sets. Every other metric here is
//!   built on it.
//! - **Betweenness centrality** (`betweenness`): which entities and which
//!   relationships sit on the most shortest paths?
//! - **Composite centrality** (`centrality`): degree, closeness and
//!   betweenness blended into one ranking score.
//!
//! # Usage
//!
//! All metrics take a [`GraphModel`](crate::graph::GraphModel) (or its
//! [`Adjacency`](crate::graph::Adjacency)) and return vectors indexed by
//! node index; map back to ids with `GraphModel::id`.
//!
//! ```rust,ignore
//! use casenet_analytics::metrics::betweenness::betweenness_centrality;
//! use casenet_analytics::metrics::shortest_path::ShortestPaths;
//!
//! let bc = betweenness_centrality(&model, &cancel)?;
//! let sp = ShortestPaths::from_source(&model.adjacency, 0);
//! ```

pub mod betweenness;
pub mod centrality;
pub mod shortest_path;
