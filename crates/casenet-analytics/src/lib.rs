#![forbid(unsafe_code)]
//! casenet-analytics library.
//!
//! Graph analytics over a case network [`Snapshot`](casenet_core::Snapshot):
//! shortest paths, betweenness, divisive community detection, brokers,
//! bounded simple-path enumeration, composite centrality and flow
//! classification. [`Analyzer`] is the usual entry point.
//!
//! # Conventions
//!
//! - **Errors**: Use `Result<_, AnalyticsError>`; budgets exhausted are
//!   reported through `truncated` / `stop_reason`, never as errors.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **Determinism**: Node indices follow ascending id order; every tie breaks
//!   on id or canonical edge key.

pub mod analyze;
pub mod brokers;
pub mod cancel;
pub mod community;
pub mod flows;
pub mod graph;
pub mod metrics;
pub mod paths;

pub use analyze::{
    Analyzer, BetweennessReport, BrokerReport, CentralityReport, CommunityRecord,
    CommunityReport, ComponentReport, FlowReport, PathRecord, PathReport, ShortestPathReport,
    SnapshotDiagnostics, StatsReport,
};
pub use cancel::CancelToken;
pub use community::StopReason;
pub use flows::FlowKind;
pub use graph::GraphModel;
