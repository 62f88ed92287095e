#![forbid(unsafe_code)]
//! casenet-core library.
//!
//! Shared vocabulary for the casenet workspace: the case network
//! [`model::Snapshot`], the [`error::AnalyticsError`] taxonomy, and the
//! TOML-backed [`config::AnalyticsConfig`].
//!
//! # Conventions
//!
//! - **Errors**: Library operations return `Result<_, AnalyticsError>`;
//!   file-level helpers (config loading) use `anyhow::Result` with context.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;

pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, ErrorCode};
pub use model::{Edge, Node, Snapshot};
