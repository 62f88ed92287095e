use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::AnalyticsError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub community: CommunityConfig,
    #[serde(default)]
    pub brokers: BrokerConfig,
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub centrality: CentralityWeights,
}

/// Budgets and post-processing for divisive community detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityConfig {
    /// Communities smaller than this are left ungrouped.
    #[serde(default = "default_min_community_size")]
    pub min_size: usize,
    /// Output cap on the number of communities.
    #[serde(default = "default_max_communities")]
    pub max_communities: usize,
    /// Upper bound on the target component count.
    #[serde(default = "default_max_target")]
    pub max_target: usize,
    /// The target is `ceil(n / nodes_per_community)`, capped by `max_target`.
    #[serde(default = "default_nodes_per_community")]
    pub nodes_per_community: usize,
    /// Edge removals are capped at `min(edge_count, max_iterations)`.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_community_size(),
            max_communities: default_max_communities(),
            max_target: default_max_target(),
            nodes_per_community: default_nodes_per_community(),
            max_iterations: default_max_iterations(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Normalized betweenness a node must strictly exceed.
    #[serde(default = "default_broker_threshold")]
    pub threshold: f64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            threshold: default_broker_threshold(),
        }
    }
}

/// Ceilings for simple-path enumeration and shortest-path reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default = "default_max_paths")]
    pub max_paths: usize,
    /// Hard cap on DFS edge expansions across one enumeration.
    #[serde(default = "default_max_expansions")]
    pub max_expansions: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_paths: default_max_paths(),
            max_expansions: default_max_expansions(),
        }
    }
}

/// Weights for the composite centrality score:
///
/// `S(v) = degree*DEG + closeness*CL + betweenness*BC`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentralityWeights {
    #[serde(default = "default_degree_weight")]
    pub degree: f64,
    #[serde(default = "default_closeness_weight")]
    pub closeness: f64,
    #[serde(default = "default_betweenness_weight")]
    pub betweenness: f64,
}

impl Default for CentralityWeights {
    fn default() -> Self {
        Self {
            degree: default_degree_weight(),
            closeness: default_closeness_weight(),
            betweenness: default_betweenness_weight(),
        }
    }
}

impl AnalyticsConfig {
    /// Reject values that would make an algorithm meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        fn bad(msg: &str) -> Result<(), AnalyticsError> {
            Err(AnalyticsError::InvalidConfig(msg.to_string()))
        }

        if self.community.min_size == 0 {
            return bad("community.min_size must be at least 1");
        }
        if self.community.max_communities == 0 {
            return bad("community.max_communities must be at least 1");
        }
        if self.community.max_target == 0 || self.community.nodes_per_community == 0 {
            return bad("community.max_target and community.nodes_per_community must be positive");
        }
        let threshold = self.brokers.threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return bad("brokers.threshold must lie in [0, 1]");
        }
        if self.paths.max_depth == 0 {
            return bad("paths.max_depth must be at least 1");
        }
        if self.paths.max_paths == 0 || self.paths.max_expansions == 0 {
            return bad("paths.max_paths and paths.max_expansions must be positive");
        }
        let w = self.centrality;
        if [w.degree, w.closeness, w.betweenness]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return bad("centrality weights must be finite and non-negative");
        }
        Ok(())
    }
}

/// Load the analytics config.
///
/// With an explicit `path` that file must exist. Without one, the user-level
/// `<config dir>/casenet/config.toml` is read when present; otherwise the
/// defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    let config = match path {
        Some(path) => read_config(path)?,
        None => match dirs::config_dir().map(|dir| dir.join("casenet/config.toml")) {
            Some(path) if path.exists() => read_config(&path)?,
            _ => AnalyticsConfig::default(),
        },
    };

    config.validate()?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<AnalyticsConfig> {
    debug!(path = %path.display(), "loading analytics config");

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalyticsConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_min_community_size() -> usize {
    2
}

const fn default_max_communities() -> usize {
    10
}

const fn default_max_target() -> usize {
    6
}

const fn default_nodes_per_community() -> usize {
    4
}

const fn default_max_iterations() -> usize {
    20
}

const fn default_broker_threshold() -> f64 {
    0.3
}

const fn default_max_depth() -> usize {
    5
}

const fn default_max_paths() -> usize {
    1000
}

const fn default_max_expansions() -> usize {
    200_000
}

const fn default_degree_weight() -> f64 {
    0.4
}

const fn default_closeness_weight() -> f64 {
    0.3
}

const fn default_betweenness_weight() -> f64 {
    0.3
}
