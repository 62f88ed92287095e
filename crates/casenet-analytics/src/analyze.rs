//! Stateless analytics entry point.
//!
//! [`Analyzer`] holds configuration and a cancel token, nothing else. Every
//! method takes a [`Snapshot`], builds a fresh [`GraphModel`], runs one
//! analysis and returns a serializable report that names node ids (never
//! internal indices) and embeds [`SnapshotDiagnostics`].

use std::cmp::Ordering;

use casenet_core::config::{AnalyticsConfig, CentralityWeights};
use casenet_core::{AnalyticsError, Snapshot};
use serde::Serialize;
use tracing::{info, instrument};

use crate::brokers::identify_brokers;
use crate::cancel::CancelToken;
use crate::community::{GroupSummary, StopReason, detect_communities};
use crate::flows::{FlowKind, classify_flows};
use crate::graph::build::GraphModel;
use crate::graph::components::{connected_components, sort_by_size_then_member};
use crate::graph::stats::NetworkStats;
use crate::metrics::betweenness::betweenness_centrality;
use crate::metrics::centrality::composite_centrality;
use crate::metrics::shortest_path::ShortestPaths;
use crate::paths::enumerate_simple_paths;

/// Scores closer than this share a rank.
const RANK_EPSILON: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// How the snapshot was interpreted. Carried by every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotDiagnostics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges referencing ids absent from the node list.
    pub dropped_edges: usize,
    pub duplicate_edges: usize,
    pub self_loops: usize,
    /// Content hash of the canonical graph, `blake3:<hex>`.
    pub snapshot_hash: String,
}

impl SnapshotDiagnostics {
    fn of(model: &GraphModel) -> Self {
        Self {
            node_count: model.node_count(),
            edge_count: model.edge_count(),
            dropped_edges: model.diagnostics.dropped_edges,
            duplicate_edges: model.diagnostics.duplicate_edges,
            self_loops: model.diagnostics.self_loops,
            snapshot_hash: model.content_hash.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeScore {
    pub node_id: String,
    pub label: String,
    pub score: f64,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeScore {
    /// Canonical `min|max` key.
    pub key: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BetweennessReport {
    pub diagnostics: SnapshotDiagnostics,
    /// Normalized node betweenness, highest first.
    pub nodes: Vec<NodeScore>,
    /// Raw edge betweenness (ordered-pair sums), highest first.
    pub edges: Vec<EdgeScore>,
}

/// A node group: a detected community or a connected component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityRecord {
    /// 1-based position in the ordered output.
    pub community_id: usize,
    pub members: Vec<String>,
    pub size: usize,
    pub density: f64,
    pub central_node: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityReport {
    pub diagnostics: SnapshotDiagnostics,
    pub communities: Vec<CommunityRecord>,
    /// Nodes in no reported community.
    pub ungrouped: Vec<String>,
    pub stop_reason: StopReason,
    /// `A`, `B` or `C`.
    pub stop_condition: &'static str,
    /// `true` when the iteration cap ended the run.
    pub approximate: bool,
    pub iterations: usize,
    /// Canonical keys of removed edges, in removal order.
    pub removed_edges: Vec<String>,
    pub target: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrokerEntry {
    pub node_id: String,
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrokerReport {
    pub diagnostics: SnapshotDiagnostics,
    pub threshold: f64,
    pub brokers: Vec<BrokerEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRecord {
    pub nodes: Vec<String>,
    /// Edges traversed.
    pub length: usize,
}

impl PathRecord {
    fn from_indices(model: &GraphModel, path: &[usize]) -> Self {
        Self {
            nodes: model.ids(path),
            length: path.len().saturating_sub(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathReport {
    pub diagnostics: SnapshotDiagnostics,
    pub from: String,
    pub to: String,
    pub max_depth: usize,
    pub paths: Vec<PathRecord>,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPathReport {
    pub diagnostics: SnapshotDiagnostics,
    pub from: String,
    pub to: String,
    /// Hop distance; `None` when `to` is unreachable.
    pub distance: Option<usize>,
    /// Number of distinct shortest paths.
    pub path_count: f64,
    pub paths: Vec<PathRecord>,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentReport {
    pub diagnostics: SnapshotDiagnostics,
    pub components: Vec<CommunityRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub diagnostics: SnapshotDiagnostics,
    pub stats: NetworkStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityEntry {
    pub node_id: String,
    pub label: String,
    pub degree: usize,
    pub degree_normalized: f64,
    pub closeness: f64,
    pub betweenness: f64,
    pub score: f64,
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityReport {
    pub diagnostics: SnapshotDiagnostics,
    pub weights: CentralityWeights,
    pub nodes: Vec<CentralityEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowRelation {
    pub from: String,
    pub to: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowClass {
    pub kind: FlowKind,
    pub count: usize,
    pub relations: Vec<FlowRelation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowReport {
    pub diagnostics: SnapshotDiagnostics,
    pub flows: Vec<FlowClass>,
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

/// Runs analytics over caller-supplied snapshots.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyticsConfig,
    cancel: CancelToken,
}

impl Analyzer {
    /// Create an analyzer with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: AnalyticsConfig) -> Result<Self, AnalyticsError> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: CancelToken::new(),
        })
    }

    /// Replace the cancel token.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Normalized node betweenness with competition ranks, plus raw edge
    /// betweenness.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Cancelled`] if the token fires.
    #[instrument(skip_all)]
    pub fn betweenness(&self, snapshot: &Snapshot) -> Result<BetweennessReport, AnalyticsError> {
        let model = GraphModel::from_snapshot(snapshot);
        let bc = betweenness_centrality(&model, &self.cancel)?;

        let order = descending_order(&bc.node);
        let ranks = competition_ranks(order.iter().map(|&v| bc.node[v]));
        let nodes = order
            .iter()
            .zip(ranks)
            .map(|(&v, rank)| NodeScore {
                node_id: model.id(v).to_string(),
                label: snapshot.label_of(model.id(v)).to_string(),
                score: bc.node[v],
                rank,
            })
            .collect();

        let mut edges: Vec<EdgeScore> = model
            .edges
            .iter()
            .zip(&bc.edge)
            .map(|(edge, &score)| EdgeScore {
                key: edge.key.clone(),
                score,
            })
            .collect();
        edges.sort_by(|a, b| cmp_desc(a.score, b.score).then_with(|| a.key.cmp(&b.key)));

        Ok(BetweennessReport {
            diagnostics: SnapshotDiagnostics::of(&model),
            nodes,
            edges,
        })
    }

    /// Divisive community detection.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Cancelled`] if the token fires.
    #[instrument(skip_all)]
    pub fn communities(&self, snapshot: &Snapshot) -> Result<CommunityReport, AnalyticsError> {
        let model = GraphModel::from_snapshot(snapshot);
        let partition = detect_communities(&model, &self.config.community, &self.cancel)?;

        let mut grouped = vec![false; model.node_count()];
        for &m in partition.communities.iter().flatten() {
            grouped[m] = true;
        }
        let ungrouped = (0..model.node_count())
            .filter(|&v| !grouped[v])
            .map(|v| model.id(v).to_string())
            .collect();

        info!(
            communities = partition.communities.len(),
            stop = partition.stop_reason.condition(),
            iterations = partition.iterations,
            "communities detected"
        );

        Ok(CommunityReport {
            diagnostics: SnapshotDiagnostics::of(&model),
            communities: group_records(&model, &partition.communities),
            ungrouped,
            stop_reason: partition.stop_reason,
            stop_condition: partition.stop_reason.condition(),
            approximate: partition.stop_reason.is_approximation(),
            iterations: partition.iterations,
            removed_edges: partition
                .removed_edges
                .iter()
                .map(|&e| model.edges[e].key.clone())
                .collect(),
            target: partition.target,
        })
    }

    /// Nodes whose normalized betweenness exceeds the broker threshold.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Cancelled`] if the token fires.
    #[instrument(skip_all)]
    pub fn brokers(&self, snapshot: &Snapshot) -> Result<BrokerReport, AnalyticsError> {
        let model = GraphModel::from_snapshot(snapshot);
        let bc = betweenness_centrality(&model, &self.cancel)?;
        let threshold = self.config.brokers.threshold;

        let brokers = identify_brokers(&bc.node, threshold)
            .into_iter()
            .map(|b| BrokerEntry {
                node_id: model.id(b.node).to_string(),
                label: snapshot.label_of(model.id(b.node)).to_string(),
                score: b.score,
            })
            .collect();

        Ok(BrokerReport {
            diagnostics: SnapshotDiagnostics::of(&model),
            threshold,
            brokers,
        })
    }

    /// All simple paths between two nodes within the configured depth.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownNode`] if an endpoint is not in the
    /// snapshot, or [`AnalyticsError::Cancelled`].
    #[instrument(skip(self, snapshot))]
    pub fn paths(
        &self,
        snapshot: &Snapshot,
        from: &str,
        to: &str,
    ) -> Result<PathReport, AnalyticsError> {
        let model = GraphModel::from_snapshot(snapshot);
        let (a, b) = endpoints(&model, from, to)?;
        let found = enumerate_simple_paths(&model.adjacency, a, b, &self.config.paths, &self.cancel)?;

        Ok(PathReport {
            diagnostics: SnapshotDiagnostics::of(&model),
            from: from.to_string(),
            to: to.to_string(),
            max_depth: self.config.paths.max_depth,
            paths: found
                .paths
                .iter()
                .map(|p| PathRecord::from_indices(&model, p))
                .collect(),
            truncated: found.truncated,
        })
    }

    /// Distance, shortest-path count and reconstructed shortest paths.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownNode`] if an endpoint is not in the
    /// snapshot, or [`AnalyticsError::Cancelled`].
    #[instrument(skip(self, snapshot))]
    pub fn shortest_paths(
        &self,
        snapshot: &Snapshot,
        from: &str,
        to: &str,
    ) -> Result<ShortestPathReport, AnalyticsError> {
        let model = GraphModel::from_snapshot(snapshot);
        let (a, b) = endpoints(&model, from, to)?;
        self.cancel.check()?;

        let sp = ShortestPaths::from_source(&model.adjacency, a);
        let (paths, truncated) = sp.paths_to(b, self.config.paths.max_paths);

        Ok(ShortestPathReport {
            diagnostics: SnapshotDiagnostics::of(&model),
            from: from.to_string(),
            to: to.to_string(),
            distance: sp.distance(b),
            path_count: sp.sigma(b),
            paths: paths
                .iter()
                .map(|p| PathRecord::from_indices(&model, p))
                .collect(),
            truncated,
        })
    }

    /// Connected components of the full graph, summarized like communities.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Cancelled`] if the token fires.
    #[instrument(skip_all)]
    pub fn components(&self, snapshot: &Snapshot) -> Result<ComponentReport, AnalyticsError> {
        let model = GraphModel::from_snapshot(snapshot);
        self.cancel.check()?;

        let mut groups = connected_components(&model.adjacency);
        sort_by_size_then_member(&mut groups);

        Ok(ComponentReport {
            diagnostics: SnapshotDiagnostics::of(&model),
            components: group_records(&model, &groups),
        })
    }

    /// Structural statistics. Linear time; never cancelled.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn stats(&self, snapshot: &Snapshot) -> StatsReport {
        let model = GraphModel::from_snapshot(snapshot);
        StatsReport {
            diagnostics: SnapshotDiagnostics::of(&model),
            stats: NetworkStats::from_model(&model),
        }
    }

    /// Composite centrality ranking.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Cancelled`] if the token fires.
    #[instrument(skip_all)]
    pub fn centrality(&self, snapshot: &Snapshot) -> Result<CentralityReport, AnalyticsError> {
        let model = GraphModel::from_snapshot(snapshot);
        let bc = betweenness_centrality(&model, &self.cancel)?;
        let weights = self.config.centrality;
        let scores = composite_centrality(&model, &bc.node, &weights, &self.cancel)?;

        let order = descending_order(&scores.composite);
        let ranks = competition_ranks(order.iter().map(|&v| scores.composite[v]));
        let nodes = order
            .iter()
            .zip(ranks)
            .map(|(&v, rank)| CentralityEntry {
                node_id: model.id(v).to_string(),
                label: snapshot.label_of(model.id(v)).to_string(),
                degree: scores.degree[v],
                degree_normalized: scores.degree_normalized[v],
                closeness: scores.closeness[v],
                betweenness: scores.betweenness[v],
                score: scores.composite[v],
                rank,
            })
            .collect();

        Ok(CentralityReport {
            diagnostics: SnapshotDiagnostics::of(&model),
            weights,
            nodes,
        })
    }

    /// Relationships grouped by flow kind.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn flows(&self, snapshot: &Snapshot) -> FlowReport {
        let model = GraphModel::from_snapshot(snapshot);
        let flows = classify_flows(snapshot, &model)
            .groups
            .into_iter()
            .map(|(kind, edges)| FlowClass {
                kind,
                count: edges.len(),
                relations: edges
                    .into_iter()
                    .map(|e| FlowRelation {
                        from: e.from,
                        to: e.to,
                        label: e.label,
                    })
                    .collect(),
            })
            .collect();

        FlowReport {
            diagnostics: SnapshotDiagnostics::of(&model),
            flows,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn endpoints(model: &GraphModel, from: &str, to: &str) -> Result<(usize, usize), AnalyticsError> {
    let a = model
        .index_of(from)
        .ok_or_else(|| AnalyticsError::UnknownNode(from.to_string()))?;
    let b = model
        .index_of(to)
        .ok_or_else(|| AnalyticsError::UnknownNode(to.to_string()))?;
    Ok((a, b))
}

fn group_records(model: &GraphModel, groups: &[Vec<usize>]) -> Vec<CommunityRecord> {
    groups
        .iter()
        .enumerate()
        .map(|(i, members)| {
            let summary = GroupSummary::of(model, members);
            CommunityRecord {
                community_id: i + 1,
                members: model.ids(members),
                size: members.len(),
                density: summary.density,
                central_node: summary.central.map(|c| model.id(c).to_string()),
            }
        })
        .collect()
}

fn cmp_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Node indices ordered by score descending, ties by index (id order).
fn descending_order(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| cmp_desc(scores[a], scores[b]).then(a.cmp(&b)));
    order
}

/// Standard competition ranks (`1, 2, 2, 4`) for scores already sorted
/// descending.
fn competition_ranks(sorted: impl IntoIterator<Item = f64>) -> Vec<usize> {
    let mut ranks = Vec::new();
    let mut previous: Option<f64> = None;
    let mut current = 0;

    for (position, score) in sorted.into_iter().enumerate() {
        if previous.is_none_or(|p| (p - score).abs() > RANK_EPSILON) {
            current = position + 1;
        }
        ranks.push(current);
        previous = Some(score);
    }
    ranks
}
