//! `casenet communities`: divisive community detection.

use std::io::Write;

use casenet_analytics::{Analyzer, CommunityReport};
use clap::Args;

use super::{SnapshotArg, load_snapshot, write_diagnostics, write_groups};
use crate::output::{OutputMode, pretty_kv, pretty_section, render};

/// Arguments for `casenet communities`.
#[derive(Args, Debug)]
pub struct CommunitiesArgs {
    #[command(flatten)]
    pub input: SnapshotArg,

    /// Smallest community worth reporting.
    #[arg(long, value_name = "N")]
    pub min_size: Option<usize>,

    /// Maximum number of communities to report.
    #[arg(long = "max", value_name = "N")]
    pub max_communities: Option<usize>,
}

/// Execute `casenet communities`.
pub fn run_communities(
    args: &CommunitiesArgs,
    output: OutputMode,
    analyzer: &Analyzer,
) -> anyhow::Result<()> {
    let mut config = analyzer.config().clone();
    if let Some(min_size) = args.min_size {
        config.community.min_size = min_size;
    }
    if let Some(max) = args.max_communities {
        config.community.max_communities = max;
    }
    let analyzer = Analyzer::new(config)?.with_cancel(analyzer.cancel_token().clone());

    let snapshot = load_snapshot(&args.input.snapshot)?;
    let report = analyzer.communities(&snapshot)?;
    render(output, &report, render_communities_human)
}

fn render_communities_human(
    report: &CommunityReport,
    pretty: bool,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    let stop = format!(
        "{} ({})",
        report.stop_condition,
        report.stop_reason.as_str()
    );

    if pretty {
        pretty_section(w, &format!("Communities ({})", report.communities.len()))?;
        pretty_kv(w, "stopped", &stop)?;
        pretty_kv(w, "iterations", report.iterations.to_string())?;
        if !report.removed_edges.is_empty() {
            pretty_kv(w, "cut", report.removed_edges.join(", "))?;
        }
        if report.approximate {
            writeln!(w, "note: iteration budget reached; partition is approximate")?;
        }
    } else {
        writeln!(w, "# stop {stop} iterations {}", report.iterations)?;
    }

    write_groups("community", &report.communities, pretty, w)?;

    if pretty && !report.ungrouped.is_empty() {
        writeln!(w)?;
        pretty_kv(w, "ungrouped", report.ungrouped.join(", "))?;
    }

    write_diagnostics(&report.diagnostics, pretty, w)
}
