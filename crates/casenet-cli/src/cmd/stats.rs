//! `casenet stats`: structural summary of a case network.

use std::io::Write;

use casenet_analytics::{Analyzer, StatsReport};
use clap::Args;

use super::{SnapshotArg, load_snapshot, write_diagnostics};
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render};

/// Arguments for `casenet stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: SnapshotArg,
}

/// Execute `casenet stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode, analyzer: &Analyzer) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.input.snapshot)?;
    let report = analyzer.stats(&snapshot);
    render(output, &report, render_stats_human)
}

fn render_stats_human(report: &StatsReport, pretty: bool, w: &mut dyn Write) -> std::io::Result<()> {
    let s = &report.stats;
    let rows = [
        ("nodes", s.node_count.to_string()),
        ("edges", s.edge_count.to_string()),
        ("density", fmt_score(s.density)),
        ("avg degree", format!("{:.2}", s.average_degree)),
        ("max degree", s.max_degree.to_string()),
        ("components", s.component_count.to_string()),
        ("isolated", s.isolated_node_count.to_string()),
        ("hash", report.diagnostics.snapshot_hash.clone()),
    ];

    if pretty {
        pretty_section(w, "Network statistics")?;
        for (key, value) in &rows {
            pretty_kv(w, key, value)?;
        }
    } else {
        for (key, value) in &rows {
            writeln!(w, "{}\t{value}", key.replace(' ', "_"))?;
        }
    }

    write_diagnostics(&report.diagnostics, pretty, w)
}
