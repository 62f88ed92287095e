//! `casenet betweenness`: node and edge betweenness centrality.

use std::io::Write;

use casenet_analytics::{Analyzer, BetweennessReport};
use clap::Args;

use super::{SnapshotArg, load_snapshot, write_diagnostics};
use crate::output::{OutputMode, fmt_score, pretty_section, render_mode};

/// Edges listed under the node table in pretty mode.
const PRETTY_EDGE_LIMIT: usize = 5;

/// Arguments for `casenet betweenness`.
#[derive(Args, Debug)]
pub struct BetweennessArgs {
    #[command(flatten)]
    pub input: SnapshotArg,

    /// Only report the N highest-ranked nodes and edges.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Execute `casenet betweenness`.
pub fn run_betweenness(
    args: &BetweennessArgs,
    output: OutputMode,
    analyzer: &Analyzer,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.input.snapshot)?;
    let mut report = analyzer.betweenness(&snapshot)?;

    if let Some(top) = args.top {
        report.nodes.truncate(top);
        report.edges.truncate(top);
    }

    render_mode(output, &report, render_betweenness_text, render_betweenness_pretty)
}

fn render_betweenness_text(report: &BetweennessReport, w: &mut dyn Write) -> std::io::Result<()> {
    for node in &report.nodes {
        writeln!(w, "{}  {}  {}", node.rank, node.node_id, fmt_score(node.score))?;
    }
    write_diagnostics(&report.diagnostics, false, w)
}

fn render_betweenness_pretty(
    report: &BetweennessReport,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    pretty_section(w, "Betweenness centrality")?;
    if report.nodes.is_empty() {
        writeln!(w, "No nodes.")?;
    }
    for node in &report.nodes {
        writeln!(
            w,
            "{:>4}  {:<24} {:<24} {}",
            node.rank,
            node.node_id,
            node.label,
            fmt_score(node.score)
        )?;
    }

    if !report.edges.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Busiest relationships")?;
        for edge in report.edges.iter().take(PRETTY_EDGE_LIMIT) {
            writeln!(w, "{:<40} {:.1}", edge.key, edge.score)?;
        }
    }

    write_diagnostics(&report.diagnostics, true, w)
}
