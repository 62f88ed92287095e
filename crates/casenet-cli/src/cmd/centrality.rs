//! `casenet centrality`: weighted degree/closeness/betweenness ranking.

use std::io::Write;

use casenet_analytics::{Analyzer, CentralityReport};
use clap::Args;

use super::{SnapshotArg, load_snapshot, write_diagnostics};
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render_mode};

/// Arguments for `casenet centrality`.
#[derive(Args, Debug)]
pub struct CentralityArgs {
    #[command(flatten)]
    pub input: SnapshotArg,

    /// Only report the N highest-ranked nodes.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Execute `casenet centrality`.
pub fn run_centrality(
    args: &CentralityArgs,
    output: OutputMode,
    analyzer: &Analyzer,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.input.snapshot)?;
    let mut report = analyzer.centrality(&snapshot)?;
    if let Some(top) = args.top {
        report.nodes.truncate(top);
    }
    render_mode(output, &report, render_centrality_text, render_centrality_pretty)
}

fn render_centrality_text(report: &CentralityReport, w: &mut dyn Write) -> std::io::Result<()> {
    for node in &report.nodes {
        writeln!(
            w,
            "{}  {}  {}  {}  {}  {}",
            node.rank,
            node.node_id,
            fmt_score(node.score),
            node.degree,
            fmt_score(node.closeness),
            fmt_score(node.betweenness)
        )?;
    }
    write_diagnostics(&report.diagnostics, false, w)
}

fn render_centrality_pretty(report: &CentralityReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Composite centrality")?;
    pretty_kv(
        w,
        "weights",
        format!(
            "degree {} / closeness {} / betweenness {}",
            report.weights.degree, report.weights.closeness, report.weights.betweenness
        ),
    )?;
    writeln!(w)?;

    if report.nodes.is_empty() {
        writeln!(w, "No nodes.")?;
    } else {
        writeln!(
            w,
            "{:>4}  {:<24} {:>7} {:>6} {:>9} {:>11}",
            "rank", "entity", "score", "degree", "closeness", "betweenness"
        )?;
    }
    for node in &report.nodes {
        writeln!(
            w,
            "{:>4}  {:<24} {:>7} {:>6} {:>9} {:>11}",
            node.rank,
            node.label,
            fmt_score(node.score),
            node.degree,
            fmt_score(node.closeness),
            fmt_score(node.betweenness)
        )?;
    }

    write_diagnostics(&report.diagnostics, true, w)
}
