//! `casenet brokers`: entities bridging otherwise separate groups.

use std::io::Write;

use casenet_analytics::{Analyzer, BrokerReport};
use clap::Args;

use super::{SnapshotArg, load_snapshot, write_diagnostics};
use crate::output::{OutputMode, fmt_score, pretty_section, render};

/// Arguments for `casenet brokers`.
#[derive(Args, Debug)]
pub struct BrokersArgs {
    #[command(flatten)]
    pub input: SnapshotArg,

    /// Normalized betweenness a node must strictly exceed (0..=1).
    #[arg(long, value_name = "SCORE")]
    pub threshold: Option<f64>,
}

/// Execute `casenet brokers`.
pub fn run_brokers(
    args: &BrokersArgs,
    output: OutputMode,
    analyzer: &Analyzer,
) -> anyhow::Result<()> {
    let mut config = analyzer.config().clone();
    if let Some(threshold) = args.threshold {
        config.brokers.threshold = threshold;
    }
    let analyzer = Analyzer::new(config)?.with_cancel(analyzer.cancel_token().clone());

    let snapshot = load_snapshot(&args.input.snapshot)?;
    let report = analyzer.brokers(&snapshot)?;
    render(output, &report, render_brokers_human)
}

fn render_brokers_human(
    report: &BrokerReport,
    pretty: bool,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    if pretty {
        pretty_section(
            w,
            &format!("Brokers (betweenness > {})", fmt_score(report.threshold)),
        )?;
    }

    if report.brokers.is_empty() {
        writeln!(w, "No brokers above threshold {}.", fmt_score(report.threshold))?;
    }

    for broker in &report.brokers {
        if pretty {
            writeln!(
                w,
                "{:<24} {:<24} {}",
                broker.node_id,
                broker.label,
                fmt_score(broker.score)
            )?;
        } else {
            writeln!(w, "{}  {}", broker.node_id, fmt_score(broker.score))?;
        }
    }

    write_diagnostics(&report.diagnostics, pretty, w)
}
