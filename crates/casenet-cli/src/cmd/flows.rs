//! `casenet flows`: relationships grouped by what they carry.

use std::io::Write;

use casenet_analytics::{Analyzer, FlowReport};
use clap::Args;

use super::{SnapshotArg, load_snapshot, write_diagnostics};
use crate::output::{OutputMode, pretty_section, render};

/// Arguments for `casenet flows`.
#[derive(Args, Debug)]
pub struct FlowsArgs {
    #[command(flatten)]
    pub input: SnapshotArg,
}

/// Execute `casenet flows`.
pub fn run_flows(args: &FlowsArgs, output: OutputMode, analyzer: &Analyzer) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.input.snapshot)?;
    let report = analyzer.flows(&snapshot);
    render(output, &report, render_flows_human)
}

fn render_flows_human(report: &FlowReport, pretty: bool, w: &mut dyn Write) -> std::io::Result<()> {
    for class in &report.flows {
        if pretty {
            if class.count == 0 {
                continue;
            }
            pretty_section(w, &format!("{} ({})", class.kind, class.count))?;
            for rel in &class.relations {
                let label = if rel.label.is_empty() { "-" } else { &rel.label };
                writeln!(w, "  {} → {}  {label}", rel.from, rel.to)?;
            }
            writeln!(w)?;
        } else {
            for rel in &class.relations {
                writeln!(w, "{}\t{}\t{}\t{}", class.kind, rel.from, rel.to, rel.label)?;
            }
        }
    }
    write_diagnostics(&report.diagnostics, pretty, w)
}
