//! `casenet components`: connected components of the full network.

use std::io::Write;

use casenet_analytics::{Analyzer, ComponentReport};
use clap::Args;

use super::{SnapshotArg, load_snapshot, write_diagnostics, write_groups};
use crate::output::{OutputMode, pretty_section, render};

/// Arguments for `casenet components`.
#[derive(Args, Debug)]
pub struct ComponentsArgs {
    #[command(flatten)]
    pub input: SnapshotArg,
}

/// Execute `casenet components`.
pub fn run_components(
    args: &ComponentsArgs,
    output: OutputMode,
    analyzer: &Analyzer,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.input.snapshot)?;
    let report = analyzer.components(&snapshot)?;
    render(output, &report, render_components_human)
}

fn render_components_human(
    report: &ComponentReport,
    pretty: bool,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    if pretty {
        pretty_section(w, &format!("Connected components ({})", report.components.len()))?;
    }
    write_groups("component", &report.components, pretty, w)?;
    write_diagnostics(&report.diagnostics, pretty, w)
}
