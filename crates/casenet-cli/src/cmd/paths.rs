//! `casenet paths` and `casenet shortest`: routes between two entities.

use std::io::Write;

use casenet_analytics::{Analyzer, PathRecord, PathReport, ShortestPathReport};
use clap::Args;

use super::{SnapshotArg, load_snapshot, write_diagnostics};
use crate::output::{OutputMode, pretty_kv, pretty_section, render};

/// Arguments for `casenet paths`.
#[derive(Args, Debug)]
pub struct PathsArgs {
    #[command(flatten)]
    pub input: SnapshotArg,

    /// Start entity id.
    #[arg(value_name = "FROM")]
    pub from: String,

    /// End entity id.
    #[arg(value_name = "TO")]
    pub to: String,

    /// Longest path to consider, in relationships.
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Stop after this many paths.
    #[arg(long, value_name = "N")]
    pub max_paths: Option<usize>,
}

/// Arguments for `casenet shortest`.
#[derive(Args, Debug)]
pub struct ShortestArgs {
    #[command(flatten)]
    pub input: SnapshotArg,

    /// Start entity id.
    #[arg(value_name = "FROM")]
    pub from: String,

    /// End entity id.
    #[arg(value_name = "TO")]
    pub to: String,
}

/// Execute `casenet paths`.
pub fn run_paths(args: &PathsArgs, output: OutputMode, analyzer: &Analyzer) -> anyhow::Result<()> {
    let mut config = analyzer.config().clone();
    if let Some(depth) = args.max_depth {
        config.paths.max_depth = depth;
    }
    if let Some(max) = args.max_paths {
        config.paths.max_paths = max;
    }
    let analyzer = Analyzer::new(config)?.with_cancel(analyzer.cancel_token().clone());

    let snapshot = load_snapshot(&args.input.snapshot)?;
    let report = analyzer.paths(&snapshot, &args.from, &args.to)?;
    render(output, &report, render_paths_human)
}

/// Execute `casenet shortest`.
pub fn run_shortest(
    args: &ShortestArgs,
    output: OutputMode,
    analyzer: &Analyzer,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(&args.input.snapshot)?;
    let report = analyzer.shortest_paths(&snapshot, &args.from, &args.to)?;
    render(output, &report, render_shortest_human)
}

fn write_path_list(paths: &[PathRecord], pretty: bool, w: &mut dyn Write) -> std::io::Result<()> {
    for path in paths {
        if pretty {
            writeln!(w, "  [{}] {}", path.length, path.nodes.join(" → "))?;
        } else {
            writeln!(w, "{}  {}", path.length, path.nodes.join(","))?;
        }
    }
    Ok(())
}

fn render_paths_human(report: &PathReport, pretty: bool, w: &mut dyn Write) -> std::io::Result<()> {
    if pretty {
        pretty_section(
            w,
            &format!(
                "Paths {} → {} (max depth {})",
                report.from, report.to, report.max_depth
            ),
        )?;
    }

    if report.paths.is_empty() {
        writeln!(w, "No paths within depth {}.", report.max_depth)?;
    }
    write_path_list(&report.paths, pretty, w)?;

    if report.truncated {
        if pretty {
            writeln!(w, "note: search budget reached; more paths may exist")?;
        } else {
            writeln!(w, "# truncated")?;
        }
    }

    write_diagnostics(&report.diagnostics, pretty, w)
}

fn render_shortest_human(
    report: &ShortestPathReport,
    pretty: bool,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    let distance = report
        .distance
        .map_or_else(|| "unreachable".to_string(), |d| d.to_string());

    if pretty {
        pretty_section(w, &format!("Shortest paths {} → {}", report.from, report.to))?;
        pretty_kv(w, "distance", &distance)?;
        pretty_kv(w, "paths", format!("{}", report.path_count))?;
    } else {
        writeln!(w, "# distance {distance} paths {}", report.path_count)?;
    }

    write_path_list(&report.paths, pretty, w)?;

    if report.truncated {
        if pretty {
            writeln!(w, "note: showing {} of {}", report.paths.len(), report.path_count)?;
        } else {
            writeln!(w, "# truncated")?;
        }
    }

    write_diagnostics(&report.diagnostics, pretty, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use casenet_core::Snapshot;

    fn chain() -> Snapshot {
        Snapshot::from_pairs(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")])
            .expect("snapshot")
    }

    #[test]
    fn paths_text_rows() {
        let report = Analyzer::default().paths(&chain(), "A", "D").expect("paths");
        let mut out = Vec::new();
        render_paths_human(&report, false, &mut out).expect("render");
        assert_eq!(String::from_utf8(out).expect("utf8"), "3  A,B,C,D\n");
    }

    #[test]
    fn no_paths_mentions_depth() {
        let report = Analyzer::default().paths(&chain(), "A", "A").expect("paths");
        let mut out = Vec::new();
        render_paths_human(&report, true, &mut out).expect("render");
        assert!(String::from_utf8(out).expect("utf8").contains("No paths within depth 5."));
    }

    #[test]
    fn shortest_unreachable_text() {
        let snap = Snapshot::from_pairs(&["A", "B"], &[]).expect("snapshot");
        let report = Analyzer::default()
            .shortest_paths(&snap, "A", "B")
            .expect("shortest");
        let mut out = Vec::new();
        render_shortest_human(&report, false, &mut out).expect("render");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "# distance unreachable paths 0\n"
        );
    }

    #[test]
    fn shortest_pretty_uses_arrows() {
        let report = Analyzer::default()
            .shortest_paths(&chain(), "A", "C")
            .expect("shortest");
        let mut out = Vec::new();
        render_shortest_human(&report, true, &mut out).expect("render");
        let s = String::from_utf8(out).expect("utf8");
        assert!(s.contains("[2] A → B → C"));
        assert!(s.contains("distance:"));
    }
}
