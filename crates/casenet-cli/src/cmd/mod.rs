//! Command handlers. Each subcommand lives in its own module with an `Args`
//! struct, a `run_*` entry point and its human renderer.

pub mod betweenness;
pub mod brokers;
pub mod centrality;
pub mod communities;
pub mod components;
pub mod flows;
pub mod paths;
pub mod stats;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use casenet_analytics::{CommunityRecord, SnapshotDiagnostics};
use casenet_core::Snapshot;
use clap::Args;
use tracing::debug;

use crate::output::{fmt_score, pretty_kv};

/// Positional snapshot argument shared by every command.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArg {
    /// Case network JSON file, or `-` for stdin.
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot: PathBuf,
}

/// Load and validate a snapshot from a file or stdin.
pub fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    if path == Path::new("-") {
        debug!("reading snapshot from stdin");
        return Snapshot::from_reader(io::stdin().lock()).context("Failed to load snapshot from stdin");
    }

    debug!(path = %path.display(), "reading snapshot");
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Snapshot::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to load snapshot {}", path.display()))
}

/// Diagnostics footer: only mentions what was dropped.
pub fn write_diagnostics(
    diagnostics: &SnapshotDiagnostics,
    pretty: bool,
    w: &mut dyn Write,
) -> io::Result<()> {
    let skipped = [
        (diagnostics.dropped_edges, "edges reference unknown nodes"),
        (diagnostics.duplicate_edges, "duplicate edges merged"),
        (diagnostics.self_loops, "self-loops ignored"),
    ];
    for (count, what) in skipped {
        if count > 0 {
            if pretty {
                writeln!(w, "note: {count} {what}")?;
            } else {
                writeln!(w, "# {count} {what}")?;
            }
        }
    }
    Ok(())
}

/// Shared renderer for communities and connected components.
pub fn write_groups(
    noun: &str,
    groups: &[CommunityRecord],
    pretty: bool,
    w: &mut dyn Write,
) -> io::Result<()> {
    if groups.is_empty() {
        return writeln!(w, "No {noun}s found.");
    }

    for group in groups {
        let central = group.central_node.as_deref().unwrap_or("-");
        if pretty {
            writeln!(w, "\n{} {} ({} members)", capitalize(noun), group.community_id, group.size)?;
            pretty_kv(w, "density", fmt_score(group.density))?;
            pretty_kv(w, "central", central)?;
            pretty_kv(w, "members", group.members.join(", "))?;
        } else {
            writeln!(
                w,
                "{}  {}  {}  {}  {}",
                group.community_id,
                group.size,
                fmt_score(group.density),
                central,
                group.members.join(",")
            )?;
        }
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use casenet_analytics::SnapshotDiagnostics;

    pub fn diagnostics() -> SnapshotDiagnostics {
        SnapshotDiagnostics {
            node_count: 3,
            edge_count: 2,
            dropped_edges: 0,
            duplicate_edges: 0,
            self_loops: 0,
            snapshot_hash: "blake3:test".to_string(),
        }
    }
}
