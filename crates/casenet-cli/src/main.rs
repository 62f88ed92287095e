#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use casenet_analytics::Analyzer;
use casenet_core::config::load_config;
use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "casenet: relationship-network analytics for case files",
    long_about = None
)]
struct Cli {
    /// Output format (default: pretty on a terminal, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Analytics config file (default: <config dir>/casenet/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Overview",
        about = "Size, density and degree statistics",
        long_about = "Report node and relationship counts, density, degree distribution and component count.",
        after_help = "EXAMPLES:\n    # Summarize a case network\n    casenet stats case.json\n\n    # Read from stdin and emit JSON\n    cat case.json | casenet stats - --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Overview",
        about = "List connected components",
        after_help = "EXAMPLES:\n    # Show isolated groups\n    casenet components case.json"
    )]
    Components(cmd::components::ComponentsArgs),

    #[command(
        next_help_heading = "Centrality",
        about = "Rank entities by betweenness centrality",
        long_about = "Rank entities by how many shortest paths pass through them. Scores are normalized to [0, 1].",
        after_help = "EXAMPLES:\n    # Ten most central entities\n    casenet betweenness case.json --top 10\n\n    # Emit machine-readable output\n    casenet betweenness case.json --json"
    )]
    Betweenness(cmd::betweenness::BetweennessArgs),

    #[command(
        next_help_heading = "Centrality",
        about = "Rank entities by weighted composite centrality",
        after_help = "EXAMPLES:\n    # Top five entities\n    casenet centrality case.json --top 5"
    )]
    Centrality(cmd::centrality::CentralityArgs),

    #[command(
        next_help_heading = "Structure",
        about = "Detect communities by removing bridging relationships",
        long_about = "Split the network into communities by repeatedly removing the relationship with the highest edge betweenness.",
        after_help = "EXAMPLES:\n    # Detect communities\n    casenet communities case.json\n\n    # Keep singletons, at most three groups\n    casenet communities case.json --min-size 1 --max 3"
    )]
    Communities(cmd::communities::CommunitiesArgs),

    #[command(
        next_help_heading = "Structure",
        about = "Identify brokers linking separate groups",
        after_help = "EXAMPLES:\n    # Default threshold (0.3)\n    casenet brokers case.json\n\n    # Lower the bar\n    casenet brokers case.json --threshold 0.1"
    )]
    Brokers(cmd::brokers::BrokersArgs),

    #[command(
        next_help_heading = "Structure",
        about = "Group relationships by flow kind",
        after_help = "EXAMPLES:\n    # Money, information, influence and evidence flows\n    casenet flows case.json"
    )]
    Flows(cmd::flows::FlowsArgs),

    #[command(
        next_help_heading = "Paths",
        about = "Enumerate simple paths between two entities",
        after_help = "EXAMPLES:\n    # All routes of up to five hops\n    casenet paths case.json suspect-1 witness-4\n\n    # Shorter routes only\n    casenet paths case.json suspect-1 witness-4 --max-depth 3"
    )]
    Paths(cmd::paths::PathsArgs),

    #[command(
        next_help_heading = "Paths",
        about = "Distance and shortest paths between two entities",
        after_help = "EXAMPLES:\n    # How closely are two entities linked?\n    casenet shortest case.json suspect-1 witness-4"
    )]
    Shortest(cmd::paths::ShortestArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CASENET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "casenet=debug,info"
        } else {
            "casenet=info,warn"
        })
    });

    let format = env::var("CASENET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let analyzer = Analyzer::new(config)?;
    debug!(?output, "dispatching command");

    match &cli.command {
        Commands::Stats(args) => cmd::stats::run_stats(args, output, &analyzer),
        Commands::Components(args) => cmd::components::run_components(args, output, &analyzer),
        Commands::Betweenness(args) => cmd::betweenness::run_betweenness(args, output, &analyzer),
        Commands::Centrality(args) => cmd::centrality::run_centrality(args, output, &analyzer),
        Commands::Communities(args) => cmd::communities::run_communities(args, output, &analyzer),
        Commands::Brokers(args) => cmd::brokers::run_brokers(args, output, &analyzer),
        Commands::Flows(args) => cmd::flows::run_flows(args, output, &analyzer),
        Commands::Paths(args) => cmd::paths::run_paths(args, output, &analyzer),
        Commands::Shortest(args) => cmd::paths::run_shortest(args, output, &analyzer),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let output = cli.output_mode();

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(render_err) = render_error(output, &CliError::from(&err)) {
                eprintln!("error: {err:#} ({render_err})");
            }
            ExitCode::FAILURE
        }
    }
}
