//! neuronet: command-line front end for the sparse graph engine.
//!
//! One-shot subcommands load a dataset, run a single query and exit; `shell`
//! keeps a graph resident and accepts queries line by line.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use neuronet_core::{EngineConfig, NodeId, ENV_MAX_MEMORY_MB};
use tracing_subscriber::EnvFilter;

mod output;
mod shell;
mod state;

use output::Output;
use shell::{CommandError, Shell};
use state::SharedEngine;

#[derive(Parser)]
#[command(
    name = "neuronet",
    version,
    about = "Sparse graph engine: load edge lists, query degrees, BFS and subgraphs"
)]
struct Cli {
    /// Reject datasets whose in-memory estimate exceeds this many MB.
    #[arg(long, global = true, env = ENV_MAX_MEMORY_MB)]
    max_memory_mb: Option<usize>,

    /// Emit JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a dataset and print its statistics.
    Stats { file: PathBuf },

    /// Out-degree and outgoing neighbors of one node.
    Neighbors { file: PathBuf, node: NodeId },

    /// Bounded breadth-first search from a start node.
    Bfs {
        file: PathBuf,
        #[arg(long)]
        start: NodeId,
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
        /// Also print the edges induced by the visited nodes.
        #[arg(long)]
        edges: bool,
    },

    /// Interactive session, optionally preloading a dataset.
    Shell { file: Option<PathBuf> },
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("neuronet: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("neuronet=info,neuronet_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let mut config = EngineConfig::from_env()?;
    if let Some(mb) = cli.max_memory_mb {
        config.max_memory_mb = mb;
    }
    config.validate()?;

    let engine = SharedEngine::new(config);
    let mut out = Output::new(io::stdout().lock(), cli.json);

    match cli.command {
        Command::Stats { file } => {
            preload(&engine, &file, &mut out)?;
            let summary = engine.with_engine(|e| e.summary())?;
            out.summary(&summary)?;
        }
        Command::Neighbors { file, node } => {
            engine.load(&file)?;
            let neighbors = engine.with_engine(|e| e.neighbors(node))?;
            out.neighbors(node, &neighbors)?;
        }
        Command::Bfs {
            file,
            start,
            depth,
            edges,
        } => {
            engine.load(&file)?;
            let (nodes, induced) = engine.with_engine(|e| {
                let nodes = e.bfs(start, depth)?;
                let induced = if edges {
                    Some(e.induced_edges(&nodes)?)
                } else {
                    None
                };
                Ok::<_, neuronet_core::GraphError>((nodes, induced))
            })?;
            out.bfs(start, depth, &nodes, induced.as_deref())?;
        }
        Command::Shell { file } => {
            if let Some(file) = file {
                preload(&engine, &file, &mut out)?;
            }
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            Shell::new(engine, out).run(stdin.lock(), prompt)?;
        }
    }
    Ok(())
}

fn preload<W: io::Write>(
    engine: &SharedEngine,
    file: &Path,
    out: &mut Output<W>,
) -> Result<(), CommandError> {
    let report = engine.load(file)?;
    out.load_report(&report)?;
    Ok(())
}
