//! HEXMC CLI - Command-line interface
//!
//! Commands:
//! - play: Play Hex against the Monte-Carlo AI
//! - path: Shortest path over a text-format graph file
//! - mst: Minimum spanning tree of a text-format graph file

use clap::{Parser, Subcommand};

mod graph_cmd;
mod play;

#[derive(Parser)]
#[command(name = "hexmc")]
#[command(about = "The game of Hex with a Monte-Carlo AI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play Hex against the AI
    Play(play::PlayArgs),
    /// Shortest path between two vertices of a graph file
    Path(graph_cmd::PathArgs),
    /// Minimum spanning tree of a graph file
    Mst(graph_cmd::MstArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(&args),
        Commands::Path(args) => graph_cmd::run_path(&args),
        Commands::Mst(args) => graph_cmd::run_mst(&args),
    }
}
