//! Taxi driver CLI - goal-directed tree search for the taxi pickup/drop-off task
//!
//! This CLI provides a unified interface for:
//! - Running the search and the baseline policies over episodes
//! - Inspecting a single search tree from a given state
//! - Rendering states of the taxi world

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taxi-driver")]
#[command(version, about = "Goal-directed tree search for the taxi task", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a policy over a number of episodes
    Run(taxi_driver::cli::commands::run::RunArgs),

    /// Build and traverse a single search tree
    Search(taxi_driver::cli::commands::search::SearchArgs),

    /// Render a state of the taxi world
    Render(taxi_driver::cli::commands::render::RenderArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "taxi_driver=debug" } else { "taxi_driver=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => taxi_driver::cli::commands::run::execute(args),
        Commands::Search(args) => taxi_driver::cli::commands::search::execute(args),
        Commands::Render(args) => taxi_driver::cli::commands::render::execute(args),
    }
}
