//! AZ Builder CLI - content engine.
//!
//! Provides commands for:
//! - `render`: Recompose a stored fragment into final markup + manifest
//! - `portable`: Prepare an authored fragment for portable storage

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{PortableArgs, RenderArgs};
use output::Output;

/// AZ Builder - page builder content engine.
#[derive(Parser)]
#[command(name = "azb", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recompose a stored fragment into final markup plus asset manifest.
    Render(RenderArgs),
    /// Replace absolute paths with portable tokens for storage.
    Portable(PortableArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default
    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose(),
        Commands::Portable(args) => args.verbose(),
    };
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Portable(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
