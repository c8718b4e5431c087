//! Signpost CLI - documentation site navigation.
//!
//! Provides commands for:
//! - `check`: Validate nav bar and sidebar configuration
//! - `resolve`: Show the sidebar a page path resolves to
//! - `dump`: Print the normalized navigation as JSON

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, DumpArgs, ResolveArgs};
use output::Output;

/// Signpost - documentation site navigation.
#[derive(Parser)]
#[command(name = "signpost", version, about)]
struct Cli {
    /// Enable verbose output (show config loading and build logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate navigation configuration.
    Check(CheckArgs),
    /// Show the sidebar for a page path.
    Resolve(ResolveArgs),
    /// Print the normalized navigation as JSON.
    Dump(DumpArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG (default: errors only)
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Dump(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
