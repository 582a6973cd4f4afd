//! Preamble — keeps generated banner headers in source files up to date.
//!
//! # Usage
//!
//! ```text
//! preamble sync <pattern> [--dry-run] [--strict] [--no-insert] [--label <text>]
//!               [--include <token>]... [--exclude <token>]... [--font <file.flf>]
//!               [--config <file>]
//! preamble diff <pattern> [filters]
//! preamble status <pattern> [filters] [--json]
//! ```
//!
//! `<pattern>` is a glob (`src/**/*.py`) or a directory.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, status::StatusArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "preamble",
    version,
    about = "Insert and refresh generated banner preambles in source files",
    long_about = None,
)]
struct Cli {
    /// Log every file decision (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert missing preambles and refresh preamble dates.
    Sync(SyncArgs),

    /// Show unified diff of what sync would write.
    Diff(DiffArgs),

    /// Classify files without writing anything.
    Status(StatusArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
