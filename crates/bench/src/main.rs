//! Operator tooling for the battle engine and arena.
//!
//! Run with: `cargo run -p arena-bench -- <command>`

mod commands;
mod logging;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Batch, ListRoster, Replay, Single};

/// Battle engine and arena operator tools
#[derive(Parser)]
#[command(name = "arena-bench")]
#[command(about = "Simulate, verify and benchmark battles", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to `<DIR>/arena-bench.log`
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List the characters of a roster
    Roster(ListRoster),

    /// Simulate a single match between two parties
    Single(Single),

    /// Rebuild a match from a saved event log and report its digest
    Replay(Replay),

    /// Run many matches through the arena queue and report metrics
    Batch(Batch),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for ARENA_* and RUST_LOG)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::init(cli.log_dir.as_deref())?;

    match cli.command {
        Command::Roster(cmd) => cmd.execute(),
        Command::Single(cmd) => cmd.execute(),
        Command::Replay(cmd) => cmd.execute(),
        Command::Batch(cmd) => cmd.execute().await,
    }
}
