//! Rebuild a match from a saved event log.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use battle_core::{Event, replay};
use clap::Parser;

use crate::utils::{OutputFormat, print_json};

/// Replay a saved event log
#[derive(Parser)]
pub struct Replay {
    /// Event log written by `single --save-log`
    #[arg(value_name = "FILE")]
    log: PathBuf,

    /// Seed the match was created with
    #[arg(short, long)]
    seed: u64,

    /// Fail unless the rebuilt state has this hex digest
    #[arg(long, value_name = "HEX")]
    expect_digest: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        let bytes = std::fs::read(&self.log)
            .with_context(|| format!("Failed to read event log: {}", self.log.display()))?;
        let events: Vec<Event> = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse event log: {}", self.log.display()))?;

        let output = replay(&events, self.seed).context("Replay rejected the log")?;
        let digest = output.final_digest.to_hex();
        tracing::info!(match_id = %output.match_id, %digest, "log replayed");

        if let Some(expected) = &self.expect_digest {
            if !expected.eq_ignore_ascii_case(&digest) {
                bail!("Digest mismatch: expected {expected}, replay produced {digest}");
            }
        }

        match self.format {
            OutputFormat::Json => print_json(&output),
            OutputFormat::Summary => {
                println!("Match:    {} (seed {})", output.match_id, output.seed);
                println!(
                    "Outcome:  {} by {} after {} rounds",
                    output.outcome, output.reason, output.rounds
                );
                println!("Events:   {}", output.events_applied);
                println!("Digest:   {digest}");
                for snapshot in &output.final_state {
                    println!(
                        "  {:<3} character {:>4} hp {:>5}/{}",
                        snapshot.slot.to_string(),
                        snapshot.character,
                        snapshot.hp,
                        snapshot.max_hp
                    );
                }
                Ok(())
            }
        }
    }
}
