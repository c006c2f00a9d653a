//! Simulate one match between two parties from the roster.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use battle_core::{replay, simulate};
use clap::Parser;

use crate::utils::{ContentArgs, OutputFormat, build_match, print_json, print_result};

/// Simulate a single match
#[derive(Parser)]
pub struct Single {
    #[command(flatten)]
    content: ContentArgs,

    /// Character ids of party A, comma separated (e.g. 1,2,3)
    #[arg(short = 'a', long, value_delimiter = ',', required = true)]
    party_a: Vec<u32>,

    /// Character ids of party B, comma separated
    #[arg(short = 'b', long, value_delimiter = ',', required = true)]
    party_b: Vec<u32>,

    /// Seed driving every random roll of the match
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Match identifier
    #[arg(long, default_value = "single")]
    match_id: String,

    /// Write the event log as JSON to this file
    #[arg(long, value_name = "FILE")]
    save_log: Option<PathBuf>,

    /// Replay the event log and check it reproduces the final digest
    #[arg(long)]
    verify: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Single {
    pub fn execute(self) -> Result<()> {
        let (config, roster) = self.content.load()?;
        let battle = build_match(
            &roster,
            &config,
            &self.party_a,
            &self.party_b,
            &self.match_id,
            self.seed,
        )?;

        let result = simulate(&battle).context("Simulation failed")?;
        tracing::info!(
            match_id = %result.match_id,
            outcome = %result.outcome,
            rounds = result.rounds,
            "match simulated"
        );

        if let Some(path) = &self.save_log {
            let json = serde_json::to_vec_pretty(&result.log).context("Failed to encode event log")?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write event log: {}", path.display()))?;
            tracing::info!("Event log written to {}", path.display());
        }

        if self.verify {
            let replayed = replay(result.log.events(), self.seed).context("Replay rejected the log")?;
            if replayed.final_digest != result.final_digest {
                bail!(
                    "Replay digest {} differs from simulated digest {}",
                    replayed.final_digest,
                    result.final_digest
                );
            }
            tracing::info!(digest = %replayed.final_digest, "replay verified");
        }

        match self.format {
            OutputFormat::Json => print_json(&result),
            OutputFormat::Summary => {
                print_result(&battle, &result);
                if self.verify {
                    println!("Replay:   verified");
                }
                Ok(())
            }
        }
    }
}
