//! Helpers shared by the bench commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_content::{ContentFactory, Roster};
use battle_core::{BattleConfig, BattleMatch, BattleResult, CharacterId, Side, create_match};
use clap::Args;
use serde::Serialize;

/// Where to load the roster and battle config from.
#[derive(Args, Clone, Debug)]
pub struct ContentArgs {
    /// Directory holding `roster.ron` and an optional `battle.toml`
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

impl ContentArgs {
    pub fn load(&self) -> Result<(BattleConfig, Roster)> {
        let factory = ContentFactory::new(&self.data_dir);
        let config = factory.load_config().with_context(|| {
            format!("Failed to load battle config from {}", self.data_dir.display())
        })?;
        let roster = factory
            .load_roster()
            .with_context(|| format!("Failed to load roster from {}", self.data_dir.display()))?;
        tracing::debug!(characters = roster.len(), "content loaded");
        Ok((config, roster))
    }
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Summary,
    /// Full JSON output
    Json,
}

/// Builds a match from roster ids.
pub fn build_match(
    roster: &Roster,
    config: &BattleConfig,
    party_a: &[u32],
    party_b: &[u32],
    match_id: &str,
    seed: u64,
) -> Result<BattleMatch> {
    let ids = |raw: &[u32]| raw.iter().copied().map(CharacterId).collect::<Vec<_>>();
    let a = roster.party(&ids(party_a)).context("Invalid party A")?;
    let b = roster.party(&ids(party_b)).context("Invalid party B")?;
    create_match(a, b, match_id, Some(config), seed).context("Match rejected")
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

pub fn print_result(battle: &BattleMatch, result: &BattleResult) {
    println!("Match:    {} (seed {})", result.match_id, result.seed);
    println!("Outcome:  {} by {} after {} rounds", result.outcome, result.reason, result.rounds);
    println!("Events:   {}", result.log.len());
    println!("Digest:   {}", result.final_digest);

    for side in [Side::A, Side::B] {
        println!("\nSide {side}");
        for snapshot in result.final_state.iter().filter(|s| s.slot.side == side) {
            let name = battle
                .party(side)
                .get(snapshot.slot.index as usize)
                .map_or("?", |c| c.name.as_str());
            let dealt = result
                .summary
                .totals(snapshot.slot)
                .map_or(0, |t| t.damage_dealt);
            println!(
                "  {:<3} {:<16} hp {:>5}/{:<5} dealt {:>6}{}",
                snapshot.slot.to_string(),
                name,
                snapshot.hp,
                snapshot.max_hp,
                dealt,
                if snapshot.alive { "" } else { "  (defeated)" }
            );
        }
    }

    println!("\nRounds");
    for round in &result.summary.round_summaries {
        let defeated: Vec<String> = round.defeated.iter().map(ToString::to_string).collect();
        println!(
            "  {:>3}  dealt {:>6}  healed {:>5}{}",
            round.round,
            round.damage_dealt(),
            round.healing_done(),
            if defeated.is_empty() {
                String::new()
            } else {
                format!("  defeated {}", defeated.join(", "))
            }
        );
    }

    println!();
    println!("Crits:    {}", result.summary.critical_hits);
    println!("Misses:   {}", result.summary.misses);
    match result.summary.mvp {
        Some(mvp) => println!("MVP:      {mvp}"),
        None => println!("MVP:      none"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_content() -> ContentArgs {
        ContentArgs {
            data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"),
        }
    }

    #[test]
    fn builds_match_from_workspace_roster() {
        let (config, roster) = workspace_content().load().unwrap();
        let battle = build_match(&roster, &config, &[1, 2], &[3, 4], "bench", 9).unwrap();

        assert_eq!(battle.party(Side::A).len(), 2);
        assert_eq!(battle.party(Side::B)[0].id, CharacterId(3));
        assert_eq!(battle.seed(), 9);
    }

    #[test]
    fn unknown_character_is_reported() {
        let (config, roster) = workspace_content().load().unwrap();
        let err = build_match(&roster, &config, &[1], &[999], "bench", 0).unwrap_err();
        assert!(format!("{err:#}").contains("999"));
    }

    #[test]
    fn missing_data_dir_fails_with_context() {
        let dir = tempfile::tempdir().unwrap();
        let args = ContentArgs {
            data_dir: dir.path().to_path_buf(),
        };
        let err = args.load().unwrap_err();
        assert!(err.to_string().contains("Failed to load roster"));
    }
}
