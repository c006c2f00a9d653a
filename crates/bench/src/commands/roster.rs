//! List roster characters with their power rating.

use anyhow::Result;
use battle_core::calculate_power;
use clap::Parser;
use serde::Serialize;

use crate::utils::{ContentArgs, OutputFormat, print_json};

/// List the characters of a roster
#[derive(Parser)]
pub struct ListRoster {
    #[command(flatten)]
    content: ContentArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct RosterRow<'a> {
    id: u32,
    name: &'a str,
    element: String,
    rarity: String,
    power: u64,
    skills: usize,
    passives: usize,
}

impl ListRoster {
    pub fn execute(self) -> Result<()> {
        let (_, roster) = self.content.load()?;
        let rows: Vec<RosterRow<'_>> = roster
            .iter()
            .map(|c| RosterRow {
                id: c.id.0,
                name: &c.name,
                element: c.element.to_string(),
                rarity: c.rarity.to_string(),
                power: calculate_power(c),
                skills: c.skills.len(),
                passives: c.passives.len(),
            })
            .collect();

        match self.format {
            OutputFormat::Json => print_json(&rows),
            OutputFormat::Summary => {
                println!("{:>4}  {:<16} {:<8} {:<4} {:>7}", "ID", "NAME", "ELEMENT", "RAR", "POWER");
                for row in &rows {
                    println!(
                        "{:>4}  {:<16} {:<8} {:<4} {:>7}",
                        row.id, row.name, row.element, row.rarity, row.power
                    );
                }
                println!("\n{} characters", rows.len());
                Ok(())
            }
        }
    }
}
