//! Drive many matches through the arena and report throughput.

use std::collections::{BTreeMap, VecDeque};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use arena_runtime::{Arena, ArenaConfig, ArenaError, ArenaMetrics, MatchHandle, StopMode};
use battle_core::BattleMatch;
use clap::Parser;
use serde::Serialize;

use crate::utils::{ContentArgs, OutputFormat, build_match, print_json};

/// Run a batch of matches through the arena queue
#[derive(Parser)]
pub struct Batch {
    #[command(flatten)]
    content: ContentArgs,

    /// Number of matches to run
    #[arg(short = 'n', long, default_value_t = 100)]
    matches: usize,

    /// Characters per party
    #[arg(short, long, default_value_t = 3)]
    party_size: usize,

    /// Seed of the first match; match `i` uses `seed + i`
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Worker count (overrides ARENA_WORKERS)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Queue capacity (overrides ARENA_MAX_QUEUE)
    #[arg(long)]
    max_queue: Option<usize>,

    /// Give up on a match after this many seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Debug, Default, Serialize)]
struct BatchReport {
    submitted: usize,
    completed: usize,
    failed: usize,
    /// Completed matches per outcome
    outcomes: BTreeMap<String, usize>,
    elapsed: Duration,
    metrics: Option<ArenaMetrics>,
}

impl Batch {
    pub async fn execute(self) -> Result<()> {
        let (config, roster) = self.content.load()?;
        let ids: Vec<u32> = roster.iter().map(|c| c.id.0).collect();
        if self.party_size == 0 || ids.len() < self.party_size * 2 {
            bail!(
                "Roster has {} characters, {} needed for two disjoint parties of {}",
                ids.len(),
                self.party_size * 2,
                self.party_size
            );
        }

        let mut arena_config = ArenaConfig::from_env().context("Invalid arena environment")?;
        if let Some(workers) = self.workers {
            arena_config = arena_config.with_workers(workers);
        }
        if let Some(max_queue) = self.max_queue {
            arena_config = arena_config.with_max_queue_size(max_queue);
        }
        let arena = Arena::new(arena_config).context("Invalid arena configuration")?;
        arena.start()?;

        let timeout = Duration::from_secs(self.timeout_secs);
        let started = Instant::now();
        let mut report = BatchReport::default();
        let mut pending: VecDeque<MatchHandle> = VecDeque::new();

        for i in 0..self.matches {
            let party = |offset: usize| -> Vec<u32> {
                (0..self.party_size)
                    .map(|k| ids[(offset + k) % ids.len()])
                    .collect()
            };
            let battle = build_match(
                &roster,
                &config,
                &party(i),
                &party(i + self.party_size),
                &format!("batch-{i}"),
                self.seed.wrapping_add(i as u64),
            )?;
            // Cycle priorities so the queue ordering is exercised.
            let priority = (i % 3) as i32;

            submit(&arena, battle, priority, &mut pending, &mut report, timeout).await?;
            report.submitted += 1;
        }

        while let Some(handle) = pending.pop_front() {
            collect(handle, &mut report, timeout).await;
        }
        report.elapsed = started.elapsed();

        arena.stop(StopMode::Drain).await?;
        report.metrics = Some(arena.get_metrics());

        match self.format {
            OutputFormat::Json => print_json(&report),
            OutputFormat::Summary => {
                print_report(&report);
                Ok(())
            }
        }
    }
}

/// Queues a match, waiting on the oldest outstanding match while the queue
/// is full.
async fn submit(
    arena: &Arena,
    battle: BattleMatch,
    priority: i32,
    pending: &mut VecDeque<MatchHandle>,
    report: &mut BatchReport,
    timeout: Duration,
) -> Result<()> {
    loop {
        match arena.queue_match(battle.clone(), priority) {
            Ok(handle) => {
                pending.push_back(handle);
                return Ok(());
            }
            Err(ArenaError::QueueFull { capacity }) => {
                let Some(oldest) = pending.pop_front() else {
                    bail!("Queue of capacity {capacity} is full with nothing in flight");
                };
                tracing::debug!(capacity, "queue full, waiting for {}", oldest.match_id());
                collect(oldest, report, timeout).await;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

async fn collect(mut handle: MatchHandle, report: &mut BatchReport, timeout: Duration) {
    match handle.wait_timeout(timeout).await {
        Ok(result) => {
            report.completed += 1;
            *report.outcomes.entry(result.outcome.to_string()).or_default() += 1;
        }
        Err(err) => {
            report.failed += 1;
            tracing::warn!(match_id = %handle.match_id(), error = %err, "match did not complete");
        }
    }
}

fn print_report(report: &BatchReport) {
    println!("Submitted:   {}", report.submitted);
    println!("Completed:   {}", report.completed);
    println!("Failed:      {}", report.failed);
    for (outcome, count) in &report.outcomes {
        println!("  {outcome:<10} {count}");
    }
    println!("Elapsed:     {:.2?}", report.elapsed);

    if let Some(metrics) = &report.metrics {
        println!();
        println!("Peak queue:  {}", metrics.peak_queue_depth);
        println!("Avg latency: {:.2?}", metrics.average_latency);
        println!("Throughput:  {:.1} matches/s", metrics.throughput);
        println!("Cancelled:   {}", metrics.cancelled_count);
    }
}
