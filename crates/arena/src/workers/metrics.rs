//! Queue and execution metrics.
//!
//! Counters live behind the arena lock together with the queue they describe,
//! so a snapshot is always consistent with the queue state it was taken from.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Point-in-time view of the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaMetrics {
    /// Matches waiting for a worker
    pub queue_depth: usize,
    /// Matches currently executing
    pub running_count: usize,
    pub completed_count: u64,
    pub failed_count: u64,
    pub cancelled_count: u64,
    /// Highest queue depth observed
    pub peak_queue_depth: usize,
    /// Mean time from submission to completion over completed matches
    pub average_latency: Duration,
    /// Completed matches per second since the recorder was created
    pub throughput: f64,
}

/// Running counters behind [`ArenaMetrics`].
#[derive(Debug)]
pub(crate) struct MetricsRecorder {
    started_at: Instant,
    running: usize,
    completed: u64,
    failed: u64,
    cancelled: u64,
    peak_queue_depth: usize,
    total_latency: Duration,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            running: 0,
            completed: 0,
            failed: 0,
            cancelled: 0,
            peak_queue_depth: 0,
            total_latency: Duration::ZERO,
        }
    }

    /// Tracks the peak after an enqueue.
    pub fn observe_queue_depth(&mut self, depth: usize) {
        self.peak_queue_depth = self.peak_queue_depth.max(depth);
    }

    pub fn record_dispatch(&mut self) {
        self.running += 1;
    }

    pub fn record_success(&mut self, latency: Duration) {
        self.running = self.running.saturating_sub(1);
        self.completed += 1;
        self.total_latency += latency;
    }

    pub fn record_failure(&mut self) {
        self.running = self.running.saturating_sub(1);
        self.failed += 1;
    }

    pub fn record_cancellation(&mut self) {
        self.cancelled += 1;
    }

    pub fn running(&self) -> usize {
        self.running
    }

    pub fn avg_latency(&self) -> Duration {
        if self.completed == 0 {
            Duration::ZERO
        } else {
            self.total_latency / self.completed as u32
        }
    }

    pub fn throughput(&self) -> f64 {
        let elapsed = self.started_at.elapsed().as_secs_f64();
        if elapsed == 0.0 {
            0.0
        } else {
            self.completed as f64 / elapsed
        }
    }

    pub fn snapshot(&self, queue_depth: usize) -> ArenaMetrics {
        ArenaMetrics {
            queue_depth,
            running_count: self.running,
            completed_count: self.completed,
            failed_count: self.failed,
            cancelled_count: self.cancelled,
            peak_queue_depth: self.peak_queue_depth,
            average_latency: self.avg_latency(),
            throughput: self.throughput(),
        }
    }
}
