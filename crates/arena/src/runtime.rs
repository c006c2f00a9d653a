//! High-level arena orchestrator.
//!
//! The arena owns the worker pool, the priority queue and the result cache,
//! and exposes a builder-based API for submitting matches and collecting
//! results. All queue, cache and metric mutations are serialized by one lock;
//! published results are read through per-match watch channels without it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use battle_core::{BattleMatch, BattleResult, CombatError, EngineError, MatchId};
use tokio::sync::{Notify, broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::api::handle::await_terminal;
use crate::api::{ArenaError, EngineExecutor, MatchExecutor, MatchHandle, Result};
use crate::config::ArenaConfig;
use crate::events::{ArenaEvent, EventBus};
use crate::queue::MatchQueue;
use crate::state::{MatchState, MatchStatus};
use crate::workers::{self, ArenaMetrics, MetricsRecorder};

/// How [`Arena::stop`] treats matches still waiting in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopMode {
    /// Workers finish everything already queued before exiting.
    Drain,
    /// Queued matches are cancelled; only in-flight matches finish.
    Halt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    /// Accepting submissions, no workers yet.
    Created,
    Running,
    Stopping,
    Stopped,
}

/// A tracked match: its published status plus cache bookkeeping.
struct Tracked {
    status: watch::Sender<MatchStatus>,
    submitted_at: Instant,
    finished_at: Option<Instant>,
}

impl Tracked {
    fn state(&self) -> MatchState {
        self.status.borrow().state()
    }

    fn publish(&mut self, status: MatchStatus) {
        if status.is_terminal() {
            self.finished_at = Some(Instant::now());
        }
        self.status.send_replace(status);
    }
}

struct Inner {
    lifecycle: Lifecycle,
    queue: MatchQueue,
    matches: HashMap<MatchId, Tracked>,
    metrics: MetricsRecorder,
}

/// What a worker should do next.
pub(crate) enum Job {
    Run(BattleMatch),
    Wait,
    Exit,
}

/// State shared between the arena facade and its workers.
pub(crate) struct Shared {
    inner: Mutex<Inner>,
    work: Notify,
    executor: Arc<dyn MatchExecutor>,
    events: EventBus,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn work(&self) -> &Notify {
        &self.work
    }

    pub(crate) fn executor(&self) -> Arc<dyn MatchExecutor> {
        Arc::clone(&self.executor)
    }

    /// Pops the next match and marks it running.
    pub(crate) fn next_job(&self) -> Job {
        let mut inner = self.lock();
        let Some(queued) = inner.queue.pop() else {
            return match inner.lifecycle {
                Lifecycle::Stopping | Lifecycle::Stopped => Job::Exit,
                Lifecycle::Created | Lifecycle::Running => Job::Wait,
            };
        };

        let match_id = queued.battle.id().clone();
        if let Some(tracked) = inner.matches.get_mut(&match_id) {
            tracked.publish(MatchStatus::Running);
        }
        inner.metrics.record_dispatch();
        self.events.publish(ArenaEvent::Started { match_id });
        Job::Run(queued.battle)
    }

    /// Records the outcome of a match a worker finished.
    pub(crate) fn finish(&self, match_id: &MatchId, outcome: std::result::Result<BattleResult, EngineError>) {
        let mut inner = self.lock();
        let Inner {
            matches, metrics, ..
        } = &mut *inner;

        let Some(tracked) = matches.get_mut(match_id) else {
            warn!(%match_id, "finished match is no longer tracked");
            return;
        };

        match outcome {
            Ok(result) => {
                metrics.record_success(tracked.submitted_at.elapsed());
                let event = ArenaEvent::Completed {
                    match_id: match_id.clone(),
                    outcome: result.outcome,
                    reason: result.reason,
                    rounds: result.rounds,
                };
                tracked.publish(MatchStatus::Completed(Arc::new(result)));
                self.events.publish(event);
                debug!(%match_id, "match completed");
            }
            Err(err) => {
                metrics.record_failure();
                error!(
                    %match_id,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    error = %err,
                    "match failed"
                );
                self.events.publish(ArenaEvent::Failed {
                    match_id: match_id.clone(),
                    error: err.to_string(),
                });
                tracked.publish(MatchStatus::Failed(err));
            }
        }
    }
}

/// Bounded worker pool running battle simulations.
///
/// Cloning yields another handle to the same arena.
#[derive(Clone)]
pub struct Arena {
    shared: Arc<Shared>,
    config: ArenaConfig,
}

impl Arena {
    /// Create a new arena builder
    pub fn builder() -> ArenaBuilder {
        ArenaBuilder::new()
    }

    /// Arena with the given config and the engine executor.
    pub fn new(config: ArenaConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Spawns the workers. Must be called from within a tokio runtime.
    ///
    /// Matches queued before `start` are dispatched as soon as workers run.
    /// Starting a running arena is a no-op; a stopped arena cannot restart.
    pub fn start(&self) -> Result<()> {
        let mut inner = self.shared.lock();
        match inner.lifecycle {
            Lifecycle::Running => return Ok(()),
            Lifecycle::Stopping | Lifecycle::Stopped => return Err(ArenaError::Stopped),
            Lifecycle::Created => {}
        }
        inner.lifecycle = Lifecycle::Running;
        drop(inner);

        let mut handles = self
            .shared
            .workers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for index in 0..self.config.workers {
            let shared = Arc::clone(&self.shared);
            handles.push(tokio::spawn(workers::run_worker(index, shared)));
        }

        info!(
            workers = self.config.workers,
            max_queue_size = self.config.max_queue_size,
            "arena started"
        );
        Ok(())
    }

    /// Stops accepting matches and waits for the workers to exit.
    ///
    /// In-flight matches always run to completion. Stopping an arena that was
    /// never started cancels its queue, since no worker would ever run it.
    pub async fn stop(&self, mode: StopMode) -> Result<()> {
        {
            let mut inner = self.shared.lock();
            if inner.lifecycle == Lifecycle::Stopped {
                return Ok(());
            }
            let halt = mode == StopMode::Halt || inner.lifecycle == Lifecycle::Created;
            inner.lifecycle = Lifecycle::Stopping;

            if halt {
                let Inner {
                    queue,
                    matches,
                    metrics,
                    ..
                } = &mut *inner;
                for queued in queue.drain() {
                    let match_id = queued.battle.id().clone();
                    if let Some(tracked) = matches.get_mut(&match_id) {
                        tracked.publish(MatchStatus::Cancelled);
                    }
                    metrics.record_cancellation();
                    self.shared.events.publish(ArenaEvent::Cancelled { match_id });
                }
            }
        }
        info!(?mode, "arena stopping");

        let handles = std::mem::take(
            &mut *self
                .shared
                .workers
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        self.shared.work.notify_waiters();
        for handle in handles {
            if let Err(err) = handle.await {
                error!(error = %err, "arena worker terminated abnormally");
            }
        }

        self.shared.lock().lifecycle = Lifecycle::Stopped;
        info!("arena stopped");
        Ok(())
    }

    /// Enqueues a match. Fails fast when the queue is full; a rejected match
    /// is never tracked.
    pub fn queue_match(&self, battle: BattleMatch, priority: i32) -> Result<MatchHandle> {
        let match_id = battle.id().clone();
        let mut inner = self.shared.lock();

        if matches!(inner.lifecycle, Lifecycle::Stopping | Lifecycle::Stopped) {
            return Err(ArenaError::Stopped);
        }
        if inner.matches.contains_key(&match_id) {
            return Err(ArenaError::DuplicateMatch(match_id));
        }
        if inner.queue.push(battle, priority).is_err() {
            let capacity = inner.queue.capacity();
            warn!(%match_id, capacity, "queue full, match rejected");
            return Err(ArenaError::QueueFull { capacity });
        }

        let (status, rx) = watch::channel(MatchStatus::Queued);
        inner.matches.insert(
            match_id.clone(),
            Tracked {
                status,
                submitted_at: Instant::now(),
                finished_at: None,
            },
        );
        let depth = inner.queue.len();
        inner.metrics.observe_queue_depth(depth);
        self.shared.events.publish(ArenaEvent::Queued {
            match_id: match_id.clone(),
            priority,
        });
        drop(inner);

        self.shared.work.notify_one();
        debug!(%match_id, priority, depth, "match queued");
        Ok(MatchHandle::new(match_id, rx))
    }

    /// Waits up to `timeout` for a match's result.
    ///
    /// On [`ArenaError::Timeout`] the match keeps running and can be polled
    /// again.
    pub async fn get_result(&self, match_id: &MatchId, timeout: Duration) -> Result<Arc<BattleResult>> {
        let mut status = self
            .shared
            .lock()
            .matches
            .get(match_id)
            .map(|tracked| tracked.status.subscribe())
            .ok_or_else(|| ArenaError::UnknownMatch(match_id.clone()))?;

        await_terminal(match_id, &mut status, Some(timeout)).await
    }

    /// Cancels a queued match. Returns false once a worker has taken it.
    pub fn cancel_match(&self, match_id: &MatchId) -> bool {
        self.try_cancel(match_id).is_ok()
    }

    /// Like [`cancel_match`](Self::cancel_match), reporting why a cancel
    /// was refused.
    pub fn try_cancel(&self, match_id: &MatchId) -> Result<()> {
        let mut inner = self.shared.lock();
        let Inner {
            queue,
            matches,
            metrics,
            ..
        } = &mut *inner;

        let tracked = matches
            .get_mut(match_id)
            .ok_or_else(|| ArenaError::UnknownMatch(match_id.clone()))?;
        let state = tracked.state();
        if state != MatchState::Queued || !queue.remove(match_id) {
            return Err(ArenaError::CancellationDenied {
                match_id: match_id.clone(),
                state,
            });
        }

        tracked.publish(MatchStatus::Cancelled);
        metrics.record_cancellation();
        self.shared.events.publish(ArenaEvent::Cancelled {
            match_id: match_id.clone(),
        });
        debug!(%match_id, "match cancelled");
        Ok(())
    }

    /// Current state of a tracked match.
    pub fn state(&self, match_id: &MatchId) -> Option<MatchState> {
        self.shared.lock().matches.get(match_id).map(Tracked::state)
    }

    pub fn get_metrics(&self) -> ArenaMetrics {
        let inner = self.shared.lock();
        inner.metrics.snapshot(inner.queue.len())
    }

    /// Evicts terminal matches that finished at least `older_than` ago.
    ///
    /// Returns the number evicted. Evicted ids are forgotten and may be
    /// submitted again.
    pub fn clear_cache(&self, older_than: Duration) -> usize {
        let now = Instant::now();
        let mut inner = self.shared.lock();
        let before = inner.matches.len();
        inner.matches.retain(|_, tracked| {
            let expired = tracked
                .finished_at
                .is_some_and(|finished| now.duration_since(finished) >= older_than);
            !expired
        });
        let evicted = before - inner.matches.len();
        if evicted > 0 {
            debug!(evicted, ?older_than, "result cache cleared");
        }
        evicted
    }

    /// Subscribe to match lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<ArenaEvent> {
        self.shared.events.subscribe()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.shared.events
    }
}

/// Builder for [`Arena`] with flexible configuration.
pub struct ArenaBuilder {
    config: ArenaConfig,
    executor: Option<Arc<dyn MatchExecutor>>,
}

impl ArenaBuilder {
    fn new() -> Self {
        Self {
            config: ArenaConfig::default(),
            executor: None,
        }
    }

    /// Override arena configuration
    pub fn config(mut self, config: ArenaConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the engine with a custom executor.
    pub fn executor(mut self, executor: impl MatchExecutor) -> Self {
        self.executor = Some(Arc::new(executor));
        self
    }

    pub fn build(self) -> Result<Arena> {
        self.config.validate()?;
        let executor: Arc<dyn MatchExecutor> = match self.executor {
            Some(executor) => executor,
            None => Arc::new(EngineExecutor),
        };

        let shared = Shared {
            inner: Mutex::new(Inner {
                lifecycle: Lifecycle::Created,
                queue: MatchQueue::new(self.config.max_queue_size),
                matches: HashMap::new(),
                metrics: MetricsRecorder::new(),
            }),
            work: Notify::new(),
            executor,
            events: EventBus::with_capacity(self.config.event_buffer_size),
            workers: Mutex::new(Vec::new()),
        };

        Ok(Arena {
            shared: Arc::new(shared),
            config: self.config,
        })
    }
}
