use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use arena_runtime::{
    Arena, ArenaConfig, ArenaError, ArenaEvent, MatchExecutor, MatchState, StopMode,
};
use battle_core::{
    BattleMatch, BattleResult, Character, CharacterId, CharacterStats, Element, EngineError,
    MatchId, create_match, simulate,
};

const WAIT: Duration = Duration::from_secs(5);

/// Blocks executors until opened.
#[derive(Default)]
struct Gate {
    open: Mutex<bool>,
    cond: Condvar,
}

impl Gate {
    fn closed() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn opened() -> Arc<Self> {
        let gate = Self::closed();
        gate.open();
        gate
    }

    fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.cond.notify_all();
    }

    fn pass(&self) {
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.cond.wait(open).unwrap();
        }
    }
}

/// Records execution order; ids starting with `bad` fail.
#[derive(Clone)]
struct Probe {
    gate: Arc<Gate>,
    executed: Arc<Mutex<Vec<String>>>,
}

impl Probe {
    fn new(gate: Arc<Gate>) -> Self {
        Self {
            gate,
            executed: Arc::default(),
        }
    }

    fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

impl MatchExecutor for Probe {
    fn execute(&self, battle: &BattleMatch) -> Result<BattleResult, EngineError> {
        self.gate.pass();
        let id = battle.id().to_string();
        self.executed.lock().unwrap().push(id.clone());
        if id.starts_with("bad") {
            return Err(EngineError::internal(id, 0, "rigged failure"));
        }
        simulate(battle)
    }
}

fn duel(id: &str) -> BattleMatch {
    let fighter = |n: u32, atk: u32| {
        Arc::new(Character::new(
            CharacterId(n),
            format!("Duelist {n}"),
            Element::Neutral,
            CharacterStats::new(100, atk, 10, 10 + n, 10, 10),
        ))
    };
    create_match(vec![fighter(1, 50)], vec![fighter(2, 10)], id, None, 7).unwrap()
}

fn arena(config: ArenaConfig, probe: &Probe) -> Arena {
    Arena::builder()
        .config(config)
        .executor(probe.clone())
        .build()
        .unwrap()
}

async fn wait_for_state(arena: &Arena, id: &MatchId, state: MatchState) {
    tokio::time::timeout(WAIT, async {
        while arena.state(id) != Some(state) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("match {id} never reached {state}"));
}

#[tokio::test]
async fn full_queue_rejects_without_tracking() {
    let probe = Probe::new(Gate::opened());
    let arena = arena(ArenaConfig::default().with_max_queue_size(2), &probe);

    arena.queue_match(duel("a"), 0).unwrap();
    arena.queue_match(duel("b"), 0).unwrap();
    let err = arena.queue_match(duel("c"), 10).unwrap_err();

    assert_eq!(err, ArenaError::QueueFull { capacity: 2 });
    assert_eq!(arena.state(&MatchId::from("c")), None);
    let metrics = arena.get_metrics();
    assert_eq!(metrics.queue_depth, 2);
    assert_eq!(metrics.peak_queue_depth, 2);
}

#[tokio::test]
async fn higher_priority_dispatches_first() {
    let probe = Probe::new(Gate::opened());
    let arena = arena(ArenaConfig::default().with_workers(1), &probe);

    let handles = vec![
        arena.queue_match(duel("low-1"), 1).unwrap(),
        arena.queue_match(duel("high"), 5).unwrap(),
        arena.queue_match(duel("low-2"), 1).unwrap(),
    ];
    arena.start().unwrap();

    for handle in handles {
        handle.wait().await.unwrap();
    }
    assert_eq!(probe.executed(), vec!["high", "low-1", "low-2"]);
    arena.stop(StopMode::Drain).await.unwrap();
}

#[tokio::test]
async fn duplicate_ids_are_rejected() {
    let probe = Probe::new(Gate::opened());
    let arena = arena(ArenaConfig::default(), &probe);

    arena.queue_match(duel("dup"), 0).unwrap();
    assert_eq!(
        arena.queue_match(duel("dup"), 3).unwrap_err(),
        ArenaError::DuplicateMatch(MatchId::from("dup"))
    );
}

#[tokio::test]
async fn failed_match_does_not_stop_the_worker() {
    let probe = Probe::new(Gate::opened());
    let arena = arena(ArenaConfig::default().with_workers(1), &probe);
    arena.start().unwrap();

    let bad = arena.queue_match(duel("bad-1"), 0).unwrap();
    let good = arena.queue_match(duel("good-1"), 0).unwrap();

    let err = bad.wait().await.unwrap_err();
    assert!(matches!(err, ArenaError::MatchFailed { ref match_id, .. } if match_id.as_str() == "bad-1"));
    good.wait().await.unwrap();

    let metrics = arena.get_metrics();
    assert_eq!(metrics.failed_count, 1);
    assert_eq!(metrics.completed_count, 1);
    assert_eq!(metrics.running_count, 0);
    assert_eq!(arena.state(&MatchId::from("bad-1")), Some(MatchState::Failed));
}

#[tokio::test]
async fn queued_match_can_be_cancelled() {
    let probe = Probe::new(Gate::opened());
    let arena = arena(ArenaConfig::default(), &probe);
    let id = MatchId::from("doomed");

    let handle = arena.queue_match(duel("doomed"), 0).unwrap();
    arena.queue_match(duel("kept"), 0).unwrap();
    assert!(arena.cancel_match(&id));
    assert_eq!(handle.state(), MatchState::Cancelled);
    assert!(!arena.cancel_match(&id));

    assert_eq!(
        arena.get_result(&id, WAIT).await.unwrap_err(),
        ArenaError::Cancelled(id.clone())
    );

    arena.start().unwrap();
    arena.stop(StopMode::Drain).await.unwrap();
    assert_eq!(probe.executed(), vec!["kept"]);
    assert_eq!(arena.get_metrics().cancelled_count, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn running_match_cannot_be_cancelled() {
    let gate = Gate::closed();
    let probe = Probe::new(Arc::clone(&gate));
    let arena = arena(ArenaConfig::default().with_workers(1), &probe);
    arena.start().unwrap();

    let id = MatchId::from("busy");
    arena.queue_match(duel("busy"), 0).unwrap();
    wait_for_state(&arena, &id, MatchState::Running).await;

    assert!(!arena.cancel_match(&id));
    assert_eq!(
        arena.try_cancel(&id).unwrap_err(),
        ArenaError::CancellationDenied {
            match_id: id.clone(),
            state: MatchState::Running,
        }
    );
    assert_eq!(
        arena.try_cancel(&MatchId::from("ghost")).unwrap_err(),
        ArenaError::UnknownMatch(MatchId::from("ghost"))
    );

    gate.open();
    arena.get_result(&id, WAIT).await.unwrap();
    arena.stop(StopMode::Drain).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn timeout_leaves_match_running() {
    let gate = Gate::closed();
    let probe = Probe::new(Arc::clone(&gate));
    let arena = arena(ArenaConfig::default(), &probe);
    arena.start().unwrap();

    let id = MatchId::from("slow");
    arena.queue_match(duel("slow"), 0).unwrap();

    let err = arena
        .get_result(&id, Duration::from_millis(20))
        .await
        .unwrap_err();
    assert!(matches!(err, ArenaError::Timeout { .. }));
    assert!(!arena.state(&id).unwrap().is_terminal());

    gate.open();
    let result = arena.get_result(&id, WAIT).await.unwrap();
    assert_eq!(result.match_id, id);
    arena.stop(StopMode::Drain).await.unwrap();
}

#[tokio::test]
async fn clear_cache_evicts_finished_matches() {
    let probe = Probe::new(Gate::opened());
    let arena = arena(ArenaConfig::default(), &probe);
    arena.start().unwrap();

    let id = MatchId::from("done");
    arena.queue_match(duel("done"), 0).unwrap().wait().await.unwrap();

    assert_eq!(arena.clear_cache(Duration::from_secs(3600)), 0);
    assert_eq!(arena.clear_cache(Duration::ZERO), 1);
    assert_eq!(arena.state(&id), None);
    assert_eq!(
        arena.get_result(&id, WAIT).await.unwrap_err(),
        ArenaError::UnknownMatch(id.clone())
    );

    // Evicted ids may be reused.
    arena.queue_match(duel("done"), 0).unwrap().wait().await.unwrap();
    arena.stop(StopMode::Drain).await.unwrap();
}

#[tokio::test]
async fn engine_results_and_events_flow_end_to_end() {
    let arena = Arena::new(ArenaConfig::default()).unwrap();
    let mut events = arena.subscribe();
    arena.start().unwrap();

    let battle = duel("e2e");
    let expected = simulate(&battle).unwrap();
    let handle = arena.queue_match(battle, 2).unwrap();
    let result = handle.wait().await.unwrap();

    assert_eq!(result.outcome, expected.outcome);
    assert_eq!(result.final_digest, expected.final_digest);

    let id = MatchId::from("e2e");
    assert_eq!(
        events.recv().await.unwrap(),
        ArenaEvent::Queued {
            match_id: id.clone(),
            priority: 2,
        }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        ArenaEvent::Started {
            match_id: id.clone()
        }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        ArenaEvent::Completed {
            match_id: id,
            outcome: expected.outcome,
            reason: expected.reason,
            rounds: expected.rounds,
        }
    );
    arena.stop(StopMode::Drain).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn halt_cancels_waiting_matches() {
    let gate = Gate::closed();
    let probe = Probe::new(Arc::clone(&gate));
    let arena = arena(ArenaConfig::default().with_workers(1), &probe);
    arena.start().unwrap();

    let first = MatchId::from("first");
    let second = MatchId::from("second");
    arena.queue_match(duel("first"), 0).unwrap();
    wait_for_state(&arena, &first, MatchState::Running).await;
    arena.queue_match(duel("second"), 0).unwrap();

    let stopping = {
        let arena = arena.clone();
        tokio::spawn(async move { arena.stop(StopMode::Halt).await })
    };
    wait_for_state(&arena, &second, MatchState::Cancelled).await;
    assert_eq!(
        arena.queue_match(duel("late"), 0).unwrap_err(),
        ArenaError::Stopped
    );

    gate.open();
    stopping.await.unwrap().unwrap();
    assert_eq!(arena.state(&first), Some(MatchState::Completed));
    assert_eq!(probe.executed(), vec!["first"]);
}

#[tokio::test]
async fn drain_finishes_queued_work() {
    let probe = Probe::new(Gate::opened());
    let arena = arena(ArenaConfig::default().with_workers(2), &probe);
    arena.start().unwrap();

    for n in 0..5 {
        arena.queue_match(duel(&format!("m-{n}")), 0).unwrap();
    }
    arena.stop(StopMode::Drain).await.unwrap();

    for n in 0..5 {
        let id = MatchId::from(format!("m-{n}"));
        assert_eq!(arena.state(&id), Some(MatchState::Completed));
    }
    assert_eq!(arena.get_metrics().completed_count, 5);
    assert_eq!(arena.start().unwrap_err(), ArenaError::Stopped);
    assert_eq!(
        arena.queue_match(duel("after"), 0).unwrap_err(),
        ArenaError::Stopped
    );
}

#[tokio::test]
async fn stopping_before_start_cancels_the_queue() {
    let probe = Probe::new(Gate::opened());
    let arena = arena(ArenaConfig::default(), &probe);
    let handle = arena.queue_match(duel("never"), 0).unwrap();

    arena.stop(StopMode::Drain).await.unwrap();

    assert_eq!(
        handle.wait().await.unwrap_err(),
        ArenaError::Cancelled(MatchId::from("never"))
    );
    assert!(probe.executed().is_empty());
}
