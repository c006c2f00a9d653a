//! Seam between the queue and the battle engine.

use battle_core::{BattleMatch, BattleResult, EngineError};

/// Runs one match to completion.
///
/// Called from a blocking thread, once per dispatched match. Implementations
/// must not assume which worker calls them.
pub trait MatchExecutor: Send + Sync + 'static {
    fn execute(&self, battle: &BattleMatch) -> Result<BattleResult, EngineError>;
}

/// Executor backed by [`battle_core::simulate`].
#[derive(Debug, Default, Clone, Copy)]
pub struct EngineExecutor;

impl MatchExecutor for EngineExecutor {
    fn execute(&self, battle: &BattleMatch) -> Result<BattleResult, EngineError> {
        battle_core::simulate(battle)
    }
}

impl<F> MatchExecutor for F
where
    F: Fn(&BattleMatch) -> Result<BattleResult, EngineError> + Send + Sync + 'static,
{
    fn execute(&self, battle: &BattleMatch) -> Result<BattleResult, EngineError> {
        self(battle)
    }
}
