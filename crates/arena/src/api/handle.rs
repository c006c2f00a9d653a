//! Completion handle returned by [`crate::Arena::queue_match`].
use std::sync::Arc;
use std::time::Duration;

use battle_core::{BattleResult, MatchId};
use tokio::sync::watch;

use super::errors::{ArenaError, Result};
use crate::state::{MatchState, MatchStatus};

/// Resolves when its match reaches a terminal state.
///
/// Cloning is cheap; every clone observes the same match.
#[derive(Clone, Debug)]
pub struct MatchHandle {
    match_id: MatchId,
    status: watch::Receiver<MatchStatus>,
}

impl MatchHandle {
    pub(crate) fn new(match_id: MatchId, status: watch::Receiver<MatchStatus>) -> Self {
        Self { match_id, status }
    }

    pub fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    /// Current state, without waiting.
    pub fn state(&self) -> MatchState {
        self.status.borrow().state()
    }

    /// Waits until the match finishes.
    pub async fn wait(mut self) -> Result<Arc<BattleResult>> {
        await_terminal(&self.match_id, &mut self.status, None).await
    }

    /// Waits up to `timeout`. On [`ArenaError::Timeout`] the match keeps
    /// running and the handle can be awaited again.
    pub async fn wait_timeout(&mut self, timeout: Duration) -> Result<Arc<BattleResult>> {
        await_terminal(&self.match_id, &mut self.status, Some(timeout)).await
    }
}

/// Shared by handles and [`crate::Arena::get_result`].
pub(crate) async fn await_terminal(
    match_id: &MatchId,
    status: &mut watch::Receiver<MatchStatus>,
    timeout: Option<Duration>,
) -> Result<Arc<BattleResult>> {
    let terminal = async {
        status
            .wait_for(MatchStatus::is_terminal)
            .await
            .map(|status| status.clone())
    };

    let waited = match timeout {
        Some(timeout) => tokio::time::timeout(timeout, terminal)
            .await
            .map_err(|_| ArenaError::Timeout {
                match_id: match_id.clone(),
                timeout,
            })?,
        None => terminal.await,
    };

    // The sender only goes away when the arena drops the match.
    match waited.map_err(|_| ArenaError::Stopped)? {
        MatchStatus::Completed(result) => Ok(result),
        MatchStatus::Failed(source) => Err(ArenaError::MatchFailed {
            match_id: match_id.clone(),
            source,
        }),
        MatchStatus::Cancelled => Err(ArenaError::Cancelled(match_id.clone())),
        MatchStatus::Queued | MatchStatus::Running => Err(ArenaError::Stopped),
    }
}
