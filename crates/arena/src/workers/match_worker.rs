//! Long-lived worker draining the match queue.
//!
//! Each worker takes one match at a time and runs the executor on the
//! blocking pool, so simulations never stall the async runtime. Workers idle
//! on the arena's [`Notify`](tokio::sync::Notify) while the queue is empty.

use std::sync::Arc;

use battle_core::EngineError;
use tracing::{debug, error};

use crate::runtime::{Job, Shared};

pub(crate) async fn run_worker(index: usize, shared: Arc<Shared>) {
    debug!(worker = index, "arena worker started");

    loop {
        // Registered before looking at the queue so a stop signal sent in
        // between is not lost.
        let notified = shared.work().notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        match shared.next_job() {
            Job::Run(battle) => {
                let match_id = battle.id().clone();
                debug!(worker = index, %match_id, "executing match");

                let executor = shared.executor();
                let outcome = tokio::task::spawn_blocking(move || executor.execute(&battle))
                    .await
                    .unwrap_or_else(|err| {
                        error!(worker = index, %match_id, error = %err, "executor task panicked");
                        Err(EngineError::internal(
                            match_id.as_str(),
                            0,
                            format!("executor task failed: {err}"),
                        ))
                    });

                shared.finish(&match_id, outcome);
            }
            Job::Wait => notified.await,
            Job::Exit => break,
        }
    }

    debug!(worker = index, "arena worker exited");
}
