// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Supervises a fixed pool of worker loops plus the periodic liveness
//! sweep that reclaims locks held by agents that stopped heartbeating
//! (spec.md §4.7).

use crate::runtime::{WorkerConfig, WorkerRuntime};
use smith_adapters::ExecutionEngine;
use smith_core::{Clock, SystemClock};
use smith_coordinator::{Coordinator, CoordinatorError};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Default liveness-sweep cadence (spec.md §4.4 "a periodic sweep, e.g.
/// every 5 seconds").
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Default agent heartbeat timeout before a sweep marks it dead
/// (spec.md §4.4 "default 30 seconds").
pub const DEFAULT_AGENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns a bounded set of worker loops and the background sweep task.
/// Dropping the orchestrator does not stop anything in flight; call
/// [`Orchestrator::shutdown`] for a clean stop.
pub struct Orchestrator<C: Clock = SystemClock> {
    coordinator: Coordinator<C>,
    sweep_interval: Duration,
    agent_timeout: Duration,
    cancellation: CancellationToken,
    tasks: JoinSet<()>,
}

impl<C: Clock> Orchestrator<C> {
    pub fn new(coordinator: Coordinator<C>) -> Self {
        Self {
            coordinator,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            agent_timeout: DEFAULT_AGENT_TIMEOUT,
            cancellation: CancellationToken::new(),
            tasks: JoinSet::new(),
        }
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = timeout;
        self
    }

    /// Spawns one worker loop per `configs` entry, all sharing `engine`,
    /// plus the liveness-sweep task. Returns a token the caller can cancel
    /// to stop the whole pool.
    pub fn spawn(&mut self, configs: Vec<WorkerConfig>, engine: Arc<dyn ExecutionEngine>) -> CancellationToken
    where
        C: Send + Sync + 'static,
    {
        for config in configs {
            let runtime = WorkerRuntime::new(config, self.coordinator.clone(), engine.clone());
            let cancel = self.cancellation.clone();
            self.tasks.spawn(async move { runtime.run(cancel).await });
        }

        let coordinator = self.coordinator.clone();
        let cancel = self.cancellation.clone();
        let sweep_interval = self.sweep_interval;
        let agent_timeout = self.agent_timeout;
        self.tasks.spawn(async move {
            run_liveness_sweep(coordinator, sweep_interval, agent_timeout, cancel).await;
        });

        self.cancellation.clone()
    }

    /// Cancels every spawned worker and the sweep task, then waits for
    /// them to finish.
    pub async fn shutdown(mut self) {
        self.cancellation.cancel();
        while self.tasks.join_next().await.is_some() {}
    }
}

/// Periodically finds agents that stopped heartbeating, releases any file
/// locks they held, and removes their registry records
/// (spec.md §4.4/§4.7 "Dead-agent cleanup").
async fn run_liveness_sweep<C: Clock>(
    coordinator: Coordinator<C>,
    sweep_interval: Duration,
    agent_timeout: Duration,
    cancellation: CancellationToken,
) {
    let mut ticker = tokio::time::interval(sweep_interval);
    loop {
        tokio::select! {
            _ = cancellation.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(err) = sweep_once(&coordinator, agent_timeout) {
                    warn!(error = %err, "liveness sweep failed");
                }
            }
        }
    }
}

fn sweep_once<C: Clock>(coordinator: &Coordinator<C>, agent_timeout: Duration) -> Result<(), CoordinatorError> {
    let now = coordinator.events().epoch_ms();
    let dead = coordinator
        .registry()
        .find_dead_agents(now, agent_timeout.as_millis() as u64)?;

    for agent in &dead {
        coordinator.leases().release_all(agent.id.as_str()).ok();
    }
    let cleaned = coordinator.registry().cleanup_dead_agents()?;
    if cleaned > 0 {
        info!(cleaned, "swept dead agents");
    }
    Ok(())
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
