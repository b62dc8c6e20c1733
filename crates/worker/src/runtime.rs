// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drives a single worker's lifecycle: register, poll, claim, execute,
//! report, repeat (spec.md §4.6).

use crate::learnings::summarize_recent_learnings;
use smith_adapters::ExecutionEngine;
use smith_core::{Clock, SystemClock, TaskMemory, TaskStatus};
use smith_coordinator::{Coordinator, CoordinatorError};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default poll interval (spec.md §4.6: "default 100 ms; tests use 30-50
/// ms").
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How many recent same-role completions feed the learnings summary
/// (spec.md §4.6 step 7: "a small window, e.g. the last 5").
pub const DEFAULT_LEARNINGS_WINDOW: usize = 5;

/// Static configuration for one worker loop (spec.md §4.6 "Role
/// assignment": role is set at construction).
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub agent_id: String,
    /// Empty string means "process any task" (auxiliary worker).
    pub role: String,
    pub pid: u32,
    pub poll_interval: Duration,
    pub learnings_window: usize,
}

impl WorkerConfig {
    pub fn new(agent_id: impl Into<String>, role: impl Into<String>, pid: u32) -> Self {
        Self {
            agent_id: agent_id.into(),
            role: role.into(),
            pid,
            poll_interval: DEFAULT_POLL_INTERVAL,
            learnings_window: DEFAULT_LEARNINGS_WINDOW,
        }
    }
}

/// One worker's runtime loop. Holds no mutable state beyond its own id and
/// poll interval (spec.md §3 "Workers hold no persistent references beyond
/// their own id and poll interval").
pub struct WorkerRuntime<C: Clock = SystemClock> {
    config: WorkerConfig,
    coordinator: Coordinator<C>,
    engine: Arc<dyn ExecutionEngine>,
    stop: CancellationToken,
}

impl<C: Clock> WorkerRuntime<C> {
    pub fn new(config: WorkerConfig, coordinator: Coordinator<C>, engine: Arc<dyn ExecutionEngine>) -> Self {
        Self {
            config,
            coordinator,
            engine,
            stop: CancellationToken::new(),
        }
    }

    /// Closes the local stop signal. Idempotent and safe to call from any
    /// context (spec.md §4.6 "Cancellation and shutdown").
    pub fn stop_handle(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// Runs until the external `cancellation` token or this worker's own
    /// stop signal fires, whichever comes first. Unregisters itself on
    /// exit.
    pub async fn run(self, cancellation: CancellationToken) {
        let now = self.coordinator_epoch_ms();
        if let Err(err) = self
            .coordinator
            .registry()
            .register(&self.config.agent_id, &self.config.role, self.config.pid, now)
        {
            warn!(agent_id = %self.config.agent_id, error = %err, "worker failed to register");
            return;
        }
        info!(agent_id = %self.config.agent_id, role = %self.config.role, "worker started");

        let mut ticker = tokio::time::interval(self.config.poll_interval);
        loop {
            tokio::select! {
                _ = cancellation.cancelled() => break,
                _ = self.stop.cancelled() => break,
                _ = ticker.tick() => {
                    self.tick(&cancellation).await;
                }
            }
        }

        if let Err(err) = self.coordinator.registry().unregister(&self.config.agent_id) {
            warn!(agent_id = %self.config.agent_id, error = %err, "worker failed to unregister");
        }
        info!(agent_id = %self.config.agent_id, "worker stopped");
    }

    fn coordinator_epoch_ms(&self) -> u64 {
        // The registry API wants a timestamp, not a clock, so the loop
        // reads one through whatever clock the coordinator was built with.
        self.coordinator.events().epoch_ms()
    }

    async fn tick(&self, cancellation: &CancellationToken) {
        let agent_id = &self.config.agent_id;

        if let Err(err) = self
            .coordinator
            .registry()
            .heartbeat(agent_id, self.coordinator_epoch_ms())
        {
            // A failed heartbeat is logged but does not exit the loop.
            warn!(agent_id, error = %err, "heartbeat failed");
        }

        let available = match self.coordinator.get_available_tasks(&self.config.role) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(agent_id, error = %err, "failed to fetch available tasks");
                return;
            }
        };
        let Some(candidate) = available.into_iter().next() else {
            return;
        };

        let claimed = match self.coordinator.claim_task(candidate.id.as_str(), agent_id) {
            Ok(task) => task,
            Err(CoordinatorError::NotClaimable(_)) => return,
            Err(err) => {
                warn!(agent_id, error = %err, "claim failed");
                return;
            }
        };
        debug!(agent_id, task_id = %claimed.id, "claimed task");

        let recent = self
            .coordinator
            .get_tasks_by_status(TaskStatus::Done)
            .unwrap_or_default();
        let description = summarize_recent_learnings(
            &claimed.description,
            &recent,
            &self.config.role,
            self.config.learnings_window,
        );

        let result = self
            .engine
            .execute_task(cancellation.clone(), &self.config.role, &claimed.title, &description)
            .await;

        match result {
            Ok(output) => {
                if let Err(err) = self.coordinator.complete_task(claimed.id.as_str(), &output) {
                    warn!(agent_id, task_id = %claimed.id, error = %err, "complete_task failed");
                }
            }
            Err(smith_adapters::ExecutionError::Cancelled) => {
                // Honour cancellation mid-execution: return without writing
                // a result (spec.md §4.6 step 8).
            }
            Err(err) => {
                if let Err(store_err) = self.coordinator.fail_task(claimed.id.as_str(), &err.to_string()) {
                    warn!(agent_id, task_id = %claimed.id, error = %store_err, "fail_task failed");
                }
            }
        }
    }
}

/// Attach extracted learnings/tried-approaches to a completed task, as the
/// runtime optionally does after `CompleteTask` (spec.md §4.6 step 9).
pub fn record_learnings<C: Clock>(
    coordinator: &Coordinator<C>,
    task_id: &str,
    memory: TaskMemory,
) -> Result<(), CoordinatorError> {
    coordinator.record_memory(task_id, memory)
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
