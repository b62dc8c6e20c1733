// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic stand-in engine for test environments and for workers
//! configured without a real execution backend (spec.md §6: "the worker's
//! `Execute` method is expected to synthesize a deterministic short-delay
//! result for test environments").

use super::{ExecutionEngine, ExecutionError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// One recorded invocation, for assertions in worker/orchestrator tests.
#[derive(Debug, Clone)]
pub struct FakeCall {
    pub role_tag: String,
    pub title: String,
    pub description: String,
}

/// Always succeeds after a short, configurable delay, synthesizing a
/// result string from the task title. Records every call it receives.
#[derive(Clone)]
pub struct FakeEngine {
    delay: Duration,
    calls: Arc<Mutex<Vec<FakeCall>>>,
    fail_next: Arc<Mutex<Option<String>>>,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(10))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().clone()
    }

    /// Make the next `execute_task` call fail with the given message.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock() = Some(message.into());
    }
}

#[async_trait]
impl ExecutionEngine for FakeEngine {
    async fn execute_task(
        &self,
        cancellation: CancellationToken,
        role_tag: &str,
        title: &str,
        description: &str,
    ) -> Result<String, ExecutionError> {
        self.calls.lock().push(FakeCall {
            role_tag: role_tag.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        });

        tokio::select! {
            _ = cancellation.cancelled() => Err(ExecutionError::Cancelled),
            _ = tokio::time::sleep(self.delay) => {
                if let Some(message) = self.fail_next.lock().take() {
                    return Err(ExecutionError::Failed(message));
                }
                Ok(format!("completed: {title}"))
            }
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
