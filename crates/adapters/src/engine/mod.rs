// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution-engine contract.
//!
//! `ExecuteTask` is the single operation workers invoke (spec.md §6):
//! `ExecuteTask(cancellation, roleTag, title, description) -> (result, err)`.
//! The engine is free to block for long durations and must honour
//! cancellation.

mod fake;
mod null;

pub use fake::FakeEngine;
pub use null::NullEngine;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors an execution engine can surface. The worker runtime maps any of
/// these to `FailTask` (spec.md §7: "a user-visible failure is surfaced
/// exclusively through `FailTask`").
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("execution cancelled")]
    Cancelled,
    #[error("engine failed: {0}")]
    Failed(String),
}

/// The external collaborator that turns a task description into a result
/// string. Implementations are free to block; they must return promptly
/// once `cancellation` fires (spec.md §5 "in-flight engine execution is
/// expected to return").
#[async_trait]
pub trait ExecutionEngine: Send + Sync + 'static {
    async fn execute_task(
        &self,
        cancellation: CancellationToken,
        role_tag: &str,
        title: &str,
        description: &str,
    ) -> Result<String, ExecutionError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
