// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An engine that always fails, for testing orchestrator/worker error
//! paths without depending on [`super::FakeEngine`]'s success behavior.

use super::{ExecutionEngine, ExecutionError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct NullEngine;

#[async_trait]
impl ExecutionEngine for NullEngine {
    async fn execute_task(
        &self,
        _cancellation: CancellationToken,
        _role_tag: &str,
        _title: &str,
        _description: &str,
    ) -> Result<String, ExecutionError> {
        Err(ExecutionError::Failed("no execution engine configured".to_string()))
    }
}

#[cfg(test)]
#[path = "null_tests.rs"]
mod tests;
