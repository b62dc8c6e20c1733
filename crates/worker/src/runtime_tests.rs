// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::temp_coordinator;
use smith_adapters::FakeEngine;
use smith_core::TaskStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn fast_config(agent_id: &str, role: &str) -> WorkerConfig {
    let mut config = WorkerConfig::new(agent_id, role, 1);
    config.poll_interval = Duration::from_millis(10);
    config
}

#[tokio::test]
async fn claims_executes_and_completes_a_matching_task() {
    let coordinator = temp_coordinator().unwrap();
    let task = coordinator.create_task("Add auth", "desc", "implementation").unwrap();

    let engine = Arc::new(FakeEngine::with_delay(Duration::from_millis(5)));
    let runtime = WorkerRuntime::new(fast_config("agent-1", "implementation"), coordinator.clone(), engine);
    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();
    let handle = tokio::spawn(runtime.run(run_cancel));

    tokio::time::sleep(Duration::from_millis(200)).await;
    cancel.cancel();
    handle.await.unwrap();

    let reloaded = coordinator.get_task(task.id.as_str()).unwrap();
    assert_eq!(reloaded.status, TaskStatus::Done);
    assert_eq!(reloaded.result, format!("completed: {}", task.title));
}

#[tokio::test]
async fn ignores_tasks_for_a_different_role() {
    let coordinator = temp_coordinator().unwrap();
    let task = coordinator.create_task("Write docs", "desc", "documentation").unwrap();

    let engine = Arc::new(FakeEngine::with_delay(Duration::from_millis(5)));
    let runtime = WorkerRuntime::new(fast_config("agent-1", "implementation"), coordinator.clone(), engine);
    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();
    let handle = tokio::spawn(runtime.run(run_cancel));

    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();
    handle.await.unwrap();

    let reloaded = coordinator.get_task(task.id.as_str()).unwrap();
    assert_eq!(reloaded.status, TaskStatus::Backlog);
}

#[tokio::test]
async fn engine_failure_returns_the_task_to_backlog_with_an_error() {
    let coordinator = temp_coordinator().unwrap();
    let task = coordinator.create_task("Add auth", "desc", "implementation").unwrap();

    let engine = Arc::new(FakeEngine::with_delay(Duration::from_millis(5)));
    engine.fail_next("boom");
    let runtime = WorkerRuntime::new(fast_config("agent-1", "implementation"), coordinator.clone(), engine);
    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();
    let handle = tokio::spawn(runtime.run(run_cancel));

    // The worker will retry immediately after the injected failure, so poll
    // for the first failed attempt rather than sleeping a fixed window: a
    // fixed sleep risks observing a successful retry instead.
    let mut seen_error = String::new();
    for _ in 0..50 {
        let reloaded = coordinator.get_task(task.id.as_str()).unwrap();
        if !reloaded.error.is_empty() {
            seen_error = reloaded.error;
            break;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    cancel.cancel();
    handle.await.unwrap();

    assert_eq!(seen_error, "engine failed: boom");
}

#[tokio::test]
async fn register_and_unregister_bracket_the_run() {
    let coordinator = temp_coordinator().unwrap();
    let engine = Arc::new(FakeEngine::with_delay(Duration::from_millis(5)));
    let runtime = WorkerRuntime::new(fast_config("agent-9", "implementation"), coordinator.clone(), engine);
    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();
    let handle = tokio::spawn(runtime.run(run_cancel));

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(coordinator.registry().get("agent-9").is_ok());

    cancel.cancel();
    handle.await.unwrap();
    assert!(coordinator.registry().get("agent-9").is_err());
}
