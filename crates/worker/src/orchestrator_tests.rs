// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::runtime::WorkerConfig;
use crate::test_support::temp_coordinator;
use smith_adapters::FakeEngine;
use smith_core::TaskStatus;
use std::sync::Arc;
use std::time::Duration;

fn fast_config(agent_id: &str, role: &str) -> WorkerConfig {
    let mut config = WorkerConfig::new(agent_id, role, 1);
    config.poll_interval = Duration::from_millis(10);
    config
}

#[tokio::test]
async fn spawned_pool_drains_a_queue_of_matching_tasks() {
    let coordinator = temp_coordinator().unwrap();
    for i in 0..5 {
        coordinator
            .create_task(&format!("task {i}"), "desc", "implementation")
            .unwrap();
    }

    let engine = Arc::new(FakeEngine::with_delay(Duration::from_millis(5)));
    let configs = vec![
        fast_config("agent-1", "implementation"),
        fast_config("agent-2", "implementation"),
    ];

    let mut orchestrator = Orchestrator::new(coordinator.clone()).with_sweep_interval(Duration::from_secs(60));
    orchestrator.spawn(configs, engine);

    let mut drained = false;
    for _ in 0..100 {
        let stats = coordinator.get_task_stats().unwrap();
        if stats.backlog == 0 && stats.done == 5 {
            drained = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    orchestrator.shutdown().await;

    assert!(drained, "expected all five tasks to reach done");
}

#[tokio::test]
async fn liveness_sweep_releases_locks_held_by_a_stale_agent() {
    let coordinator = temp_coordinator().unwrap();
    coordinator.registry().register("stale-agent", "implementation", 1, 0).unwrap();
    coordinator
        .leases()
        .acquire("src/main.rs", "stale-agent", "task-001", 0)
        .unwrap();

    let mut orchestrator = Orchestrator::new(coordinator.clone())
        .with_sweep_interval(Duration::from_millis(10))
        .with_agent_timeout(Duration::from_millis(0));
    orchestrator.spawn(vec![], Arc::new(FakeEngine::new()));

    let mut released = false;
    for _ in 0..50 {
        if !coordinator.leases().is_locked("src/main.rs").unwrap() {
            released = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    orchestrator.shutdown().await;

    assert!(released, "expected the stale agent's lock to be released");
    assert!(coordinator.registry().get("stale-agent").is_err());
}

#[test]
fn task_status_backlog_is_the_initial_state() {
    // Sanity check that the fixture helpers agree with the lifecycle
    // invariants the orchestrator relies on.
    assert_eq!(TaskStatus::parse("backlog"), Some(TaskStatus::Backlog));
}
