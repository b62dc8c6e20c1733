// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::temp_store;
use smith_core::test_support::sample_agent;

#[test]
fn register_then_get_round_trips() {
    let store = temp_store().unwrap();
    let agent = sample_agent("agent-1", "implementation");
    store.register_agent(&agent).unwrap();

    let fetched = store.get_agent("agent-1").unwrap();
    assert_eq!(fetched.role, "implementation");
    assert_eq!(fetched.status, AgentStatus::Idle);
}

#[test]
fn register_preserves_existing_heartbeat() {
    let store = temp_store().unwrap();
    let mut agent = sample_agent("agent-1", "implementation");
    agent.started_at_epoch_ms = 100;
    agent.last_heartbeat_epoch_ms = 100;
    store.register_agent(&agent).unwrap();
    store.update_heartbeat("agent-1", 500).unwrap();

    // A second register call (e.g. worker reconnecting) must not clobber
    // the heartbeat that has already advanced.
    let mut reregister = sample_agent("agent-1", "implementation");
    reregister.started_at_epoch_ms = 999;
    reregister.last_heartbeat_epoch_ms = 999;
    store.register_agent(&reregister).unwrap();

    let fetched = store.get_agent("agent-1").unwrap();
    assert_eq!(fetched.started_at_epoch_ms, 100);
    assert_eq!(fetched.last_heartbeat_epoch_ms, 500);
}

#[test]
fn unregister_removes_the_record() {
    let store = temp_store().unwrap();
    let agent = sample_agent("agent-1", "implementation");
    store.register_agent(&agent).unwrap();
    store.unregister_agent("agent-1").unwrap();

    let err = store.get_agent("agent-1").unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[test]
fn assign_task_sets_active_and_clear_sets_idle() {
    let store = temp_store().unwrap();
    let agent = sample_agent("agent-1", "implementation");
    store.register_agent(&agent).unwrap();

    store.assign_agent_task("agent-1", "task-001").unwrap();
    let assigned = store.get_agent("agent-1").unwrap();
    assert_eq!(assigned.status, AgentStatus::Active);
    assert_eq!(assigned.current_task_id.as_deref(), Some("task-001"));

    store.clear_agent_task("agent-1").unwrap();
    let cleared = store.get_agent("agent-1").unwrap();
    assert_eq!(cleared.status, AgentStatus::Idle);
    assert!(cleared.current_task_id.is_none());
}

#[test]
fn list_agents_filters_by_role() {
    let store = temp_store().unwrap();
    store
        .register_agent(&sample_agent("agent-1", "implementation"))
        .unwrap();
    store
        .register_agent(&sample_agent("agent-2", "testing"))
        .unwrap();

    let implementation_only = store.list_agents(Some("implementation")).unwrap();
    assert_eq!(implementation_only.len(), 1);
    assert_eq!(implementation_only[0].id.as_str(), "agent-1");

    let all = store.list_agents(None).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn mark_agents_dead_only_affects_stale_active_agents() {
    let store = temp_store().unwrap();

    let mut stale_active = sample_agent("agent-1", "implementation");
    stale_active.status = AgentStatus::Active;
    stale_active.last_heartbeat_epoch_ms = 0;
    store.register_agent(&stale_active).unwrap();

    let mut fresh_active = sample_agent("agent-2", "implementation");
    fresh_active.status = AgentStatus::Active;
    fresh_active.last_heartbeat_epoch_ms = 9_000;
    store.register_agent(&fresh_active).unwrap();

    let mut stale_idle = sample_agent("agent-3", "implementation");
    stale_idle.status = AgentStatus::Idle;
    stale_idle.last_heartbeat_epoch_ms = 0;
    store.register_agent(&stale_idle).unwrap();

    let affected = store.mark_agents_dead(10_000, 5_000).unwrap();
    assert_eq!(affected, 1);

    assert_eq!(store.get_agent("agent-1").unwrap().status, AgentStatus::Dead);
    assert_eq!(store.get_agent("agent-2").unwrap().status, AgentStatus::Active);
    assert_eq!(store.get_agent("agent-3").unwrap().status, AgentStatus::Idle);
}
