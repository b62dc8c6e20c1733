// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_agent_starts_idle_with_no_task() {
    let a = Agent::new(AgentId::new("a1"), "implementation".into(), 100, 1000);
    assert_eq!(a.status, AgentStatus::Idle);
    assert!(a.current_task_id.is_none());
    assert_eq!(a.last_heartbeat_epoch_ms, 1000);
}

#[test]
fn is_stale_false_within_timeout() {
    let mut a = Agent::new(AgentId::new("a1"), "testing".into(), 1, 0);
    a.last_heartbeat_epoch_ms = 10_000;
    assert!(!a.is_stale(15_000, 30_000));
}

#[test]
fn is_stale_true_past_timeout() {
    let mut a = Agent::new(AgentId::new("a1"), "testing".into(), 1, 0);
    a.last_heartbeat_epoch_ms = 10_000;
    assert!(a.is_stale(50_000, 30_000));
}

#[test]
fn is_stale_exactly_at_timeout_is_not_stale() {
    let mut a = Agent::new(AgentId::new("a1"), "testing".into(), 1, 0);
    a.last_heartbeat_epoch_ms = 10_000;
    assert!(!a.is_stale(40_000, 30_000));
}

#[test]
fn status_display() {
    assert_eq!(AgentStatus::Active.to_string(), "active");
    assert_eq!(AgentStatus::Idle.to_string(), "idle");
    assert_eq!(AgentStatus::Dead.to_string(), "dead");
}
