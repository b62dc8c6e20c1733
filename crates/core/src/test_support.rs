// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test builders for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Agent, AgentId, Task, TaskId};

pub fn sample_task(id: &str, role: &str) -> Task {
    Task::new(
        TaskId::new(id),
        format!("title for {id}"),
        format!("description for {id}"),
        role.to_string(),
        1_000,
    )
}

pub fn sample_agent(id: &str, role: &str) -> Agent {
    Agent::new(AgentId::new(id), role.to_string(), 1234, 1_000)
}
