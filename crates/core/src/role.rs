// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker role tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of worker role tags.
///
/// Task records carry a role as a raw string where empty means "any role
/// may claim this task" (see [`crate::task::Task::role`]); agent records
/// carry one of these five variants and never the empty/wildcard case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Coordinator,
    Planning,
    Implementation,
    Testing,
    Review,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Coordinator => "coordinator",
            Role::Planning => "planning",
            Role::Implementation => "implementation",
            Role::Testing => "testing",
            Role::Review => "review",
        }
    }

    /// Parse a role tag, returning `None` for the empty/wildcard string or
    /// anything outside the closed set.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "coordinator" => Some(Role::Coordinator),
            "planning" => Some(Role::Planning),
            "implementation" => Some(Role::Implementation),
            "testing" => Some(Role::Testing),
            "review" => Some(Role::Review),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[path = "role_tests.rs"]
mod tests;
