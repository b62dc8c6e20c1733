// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Folds learnings from recently completed same-role tasks into a claimed
//! task's description before execution (spec.md §4.6 step 7).

use smith_core::Task;

/// Appends a bounded block of prior learnings to `description`, drawn from
/// the most recently completed tasks matching `role` that recorded any.
/// Returns `description` unchanged if nothing qualifies.
pub fn summarize_recent_learnings(description: &str, completed: &[Task], role: &str, window: usize) -> String {
    let mut matching: Vec<&Task> = completed.iter().filter(|t| t.matches_role(role)).collect();
    matching.sort_by_key(|t| std::cmp::Reverse(t.completed_at_epoch_ms.unwrap_or(0)));

    let mut notes: Vec<&str> = matching
        .into_iter()
        .filter_map(|t| t.memory.as_ref())
        .map(|m| m.learnings.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    notes.truncate(window);

    if notes.is_empty() {
        return description.to_string();
    }

    let mut out = String::from(description);
    out.push_str("\n\nLearnings from recent tasks:\n");
    for note in notes {
        out.push_str("- ");
        out.push_str(note);
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "learnings_tests.rs"]
mod tests;
