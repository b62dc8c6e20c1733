// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task collection operations.

use crate::store::{decode, decode_u64, encode, Store, TaskStats};
use crate::StorageError;
use sled::transaction::{abort, ConflictableTransactionError, TransactionError, Transactional};
use smith_core::{Task, TaskId, TaskStatus};

const TASK_SEQ_KEY: &str = "task_seq";

impl Store {
    /// Allocate the next `task-NNN` id from the dedicated sequence counter.
    /// Exposed as its own operation for callers that need an id ahead of an
    /// insert; [`Store::create_task_with_id`] is the gap-free combination of
    /// the two used by task creation proper.
    pub fn next_task_id(&self) -> Result<TaskId, StorageError> {
        let n = self.next_counter(TASK_SEQ_KEY)?;
        Ok(TaskId::new(format!("task-{n:03}")))
    }

    /// Insert a new task. Fails with `AlreadyExists` if the id collides.
    pub fn create_task(&self, task: &Task) -> Result<(), StorageError> {
        let key = task.id.as_str().as_bytes();
        let bytes = encode(task)?;
        let inserted = self
            .tasks
            .compare_and_swap(key, None as Option<&[u8]>, Some(bytes))?;
        if inserted.is_err() {
            return Err(StorageError::AlreadyExists {
                kind: "task",
                id: task.id.to_string(),
            });
        }
        Ok(())
    }

    /// Allocates the next `task-NNN` id and inserts the new task in one
    /// `(meta, tasks)` transaction, so a crash between allocation and
    /// insert can never burn an id (spec.md §9 "Task-id allocation race":
    /// gap-free, not just race-free).
    pub fn create_task_with_id(
        &self,
        title: &str,
        description: &str,
        role: &str,
        now_ms: u64,
    ) -> Result<Task, StorageError> {
        let result = (&self.meta, &self.tasks).transaction(
            |(tx_meta, tx_tasks)| -> Result<Task, ConflictableTransactionError<StorageError>> {
                let previous = tx_meta.get(TASK_SEQ_KEY.as_bytes())?;
                let n = decode_u64(previous.as_deref()).unwrap_or(0) + 1;
                tx_meta.insert(TASK_SEQ_KEY.as_bytes(), n.to_be_bytes().to_vec())?;

                let id = TaskId::new(format!("task-{n:03}"));
                let task = Task::new(id.clone(), title.to_string(), description.to_string(), role.to_string(), now_ms);
                let bytes = encode(&task).map_err(ConflictableTransactionError::Abort)?;
                tx_tasks.insert(id.as_str().as_bytes(), bytes)?;
                Ok(task)
            },
        );
        match result {
            Ok(task) => Ok(task),
            Err(TransactionError::Abort(e)) => Err(e),
            Err(TransactionError::Storage(e)) => Err(e.into()),
        }
    }

    pub fn get_task(&self, id: &str) -> Result<Task, StorageError> {
        let bytes = self
            .tasks
            .get(id.as_bytes())?
            .ok_or_else(|| StorageError::NotFound {
                kind: "task",
                id: id.to_string(),
            })?;
        decode(&bytes).ok_or_else(|| StorageError::NotFound {
            kind: "task",
            id: id.to_string(),
        })
    }

    /// Whole-record replacement. `updated_at_epoch_ms` is the caller's
    /// responsibility to bump (the coordinator owns the clock).
    pub fn update_task(&self, task: &Task) -> Result<(), StorageError> {
        let bytes = encode(task)?;
        self.tasks.insert(task.id.as_str().as_bytes(), bytes)?;
        Ok(())
    }

    /// All tasks, optionally filtered to one status, ordered by
    /// `created_at_epoch_ms` ascending. Corrupted entries are skipped
    /// rather than aborting the scan (spec.md §4.1 "Failure model").
    pub fn list_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>, StorageError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .values()
            .filter_map(|r| r.ok())
            .filter_map(|bytes| decode::<Task>(&bytes))
            .filter(|t| status.map_or(true, |s| t.status == s))
            .collect();
        tasks.sort_by_key(|t| t.created_at_epoch_ms);
        Ok(tasks)
    }

    /// Atomically claim a task: fails with `NotClaimable` unless the task is
    /// currently `Backlog`. At most one concurrent caller succeeds for a
    /// given task (spec.md §4.1 `ClaimTask`).
    pub fn claim_task(
        &self,
        task_id: &str,
        agent_id: &str,
        now_ms: u64,
    ) -> Result<Task, StorageError> {
        let key = task_id.as_bytes();
        let result = self
            .tasks
            .transaction(|tx| -> Result<Task, ConflictableTransactionError<StorageError>> {
                let current = tx.get(key)?.ok_or_else(|| {
                    abort(StorageError::NotFound {
                        kind: "task",
                        id: task_id.to_string(),
                    })
                })?;
                let mut task: Task = decode(&current).ok_or_else(|| {
                    abort(StorageError::NotFound {
                        kind: "task",
                        id: task_id.to_string(),
                    })
                })?;
                if task.status != TaskStatus::Backlog {
                    return Err(abort(StorageError::NotClaimable(task_id.to_string())));
                }
                task.status = TaskStatus::Wip;
                task.assigned_agent = agent_id.to_string();
                task.updated_at_epoch_ms = now_ms;
                let bytes = encode(&task).map_err(ConflictableTransactionError::Abort)?;
                tx.insert(key, bytes)?;
                Ok(task)
            });
        match result {
            Ok(task) => Ok(task),
            Err(TransactionError::Abort(e)) => Err(e),
            Err(TransactionError::Storage(e)) => Err(e.into()),
        }
    }

    /// Counts of tasks per status (spec.md §4.1 `GetTaskStats`).
    pub fn get_task_stats(&self) -> Result<TaskStats, StorageError> {
        let mut stats = TaskStats::default();
        for bytes in self.tasks.iter().values().filter_map(|r| r.ok()) {
            let Some(task) = decode::<Task>(&bytes) else {
                continue;
            };
            match task.status {
                TaskStatus::Backlog => stats.backlog += 1,
                TaskStatus::Wip => stats.wip += 1,
                TaskStatus::Review => stats.review += 1,
                TaskStatus::Done => stats.done += 1,
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
