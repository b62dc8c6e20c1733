// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event log: typed publish plus filtered query and polling subscription
//! over the storage-level events collection (spec.md §4.2).

use crate::CoordinatorError;
use smith_core::{Clock, Event, EventFilter, EventType, SystemClock};
use smith_storage::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Query parameters beyond the storage-level [`EventFilter`]: the
/// id-cursor, emitter role, and file-path filters the Event Log layer
/// applies on top of `QueryEvents` (spec.md §4.2 "Query").
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub filter: EventFilter,
    pub since_id: Option<u64>,
    pub agent_role: Option<String>,
    pub file_path: Option<String>,
}

/// Minimum bounded-buffer capacity for [`EventLog::subscribe`]
/// (spec.md §9 "Event backpressure").
pub const MIN_SUBSCRIBE_BUFFER: usize = 10;

#[derive(Clone)]
pub struct EventLog<C: Clock = SystemClock> {
    store: Arc<Store>,
    clock: C,
}

impl EventLog<SystemClock> {
    pub fn new(store: Arc<Store>) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<C: Clock> EventLog<C> {
    pub fn with_clock(store: Arc<Store>, clock: C) -> Self {
        Self { store, clock }
    }

    /// Reads the current time off this log's clock, for callers that need
    /// a timestamp but hold no clock of their own (e.g. the worker loop's
    /// heartbeat).
    pub fn epoch_ms(&self) -> u64 {
        self.clock.epoch_ms()
    }

    /// Delegates to `SaveEvent`, returning the assigned id.
    pub fn publish(&self, mut event: Event) -> Result<u64, CoordinatorError> {
        event.timestamp_epoch_ms = self.clock.epoch_ms();
        self.store.save_event(&mut event)?;
        Ok(event.id)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn publish_with_data(
        &self,
        agent_id: &str,
        role: &str,
        event_type: EventType,
        task_id: Option<String>,
        file_path: Option<String>,
        session_id: Option<String>,
        data: impl serde::Serialize,
    ) -> Result<u64, CoordinatorError> {
        let data = serde_json::to_value(data).map_err(smith_storage::StorageError::from)?;
        self.publish(Event {
            id: 0,
            timestamp_epoch_ms: 0,
            agent_id: agent_id.to_string(),
            role: role.to_string(),
            event_type,
            task_id,
            file_path,
            data,
            session_id,
        })
    }

    /// Extends the storage-level filter with `since_id` (exclusive),
    /// `agent_role`, and `file_path`, in ascending id order.
    pub fn query(&self, query: &EventQuery) -> Result<Vec<Event>, CoordinatorError> {
        let mut events = self.store.query_events(&query.filter)?;
        if let Some(since_id) = query.since_id {
            events.retain(|e| e.id > since_id);
        }
        if let Some(role) = &query.agent_role {
            events.retain(|e| &e.role == role);
        }
        if let Some(path) = &query.file_path {
            events.retain(|e| e.file_path.as_deref() == Some(path.as_str()));
        }
        events.sort_by_key(|e| e.id);
        Ok(events)
    }

    /// A bounded, cooperative polling stream. Each tick re-queries with
    /// `since_id` set to the last-delivered id and sends new events in
    /// order. The channel closes (no more sends) once `cancel` resolves;
    /// already-queued events are still delivered to the receiver.
    pub fn subscribe(
        &self,
        mut query: EventQuery,
        poll_interval: Duration,
        mut cancel: tokio::sync::oneshot::Receiver<()>,
    ) -> mpsc::Receiver<Event>
    where
        C: Clone + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(MIN_SUBSCRIBE_BUFFER);
        let log = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(poll_interval);
            loop {
                tokio::select! {
                    _ = &mut cancel => break,
                    _ = ticker.tick() => {
                        let events = match log.query(&query) {
                            Ok(events) => events,
                            Err(_) => continue,
                        };
                        for event in events {
                            query.since_id = Some(event.id);
                            if tx.send(event).await.is_err() {
                                return;
                            }
                        }
                    }
                }
            }
        });
        rx
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
