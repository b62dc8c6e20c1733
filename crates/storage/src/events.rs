// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event collection operations.
//!
//! Keys in the `events` tree are big-endian 8-byte encodings of the
//! monotonic event id, so sled's native byte-lexicographic key order
//! matches insertion/numeric order (spec.md §4.1 "Encoding").

use crate::store::{decode, decode_u64, encode, Store};
use crate::StorageError;
use sled::transaction::{ConflictableTransactionError, TransactionError, Transactional};
use smith_core::{Event, EventFilter};

const EVENT_SEQ_KEY: &str = "event_seq";

impl Store {
    /// Assign a fresh monotonic id and append, both inside one transaction
    /// spanning `meta` and `events` so the counter bump and the insert
    /// commit atomically — no id is ever burned without a matching event
    /// (spec.md §4.1 "Sequence generation for event ids is handled
    /// in-transaction so that ids are gap-free and strictly increasing").
    /// Mutates `event.id` to the assigned value.
    pub fn save_event(&self, event: &mut Event) -> Result<(), StorageError> {
        let snapshot = event.clone();
        let result = (&self.meta, &self.events).transaction(
            |(tx_meta, tx_events)| -> Result<u64, ConflictableTransactionError<StorageError>> {
                let previous = tx_meta.get(EVENT_SEQ_KEY.as_bytes())?;
                let id = decode_u64(previous.as_deref()).unwrap_or(0) + 1;
                tx_meta.insert(EVENT_SEQ_KEY.as_bytes(), id.to_be_bytes().to_vec())?;

                let mut record = snapshot.clone();
                record.id = id;
                let bytes = encode(&record).map_err(ConflictableTransactionError::Abort)?;
                tx_events.insert(id.to_be_bytes().to_vec(), bytes)?;
                Ok(id)
            },
        );
        match result {
            Ok(id) => {
                event.id = id;
                Ok(())
            }
            Err(TransactionError::Abort(e)) => Err(e),
            Err(TransactionError::Storage(e)) => Err(e.into()),
        }
    }

    /// Matching events in ascending id (== insertion) order. Corrupted
    /// entries are skipped rather than aborting the scan.
    pub fn query_events(&self, filter: &EventFilter) -> Result<Vec<Event>, StorageError> {
        let events = self
            .events
            .iter()
            .values()
            .filter_map(|r| r.ok())
            .filter_map(|bytes| decode::<Event>(&bytes))
            .filter(|e| filter.matches(e))
            .collect();
        Ok(events)
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
