// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use smith_core::FakeClock;
use smith_storage::Store;
use std::time::Duration;

fn log() -> EventLog<FakeClock> {
    EventLog::with_clock(Arc::new(Store::temporary().unwrap()), FakeClock::new())
}

fn event(event_type: EventType, agent_id: &str, role: &str) -> Event {
    Event {
        id: 0,
        timestamp_epoch_ms: 0,
        agent_id: agent_id.to_string(),
        role: role.to_string(),
        event_type,
        task_id: None,
        file_path: None,
        data: serde_json::Value::Null,
        session_id: None,
    }
}

#[test]
fn publish_assigns_increasing_ids_and_stamps_the_clock() {
    let log = log();
    let first = log.publish(event(EventType::TaskCreated, "a1", "implementation")).unwrap();
    let second = log.publish(event(EventType::TaskClaimed, "a1", "implementation")).unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);

    let events = log.query(&EventQuery::default()).unwrap();
    assert!(events[0].timestamp_epoch_ms > 0);
}

#[test]
fn query_since_id_is_exclusive() {
    let log = log();
    log.publish(event(EventType::TaskCreated, "a1", "implementation")).unwrap();
    let second = log.publish(event(EventType::TaskClaimed, "a1", "implementation")).unwrap();

    let results = log
        .query(&EventQuery {
            since_id: Some(1),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, second);
}

#[test]
fn query_filters_by_agent_role() {
    let log = log();
    log.publish(event(EventType::TaskCreated, "a1", "implementation")).unwrap();
    log.publish(event(EventType::TaskCreated, "a2", "testing")).unwrap();

    let results = log
        .query(&EventQuery {
            agent_role: Some("testing".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].agent_id, "a2");
}

#[tokio::test]
async fn subscribe_delivers_events_published_after_it_starts() {
    let log = log();
    let (cancel_tx, cancel_rx) = tokio::sync::oneshot::channel();
    let mut rx = log.subscribe(EventQuery::default(), Duration::from_millis(5), cancel_rx);

    log.publish(event(EventType::TaskCreated, "a1", "implementation")).unwrap();

    let received = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(received.event_type, EventType::TaskCreated);

    let _ = cancel_tx.send(());
}
