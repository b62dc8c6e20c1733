use crate::prelude::fresh_coordinator;
use smith_adapters::FakeEngine;
use smith_worker::{Orchestrator, WorkerConfig};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn s6_concurrent_workers_drain_the_queue() {
    let coordinator = fresh_coordinator();
    for i in 0..5 {
        coordinator
            .create_task(&format!("task {i}"), "desc", "implementation")
            .unwrap();
    }

    let engine = Arc::new(FakeEngine::with_delay(Duration::from_millis(5)));
    let configs = (0..3)
        .map(|i| {
            let mut config = WorkerConfig::new(format!("agent-{i}"), "implementation", 1);
            config.poll_interval = Duration::from_millis(10);
            config
        })
        .collect();

    let mut orchestrator = Orchestrator::new(coordinator.clone()).with_sweep_interval(Duration::from_secs(60));
    orchestrator.spawn(configs, engine);

    let mut drained = false;
    for _ in 0..200 {
        let stats = coordinator.get_task_stats().unwrap();
        if stats.done == 5 && stats.backlog == 0 && stats.wip == 0 {
            drained = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    orchestrator.shutdown().await;

    assert!(drained, "expected all five tasks to reach done within the bound");

    let events = coordinator
        .events()
        .query(&smith_coordinator::EventQuery::default())
        .unwrap();
    let mut agent_ids_by_task: std::collections::HashMap<String, std::collections::HashSet<String>> =
        std::collections::HashMap::new();
    for event in events.iter().filter(|e| e.event_type == smith_core::EventType::TaskClaimed) {
        if let Some(task_id) = &event.task_id {
            agent_ids_by_task
                .entry(task_id.clone())
                .or_default()
                .insert(event.agent_id.clone());
        }
    }
    for (task_id, agents) in agent_ids_by_task {
        assert_eq!(agents.len(), 1, "task {task_id} was claimed by more than one agent");
    }
}
