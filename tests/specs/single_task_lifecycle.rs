use crate::prelude::fresh_coordinator;
use smith_core::EventType;

#[test]
fn s1_single_task_full_lifecycle() {
    let coordinator = fresh_coordinator();

    let task = coordinator.create_task("Implement auth", "desc", "implementation").unwrap();
    assert_eq!(coordinator.get_task_stats().unwrap().backlog, 1);

    coordinator.registry().register("a1", "implementation", 1, 0).unwrap();
    let claimed = coordinator.claim_task(task.id.as_str(), "a1").unwrap();
    assert_eq!(claimed.assigned_agent, "a1");

    let stats = coordinator.get_task_stats().unwrap();
    assert_eq!(stats.backlog, 0);
    assert_eq!(stats.wip, 1);

    let reloaded = coordinator.get_task(task.id.as_str()).unwrap();
    assert_eq!(reloaded.status.as_str(), "wip");
    assert_eq!(reloaded.assigned_agent, "a1");

    coordinator.complete_task(task.id.as_str(), "done-msg").unwrap();
    let stats = coordinator.get_task_stats().unwrap();
    assert_eq!(stats.done, 1);

    let done = coordinator.get_task(task.id.as_str()).unwrap();
    assert_eq!(done.status.as_str(), "done");
    assert_eq!(done.result, "done-msg");

    let all = coordinator
        .events()
        .query(&smith_coordinator::EventQuery::default())
        .unwrap();
    let types: Vec<EventType> = all
        .iter()
        .filter(|e| e.task_id.as_deref() == Some(task.id.as_str()))
        .map(|e| e.event_type)
        .collect();
    assert_eq!(types, vec![EventType::TaskCreated, EventType::TaskClaimed, EventType::TaskCompleted]);
}
