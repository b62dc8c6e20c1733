use crate::prelude::fresh_coordinator;

#[test]
fn s3_error_history_survives_a_later_successful_completion() {
    let coordinator = fresh_coordinator();
    let task = coordinator.create_task("x", "desc", "implementation").unwrap();
    coordinator.registry().register("a1", "implementation", 1, 0).unwrap();
    coordinator.registry().register("a2", "implementation", 2, 0).unwrap();

    coordinator.claim_task(task.id.as_str(), "a1").unwrap();
    coordinator.fail_task(task.id.as_str(), "timeout").unwrap();

    let failed = coordinator.get_task(task.id.as_str()).unwrap();
    assert_eq!(failed.status.as_str(), "backlog");
    assert_eq!(failed.error, "timeout");
    assert_eq!(failed.assigned_agent, "");
    assert_eq!(coordinator.get_task_stats().unwrap().backlog, 1);

    coordinator.claim_task(task.id.as_str(), "a2").unwrap();
    coordinator.complete_task(task.id.as_str(), "ok").unwrap();

    let done = coordinator.get_task(task.id.as_str()).unwrap();
    assert_eq!(done.status.as_str(), "done");
    assert_eq!(done.result, "ok");
    assert_eq!(done.error, "timeout");
}
