use crate::prelude::fresh_coordinator;
use std::sync::Arc;
use std::thread;

#[test]
fn s2_only_one_concurrent_claim_succeeds() {
    let coordinator = Arc::new(fresh_coordinator());
    let task = coordinator.create_task("x", "desc", "implementation").unwrap();
    coordinator.registry().register("a1", "implementation", 1, 0).unwrap();
    coordinator.registry().register("a2", "implementation", 2, 0).unwrap();

    let task_id = task.id.as_str().to_string();
    let (c1, id1) = (coordinator.clone(), task_id.clone());
    let (c2, id2) = (coordinator.clone(), task_id.clone());
    let h1 = thread::spawn(move || c1.claim_task(&id1, "a1"));
    let h2 = thread::spawn(move || c2.claim_task(&id2, "a2"));

    let r1 = h1.join().unwrap();
    let r2 = h2.join().unwrap();
    let successes = [&r1, &r2].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let stats = coordinator.get_task_stats().unwrap();
    assert_eq!(stats.wip, 1);
    let reloaded = coordinator.get_task(&task_id).unwrap();
    assert!(reloaded.assigned_agent == "a1" || reloaded.assigned_agent == "a2");
}
