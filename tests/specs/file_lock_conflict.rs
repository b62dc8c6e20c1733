use crate::prelude::fresh_coordinator;
use smith_coordinator::CoordinatorError;

#[test]
fn s4_a_conflicting_lock_fails_and_the_holder_keeps_its_lease() {
    let coordinator = fresh_coordinator();
    coordinator.registry().register("a1", "implementation", 1, 0).unwrap();
    coordinator.registry().register("a2", "implementation", 2, 0).unwrap();

    coordinator
        .lock_files("taskX", "a1", &["shared.go".to_string()])
        .unwrap();

    let err = coordinator
        .lock_files("taskY", "a2", &["shared.go".to_string()])
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::NotClaimable(_)));

    let locks = coordinator.get_active_locks().unwrap();
    assert_eq!(locks.len(), 1);
    assert_eq!(locks[0].holder_agent_id, "a1");
}
