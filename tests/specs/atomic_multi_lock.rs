use crate::prelude::fresh_coordinator;

#[test]
fn s5_a_partial_conflict_leaves_no_partial_leases() {
    let coordinator = fresh_coordinator();
    coordinator.registry().register("a1", "implementation", 1, 0).unwrap();
    coordinator.registry().register("a2", "implementation", 2, 0).unwrap();

    coordinator
        .lock_files("taskX", "a1", &["f1".to_string(), "f2".to_string(), "f3".to_string()])
        .unwrap();
    assert_eq!(coordinator.get_active_locks().unwrap().len(), 3);

    let result = coordinator.lock_files("taskY", "a2", &["f3".to_string(), "f4".to_string()]);
    assert!(result.is_err());

    let locks = coordinator.get_active_locks().unwrap();
    assert_eq!(locks.len(), 3);
    assert!(!locks.iter().any(|l| l.path == "f4"));
}
