//! End-to-end scenarios against the engine façade.
//!
//! These mirror the flows the API layer drives: task CRUD, dependency
//! wiring with cycle rejection, the delete gate, derived counts, and the
//! blocked status overlay.

use deptrack_engine::{Error, ErrorBody, GraphService, Status, TaskId};

#[test]
fn direct_cycle_is_rejected_with_both_endpoints_in_path() {
    let service = GraphService::new();
    let a = service.create_task("A", "").id;
    let b = service.create_task("B", "").id;

    service.add_dependency(a, b).unwrap();
    let err = service.add_dependency(b, a).unwrap_err();

    let Error::CircularDependency { path } = &err else {
        panic!("expected CircularDependency, got {err:?}");
    };
    assert!(path.contains(&a));
    assert!(path.contains(&b));
}

#[test]
fn self_dependency_is_a_distinct_error_kind() {
    let service = GraphService::new();
    let a = service.create_task("A", "").id;

    let err = service.add_dependency(a, a).unwrap_err();
    assert_eq!(err, Error::SelfDependency { id: a });
    assert!(!matches!(err, Error::CircularDependency { .. }));
}

#[test]
fn three_task_cycle_reports_closed_loop_and_leaves_graph_intact() {
    let service = GraphService::new();
    let t1 = service.create_task("A", "").id;
    let t2 = service.create_task("B", "").id;
    let t3 = service.create_task("C", "").id;

    service.add_dependency(t1, t2).unwrap();
    service.add_dependency(t2, t3).unwrap();

    let err = service.add_dependency(t3, t1).unwrap_err();
    let Error::CircularDependency { path } = &err else {
        panic!("expected CircularDependency, got {err:?}");
    };
    // Closed loop ordering: rejected edge first, closing node at both ends
    assert_eq!(path, &vec![t3, t1, t2, t3]);

    // The committed graph is still exactly {(1->2), (2->3)}
    let deps_of_1: Vec<TaskId> = service
        .list_dependencies(t1)
        .unwrap()
        .iter()
        .map(|d| d.depends_on)
        .collect();
    assert_eq!(deps_of_1, vec![t2]);
    assert_eq!(service.dependency_count(t3).unwrap(), 0);
    assert_eq!(service.dependent_count(t1).unwrap(), 0);
}

#[test]
fn duplicate_dependency_is_idempotent() {
    let service = GraphService::new();
    let a = service.create_task("A", "").id;
    let b = service.create_task("B", "").id;

    let first = service.add_dependency(a, b).unwrap();
    let second = service.add_dependency(a, b).unwrap();

    // Same edge record, no second edge created
    assert_eq!(first.id, second.id);
    assert_eq!(service.dependency_count(a).unwrap(), 1);
    assert_eq!(service.dependent_count(b).unwrap(), 1);
}

#[test]
fn delete_is_gated_on_incident_edges() {
    let service = GraphService::new();
    let a = service.create_task("A", "").id;
    let b = service.create_task("B", "").id;
    let c = service.create_task("C", "").id;
    let edge = service.add_dependency(a, b).unwrap();

    // Incident edges in either direction block deletion
    assert_eq!(service.delete_task(a), Err(Error::HasDependents { id: a }));
    assert_eq!(service.delete_task(b), Err(Error::HasDependents { id: b }));

    // A task with zero incident edges deletes and vanishes from queries
    service.delete_task(c).unwrap();
    assert_eq!(service.get_task(c), Err(Error::TaskNotFound { id: c }));
    assert!(service.list_tasks().iter().all(|t| t.id != c));

    service.remove_dependency(edge.id).unwrap();
    service.delete_task(a).unwrap();
    service.delete_task(b).unwrap();
    assert!(service.list_tasks().is_empty());
}

#[test]
fn counts_update_only_for_affected_tasks() {
    let service = GraphService::new();
    let a = service.create_task("A", "").id;
    let b = service.create_task("B", "").id;
    let c = service.create_task("C", "").id;

    let edge = service.add_dependency(a, b).unwrap();
    assert_eq!(service.get_task(a).unwrap().dependency_count, 1);
    assert_eq!(service.get_task(b).unwrap().dependent_count, 1);
    assert_eq!(service.get_task(c).unwrap().dependency_count, 0);
    assert_eq!(service.get_task(c).unwrap().dependent_count, 0);

    service.remove_dependency(edge.id).unwrap();
    assert_eq!(service.get_task(a).unwrap().dependency_count, 0);
    assert_eq!(service.get_task(b).unwrap().dependent_count, 0);
}

#[test]
fn blocked_overlay_follows_prerequisite_status() {
    let service = GraphService::new();
    let t5 = service.create_task("five", "").id;
    let t6 = service.create_task("six", "").id;

    service.add_dependency(t5, t6).unwrap();
    assert_eq!(service.get_task(t5).unwrap().status, Status::Blocked);

    service.update_task_status(t6, Status::Completed).unwrap();
    assert_eq!(service.get_task(t5).unwrap().status, Status::Pending);

    // Reverting the prerequisite re-blocks the dependent
    service.update_task_status(t6, Status::Pending).unwrap();
    assert_eq!(service.get_task(t5).unwrap().status, Status::Blocked);
}

#[test]
fn missing_tasks_surface_as_task_not_found() {
    let service = GraphService::new();
    let a = service.create_task("A", "").id;

    assert_eq!(
        service.add_dependency(a, 999),
        Err(Error::TaskNotFound { id: 999 })
    );
    assert_eq!(
        service.update_task_status(999, Status::Completed),
        Err(Error::TaskNotFound { id: 999 })
    );
    assert_eq!(
        service.list_dependencies(999),
        Err(Error::TaskNotFound { id: 999 })
    );
    assert_eq!(
        service.remove_dependency(42),
        Err(Error::DependencyNotFound { id: 42 })
    );
}

#[test]
fn error_bodies_preserve_the_wire_contract() {
    let service = GraphService::new();
    let a = service.create_task("A", "").id;
    let b = service.create_task("B", "").id;
    service.add_dependency(a, b).unwrap();

    let body = ErrorBody::from(&service.add_dependency(b, a).unwrap_err());
    assert_eq!(body.error, "Circular dependency detected");
    assert_eq!(body.path, Some(vec![b, a, b]));

    let body = ErrorBody::from(&service.add_dependency(a, a).unwrap_err());
    assert_eq!(body.error, "A task cannot depend on itself");
    assert_eq!(body.path, Some(vec![a, a]));
}
