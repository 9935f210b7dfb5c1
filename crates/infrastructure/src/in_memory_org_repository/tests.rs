use chrono::{Duration, Utc};
use orgmesh_application::OrgRepository;
use orgmesh_core::{AppError, AssignmentId, DepartmentId, EmployeeId, PositionId};
use orgmesh_domain::{Department, Position, PositionAssignment};

use super::InMemoryOrgRepository;

fn department(name: &str, code: &str) -> Department {
    Department::new(DepartmentId::new(), name, code, true)
        .unwrap_or_else(|_| unreachable!())
}

fn position(title: &str, code: &str, department_id: DepartmentId) -> Position {
    Position::new(PositionId::new(), title, code, department_id, None, true)
        .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn duplicate_department_code_is_a_conflict() {
    let repository = InMemoryOrgRepository::new();

    let first = repository
        .insert_department(department("Engineering", "ENG"))
        .await;
    assert!(first.is_ok());

    let second = repository
        .insert_department(department("Engine Room", "ENG"))
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn updating_a_missing_position_is_not_found() {
    let repository = InMemoryOrgRepository::new();

    let result = repository
        .update_position(position("Developer", "ENG-DEV1", DepartmentId::new()))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn departments_are_listed_in_code_order() {
    let repository = InMemoryOrgRepository::new();

    for (name, code) in [("Platform", "PLT"), ("Engineering", "ENG"), ("Ops", "OPS")] {
        let inserted = repository.insert_department(department(name, code)).await;
        assert!(inserted.is_ok());
    }

    let listed = repository
        .list_departments()
        .await
        .unwrap_or_else(|_| unreachable!());
    let codes: Vec<&str> = listed
        .iter()
        .map(|department| department.code().as_str())
        .collect();
    assert_eq!(codes, vec!["ENG", "OPS", "PLT"]);
}

#[tokio::test]
async fn closing_only_touches_listed_open_assignments() {
    let repository = InMemoryOrgRepository::new();
    let department_id = DepartmentId::new();
    let position_id = PositionId::new();
    let now = Utc::now();

    let open = PositionAssignment::new(
        AssignmentId::new(),
        position_id,
        EmployeeId::new(),
        department_id,
        now - Duration::days(30),
        None,
    )
    .unwrap_or_else(|_| unreachable!());
    let untouched = PositionAssignment::new(
        AssignmentId::new(),
        position_id,
        EmployeeId::new(),
        department_id,
        now - Duration::days(20),
        None,
    )
    .unwrap_or_else(|_| unreachable!());

    for assignment in [open.clone(), untouched.clone()] {
        let inserted = repository.insert_assignment(assignment).await;
        assert!(inserted.is_ok());
    }

    let closed = repository.close_assignments(&[open.id()], now).await;
    assert!(closed.is_ok());

    let remaining = repository
        .open_assignments_for_position(position_id)
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id(), untouched.id());
}
