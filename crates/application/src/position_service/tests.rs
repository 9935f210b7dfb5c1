use std::sync::Arc;

use chrono::Utc;
use orgmesh_core::{AppError, AssignmentId, DepartmentId, EmployeeId, PositionId};
use orgmesh_domain::{ChangeAction, Department, EmployeeRef, PositionAssignment};
use serde_json::json;

use super::PositionService;
use crate::org_ports::{
    CreateDepartmentInput, CreatePositionInput, OrgRepository, UpdatePositionInput,
};
use crate::test_support::{FakeChangeLog, FakeEmployeeDirectory, FakeOrgRepository, hr_actor};
use crate::DepartmentService;

struct Harness {
    departments: DepartmentService,
    positions: PositionService,
    repository: Arc<FakeOrgRepository>,
    change_log: Arc<FakeChangeLog>,
    directory: Arc<FakeEmployeeDirectory>,
}

fn build() -> Harness {
    let repository = Arc::new(FakeOrgRepository::new());
    let change_log = Arc::new(FakeChangeLog::default());
    let directory = Arc::new(FakeEmployeeDirectory::default());
    Harness {
        departments: DepartmentService::new(repository.clone(), change_log.clone()),
        positions: PositionService::new(
            repository.clone(),
            change_log.clone(),
            directory.clone(),
        ),
        repository,
        change_log,
        directory,
    }
}

async fn seed_department(harness: &Harness, name: &str, code: &str) -> Department {
    harness
        .departments
        .create_department(
            &hr_actor(),
            CreateDepartmentInput {
                name: name.to_owned(),
                code: code.to_owned(),
                is_active: true,
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!())
}

fn position_input(title: &str, code: &str, department_id: DepartmentId) -> CreatePositionInput {
    CreatePositionInput {
        title: title.to_owned(),
        code: code.to_owned(),
        department_id,
        reports_to: None,
        is_active: true,
    }
}

#[tokio::test]
async fn create_position_under_missing_department_is_not_found() {
    let harness = build();

    let result = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Head of Engineering", "ENG-HEAD", DepartmentId::new()),
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn create_position_under_inactive_department_is_rejected() {
    let harness = build();
    let department = seed_department(&harness, "Engineering", "ENG").await;
    let deactivated = harness
        .departments
        .deactivate_department(&hr_actor(), department.id())
        .await;
    assert!(deactivated.is_ok());

    let result = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Head of Engineering", "ENG-HEAD", department.id()),
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn created_position_belongs_to_its_department_and_logs() {
    let harness = build();
    let department = seed_department(&harness, "Engineering", "ENG").await;

    let created = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Head of Engineering", "ENG-HEAD", department.id()),
        )
        .await;
    assert!(created.is_ok());
    let created = created.unwrap_or_else(|_| unreachable!());
    assert_eq!(created.department_id(), department.id());

    let records = harness.change_log.records.lock().await;
    assert!(records.iter().any(|record| {
        record.action == ChangeAction::Created && record.entity_id == created.id().to_string()
    }));
}

#[tokio::test]
async fn duplicate_position_code_conflicts_and_leaves_first_untouched() {
    let harness = build();
    let department = seed_department(&harness, "Engineering", "ENG").await;

    let first = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Head of Engineering", "ENG-HEAD", department.id()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let second = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Another Head", "ENG-HEAD", department.id()),
        )
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    let fetched = harness
        .positions
        .get_position(first.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(fetched.title().as_str(), "Head of Engineering");
}

#[tokio::test]
async fn reports_target_must_exist_and_be_active() {
    let harness = build();
    let department = seed_department(&harness, "Engineering", "ENG").await;

    let missing_parent = harness
        .positions
        .create_position(
            &hr_actor(),
            CreatePositionInput {
                reports_to: Some(PositionId::new()),
                ..position_input("Developer", "ENG-DEV1", department.id())
            },
        )
        .await;
    assert!(matches!(missing_parent, Err(AppError::NotFound(_))));

    let head = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Head of Engineering", "ENG-HEAD", department.id()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    let deactivated = harness
        .positions
        .deactivate_position(&hr_actor(), head.id(), Utc::now())
        .await;
    assert!(deactivated.is_ok());

    let inactive_parent = harness
        .positions
        .create_position(
            &hr_actor(),
            CreatePositionInput {
                reports_to: Some(head.id()),
                ..position_input("Developer", "ENG-DEV1", department.id())
            },
        )
        .await;
    assert!(matches!(inactive_parent, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn update_position_keeps_unsupplied_fields_and_own_code() {
    let harness = build();
    let department = seed_department(&harness, "Engineering", "ENG").await;
    let created = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Developer", "ENG-DEV1", department.id()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let updated = harness
        .positions
        .update_position(
            &hr_actor(),
            created.id(),
            UpdatePositionInput {
                title: Some("Senior Developer".to_owned()),
                code: Some("ENG-DEV1".to_owned()),
                ..UpdatePositionInput::default()
            },
        )
        .await;
    assert!(updated.is_ok());
    let updated = updated.unwrap_or_else(|_| unreachable!());
    assert_eq!(updated.title().as_str(), "Senior Developer");
    assert_eq!(updated.code().as_str(), "ENG-DEV1");
    assert_eq!(updated.department_id(), department.id());
}

#[tokio::test]
async fn update_position_revalidates_supplied_department() {
    let harness = build();
    let department = seed_department(&harness, "Engineering", "ENG").await;
    let created = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Developer", "ENG-DEV1", department.id()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = harness
        .positions
        .update_position(
            &hr_actor(),
            created.id(),
            UpdatePositionInput {
                department_id: Some(DepartmentId::new()),
                ..UpdatePositionInput::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn reassignment_moves_department_and_preserves_parent() {
    let harness = build();
    let engineering = seed_department(&harness, "Engineering", "ENG").await;
    let platform = seed_department(&harness, "Platform", "PLT").await;

    let head = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Head of Engineering", "ENG-HEAD", engineering.id()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    let developer = harness
        .positions
        .create_position(
            &hr_actor(),
            CreatePositionInput {
                reports_to: Some(head.id()),
                ..position_input("Developer", "ENG-DEV1", engineering.id())
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let moved = harness
        .positions
        .reassign_position(&hr_actor(), developer.id(), platform.id())
        .await;
    assert!(moved.is_ok());

    let fetched = harness
        .positions
        .get_position(developer.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(fetched.department_id(), platform.id());
    assert_eq!(fetched.reports_to(), Some(head.id()));

    let records = harness.change_log.records.lock().await;
    assert_eq!(
        records.last().map(|record| record.action),
        Some(ChangeAction::Reassigned)
    );
}

#[tokio::test]
async fn reassignment_to_inactive_department_is_rejected() {
    let harness = build();
    let engineering = seed_department(&harness, "Engineering", "ENG").await;
    let retired = seed_department(&harness, "Retired", "RET").await;
    let deactivated = harness
        .departments
        .deactivate_department(&hr_actor(), retired.id())
        .await;
    assert!(deactivated.is_ok());

    let position = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Developer", "ENG-DEV1", engineering.id()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = harness
        .positions
        .reassign_position(&hr_actor(), position.id(), retired.id())
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn deactivation_closes_open_assignments_before_flipping_flag() {
    let harness = build();
    let department = seed_department(&harness, "Engineering", "ENG").await;
    let position = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Developer", "ENG-DEV1", department.id()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let employee_id = EmployeeId::new();
    let assignment = PositionAssignment::new(
        AssignmentId::new(),
        position.id(),
        employee_id,
        department.id(),
        Utc::now(),
        None,
    )
    .unwrap_or_else(|_| unreachable!());
    let seeded = harness.repository.insert_assignment(assignment).await;
    assert!(seeded.is_ok());

    let now = Utc::now();
    let deactivated = harness
        .positions
        .deactivate_position(&hr_actor(), position.id(), now)
        .await;
    assert!(deactivated.is_ok());
    assert!(!deactivated.unwrap_or_else(|_| unreachable!()).is_active());

    let still_open = harness
        .repository
        .open_assignments_for_position(position.id())
        .await
        .unwrap_or_default();
    assert!(still_open.is_empty());

    let records = harness.change_log.records.lock().await;
    let entry = records
        .iter()
        .find(|record| record.action == ChangeAction::Deactivated);
    assert!(entry.is_some_and(|record| {
        // The before snapshot reflects the position document prior to any
        // side effect, so its active flag is still set.
        record
            .before
            .as_ref()
            .and_then(|before| before.get("is_active"))
            == Some(&json!(true))
    }));
}

#[tokio::test]
async fn department_deactivation_does_not_cascade_to_positions() {
    let harness = build();
    let department = seed_department(&harness, "Engineering", "ENG").await;
    let position = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Developer", "ENG-DEV1", department.id()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let deactivated = harness
        .departments
        .deactivate_department(&hr_actor(), department.id())
        .await;
    assert!(deactivated.is_ok());

    let fetched = harness
        .positions
        .get_position(position.id())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(fetched.is_active());
}

#[tokio::test]
async fn employees_by_department_resolves_open_assignments_only() {
    let harness = build();
    let department = seed_department(&harness, "Engineering", "ENG").await;
    let position = harness
        .positions
        .create_position(
            &hr_actor(),
            position_input("Developer", "ENG-DEV1", department.id()),
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let current = EmployeeRef::new(EmployeeId::new(), "Alice Example", None)
        .unwrap_or_else(|_| unreachable!());
    let former = EmployeeRef::new(EmployeeId::new(), "Bob Example", None)
        .unwrap_or_else(|_| unreachable!());
    harness.directory.insert(current.clone()).await;
    harness.directory.insert(former.clone()).await;

    let now = Utc::now();
    for (employee, ends_on) in [(&current, None), (&former, Some(now))] {
        let assignment = PositionAssignment::new(
            AssignmentId::new(),
            position.id(),
            employee.id(),
            department.id(),
            now - chrono::Duration::days(90),
            ends_on,
        )
        .unwrap_or_else(|_| unreachable!());
        let seeded = harness.repository.insert_assignment(assignment).await;
        assert!(seeded.is_ok());
    }

    let employees = harness
        .positions
        .employees_by_department(department.id())
        .await
        .unwrap_or_default();
    assert_eq!(employees, vec![current]);
}
