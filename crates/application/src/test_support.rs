use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orgmesh_core::{
    ActorIdentity, AppError, AppResult, AssignmentId, DepartmentId, EmployeeId, PositionId,
};
use orgmesh_domain::{Department, EmployeeRef, Position, PositionAssignment};
use tokio::sync::Mutex;

use crate::org_ports::{ChangeLogSink, ChangeRecord, EmployeeDirectory, OrgRepository};

pub(crate) struct FakeOrgRepository {
    departments: Mutex<HashMap<DepartmentId, Department>>,
    positions: Mutex<HashMap<PositionId, Position>>,
    assignments: Mutex<HashMap<AssignmentId, PositionAssignment>>,
}

impl FakeOrgRepository {
    pub(crate) fn new() -> Self {
        Self {
            departments: Mutex::new(HashMap::new()),
            positions: Mutex::new(HashMap::new()),
            assignments: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl OrgRepository for FakeOrgRepository {
    async fn insert_department(&self, department: Department) -> AppResult<()> {
        let mut departments = self.departments.lock().await;
        if departments.contains_key(&department.id()) {
            return Err(AppError::Conflict(format!(
                "department '{}' already exists",
                department.id()
            )));
        }

        departments.insert(department.id(), department);
        Ok(())
    }

    async fn find_department(&self, id: DepartmentId) -> AppResult<Option<Department>> {
        Ok(self.departments.lock().await.get(&id).cloned())
    }

    async fn find_department_by_code(&self, code: &str) -> AppResult<Option<Department>> {
        Ok(self
            .departments
            .lock()
            .await
            .values()
            .find(|department| department.code().as_str() == code)
            .cloned())
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let mut listed: Vec<Department> = self.departments.lock().await.values().cloned().collect();
        listed.sort_by(|left, right| left.code().as_str().cmp(right.code().as_str()));
        Ok(listed)
    }

    async fn update_department(&self, department: Department) -> AppResult<()> {
        let mut departments = self.departments.lock().await;
        if !departments.contains_key(&department.id()) {
            return Err(AppError::NotFound(format!(
                "department '{}' does not exist",
                department.id()
            )));
        }

        departments.insert(department.id(), department);
        Ok(())
    }

    async fn insert_position(&self, position: Position) -> AppResult<()> {
        let mut positions = self.positions.lock().await;
        if positions.contains_key(&position.id()) {
            return Err(AppError::Conflict(format!(
                "position '{}' already exists",
                position.id()
            )));
        }

        positions.insert(position.id(), position);
        Ok(())
    }

    async fn find_position(&self, id: PositionId) -> AppResult<Option<Position>> {
        Ok(self.positions.lock().await.get(&id).cloned())
    }

    async fn find_position_by_code(&self, code: &str) -> AppResult<Option<Position>> {
        Ok(self
            .positions
            .lock()
            .await
            .values()
            .find(|position| position.code().as_str() == code)
            .cloned())
    }

    async fn list_positions_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<Position>> {
        let mut listed: Vec<Position> = self
            .positions
            .lock()
            .await
            .values()
            .filter(|position| position.department_id() == department_id)
            .cloned()
            .collect();
        listed.sort_by(|left, right| left.code().as_str().cmp(right.code().as_str()));
        Ok(listed)
    }

    async fn update_position(&self, position: Position) -> AppResult<()> {
        let mut positions = self.positions.lock().await;
        if !positions.contains_key(&position.id()) {
            return Err(AppError::NotFound(format!(
                "position '{}' does not exist",
                position.id()
            )));
        }

        positions.insert(position.id(), position);
        Ok(())
    }

    async fn insert_assignment(&self, assignment: PositionAssignment) -> AppResult<()> {
        self.assignments
            .lock()
            .await
            .insert(assignment.id(), assignment);
        Ok(())
    }

    async fn open_assignments_for_position(
        &self,
        position_id: PositionId,
    ) -> AppResult<Vec<PositionAssignment>> {
        let mut listed: Vec<PositionAssignment> = self
            .assignments
            .lock()
            .await
            .values()
            .filter(|assignment| assignment.position_id() == position_id && assignment.is_open())
            .cloned()
            .collect();
        listed.sort_by_key(PositionAssignment::starts_on);
        Ok(listed)
    }

    async fn open_assignments_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<PositionAssignment>> {
        let mut listed: Vec<PositionAssignment> = self
            .assignments
            .lock()
            .await
            .values()
            .filter(|assignment| {
                assignment.department_id() == department_id && assignment.is_open()
            })
            .cloned()
            .collect();
        listed.sort_by_key(PositionAssignment::starts_on);
        Ok(listed)
    }

    async fn open_assignment_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> AppResult<Option<PositionAssignment>> {
        Ok(self
            .assignments
            .lock()
            .await
            .values()
            .find(|assignment| assignment.employee_id() == employee_id && assignment.is_open())
            .cloned())
    }

    async fn close_assignments(
        &self,
        assignment_ids: &[AssignmentId],
        ends_on: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut assignments = self.assignments.lock().await;
        for assignment_id in assignment_ids {
            if let Some(assignment) = assignments.get(assignment_id) {
                let closed = assignment.closed(ends_on);
                assignments.insert(*assignment_id, closed);
            }
        }

        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeChangeLog {
    pub(crate) records: Mutex<Vec<ChangeRecord>>,
}

#[async_trait]
impl ChangeLogSink for FakeChangeLog {
    async fn log_change(&self, record: ChangeRecord) -> AppResult<()> {
        self.records.lock().await.push(record);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeEmployeeDirectory {
    profiles: Mutex<HashMap<EmployeeId, EmployeeRef>>,
}

impl FakeEmployeeDirectory {
    pub(crate) async fn insert(&self, profile: EmployeeRef) {
        self.profiles.lock().await.insert(profile.id(), profile);
    }
}

#[async_trait]
impl EmployeeDirectory for FakeEmployeeDirectory {
    async fn find_employee(&self, id: EmployeeId) -> AppResult<Option<EmployeeRef>> {
        Ok(self.profiles.lock().await.get(&id).cloned())
    }

    async fn list_employees(&self, ids: &[EmployeeId]) -> AppResult<Vec<EmployeeRef>> {
        let profiles = self.profiles.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| profiles.get(id).cloned())
            .collect())
    }
}

pub(crate) fn hr_actor() -> ActorIdentity {
    ActorIdentity::new("hr-admin", "HR Admin", None)
}
