use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orgmesh_application::OrgRepository;
use orgmesh_core::{AppError, AppResult, AssignmentId, DepartmentId, EmployeeId, PositionId};
use orgmesh_domain::{Department, Position, PositionAssignment};
use tokio::sync::RwLock;

/// In-memory organization repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryOrgRepository {
    departments: RwLock<HashMap<DepartmentId, Department>>,
    positions: RwLock<HashMap<PositionId, Position>>,
    assignments: RwLock<HashMap<AssignmentId, PositionAssignment>>,
}

impl InMemoryOrgRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            departments: RwLock::new(HashMap::new()),
            positions: RwLock::new(HashMap::new()),
            assignments: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl OrgRepository for InMemoryOrgRepository {
    async fn insert_department(&self, department: Department) -> AppResult<()> {
        let mut departments = self.departments.write().await;

        if departments.contains_key(&department.id()) {
            return Err(AppError::Conflict(format!(
                "department '{}' already exists",
                department.id()
            )));
        }
        if departments
            .values()
            .any(|stored| stored.code() == department.code())
        {
            return Err(AppError::Conflict(format!(
                "department code '{}' is already taken",
                department.code().as_str()
            )));
        }

        departments.insert(department.id(), department);
        Ok(())
    }

    async fn find_department(&self, id: DepartmentId) -> AppResult<Option<Department>> {
        Ok(self.departments.read().await.get(&id).cloned())
    }

    async fn find_department_by_code(&self, code: &str) -> AppResult<Option<Department>> {
        Ok(self
            .departments
            .read()
            .await
            .values()
            .find(|department| department.code().as_str() == code)
            .cloned())
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        let departments = self.departments.read().await;
        let mut listed: Vec<Department> = departments.values().cloned().collect();
        listed.sort_by(|left, right| left.code().as_str().cmp(right.code().as_str()));
        Ok(listed)
    }

    async fn update_department(&self, department: Department) -> AppResult<()> {
        let mut departments = self.departments.write().await;

        if !departments.contains_key(&department.id()) {
            return Err(AppError::NotFound(format!(
                "department '{}' does not exist",
                department.id()
            )));
        }
        if departments.values().any(|stored| {
            stored.id() != department.id() && stored.code() == department.code()
        }) {
            return Err(AppError::Conflict(format!(
                "department code '{}' is already taken",
                department.code().as_str()
            )));
        }

        departments.insert(department.id(), department);
        Ok(())
    }

    async fn insert_position(&self, position: Position) -> AppResult<()> {
        let mut positions = self.positions.write().await;

        if positions.contains_key(&position.id()) {
            return Err(AppError::Conflict(format!(
                "position '{}' already exists",
                position.id()
            )));
        }
        if positions
            .values()
            .any(|stored| stored.code() == position.code())
        {
            return Err(AppError::Conflict(format!(
                "position code '{}' is already taken",
                position.code().as_str()
            )));
        }

        positions.insert(position.id(), position);
        Ok(())
    }

    async fn find_position(&self, id: PositionId) -> AppResult<Option<Position>> {
        Ok(self.positions.read().await.get(&id).cloned())
    }

    async fn find_position_by_code(&self, code: &str) -> AppResult<Option<Position>> {
        Ok(self
            .positions
            .read()
            .await
            .values()
            .find(|position| position.code().as_str() == code)
            .cloned())
    }

    async fn list_positions_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<Position>> {
        let positions = self.positions.read().await;
        let mut listed: Vec<Position> = positions
            .values()
            .filter(|position| position.department_id() == department_id)
            .cloned()
            .collect();
        listed.sort_by(|left, right| left.code().as_str().cmp(right.code().as_str()));
        Ok(listed)
    }

    async fn update_position(&self, position: Position) -> AppResult<()> {
        let mut positions = self.positions.write().await;

        if !positions.contains_key(&position.id()) {
            return Err(AppError::NotFound(format!(
                "position '{}' does not exist",
                position.id()
            )));
        }
        if positions
            .values()
            .any(|stored| stored.id() != position.id() && stored.code() == position.code())
        {
            return Err(AppError::Conflict(format!(
                "position code '{}' is already taken",
                position.code().as_str()
            )));
        }

        positions.insert(position.id(), position);
        Ok(())
    }

    async fn insert_assignment(&self, assignment: PositionAssignment) -> AppResult<()> {
        let mut assignments = self.assignments.write().await;

        if assignments.contains_key(&assignment.id()) {
            return Err(AppError::Conflict(format!(
                "assignment '{}' already exists",
                assignment.id()
            )));
        }

        assignments.insert(assignment.id(), assignment);
        Ok(())
    }

    async fn open_assignments_for_position(
        &self,
        position_id: PositionId,
    ) -> AppResult<Vec<PositionAssignment>> {
        let assignments = self.assignments.read().await;
        let mut listed: Vec<PositionAssignment> = assignments
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
        let assignments = self.assignments.read().await;
        let mut listed: Vec<PositionAssignment> = assignments
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
            .read()
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
        let mut assignments = self.assignments.write().await;

        for assignment_id in assignment_ids {
            if let Some(stored) = assignments.get(assignment_id)
                && stored.is_open()
            {
                let closed = stored.closed(ends_on);
                assignments.insert(*assignment_id, closed);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
