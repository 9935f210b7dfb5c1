use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orgmesh_application::OrgRepository;
use orgmesh_core::{
    AppError, AppResult, AssignmentId, DepartmentId, EmployeeId, PositionId,
};
use orgmesh_domain::{Department, Position, PositionAssignment};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

mod assignments;
mod departments;
mod positions;

/// PostgreSQL-backed organization repository.
#[derive(Clone)]
pub struct PostgresOrgRepository {
    pool: PgPool,
}

impl PostgresOrgRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DepartmentRow {
    id: Uuid,
    name: String,
    code: String,
    is_active: bool,
}

impl DepartmentRow {
    fn into_department(self) -> AppResult<Department> {
        let id = self.id;
        Department::new(DepartmentId::from_uuid(id), self.name, self.code, self.is_active)
            .map_err(|error| {
                AppError::Internal(format!("persisted department '{id}' is invalid: {error}"))
            })
    }
}

#[derive(Debug, FromRow)]
struct PositionRow {
    id: Uuid,
    title: String,
    code: String,
    department_id: Uuid,
    reports_to: Option<Uuid>,
    is_active: bool,
}

impl PositionRow {
    fn into_position(self) -> AppResult<Position> {
        let id = self.id;
        Position::new(
            PositionId::from_uuid(id),
            self.title,
            self.code,
            DepartmentId::from_uuid(self.department_id),
            self.reports_to.map(PositionId::from_uuid),
            self.is_active,
        )
        .map_err(|error| {
            AppError::Internal(format!("persisted position '{id}' is invalid: {error}"))
        })
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRow {
    id: Uuid,
    position_id: Uuid,
    employee_id: Uuid,
    department_id: Uuid,
    starts_on: DateTime<Utc>,
    ends_on: Option<DateTime<Utc>>,
}

impl AssignmentRow {
    fn into_assignment(self) -> AppResult<PositionAssignment> {
        let id = self.id;
        PositionAssignment::new(
            AssignmentId::from_uuid(id),
            PositionId::from_uuid(self.position_id),
            EmployeeId::from_uuid(self.employee_id),
            DepartmentId::from_uuid(self.department_id),
            self.starts_on,
            self.ends_on,
        )
        .map_err(|error| {
            AppError::Internal(format!("persisted assignment '{id}' is invalid: {error}"))
        })
    }
}

#[async_trait]
impl OrgRepository for PostgresOrgRepository {
    async fn insert_department(&self, department: Department) -> AppResult<()> {
        self.insert_department_impl(department).await
    }

    async fn find_department(&self, id: DepartmentId) -> AppResult<Option<Department>> {
        self.find_department_impl(id).await
    }

    async fn find_department_by_code(&self, code: &str) -> AppResult<Option<Department>> {
        self.find_department_by_code_impl(code).await
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.list_departments_impl().await
    }

    async fn update_department(&self, department: Department) -> AppResult<()> {
        self.update_department_impl(department).await
    }

    async fn insert_position(&self, position: Position) -> AppResult<()> {
        self.insert_position_impl(position).await
    }

    async fn find_position(&self, id: PositionId) -> AppResult<Option<Position>> {
        self.find_position_impl(id).await
    }

    async fn find_position_by_code(&self, code: &str) -> AppResult<Option<Position>> {
        self.find_position_by_code_impl(code).await
    }

    async fn list_positions_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<Position>> {
        self.list_positions_by_department_impl(department_id).await
    }

    async fn update_position(&self, position: Position) -> AppResult<()> {
        self.update_position_impl(position).await
    }

    async fn insert_assignment(&self, assignment: PositionAssignment) -> AppResult<()> {
        self.insert_assignment_impl(assignment).await
    }

    async fn open_assignments_for_position(
        &self,
        position_id: PositionId,
    ) -> AppResult<Vec<PositionAssignment>> {
        self.open_assignments_for_position_impl(position_id).await
    }

    async fn open_assignments_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<PositionAssignment>> {
        self.open_assignments_by_department_impl(department_id)
            .await
    }

    async fn open_assignment_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> AppResult<Option<PositionAssignment>> {
        self.open_assignment_for_employee_impl(employee_id).await
    }

    async fn close_assignments(
        &self,
        assignment_ids: &[AssignmentId],
        ends_on: DateTime<Utc>,
    ) -> AppResult<()> {
        self.close_assignments_impl(assignment_ids, ends_on).await
    }
}
