use async_trait::async_trait;
use chrono::{DateTime, Utc};
use orgmesh_core::{
    AppError, AppResult, AssignmentId, DepartmentId, EmployeeId, PositionId,
};
use orgmesh_domain::{
    ChangeAction, ChangeEntityKind, Department, EmployeeRef, Position, PositionAssignment,
};
use serde::Serialize;
use serde_json::Value;

/// Input payload for department creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDepartmentInput {
    /// Display name.
    pub name: String,
    /// Globally unique department code.
    pub code: String,
    /// Initial active flag.
    pub is_active: bool,
}

/// Partial-update payload for a department; absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDepartmentInput {
    /// New display name, when supplied.
    pub name: Option<String>,
    /// New department code, when supplied; re-checked for uniqueness only
    /// when it differs from the current one.
    pub code: Option<String>,
    /// New active flag, when supplied.
    pub is_active: Option<bool>,
}

/// Input payload for position creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePositionInput {
    /// Display title.
    pub title: String,
    /// Globally unique position code.
    pub code: String,
    /// Owning department; must exist and be active.
    pub department_id: DepartmentId,
    /// Optional parent position; must exist and be active when supplied.
    pub reports_to: Option<PositionId>,
    /// Initial active flag.
    pub is_active: bool,
}

/// Partial-update payload for a position; absent fields stay untouched.
/// The parent pointer cannot be cleared through an update, only replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePositionInput {
    /// New title, when supplied.
    pub title: Option<String>,
    /// New position code, when supplied.
    pub code: Option<String>,
    /// New owning department, when supplied; validated as on create.
    pub department_id: Option<DepartmentId>,
    /// New parent position, when supplied; validated as on create.
    pub reports_to: Option<PositionId>,
    /// New active flag, when supplied.
    pub is_active: Option<bool>,
}

/// Append-only change-log payload emitted after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Mutation kind.
    pub action: ChangeAction,
    /// Entity family the record refers to.
    pub entity_kind: ChangeEntityKind,
    /// Stable identifier of the mutated entity.
    pub entity_id: String,
    /// Full-document snapshot before the mutation; `None` on creation.
    pub before: Option<Value>,
    /// Full-document snapshot after the mutation.
    pub after: Option<Value>,
    /// Employee profile of the acting caller, when known.
    pub actor_employee_id: Option<EmployeeId>,
    /// Optional human-readable summary.
    pub summary: Option<String>,
}

/// Serializes an entity into a full-document change-log snapshot.
pub fn snapshot<T: Serialize>(entity: &T) -> AppResult<Value> {
    serde_json::to_value(entity).map_err(|error| {
        AppError::Internal(format!("failed to encode change-log snapshot: {error}"))
    })
}

/// Repository port for department, position and assignment persistence.
#[async_trait]
pub trait OrgRepository: Send + Sync {
    /// Persists a new department.
    async fn insert_department(&self, department: Department) -> AppResult<()>;

    /// Finds a department by identifier.
    async fn find_department(&self, id: DepartmentId) -> AppResult<Option<Department>>;

    /// Finds a department by its unique code.
    async fn find_department_by_code(&self, code: &str) -> AppResult<Option<Department>>;

    /// Lists every department.
    async fn list_departments(&self) -> AppResult<Vec<Department>>;

    /// Replaces a stored department; fails with `NotFound` when absent.
    async fn update_department(&self, department: Department) -> AppResult<()>;

    /// Persists a new position.
    async fn insert_position(&self, position: Position) -> AppResult<()>;

    /// Finds a position by identifier.
    async fn find_position(&self, id: PositionId) -> AppResult<Option<Position>>;

    /// Finds a position by its unique code.
    async fn find_position_by_code(&self, code: &str) -> AppResult<Option<Position>>;

    /// Lists all positions owned by a department, active or not.
    async fn list_positions_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<Position>>;

    /// Replaces a stored position; fails with `NotFound` when absent.
    async fn update_position(&self, position: Position) -> AppResult<()>;

    /// Persists an assignment created by the (out-of-scope) staffing flow.
    async fn insert_assignment(&self, assignment: PositionAssignment) -> AppResult<()>;

    /// Lists open assignments (no end date) for one position.
    async fn open_assignments_for_position(
        &self,
        position_id: PositionId,
    ) -> AppResult<Vec<PositionAssignment>>;

    /// Lists open assignments across a whole department.
    async fn open_assignments_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<PositionAssignment>>;

    /// Finds the open assignment currently held by an employee.
    async fn open_assignment_for_employee(
        &self,
        employee_id: EmployeeId,
    ) -> AppResult<Option<PositionAssignment>>;

    /// Closes the listed assignments in one batch by setting their end date.
    async fn close_assignments(
        &self,
        assignment_ids: &[AssignmentId],
        ends_on: DateTime<Utc>,
    ) -> AppResult<()>;
}

/// Port for the external append-only change log.
///
/// The emit is awaited but never compensated: a failed write after a
/// committed mutation surfaces the error without rolling the mutation back.
#[async_trait]
pub trait ChangeLogSink: Send + Sync {
    /// Appends one change record.
    async fn log_change(&self, record: ChangeRecord) -> AppResult<()>;
}

/// Read-only port into the external employee profile store.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Finds one employee profile by identifier.
    async fn find_employee(&self, id: EmployeeId) -> AppResult<Option<EmployeeRef>>;

    /// Resolves a set of employee profiles; unknown identifiers are skipped.
    async fn list_employees(&self, ids: &[EmployeeId]) -> AppResult<Vec<EmployeeRef>>;
}
