use std::sync::Arc;

use orgmesh_core::{ActorIdentity, AppError, AppResult, DepartmentId};
use orgmesh_domain::{ChangeAction, ChangeEntityKind, Department};

use crate::org_ports::{
    ChangeLogSink, ChangeRecord, CreateDepartmentInput, OrgRepository, UpdateDepartmentInput,
    snapshot,
};

/// Application service for the department registry.
#[derive(Clone)]
pub struct DepartmentService {
    repository: Arc<dyn OrgRepository>,
    change_log: Arc<dyn ChangeLogSink>,
}

impl DepartmentService {
    /// Creates a department service from its port implementations.
    #[must_use]
    pub fn new(repository: Arc<dyn OrgRepository>, change_log: Arc<dyn ChangeLogSink>) -> Self {
        Self {
            repository,
            change_log,
        }
    }

    /// Creates a department after checking code uniqueness.
    pub async fn create_department(
        &self,
        actor: &ActorIdentity,
        input: CreateDepartmentInput,
    ) -> AppResult<Department> {
        if self
            .repository
            .find_department_by_code(input.code.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "department code '{}' is already in use",
                input.code
            )));
        }

        let department = Department::new(DepartmentId::new(), input.name, input.code, input.is_active)?;
        self.repository.insert_department(department.clone()).await?;

        self.change_log
            .log_change(ChangeRecord {
                action: ChangeAction::Created,
                entity_kind: ChangeEntityKind::Department,
                entity_id: department.id().to_string(),
                before: None,
                after: Some(snapshot(&department)?),
                actor_employee_id: actor.employee_id(),
                summary: Some(format!(
                    "created department '{}'",
                    department.code().as_str()
                )),
            })
            .await?;

        Ok(department)
    }

    /// Applies the supplied fields to an existing department.
    ///
    /// Code uniqueness is re-checked only when the supplied code differs
    /// from the current one.
    pub async fn update_department(
        &self,
        actor: &ActorIdentity,
        id: DepartmentId,
        input: UpdateDepartmentInput,
    ) -> AppResult<Department> {
        let current = self.require_department(id).await?;

        if let Some(code) = input.code.as_deref()
            && code != current.code().as_str()
            && let Some(existing) = self.repository.find_department_by_code(code).await?
            && existing.id() != id
        {
            return Err(AppError::Conflict(format!(
                "department code '{code}' is already in use"
            )));
        }

        let updated = Department::new(
            id,
            input
                .name
                .unwrap_or_else(|| current.name().as_str().to_owned()),
            input
                .code
                .unwrap_or_else(|| current.code().as_str().to_owned()),
            input.is_active.unwrap_or(current.is_active()),
        )?;
        self.repository.update_department(updated.clone()).await?;

        self.change_log
            .log_change(ChangeRecord {
                action: ChangeAction::Updated,
                entity_kind: ChangeEntityKind::Department,
                entity_id: id.to_string(),
                before: Some(snapshot(&current)?),
                after: Some(snapshot(&updated)?),
                actor_employee_id: actor.employee_id(),
                summary: Some(format!(
                    "updated department '{}'",
                    updated.code().as_str()
                )),
            })
            .await?;

        Ok(updated)
    }

    /// Clears a department's active flag.
    ///
    /// Positions owned by the department are deliberately left untouched;
    /// there is no cascade at this level.
    pub async fn deactivate_department(
        &self,
        actor: &ActorIdentity,
        id: DepartmentId,
    ) -> AppResult<Department> {
        let current = self.require_department(id).await?;
        let updated = current.deactivated();
        self.repository.update_department(updated.clone()).await?;

        self.change_log
            .log_change(ChangeRecord {
                action: ChangeAction::Deactivated,
                entity_kind: ChangeEntityKind::Department,
                entity_id: id.to_string(),
                before: Some(snapshot(&current)?),
                after: Some(snapshot(&updated)?),
                actor_employee_id: actor.employee_id(),
                summary: Some(format!(
                    "deactivated department '{}'",
                    updated.code().as_str()
                )),
            })
            .await?;

        Ok(updated)
    }

    /// Returns one department by identifier.
    pub async fn get_department(&self, id: DepartmentId) -> AppResult<Department> {
        self.require_department(id).await
    }

    /// Lists every known department.
    pub async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.repository.list_departments().await
    }

    async fn require_department(&self, id: DepartmentId) -> AppResult<Department> {
        self.repository
            .find_department(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("department '{id}' does not exist")))
    }
}
