use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use orgmesh_core::{ActorIdentity, AppError, AppResult, DepartmentId, EmployeeId, PositionId};
use orgmesh_domain::{
    ChangeAction, ChangeEntityKind, Department, EmployeeRef, Position, PositionAssignment,
};

use crate::org_ports::{
    ChangeLogSink, ChangeRecord, CreatePositionInput, EmployeeDirectory, OrgRepository,
    UpdatePositionInput, snapshot,
};

/// Application service for the position graph.
#[derive(Clone)]
pub struct PositionService {
    repository: Arc<dyn OrgRepository>,
    change_log: Arc<dyn ChangeLogSink>,
    directory: Arc<dyn EmployeeDirectory>,
}

impl PositionService {
    /// Creates a position service from its port implementations.
    #[must_use]
    pub fn new(
        repository: Arc<dyn OrgRepository>,
        change_log: Arc<dyn ChangeLogSink>,
        directory: Arc<dyn EmployeeDirectory>,
    ) -> Self {
        Self {
            repository,
            change_log,
            directory,
        }
    }

    /// Creates a position under an active department.
    pub async fn create_position(
        &self,
        actor: &ActorIdentity,
        input: CreatePositionInput,
    ) -> AppResult<Position> {
        self.require_active_department(input.department_id).await?;

        if let Some(parent) = input.reports_to {
            self.require_active_reports_target(parent).await?;
        }

        if self
            .repository
            .find_position_by_code(input.code.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "position code '{}' is already in use",
                input.code
            )));
        }

        let position = Position::new(
            PositionId::new(),
            input.title,
            input.code,
            input.department_id,
            input.reports_to,
            input.is_active,
        )?;
        self.repository.insert_position(position.clone()).await?;

        self.change_log
            .log_change(ChangeRecord {
                action: ChangeAction::Created,
                entity_kind: ChangeEntityKind::Position,
                entity_id: position.id().to_string(),
                before: None,
                after: Some(snapshot(&position)?),
                actor_employee_id: actor.employee_id(),
                summary: Some(format!("created position '{}'", position.code().as_str())),
            })
            .await?;

        Ok(position)
    }

    /// Applies the supplied fields to an existing position.
    ///
    /// A supplied department or parent is re-validated exactly as on
    /// create; a supplied code is rejected only when a *different*
    /// position already owns it.
    pub async fn update_position(
        &self,
        actor: &ActorIdentity,
        id: PositionId,
        input: UpdatePositionInput,
    ) -> AppResult<Position> {
        let current = self.require_position(id).await?;

        if let Some(department_id) = input.department_id {
            self.require_active_department(department_id).await?;
        }

        if let Some(parent) = input.reports_to {
            self.require_active_reports_target(parent).await?;
        }

        if let Some(code) = input.code.as_deref()
            && code != current.code().as_str()
            && let Some(existing) = self.repository.find_position_by_code(code).await?
            && existing.id() != id
        {
            return Err(AppError::Conflict(format!(
                "position code '{code}' is already in use"
            )));
        }

        let updated = Position::new(
            id,
            input
                .title
                .unwrap_or_else(|| current.title().as_str().to_owned()),
            input
                .code
                .unwrap_or_else(|| current.code().as_str().to_owned()),
            input.department_id.unwrap_or(current.department_id()),
            input.reports_to.or(current.reports_to()),
            input.is_active.unwrap_or(current.is_active()),
        )?;
        self.repository.update_position(updated.clone()).await?;

        self.change_log
            .log_change(ChangeRecord {
                action: ChangeAction::Updated,
                entity_kind: ChangeEntityKind::Position,
                entity_id: id.to_string(),
                before: Some(snapshot(&current)?),
                after: Some(snapshot(&updated)?),
                actor_employee_id: actor.employee_id(),
                summary: Some(format!("updated position '{}'", updated.code().as_str())),
            })
            .await?;

        Ok(updated)
    }

    /// Moves a position to another active department.
    ///
    /// Only the department pointer changes; the parent pointer stays as it
    /// is, even when it now crosses departments. Hierarchy assembly treats
    /// such a parent as absent.
    pub async fn reassign_position(
        &self,
        actor: &ActorIdentity,
        id: PositionId,
        new_department_id: DepartmentId,
    ) -> AppResult<Position> {
        let current = self.require_position(id).await?;
        let department = self.require_active_department(new_department_id).await?;

        let moved = current.reassigned(new_department_id);
        self.repository.update_position(moved.clone()).await?;

        self.change_log
            .log_change(ChangeRecord {
                action: ChangeAction::Reassigned,
                entity_kind: ChangeEntityKind::Position,
                entity_id: id.to_string(),
                before: Some(snapshot(&current)?),
                after: Some(snapshot(&moved)?),
                actor_employee_id: actor.employee_id(),
                summary: Some(format!(
                    "reassigned position '{}' to department '{}'",
                    moved.code().as_str(),
                    department.code().as_str()
                )),
            })
            .await?;

        Ok(moved)
    }

    /// Deactivates a position, closing its open assignments first.
    ///
    /// The change-log snapshot is taken before assignments are closed, so
    /// it reflects only the position document. The two writes are not
    /// atomic: a failure between them leaves closed assignments on a
    /// still-active position.
    pub async fn deactivate_position(
        &self,
        actor: &ActorIdentity,
        id: PositionId,
        now: DateTime<Utc>,
    ) -> AppResult<Position> {
        let current = self.require_position(id).await?;
        let before = snapshot(&current)?;

        let open = self.repository.open_assignments_for_position(id).await?;
        if !open.is_empty() {
            let assignment_ids: Vec<_> = open.iter().map(PositionAssignment::id).collect();
            self.repository
                .close_assignments(&assignment_ids, now)
                .await?;
        }

        let updated = current.deactivated();
        self.repository.update_position(updated.clone()).await?;

        self.change_log
            .log_change(ChangeRecord {
                action: ChangeAction::Deactivated,
                entity_kind: ChangeEntityKind::Position,
                entity_id: id.to_string(),
                before: Some(before),
                after: Some(snapshot(&updated)?),
                actor_employee_id: actor.employee_id(),
                summary: Some(format!(
                    "deactivated position '{}' and closed {} open assignment(s)",
                    updated.code().as_str(),
                    open.len()
                )),
            })
            .await?;

        Ok(updated)
    }

    /// Returns one position by identifier.
    pub async fn get_position(&self, id: PositionId) -> AppResult<Position> {
        self.require_position(id).await
    }

    /// Lists all positions owned by a department, active or not.
    pub async fn list_positions_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<Position>> {
        self.require_department(department_id).await?;
        self.repository
            .list_positions_by_department(department_id)
            .await
    }

    /// Resolves the employees currently holding one position.
    pub async fn employees_by_position(
        &self,
        position_id: PositionId,
    ) -> AppResult<Vec<EmployeeRef>> {
        self.require_position(position_id).await?;
        let assignments = self
            .repository
            .open_assignments_for_position(position_id)
            .await?;
        self.resolve_employees(&assignments).await
    }

    /// Resolves the employees currently assigned anywhere in a department.
    pub async fn employees_by_department(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<EmployeeRef>> {
        self.require_department(department_id).await?;
        let assignments = self
            .repository
            .open_assignments_by_department(department_id)
            .await?;
        self.resolve_employees(&assignments).await
    }

    async fn resolve_employees(
        &self,
        assignments: &[PositionAssignment],
    ) -> AppResult<Vec<EmployeeRef>> {
        let ids: BTreeSet<EmployeeId> = assignments
            .iter()
            .map(PositionAssignment::employee_id)
            .collect();
        let ids: Vec<EmployeeId> = ids.into_iter().collect();
        self.directory.list_employees(&ids).await
    }

    async fn require_position(&self, id: PositionId) -> AppResult<Position> {
        self.repository
            .find_position(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("position '{id}' does not exist")))
    }

    async fn require_department(&self, id: DepartmentId) -> AppResult<Department> {
        self.repository
            .find_department(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("department '{id}' does not exist")))
    }

    async fn require_active_department(&self, id: DepartmentId) -> AppResult<Department> {
        let department = self.require_department(id).await?;
        if !department.is_active() {
            return Err(AppError::Validation(format!(
                "department '{}' is inactive and cannot own positions",
                department.code().as_str()
            )));
        }

        Ok(department)
    }

    async fn require_active_reports_target(&self, id: PositionId) -> AppResult<Position> {
        let target = self.require_position(id).await?;
        if !target.is_active() {
            return Err(AppError::Validation(format!(
                "position '{}' is inactive and cannot be a reporting target",
                target.code().as_str()
            )));
        }

        Ok(target)
    }
}

#[cfg(test)]
mod tests;
