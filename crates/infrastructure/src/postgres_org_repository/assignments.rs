use super::*;

impl PostgresOrgRepository {
    pub(super) async fn insert_assignment_impl(
        &self,
        assignment: PositionAssignment,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO position_assignments (
                id,
                position_id,
                employee_id,
                department_id,
                starts_on,
                ends_on
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(assignment.id().as_uuid())
        .bind(assignment.position_id().as_uuid())
        .bind(assignment.employee_id().as_uuid())
        .bind(assignment.department_id().as_uuid())
        .bind(assignment.starts_on())
        .bind(assignment.ends_on())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "assignment '{}' already exists",
                        assignment.id()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to insert assignment: {error}"
                )))
            }
        }
    }

    pub(super) async fn open_assignments_for_position_impl(
        &self,
        position_id: PositionId,
    ) -> AppResult<Vec<PositionAssignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, position_id, employee_id, department_id, starts_on, ends_on
            FROM position_assignments
            WHERE position_id = $1 AND ends_on IS NULL
            ORDER BY starts_on
            "#,
        )
        .bind(position_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list open assignments for position '{position_id}': {error}"
            ))
        })?;

        rows.into_iter().map(AssignmentRow::into_assignment).collect()
    }

    pub(super) async fn open_assignments_by_department_impl(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<PositionAssignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, position_id, employee_id, department_id, starts_on, ends_on
            FROM position_assignments
            WHERE department_id = $1 AND ends_on IS NULL
            ORDER BY starts_on
            "#,
        )
        .bind(department_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list open assignments for department '{department_id}': {error}"
            ))
        })?;

        rows.into_iter().map(AssignmentRow::into_assignment).collect()
    }

    pub(super) async fn open_assignment_for_employee_impl(
        &self,
        employee_id: EmployeeId,
    ) -> AppResult<Option<PositionAssignment>> {
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, position_id, employee_id, department_id, starts_on, ends_on
            FROM position_assignments
            WHERE employee_id = $1 AND ends_on IS NULL
            ORDER BY starts_on DESC
            LIMIT 1
            "#,
        )
        .bind(employee_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to find open assignment for employee '{employee_id}': {error}"
            ))
        })?;

        row.map(AssignmentRow::into_assignment).transpose()
    }

    pub(super) async fn close_assignments_impl(
        &self,
        assignment_ids: &[AssignmentId],
        ends_on: DateTime<Utc>,
    ) -> AppResult<()> {
        if assignment_ids.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = assignment_ids.iter().map(AssignmentId::as_uuid).collect();
        sqlx::query(
            r#"
            UPDATE position_assignments
            SET ends_on = $2
            WHERE id = ANY($1) AND ends_on IS NULL
            "#,
        )
        .bind(&ids)
        .bind(ends_on)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to close assignments: {error}")))?;

        Ok(())
    }
}
