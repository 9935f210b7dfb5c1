use super::*;

impl PostgresOrgRepository {
    pub(super) async fn insert_position_impl(&self, position: Position) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO positions (id, title, code, department_id, reports_to, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(position.id().as_uuid())
        .bind(position.title().as_str())
        .bind(position.code().as_str())
        .bind(position.department_id().as_uuid())
        .bind(position.reports_to().map(|parent| parent.as_uuid()))
        .bind(position.is_active())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "position code '{}' is already taken",
                        position.code().as_str()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to insert position: {error}"
                )))
            }
        }
    }

    pub(super) async fn find_position_impl(&self, id: PositionId) -> AppResult<Option<Position>> {
        let row = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT id, title, code, department_id, reports_to, is_active
            FROM positions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find position '{id}': {error}")))?;

        row.map(PositionRow::into_position).transpose()
    }

    pub(super) async fn find_position_by_code_impl(
        &self,
        code: &str,
    ) -> AppResult<Option<Position>> {
        let row = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT id, title, code, department_id, reports_to, is_active
            FROM positions
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find position by code '{code}': {error}"))
        })?;

        row.map(PositionRow::into_position).transpose()
    }

    pub(super) async fn list_positions_by_department_impl(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<Vec<Position>> {
        let rows = sqlx::query_as::<_, PositionRow>(
            r#"
            SELECT id, title, code, department_id, reports_to, is_active
            FROM positions
            WHERE department_id = $1
            ORDER BY code
            "#,
        )
        .bind(department_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list positions for department '{department_id}': {error}"
            ))
        })?;

        rows.into_iter().map(PositionRow::into_position).collect()
    }

    pub(super) async fn update_position_impl(&self, position: Position) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE positions
            SET title = $2, code = $3, department_id = $4, reports_to = $5, is_active = $6
            WHERE id = $1
            "#,
        )
        .bind(position.id().as_uuid())
        .bind(position.title().as_str())
        .bind(position.code().as_str())
        .bind(position.department_id().as_uuid())
        .bind(position.reports_to().map(|parent| parent.as_uuid()))
        .bind(position.is_active())
        .execute(&self.pool)
        .await;

        match result {
            Ok(outcome) => {
                if outcome.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!(
                        "position '{}' does not exist",
                        position.id()
                    )));
                }

                Ok(())
            }
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "position code '{}' is already taken",
                        position.code().as_str()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to update position '{}': {error}",
                    position.id()
                )))
            }
        }
    }
}
