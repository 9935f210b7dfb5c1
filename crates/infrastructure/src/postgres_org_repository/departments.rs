use super::*;

impl PostgresOrgRepository {
    pub(super) async fn insert_department_impl(&self, department: Department) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO departments (id, name, code, is_active)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(department.id().as_uuid())
        .bind(department.name().as_str())
        .bind(department.code().as_str())
        .bind(department.is_active())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "department code '{}' is already taken",
                        department.code().as_str()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to insert department: {error}"
                )))
            }
        }
    }

    pub(super) async fn find_department_impl(
        &self,
        id: DepartmentId,
    ) -> AppResult<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, code, is_active
            FROM departments
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find department '{id}': {error}"))
        })?;

        row.map(DepartmentRow::into_department).transpose()
    }

    pub(super) async fn find_department_by_code_impl(
        &self,
        code: &str,
    ) -> AppResult<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, code, is_active
            FROM departments
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find department by code '{code}': {error}"))
        })?;

        row.map(DepartmentRow::into_department).transpose()
    }

    pub(super) async fn list_departments_impl(&self) -> AppResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, DepartmentRow>(
            r#"
            SELECT id, name, code, is_active
            FROM departments
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list departments: {error}")))?;

        rows.into_iter().map(DepartmentRow::into_department).collect()
    }

    pub(super) async fn update_department_impl(&self, department: Department) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE departments
            SET name = $2, code = $3, is_active = $4
            WHERE id = $1
            "#,
        )
        .bind(department.id().as_uuid())
        .bind(department.name().as_str())
        .bind(department.code().as_str())
        .bind(department.is_active())
        .execute(&self.pool)
        .await;

        match result {
            Ok(outcome) => {
                if outcome.rows_affected() == 0 {
                    return Err(AppError::NotFound(format!(
                        "department '{}' does not exist",
                        department.id()
                    )));
                }

                Ok(())
            }
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "department code '{}' is already taken",
                        department.code().as_str()
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to update department '{}': {error}",
                    department.id()
                )))
            }
        }
    }
}
