use async_trait::async_trait;
use orgmesh_application::EmployeeDirectory;
use orgmesh_core::{AppError, AppResult, EmployeeId};
use orgmesh_domain::EmployeeRef;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// PostgreSQL-backed read-only employee directory.
#[derive(Clone)]
pub struct PostgresEmployeeDirectory {
    pool: PgPool,
}

impl PostgresEmployeeDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EmployeeRow {
    id: Uuid,
    display_name: String,
    email: Option<String>,
}

impl EmployeeRow {
    fn into_employee(self) -> AppResult<EmployeeRef> {
        let id = self.id;
        EmployeeRef::new(EmployeeId::from_uuid(id), self.display_name, self.email).map_err(
            |error| {
                AppError::Internal(format!("persisted employee '{id}' is invalid: {error}"))
            },
        )
    }
}

#[async_trait]
impl EmployeeDirectory for PostgresEmployeeDirectory {
    async fn find_employee(&self, id: EmployeeId) -> AppResult<Option<EmployeeRef>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, display_name, email
            FROM employee_profiles
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find employee '{id}': {error}")))?;

        row.map(EmployeeRow::into_employee).transpose()
    }

    async fn list_employees(&self, ids: &[EmployeeId]) -> AppResult<Vec<EmployeeRef>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = ids.iter().map(EmployeeId::as_uuid).collect();
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT id, display_name, email
            FROM employee_profiles
            WHERE id = ANY($1)
            ORDER BY display_name
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list employees: {error}")))?;

        rows.into_iter().map(EmployeeRow::into_employee).collect()
    }
}
