use async_trait::async_trait;
use orgmesh_application::{ChangeLogSink, ChangeRecord};
use orgmesh_core::{AppError, AppResult};
use sqlx::PgPool;

/// PostgreSQL-backed append-only change log.
#[derive(Clone)]
pub struct PostgresChangeLogRepository {
    pool: PgPool,
}

impl PostgresChangeLogRepository {
    /// Creates a change log with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChangeLogSink for PostgresChangeLogRepository {
    async fn log_change(&self, record: ChangeRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO change_log_entries (
                action,
                entity_kind,
                entity_id,
                before_snapshot,
                after_snapshot,
                actor_employee_id,
                summary
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.action.as_str())
        .bind(record.entity_kind.as_str())
        .bind(&record.entity_id)
        .bind(&record.before)
        .bind(&record.after)
        .bind(record.actor_employee_id.map(|id| id.as_uuid()))
        .bind(&record.summary)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to append change log entry: {error}"))
        })?;

        Ok(())
    }
}
