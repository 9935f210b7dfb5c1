//! Console change-log sink for development. Logs records to tracing output.

use async_trait::async_trait;
use orgmesh_application::{ChangeLogSink, ChangeRecord};
use orgmesh_core::AppResult;
use tracing::info;

/// Development change-log sink that logs records to the console.
#[derive(Clone)]
pub struct ConsoleChangeLogSink;

impl ConsoleChangeLogSink {
    /// Creates a new console change-log sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleChangeLogSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangeLogSink for ConsoleChangeLogSink {
    async fn log_change(&self, record: ChangeRecord) -> AppResult<()> {
        info!(
            action = record.action.as_str(),
            entity_kind = record.entity_kind.as_str(),
            entity_id = %record.entity_id,
            actor_employee_id = ?record.actor_employee_id,
            summary = record.summary.as_deref().unwrap_or(""),
            "change log entry"
        );

        Ok(())
    }
}
