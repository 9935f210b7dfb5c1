use async_trait::async_trait;
use orgmesh_application::{ChangeLogSink, ChangeRecord};
use orgmesh_core::AppResult;
use tokio::sync::RwLock;

/// In-memory change-log sink that keeps every record for inspection.
#[derive(Debug, Default)]
pub struct InMemoryChangeLog {
    records: RwLock<Vec<ChangeRecord>>,
}

impl InMemoryChangeLog {
    /// Creates an empty in-memory change log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Returns every record appended so far, oldest first.
    pub async fn entries(&self) -> Vec<ChangeRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl ChangeLogSink for InMemoryChangeLog {
    async fn log_change(&self, record: ChangeRecord) -> AppResult<()> {
        self.records.write().await.push(record);
        Ok(())
    }
}
