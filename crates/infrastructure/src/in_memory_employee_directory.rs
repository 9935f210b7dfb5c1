use std::collections::HashMap;

use async_trait::async_trait;
use orgmesh_application::EmployeeDirectory;
use orgmesh_core::{AppResult, EmployeeId};
use orgmesh_domain::EmployeeRef;
use tokio::sync::RwLock;

/// In-memory employee directory for development and tests.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<HashMap<EmployeeId, EmployeeRef>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            employees: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an employee profile.
    pub async fn insert(&self, employee: EmployeeRef) {
        self.employees.write().await.insert(employee.id(), employee);
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn find_employee(&self, id: EmployeeId) -> AppResult<Option<EmployeeRef>> {
        Ok(self.employees.read().await.get(&id).cloned())
    }

    async fn list_employees(&self, ids: &[EmployeeId]) -> AppResult<Vec<EmployeeRef>> {
        let employees = self.employees.read().await;
        let mut listed: Vec<EmployeeRef> = ids
            .iter()
            .filter_map(|id| employees.get(id).cloned())
            .collect();
        listed.sort_by(|left, right| {
            left.display_name()
                .as_str()
                .cmp(right.display_name().as_str())
        });
        Ok(listed)
    }
}
