use orgmesh_core::{AppResult, DepartmentId, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Top-level organizational unit with a globally unique code.
///
/// Departments are never hard-deleted; deactivation keeps referential
/// history intact for positions and assignments that point at them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    id: DepartmentId,
    name: NonEmptyString,
    code: NonEmptyString,
    is_active: bool,
}

impl Department {
    /// Creates a department with validated fields.
    pub fn new(
        id: DepartmentId,
        name: impl Into<String>,
        code: impl Into<String>,
        is_active: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            name: NonEmptyString::new(name)?,
            code: NonEmptyString::new(code)?,
            is_active,
        })
    }

    /// Returns the department identifier.
    #[must_use]
    pub fn id(&self) -> DepartmentId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the unique department code.
    #[must_use]
    pub fn code(&self) -> &NonEmptyString {
        &self.code
    }

    /// Returns whether the department is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns a copy with the active flag cleared.
    #[must_use]
    pub fn deactivated(&self) -> Self {
        Self {
            is_active: false,
            ..self.clone()
        }
    }
}
