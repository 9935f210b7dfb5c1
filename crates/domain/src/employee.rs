use orgmesh_core::{AppResult, EmployeeId, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Read-only projection of an employee profile, resolved through the
/// external profile store and attached to hierarchy nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    id: EmployeeId,
    display_name: NonEmptyString,
    email: Option<String>,
}

impl EmployeeRef {
    /// Creates an employee projection with a validated display name.
    pub fn new(
        id: EmployeeId,
        display_name: impl Into<String>,
        email: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            display_name: NonEmptyString::new(display_name)?,
            email,
        })
    }

    /// Returns the employee profile identifier.
    #[must_use]
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &NonEmptyString {
        &self.display_name
    }

    /// Returns the email, if the profile store has one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
