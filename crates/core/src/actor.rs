use serde::{Deserialize, Serialize};

use crate::ids::EmployeeId;

/// Pre-validated caller identity handed down from the authenticated
/// controller layer. Authorization has already happened upstream; this
/// carries only what the change log needs to attribute a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorIdentity {
    subject: String,
    display_name: String,
    employee_id: Option<EmployeeId>,
}

impl ActorIdentity {
    /// Creates an actor identity from session data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        employee_id: Option<EmployeeId>,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            employee_id,
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current caller.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the employee profile linked to the caller, if any.
    #[must_use]
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_id
    }
}
