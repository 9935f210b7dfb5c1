//! Shared primitives for all Rust crates in Orgmesh.

#![forbid(unsafe_code)]

/// Caller identity primitives shared across services.
pub mod actor;
/// Strongly-typed identifiers for persisted org-structure entities.
pub mod ids;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use actor::ActorIdentity;
pub use ids::{AssignmentId, DepartmentId, EmployeeId, PositionId};

/// Result type used across Orgmesh crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or a prerequisite entity that exists but is inactive.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal unexpected error or stored-data inconsistency.
    #[error("internal error: {0}")]
    Internal(String),
}
