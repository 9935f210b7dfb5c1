use std::str::FromStr;

use orgmesh_core::AppError;
use serde::{Deserialize, Serialize};

/// Kind of mutation recorded in the change log.
///
/// Reassignment is a distinct action from a plain update so audit queries
/// can find department moves without diffing snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    /// Entity was created.
    Created,
    /// Entity fields were updated in place.
    Updated,
    /// Position was moved to a different department.
    Reassigned,
    /// Entity active flag was cleared.
    Deactivated,
}

impl ChangeAction {
    /// Returns a stable storage value for the action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Reassigned => "reassigned",
            Self::Deactivated => "deactivated",
        }
    }
}

impl FromStr for ChangeAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "created" => Ok(Self::Created),
            "updated" => Ok(Self::Updated),
            "reassigned" => Ok(Self::Reassigned),
            "deactivated" => Ok(Self::Deactivated),
            _ => Err(AppError::Validation(format!(
                "unknown change action '{value}'"
            ))),
        }
    }
}

/// Entity family a change-log entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeEntityKind {
    /// A department document.
    Department,
    /// A position document.
    Position,
}

impl ChangeEntityKind {
    /// Returns a stable storage value for the entity kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Position => "position",
        }
    }
}

impl FromStr for ChangeEntityKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "department" => Ok(Self::Department),
            "position" => Ok(Self::Position),
            _ => Err(AppError::Validation(format!(
                "unknown change entity kind '{value}'"
            ))),
        }
    }
}
