use orgmesh_core::{AppResult, DepartmentId, NonEmptyString, PositionId};
use serde::{Deserialize, Serialize};

/// A role slot within a department, optionally reporting to another
/// position through a single parent pointer.
///
/// The `reports_to` target is not required to live in the same department;
/// hierarchy assembly treats a parent outside the loaded department set as
/// absent rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    id: PositionId,
    title: NonEmptyString,
    code: NonEmptyString,
    department_id: DepartmentId,
    reports_to: Option<PositionId>,
    is_active: bool,
}

impl Position {
    /// Creates a position with validated fields.
    pub fn new(
        id: PositionId,
        title: impl Into<String>,
        code: impl Into<String>,
        department_id: DepartmentId,
        reports_to: Option<PositionId>,
        is_active: bool,
    ) -> AppResult<Self> {
        Ok(Self {
            id,
            title: NonEmptyString::new(title)?,
            code: NonEmptyString::new(code)?,
            department_id,
            reports_to,
            is_active,
        })
    }

    /// Returns the position identifier.
    #[must_use]
    pub fn id(&self) -> PositionId {
        self.id
    }

    /// Returns the position title.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the unique position code.
    #[must_use]
    pub fn code(&self) -> &NonEmptyString {
        &self.code
    }

    /// Returns the owning department.
    #[must_use]
    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    /// Returns the parent position this one reports to, if any.
    #[must_use]
    pub fn reports_to(&self) -> Option<PositionId> {
        self.reports_to
    }

    /// Returns whether the position is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns a copy owned by a different department.
    ///
    /// The parent pointer is deliberately left untouched, even when the
    /// move strands it in the old department.
    #[must_use]
    pub fn reassigned(&self, department_id: DepartmentId) -> Self {
        Self {
            department_id,
            ..self.clone()
        }
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
