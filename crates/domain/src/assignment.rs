use chrono::{DateTime, Utc};
use orgmesh_core::{AppError, AppResult, AssignmentId, DepartmentId, EmployeeId, PositionId};
use serde::{Deserialize, Serialize};

/// A time-bounded link between an employee and a position.
///
/// The department id is denormalized at assignment time so department-wide
/// queries do not need to join through positions. An assignment with no
/// end date is the employee's current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAssignment {
    id: AssignmentId,
    position_id: PositionId,
    employee_id: EmployeeId,
    department_id: DepartmentId,
    starts_on: DateTime<Utc>,
    ends_on: Option<DateTime<Utc>>,
}

impl PositionAssignment {
    /// Creates an assignment with validated date bounds.
    pub fn new(
        id: AssignmentId,
        position_id: PositionId,
        employee_id: EmployeeId,
        department_id: DepartmentId,
        starts_on: DateTime<Utc>,
        ends_on: Option<DateTime<Utc>>,
    ) -> AppResult<Self> {
        if let Some(ends_on) = ends_on
            && ends_on < starts_on
        {
            return Err(AppError::Validation(format!(
                "assignment end date {ends_on} precedes start date {starts_on}"
            )));
        }

        Ok(Self {
            id,
            position_id,
            employee_id,
            department_id,
            starts_on,
            ends_on,
        })
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the assigned position.
    #[must_use]
    pub fn position_id(&self) -> PositionId {
        self.position_id
    }

    /// Returns the assigned employee.
    #[must_use]
    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns the department denormalized at assignment time.
    #[must_use]
    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    /// Returns the start date.
    #[must_use]
    pub fn starts_on(&self) -> DateTime<Utc> {
        self.starts_on
    }

    /// Returns the end date, when the assignment has been closed.
    #[must_use]
    pub fn ends_on(&self) -> Option<DateTime<Utc>> {
        self.ends_on
    }

    /// Returns whether the assignment is currently held.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.ends_on.is_none()
    }

    /// Returns a copy closed at the provided instant.
    #[must_use]
    pub fn closed(&self, at: DateTime<Utc>) -> Self {
        Self {
            ends_on: Some(at),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use orgmesh_core::{AssignmentId, DepartmentId, EmployeeId, PositionId};

    use super::PositionAssignment;

    #[test]
    fn assignment_rejects_end_before_start() {
        let now = Utc::now();
        let result = PositionAssignment::new(
            AssignmentId::new(),
            PositionId::new(),
            EmployeeId::new(),
            DepartmentId::new(),
            now,
            Some(now - Duration::days(1)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn closing_makes_assignment_not_open() {
        let now = Utc::now();
        let assignment = PositionAssignment::new(
            AssignmentId::new(),
            PositionId::new(),
            EmployeeId::new(),
            DepartmentId::new(),
            now,
            None,
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(assignment.is_open());
        let closed = assignment.closed(now + Duration::days(30));
        assert!(!closed.is_open());
    }
}
