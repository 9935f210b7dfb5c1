use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use orgmesh_core::{AppError, AppResult, DepartmentId, EmployeeId, PositionId};
use orgmesh_domain::{
    DepartmentHierarchy, EmployeeRef, EmployeeStructure, PositionAssignment, assemble_forest,
};

use crate::org_ports::{EmployeeDirectory, OrgRepository};

/// Application service that rebuilds department forests on every read.
#[derive(Clone)]
pub struct HierarchyService {
    repository: Arc<dyn OrgRepository>,
    directory: Arc<dyn EmployeeDirectory>,
}

impl HierarchyService {
    /// Creates a hierarchy service from its port implementations.
    #[must_use]
    pub fn new(repository: Arc<dyn OrgRepository>, directory: Arc<dyn EmployeeDirectory>) -> Self {
        Self {
            repository,
            directory,
        }
    }

    /// Builds the full reporting forest for one department.
    ///
    /// Inactive positions are included; filtering them out is a
    /// presentation concern. Employees are attached through open
    /// assignments; assignments whose profile no longer resolves are
    /// skipped rather than failing the read.
    pub async fn department_hierarchy(
        &self,
        department_id: DepartmentId,
    ) -> AppResult<DepartmentHierarchy> {
        let department = self
            .repository
            .find_department(department_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("department '{department_id}' does not exist"))
            })?;

        let positions = self
            .repository
            .list_positions_by_department(department_id)
            .await?;
        let assignments = self
            .repository
            .open_assignments_by_department(department_id)
            .await?;

        let employee_ids: BTreeSet<EmployeeId> = assignments
            .iter()
            .map(PositionAssignment::employee_id)
            .collect();
        let employee_ids: Vec<EmployeeId> = employee_ids.into_iter().collect();
        let profiles: HashMap<EmployeeId, EmployeeRef> = self
            .directory
            .list_employees(&employee_ids)
            .await?
            .into_iter()
            .map(|profile| (profile.id(), profile))
            .collect();

        let mut employees_by_position: HashMap<PositionId, Vec<EmployeeRef>> = HashMap::new();
        for assignment in &assignments {
            if let Some(profile) = profiles.get(&assignment.employee_id()) {
                employees_by_position
                    .entry(assignment.position_id())
                    .or_default()
                    .push(profile.clone());
            }
        }

        let roots = assemble_forest(positions, employees_by_position)?;

        Ok(DepartmentHierarchy { department, roots })
    }

    /// Resolves an employee's own reporting lineage: the open assignment,
    /// its position, and that position's department.
    pub async fn my_structure(&self, employee_id: EmployeeId) -> AppResult<EmployeeStructure> {
        let employee = self
            .directory
            .find_employee(employee_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("employee profile '{employee_id}' does not exist"))
            })?;

        let assignment = self
            .repository
            .open_assignment_for_employee(employee_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "employee '{employee_id}' has no open position assignment"
                ))
            })?;

        let position = self
            .repository
            .find_position(assignment.position_id())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "position '{}' does not exist",
                    assignment.position_id()
                ))
            })?;

        let department = self
            .repository
            .find_department(position.department_id())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "department '{}' does not exist",
                    position.department_id()
                ))
            })?;

        Ok(EmployeeStructure {
            employee,
            position,
            department,
        })
    }
}
