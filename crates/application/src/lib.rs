//! Application services and ports for the organization structure core.

#![forbid(unsafe_code)]

mod department_service;
mod hierarchy_service;
mod org_ports;
mod position_service;

#[cfg(test)]
mod test_support;

pub use department_service::DepartmentService;
pub use hierarchy_service::HierarchyService;
pub use org_ports::{
    ChangeLogSink, ChangeRecord, CreateDepartmentInput, CreatePositionInput, EmployeeDirectory,
    OrgRepository, UpdateDepartmentInput, UpdatePositionInput, snapshot,
};
pub use position_service::PositionService;
