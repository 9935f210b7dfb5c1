//! Domain entities and invariants for the organization structure.

#![forbid(unsafe_code)]

mod assignment;
mod change;
mod department;
mod employee;
mod hierarchy;
mod position;

pub use assignment::PositionAssignment;
pub use change::{ChangeAction, ChangeEntityKind};
pub use department::Department;
pub use employee::EmployeeRef;
pub use hierarchy::{DepartmentHierarchy, EmployeeStructure, PositionNode, assemble_forest};
pub use position::Position;
