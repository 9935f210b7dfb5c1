//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_change_log;
mod in_memory_change_log;
mod in_memory_employee_directory;
mod in_memory_org_repository;
mod postgres_change_log_repository;
mod postgres_employee_directory;
mod postgres_org_repository;

pub use console_change_log::ConsoleChangeLogSink;
pub use in_memory_change_log::InMemoryChangeLog;
pub use in_memory_employee_directory::InMemoryEmployeeDirectory;
pub use in_memory_org_repository::InMemoryOrgRepository;
pub use postgres_change_log_repository::PostgresChangeLogRepository;
pub use postgres_employee_directory::PostgresEmployeeDirectory;
pub use postgres_org_repository::PostgresOrgRepository;
