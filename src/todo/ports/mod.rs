//! Port contracts for list and task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the todo services.

pub mod list_repository;
pub mod storage;
pub mod task_repository;

pub use list_repository::{ListRepository, ListRepositoryError, ListRepositoryResult};
pub use storage::StorageError;
pub use task_repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
