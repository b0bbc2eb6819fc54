//! Application services orchestrating list and task use cases.

mod list;
mod task;

pub use list::{
    CreateListRequest, ListService, ListServiceError, ListServiceResult, UpdateListRequest,
};
pub use task::{TaskService, TaskServiceError, TaskServiceResult, UpdateTaskRequest};

use super::ports::{ListRepositoryError, TaskRepositoryError};

/// Coarse classification of a service failure.
///
/// Transport layers map each kind to one response category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    /// Caller-supplied data failed validation.
    Validation,
    /// The addressed list or task does not exist.
    NotFound,
    /// The storage layer failed or timed out.
    Storage,
}

impl From<&ListRepositoryError> for ServiceErrorKind {
    fn from(err: &ListRepositoryError) -> Self {
        match err {
            ListRepositoryError::NotFound(_) => Self::NotFound,
            ListRepositoryError::Storage(_) => Self::Storage,
        }
    }
}

impl From<&TaskRepositoryError> for ServiceErrorKind {
    fn from(err: &TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(_) | TaskRepositoryError::ListNotFound(_) => {
                Self::NotFound
            }
            TaskRepositoryError::Storage(_) => Self::Storage,
        }
    }
}
