//! Repository port for task persistence and per-list pagination.

use super::StorageError;
use crate::pagination::{Page, PageRequest};
use crate::todo::domain::{ListId, Task, TaskId};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns the stored entity.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::ListNotFound`] when the owning list does
    /// not exist, or [`TaskRepositoryError::Storage`] on other failures.
    async fn create(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has the ID.
    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Returns one window of a list's tasks, newest first, plus the number of
    /// tasks in that list.
    async fn list_by_list_id(
        &self,
        list_id: ListId,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>>;

    /// Persists text and completion of an existing task.
    ///
    /// The store stamps `updated_at` itself: the current time, or one
    /// microsecond past the stored value when that is later. The caller's
    /// `updated_at` is ignored, so stored timestamps never move backwards.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no row was affected.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no row was affected.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task references a list that does not exist.
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    /// Persistence-layer failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TaskRepositoryError {
    /// Wraps a persistence error with the failing operation name.
    pub fn storage(
        operation: &'static str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage(StorageError::failure(operation, err))
    }
}
