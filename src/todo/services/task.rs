//! Service layer for task use cases.

use super::ServiceErrorKind;
use crate::pagination::{Page, PageRequest};
use crate::todo::{
    domain::{ListId, Task, TaskId, TaskPatch, TaskText, TodoDomainError},
    ports::{ListRepository, ListRepositoryError, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for a partial task update.
///
/// `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    /// Replacement text.
    pub text: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// The parent list lookup failed.
    #[error(transparent)]
    List(#[from] ListRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskServiceError {
    /// Classifies the failure.
    #[must_use]
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::Domain(_) => ServiceErrorKind::Validation,
            Self::List(err) => err.into(),
            Self::Repository(err) => err.into(),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
pub struct TaskService<T, L, C>
where
    T: TaskRepository + ?Sized,
    L: ListRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    lists: Arc<L>,
    clock: Arc<C>,
}

impl<T, L, C> TaskService<T, L, C>
where
    T: TaskRepository + ?Sized,
    L: ListRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, lists: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            lists,
            clock,
        }
    }

    /// Creates a task in an existing list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for invalid text,
    /// [`ListRepositoryError::NotFound`] when the list does not exist, and
    /// repository errors when persistence fails.
    #[tracing::instrument(skip(self, text))]
    pub async fn create_task(
        &self,
        list_id: ListId,
        text: impl Into<String> + Send,
    ) -> TaskServiceResult<Task> {
        let task_text = TaskText::new(text)?;
        self.lists.get_by_id(list_id).await?;
        let task = Task::new(list_id, task_text, &*self.clock);
        let stored = self.tasks.create(&task).await?;
        tracing::info!(task_id = %stored.id(), "task created");
        Ok(stored)
    }

    /// Returns one page of a list's tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::NotFound`] when the list does not exist
    /// and persistence-layer errors from the repositories.
    pub async fn list_tasks(
        &self,
        list_id: ListId,
        page: PageRequest,
    ) -> TaskServiceResult<Page<Task>> {
        self.lists.get_by_id(list_id).await?;
        Ok(self.tasks.list_by_list_id(list_id, page).await?)
    }

    /// Fetches a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Task> {
        Ok(self.tasks.get_by_id(id).await?)
    }

    /// Applies a partial update.
    ///
    /// The update timestamp always moves forward, even when the request
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when replacement text is invalid
    /// and [`TaskRepositoryError::NotFound`] when the task does not exist.
    #[tracing::instrument(skip(self, request))]
    pub async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let patch = TaskPatch {
            text: request.text.map(TaskText::new).transpose()?,
            completed: request.completed,
        };
        let mut task = self.tasks.get_by_id(id).await?;
        task.apply(patch, &*self.clock);
        Ok(self.tasks.update(&task).await?)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<()> {
        self.tasks.delete(id).await?;
        tracing::info!("task deleted");
        Ok(())
    }
}
