//! Service layer for list use cases.

use super::ServiceErrorKind;
use crate::pagination::{Page, PageRequest};
use crate::todo::{
    domain::{List, ListId, ListTitle, Task, TaskText, TodoDomainError},
    ports::{ListRepository, ListRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListRequest {
    /// List title.
    pub title: String,
    /// Optional description; empty text is stored as absent.
    pub description: Option<String>,
    /// Texts of tasks created together with the list.
    pub tasks: Vec<String>,
}

impl CreateListRequest {
    /// Creates a request for a list with no description and no tasks.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            tasks: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial task texts.
    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<String>) -> Self {
        self.tasks = tasks;
        self
    }
}

/// Request payload for replacing a list's title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateListRequest {
    /// New title.
    pub title: String,
    /// New description; `None` clears it.
    pub description: Option<String>,
}

impl UpdateListRequest {
    /// Creates an update request.
    #[must_use]
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }
}

/// Service-level errors for list operations.
#[derive(Debug, Error)]
pub enum ListServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TodoDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ListRepositoryError),
}

impl ListServiceError {
    /// Classifies the failure.
    #[must_use]
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            Self::Domain(_) => ServiceErrorKind::Validation,
            Self::Repository(err) => err.into(),
        }
    }
}

/// Result type for list service operations.
pub type ListServiceResult<T> = Result<T, ListServiceError>;

/// List orchestration service.
pub struct ListService<R, C>
where
    R: ListRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ListService<R, C>
where
    R: ListRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new list service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a list, optionally with initial tasks.
    ///
    /// Every title and task text is validated before anything is stored.
    /// With initial tasks the list and all its tasks are persisted atomically.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::Domain`] when validation fails and
    /// repository errors when persistence fails.
    #[tracing::instrument(skip(self, request), fields(tasks = request.tasks.len()))]
    pub async fn create_list(&self, request: CreateListRequest) -> ListServiceResult<List> {
        let title = ListTitle::new(request.title)?;
        let texts = request
            .tasks
            .into_iter()
            .map(TaskText::new)
            .collect::<Result<Vec<_>, _>>()?;
        let list = List::new(title, request.description, &*self.clock);

        let stored = if texts.is_empty() {
            self.repository.create(&list).await?
        } else {
            let tasks: Vec<Task> = texts
                .into_iter()
                .map(|text| Task::new(list.id(), text, &*self.clock))
                .collect();
            self.repository.create_with_tasks(&list, &tasks).await?
        };
        tracing::info!(list_id = %stored.id(), "list created");
        Ok(stored)
    }

    /// Replaces a list's title and description.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::Domain`] for an invalid title and
    /// [`ListRepositoryError::NotFound`] when the list does not exist.
    #[tracing::instrument(skip(self, request))]
    pub async fn update_list(
        &self,
        id: ListId,
        request: UpdateListRequest,
    ) -> ListServiceResult<List> {
        let title = ListTitle::new(request.title)?;
        let mut list = self.repository.get_by_id(id).await?;
        list.update_details(title, request.description);
        Ok(self.repository.update(&list).await?)
    }

    /// Deletes a list together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::NotFound`] when the list does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_list(&self, id: ListId) -> ListServiceResult<()> {
        self.repository.delete(id).await?;
        tracing::info!("list deleted");
        Ok(())
    }

    /// Fetches a list.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::NotFound`] when the list does not exist.
    pub async fn get_list(&self, id: ListId) -> ListServiceResult<List> {
        Ok(self.repository.get_by_id(id).await?)
    }

    /// Returns every list, newest first.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn get_all_lists(&self) -> ListServiceResult<Page<List>> {
        Ok(self.repository.find_all().await?)
    }

    /// Returns one page of lists, newest first, with the overall count.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn get_all_lists_with_pagination(
        &self,
        page: PageRequest,
    ) -> ListServiceResult<Page<List>> {
        Ok(self.repository.find_with_pagination(page).await?)
    }

    /// Finds lists whose title contains `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns persistence-layer errors from the repository.
    pub async fn search_by_title(&self, query: &str) -> ListServiceResult<Vec<List>> {
        Ok(self.repository.search_by_title(query).await?)
    }
}
