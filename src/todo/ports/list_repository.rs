//! Repository port for list persistence, pagination, and search.

use super::StorageError;
use crate::pagination::{Page, PageRequest};
use crate::todo::domain::{List, ListId, Task};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for list repository operations.
pub type ListRepositoryResult<T> = Result<T, ListRepositoryError>;

/// List persistence contract.
///
/// Collections are ordered newest first by creation time, ties broken by
/// identifier, also descending.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Stores a new list and returns the stored entity.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::Storage`] on constraint violation or
    /// connectivity failure.
    async fn create(&self, list: &List) -> ListRepositoryResult<List>;

    /// Stores a new list together with its initial tasks, atomically.
    ///
    /// Either the list and every task are stored, or none of them are.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::Storage`] when any insert fails.
    async fn create_with_tasks(&self, list: &List, tasks: &[Task]) -> ListRepositoryResult<List>;

    /// Finds a list by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::NotFound`] when no list has the ID.
    async fn get_by_id(&self, id: ListId) -> ListRepositoryResult<List>;

    /// Overwrites the title and description of an existing list.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::NotFound`] when no row was affected.
    async fn update(&self, list: &List) -> ListRepositoryResult<List>;

    /// Deletes a list and every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::NotFound`] when no row was affected.
    async fn delete(&self, id: ListId) -> ListRepositoryResult<()>;

    /// Returns every list.
    async fn find_all(&self) -> ListRepositoryResult<Page<List>> {
        self.find_with_pagination(PageRequest::unbounded()).await
    }

    /// Returns one window of lists plus the total number of lists.
    async fn find_with_pagination(&self, page: PageRequest) -> ListRepositoryResult<Page<List>>;

    /// Returns lists whose title contains `query`, ignoring case.
    ///
    /// No match yields an empty vector, not an error.
    async fn search_by_title(&self, query: &str) -> ListRepositoryResult<Vec<List>>;
}

/// Errors returned by list repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ListRepositoryError {
    /// The list was not found.
    #[error("list not found: {0}")]
    NotFound(ListId),

    /// Persistence-layer failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ListRepositoryError {
    /// Wraps a persistence error with the failing operation name.
    pub fn storage(
        operation: &'static str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage(StorageError::failure(operation, err))
    }
}
