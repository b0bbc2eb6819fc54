//! In-memory repositories for tests and database-free deployments.
//!
//! Both repositories share one lock-guarded store so that list deletion can
//! cascade to tasks and task creation can check its parent list, the same
//! guarantees the relational schema gives.

mod list;
mod task;

pub use list::InMemoryListRepository;
pub use task::InMemoryTaskRepository;

use crate::todo::domain::{List, ListId, Task, TaskId};
use crate::todo::ports::StorageError;
use mockable::{Clock, DefaultClock};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Clock handle shared by the repositories of one store.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Shared in-memory state backing both repositories.
///
/// The store's clock stamps `updated_at` on every task update.
#[derive(Clone)]
pub struct InMemoryTodoStore {
    state: Arc<RwLock<TodoState>>,
    clock: SharedClock,
}

#[derive(Debug, Default)]
struct TodoState {
    lists: HashMap<ListId, List>,
    tasks: HashMap<TaskId, Task>,
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl fmt::Debug for InMemoryTodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTodoStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl InMemoryTodoStore {
    /// Creates an empty store reading the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store reading the given clock.
    #[must_use]
    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            state: Arc::default(),
            clock,
        }
    }

    /// Returns a list repository backed by this store.
    #[must_use]
    pub fn list_repository(&self) -> InMemoryListRepository {
        InMemoryListRepository::with_store(self.clone())
    }

    /// Returns a task repository backed by this store.
    #[must_use]
    pub fn task_repository(&self) -> InMemoryTaskRepository {
        InMemoryTaskRepository::with_store(self.clone())
    }

    fn clock(&self) -> &(dyn Clock + Send + Sync) {
        &*self.clock
    }

    fn read(
        &self,
        operation: &'static str,
    ) -> Result<RwLockReadGuard<'_, TodoState>, StorageError> {
        self.state.read().map_err(|err| poisoned(operation, &err))
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, TodoState>, StorageError> {
        self.state.write().map_err(|err| poisoned(operation, &err))
    }
}

fn poisoned<G>(operation: &'static str, err: &PoisonError<G>) -> StorageError {
    StorageError::failure(operation, std::io::Error::other(err.to_string()))
}

/// Sorts newest first, ties broken by identifier, descending.
fn sort_newest_first<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> K) {
    items.sort_by_key(|item| Reverse(key(item)));
}
