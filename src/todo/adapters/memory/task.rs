//! In-memory task repository.

use super::{InMemoryTodoStore, sort_newest_first};
use crate::pagination::{Page, PageRequest};
use crate::todo::{
    domain::{ListId, PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    store: InMemoryTodoStore,
}

impl InMemoryTaskRepository {
    /// Creates a repository over a fresh, private store.
    ///
    /// Without lists in the same store every [`TaskRepository::create`] fails
    /// with [`TaskRepositoryError::ListNotFound`]; use
    /// [`InMemoryTodoStore::task_repository`] to share state with a list
    /// repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository over an existing store.
    #[must_use]
    pub const fn with_store(store: InMemoryTodoStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> TaskRepositoryResult<Task> {
        const OPERATION: &str = "create task";
        let mut state = self.store.write(OPERATION)?;
        if !state.lists.contains_key(&task.list_id()) {
            return Err(TaskRepositoryError::ListNotFound(task.list_id()));
        }
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::storage(
                OPERATION,
                std::io::Error::other(format!("duplicate task identifier: {}", task.id())),
            ));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(task.clone())
    }

    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let state = self.store.read("get task")?;
        state
            .tasks
            .get(&id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn list_by_list_id(
        &self,
        list_id: ListId,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>> {
        let state = self.store.read("list tasks")?;
        let mut ordered: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.list_id() == list_id)
            .cloned()
            .collect();
        sort_newest_first(&mut ordered, |task| (task.created_at(), task.id()));
        Ok(Page::from_ordered(&ordered, page))
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.store.write("update task")?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        // Only the mutable columns are written; identity and ownership stay.
        let mut next = Task::from_persisted(PersistedTaskData {
            id: stored.id(),
            list_id: stored.list_id(),
            text: task.text().clone(),
            completed: task.completed(),
            created_at: stored.created_at(),
            updated_at: stored.updated_at(),
        });
        next.touch(self.store.clock());
        *stored = next;
        Ok(stored.clone())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.store.write("delete task")?;
        state
            .tasks
            .remove(&id)
            .map(drop)
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
