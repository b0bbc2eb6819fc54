//! In-memory list repository.

use super::{InMemoryTodoStore, sort_newest_first};
use crate::pagination::{Page, PageRequest};
use crate::todo::{
    domain::{List, ListId, Task},
    ports::{ListRepository, ListRepositoryError, ListRepositoryResult, StorageError},
};
use async_trait::async_trait;

/// Thread-safe in-memory list repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListRepository {
    store: InMemoryTodoStore,
}

impl InMemoryListRepository {
    /// Creates a repository over a fresh, private store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository over an existing store.
    #[must_use]
    pub const fn with_store(store: InMemoryTodoStore) -> Self {
        Self { store }
    }

    fn ordered(lists: impl Iterator<Item = List>) -> Vec<List> {
        let mut ordered: Vec<List> = lists.collect();
        sort_newest_first(&mut ordered, |list| (list.created_at(), list.id()));
        ordered
    }
}

#[async_trait]
impl ListRepository for InMemoryListRepository {
    async fn create(&self, list: &List) -> ListRepositoryResult<List> {
        const OPERATION: &str = "create list";
        let mut state = self.store.write(OPERATION)?;
        if state.lists.contains_key(&list.id()) {
            return Err(duplicate(OPERATION, list.id()));
        }
        state.lists.insert(list.id(), list.clone());
        Ok(list.clone())
    }

    async fn create_with_tasks(&self, list: &List, tasks: &[Task]) -> ListRepositoryResult<List> {
        const OPERATION: &str = "create list with tasks";
        let mut state = self.store.write(OPERATION)?;
        if state.lists.contains_key(&list.id()) {
            return Err(duplicate(OPERATION, list.id()));
        }
        // Validate every row before the first write so failure leaves no trace.
        for task in tasks {
            if task.list_id() != list.id() || state.tasks.contains_key(&task.id()) {
                return Err(ListRepositoryError::storage(
                    OPERATION,
                    std::io::Error::other(format!("task {} rejected", task.id())),
                ));
            }
        }
        state.lists.insert(list.id(), list.clone());
        for task in tasks {
            state.tasks.insert(task.id(), task.clone());
        }
        Ok(list.clone())
    }

    async fn get_by_id(&self, id: ListId) -> ListRepositoryResult<List> {
        let state = self.store.read("get list")?;
        state
            .lists
            .get(&id)
            .cloned()
            .ok_or(ListRepositoryError::NotFound(id))
    }

    async fn update(&self, list: &List) -> ListRepositoryResult<List> {
        let mut state = self.store.write("update list")?;
        let stored = state
            .lists
            .get_mut(&list.id())
            .ok_or(ListRepositoryError::NotFound(list.id()))?;
        stored.update_details(
            list.title().clone(),
            list.description().map(str::to_owned),
        );
        Ok(stored.clone())
    }

    async fn delete(&self, id: ListId) -> ListRepositoryResult<()> {
        let mut state = self.store.write("delete list")?;
        if state.lists.remove(&id).is_none() {
            return Err(ListRepositoryError::NotFound(id));
        }
        state.tasks.retain(|_, task| task.list_id() != id);
        Ok(())
    }

    async fn find_with_pagination(&self, page: PageRequest) -> ListRepositoryResult<Page<List>> {
        let state = self.store.read("find lists")?;
        let ordered = Self::ordered(state.lists.values().cloned());
        Ok(Page::from_ordered(&ordered, page))
    }

    async fn search_by_title(&self, query: &str) -> ListRepositoryResult<Vec<List>> {
        let state = self.store.read("search lists by title")?;
        let needle = query.to_lowercase();
        Ok(Self::ordered(
            state
                .lists
                .values()
                .filter(|list| list.title().as_str().to_lowercase().contains(&needle))
                .cloned(),
        ))
    }
}

fn duplicate(operation: &'static str, id: ListId) -> ListRepositoryError {
    ListRepositoryError::Storage(StorageError::failure(
        operation,
        std::io::Error::other(format!("duplicate list identifier: {id}")),
    ))
}
