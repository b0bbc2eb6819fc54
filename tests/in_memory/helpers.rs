//! Shared fixtures for in-memory integration tests.

use crate::test_helpers::SteppingClock;
use rstest::fixture;
use std::sync::Arc;
use todo_api::todo::{
    adapters::memory::{InMemoryListRepository, InMemoryTaskRepository, InMemoryTodoStore},
    services::{ListService, TaskService},
};

/// List service under test.
pub type Lists = ListService<InMemoryListRepository, SteppingClock>;

/// Task service under test.
pub type Tasks = TaskService<InMemoryTaskRepository, InMemoryListRepository, SteppingClock>;

/// List and task services sharing one store and one clock.
pub struct Services {
    /// List service.
    pub lists: Lists,
    /// Task service.
    pub tasks: Tasks,
}

/// Provides services over a fresh in-memory store.
#[fixture]
pub fn services() -> Services {
    let clock = Arc::new(SteppingClock::default());
    let store = InMemoryTodoStore::with_clock(Arc::<SteppingClock>::clone(&clock));
    let list_repository = Arc::new(store.list_repository());
    Services {
        lists: ListService::new(Arc::clone(&list_repository), Arc::clone(&clock)),
        tasks: TaskService::new(Arc::new(store.task_repository()), list_repository, clock),
    }
}

/// Provides a store whose repositories read a stepping clock.
#[fixture]
pub fn store() -> InMemoryTodoStore {
    InMemoryTodoStore::with_clock(Arc::new(SteppingClock::default()))
}
