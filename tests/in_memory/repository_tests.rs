//! Task repository behaviour without the service layer.

use super::helpers::store;
use crate::test_helpers::SteppingClock;
use eyre::Result;
use rstest::rstest;
use todo_api::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{List, ListTitle, Task, TaskPatch, TaskText},
    ports::{ListRepository, TaskRepository},
};

#[rstest]
#[tokio::test]
async fn update_stamps_unchanged_task(store: InMemoryTodoStore) -> Result<()> {
    let clock = SteppingClock::default();
    let lists = store.list_repository();
    let tasks = store.task_repository();
    let list = lists
        .create(&List::new(ListTitle::new("Groceries")?, None, &clock))
        .await?;
    let task = tasks
        .create(&Task::new(list.id(), TaskText::new("Milk")?, &clock))
        .await?;

    let updated = tasks.update(&task).await?;

    assert!(updated.updated_at() > task.updated_at());
    assert_eq!(updated.created_at(), task.created_at());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn stale_snapshot_never_moves_updated_at_backwards(store: InMemoryTodoStore) -> Result<()> {
    let clock = SteppingClock::default();
    let lists = store.list_repository();
    let tasks = store.task_repository();
    let list = lists
        .create(&List::new(ListTitle::new("Groceries")?, None, &clock))
        .await?;
    let task = tasks
        .create(&Task::new(list.id(), TaskText::new("Milk")?, &clock))
        .await?;
    let mut earlier = task.clone();
    earlier.apply(
        TaskPatch {
            text: None,
            completed: Some(true),
        },
        &clock,
    );
    let mut later = task.clone();
    later.apply(
        TaskPatch {
            text: Some(TaskText::new("Oat milk")?),
            completed: None,
        },
        &clock,
    );

    let first = tasks.update(&later).await?;
    let second = tasks.update(&earlier).await?;

    assert!(second.updated_at() > first.updated_at());
    assert!(second.completed());
    assert_eq!(second.text().as_str(), "Milk");
    Ok(())
}
