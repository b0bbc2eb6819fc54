//! Task repository behaviour against `PostgreSQL`.

use super::helpers::test_database;
use crate::test_helpers::SteppingClock;
use diesel::RunQueryDsl;
use eyre::Result;
use std::time::Duration;
use todo_api::pagination::PageRequest;
use todo_api::todo::{
    domain::{List, ListId, ListTitle, Task, TaskId, TaskPatch, TaskText},
    ports::{ListRepository, StorageError, TaskRepository, TaskRepositoryError},
};

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn task_for_unknown_list_reports_list_not_found() -> Result<()> {
    let db = test_database().await?;
    let tasks = db.task_repository();
    let orphan = Task::new(ListId::new(), TaskText::new("Milk")?, &SteppingClock::default());

    let result = tasks.create(&orphan).await;

    assert!(matches!(result, Err(TaskRepositoryError::ListNotFound(_))));
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn update_persists_patch_and_timestamp() -> Result<()> {
    let db = test_database().await?;
    let lists = db.list_repository();
    let tasks = db.task_repository();
    let clock = SteppingClock::default();
    let groceries = lists
        .create(&List::new(ListTitle::new("Groceries")?, None, &clock))
        .await?;
    let mut milk = tasks
        .create(&Task::new(groceries.id(), TaskText::new("Milk")?, &clock))
        .await?;
    let created_at = milk.created_at();

    milk.apply(
        TaskPatch {
            text: None,
            completed: Some(true),
        },
        &clock,
    );
    tasks.update(&milk).await?;
    let fetched = tasks.get_by_id(milk.id()).await?;

    assert!(fetched.completed());
    assert_eq!(fetched.text().as_str(), "Milk");
    assert_eq!(fetched.created_at(), created_at);
    assert!(fetched.updated_at() > created_at);
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn update_stamps_unchanged_task() -> Result<()> {
    let db = test_database().await?;
    let lists = db.list_repository();
    let tasks = db.task_repository();
    let clock = SteppingClock::default();
    let groceries = lists
        .create(&List::new(ListTitle::new("Groceries")?, None, &clock))
        .await?;
    let milk = tasks
        .create(&Task::new(groceries.id(), TaskText::new("Milk")?, &clock))
        .await?;

    let updated = tasks.update(&milk).await?;

    assert!(updated.updated_at() > milk.updated_at());
    assert_eq!(updated.created_at(), milk.created_at());
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn stale_snapshot_never_moves_updated_at_backwards() -> Result<()> {
    let db = test_database().await?;
    let lists = db.list_repository();
    let tasks = db.task_repository();
    let clock = SteppingClock::default();
    let groceries = lists
        .create(&List::new(ListTitle::new("Groceries")?, None, &clock))
        .await?;
    let milk = tasks
        .create(&Task::new(groceries.id(), TaskText::new("Milk")?, &clock))
        .await?;
    let mut earlier = milk.clone();
    earlier.apply(
        TaskPatch {
            text: None,
            completed: Some(true),
        },
        &clock,
    );
    let mut later = milk.clone();
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

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn missing_task_operations_are_not_found() -> Result<()> {
    let db = test_database().await?;
    let tasks = db.task_repository();
    let ghost = Task::new(ListId::new(), TaskText::new("Ghost")?, &SteppingClock::default());

    assert!(matches!(
        tasks.get_by_id(TaskId::new()).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    assert!(matches!(
        tasks.update(&ghost).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    assert!(matches!(
        tasks.delete(ghost.id()).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn listing_is_scoped_ordered_and_windowed() -> Result<()> {
    let db = test_database().await?;
    let lists = db.list_repository();
    let tasks = db.task_repository();
    let clock = SteppingClock::default();
    let first = lists
        .create(&List::new(ListTitle::new("First")?, None, &clock))
        .await?;
    let second = lists
        .create(&List::new(ListTitle::new("Second")?, None, &clock))
        .await?;
    for text in ["a", "b", "c"] {
        tasks
            .create(&Task::new(first.id(), TaskText::new(text)?, &clock))
            .await?;
    }
    tasks
        .create(&Task::new(second.id(), TaskText::new("other")?, &clock))
        .await?;

    let page = tasks
        .list_by_list_id(first.id(), PageRequest::new(2, 1))
        .await?;

    let texts: Vec<&str> = page.items.iter().map(|task| task.text().as_str()).collect();
    assert_eq!(texts, vec!["b", "a"]);
    assert_eq!(page.total, 3);
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn slow_operations_time_out() -> Result<()> {
    let db = test_database().await?;
    let pool = db.pool_with_budget(Duration::from_millis(50));

    let result: Result<usize, StorageError> = pool
        .run("sleep", |connection| {
            diesel::sql_query("SELECT pg_sleep(1)")
                .execute(connection)
                .map_err(|err| StorageError::failure("sleep", err))
        })
        .await;

    assert!(matches!(result, Err(StorageError::Timeout { .. })));
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn pool_round_trips_a_trivial_query() -> Result<()> {
    let db = test_database().await?;

    let rows = db
        .pool()
        .run("select one", |connection| {
            diesel::sql_query("SELECT 1")
                .execute(connection)
                .map_err(|err| StorageError::failure("select one", err))
        })
        .await?;

    assert_eq!(rows, 1);
    Ok(())
}
