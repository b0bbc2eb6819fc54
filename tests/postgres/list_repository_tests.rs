//! List repository behaviour against `PostgreSQL`.

use super::helpers::test_database;
use crate::test_helpers::SteppingClock;
use eyre::Result;
use todo_api::pagination::PageRequest;
use todo_api::todo::{
    domain::{List, ListId, ListTitle, Task, TaskText},
    ports::{ListRepository, ListRepositoryError, TaskRepository, TaskRepositoryError},
};

fn list(title: &str, clock: &SteppingClock) -> Result<List> {
    Ok(List::new(ListTitle::new(title)?, None, clock))
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn create_then_get_returns_equal_list() -> Result<()> {
    let db = test_database().await?;
    let repository = db.list_repository();
    let clock = SteppingClock::default();
    let original = List::new(
        ListTitle::new("Groceries")?,
        Some("Weekly shop".to_owned()),
        &clock,
    );

    let created = repository.create(&original).await?;
    let fetched = repository.get_by_id(original.id()).await?;

    assert_eq!(created, original);
    assert_eq!(fetched, original);
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn update_and_delete_of_missing_list_are_not_found() -> Result<()> {
    let db = test_database().await?;
    let repository = db.list_repository();
    let ghost = list("Ghost", &SteppingClock::default())?;

    let update = repository.update(&ghost).await;
    let delete = repository.delete(ghost.id()).await;
    let get = repository.get_by_id(ListId::new()).await;

    assert!(matches!(update, Err(ListRepositoryError::NotFound(_))));
    assert!(matches!(delete, Err(ListRepositoryError::NotFound(_))));
    assert!(matches!(get, Err(ListRepositoryError::NotFound(_))));
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn update_overwrites_title_and_clears_description() -> Result<()> {
    let db = test_database().await?;
    let repository = db.list_repository();
    let clock = SteppingClock::default();
    let mut stored = List::new(ListTitle::new("Draft")?, Some("notes".to_owned()), &clock);
    repository.create(&stored).await?;

    stored.update_details(ListTitle::new("Final")?, None);
    let updated = repository.update(&stored).await?;

    assert_eq!(updated.title().as_str(), "Final");
    assert_eq!(updated.description(), None);
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn pagination_is_newest_first_with_total() -> Result<()> {
    let db = test_database().await?;
    let repository = db.list_repository();
    let clock = SteppingClock::default();
    let mut ids = Vec::new();
    for index in 0..5 {
        let created = repository.create(&list(&format!("List {index}"), &clock)?).await?;
        ids.push(created.id());
    }
    ids.reverse();

    let mut seen = Vec::new();
    for offset in [0, 2, 4] {
        let page = repository
            .find_with_pagination(PageRequest::new(2, offset))
            .await?;
        assert_eq!(page.total, 5);
        seen.extend(page.items.iter().map(List::id));
    }
    let beyond = repository
        .find_with_pagination(PageRequest::new(2, 10))
        .await?;
    let all = repository.find_all().await?;

    assert_eq!(seen, ids);
    assert!(beyond.items.is_empty());
    assert_eq!(all.items.iter().map(List::id).collect::<Vec<_>>(), ids);
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn search_escapes_like_wildcards() -> Result<()> {
    let db = test_database().await?;
    let repository = db.list_repository();
    let clock = SteppingClock::default();
    for title in ["Groceries", "weekend GROCERIES", "100% done", "snake_case"] {
        repository.create(&list(title, &clock)?).await?;
    }

    let groceries = repository.search_by_title("grocer").await?;
    let percent = repository.search_by_title("%").await?;
    let underscore = repository.search_by_title("_").await?;
    let none = repository.search_by_title("absent").await?;

    assert_eq!(
        groceries
            .iter()
            .map(|found| found.title().as_str())
            .collect::<Vec<_>>(),
        vec!["weekend GROCERIES", "Groceries"]
    );
    assert_eq!(percent.len(), 1);
    assert_eq!(underscore.len(), 1);
    assert!(none.is_empty());
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn batch_creation_commits_list_and_tasks_together() -> Result<()> {
    let db = test_database().await?;
    let lists = db.list_repository();
    let tasks = db.task_repository();
    let clock = SteppingClock::default();
    let trip = list("Trip", &clock)?;
    let batch = vec![
        Task::new(trip.id(), TaskText::new("Passport")?, &clock),
        Task::new(trip.id(), TaskText::new("Tickets")?, &clock),
    ];

    lists.create_with_tasks(&trip, &batch).await?;
    let page = tasks
        .list_by_list_id(trip.id(), PageRequest::unbounded())
        .await?;

    assert_eq!(page.total, 2);
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn failed_batch_leaves_nothing_behind() -> Result<()> {
    let db = test_database().await?;
    let lists = db.list_repository();
    let clock = SteppingClock::default();
    let trip = list("Trip", &clock)?;
    let first = Task::new(trip.id(), TaskText::new("Passport")?, &clock);
    let batch = vec![first.clone(), first];

    let result = lists.create_with_tasks(&trip, &batch).await;

    assert!(matches!(result, Err(ListRepositoryError::Storage(_))));
    assert!(matches!(
        lists.get_by_id(trip.id()).await,
        Err(ListRepositoryError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
#[ignore = "needs TODO_API_TEST_DATABASE_URL"]
async fn deleting_a_list_cascades_to_tasks() -> Result<()> {
    let db = test_database().await?;
    let lists = db.list_repository();
    let tasks = db.task_repository();
    let clock = SteppingClock::default();
    let groceries = lists.create(&list("Groceries", &clock)?).await?;
    let milk = tasks
        .create(&Task::new(groceries.id(), TaskText::new("Milk")?, &clock))
        .await?;

    lists.delete(groceries.id()).await?;

    assert!(matches!(
        tasks.get_by_id(milk.id()).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    Ok(())
}
