//! List behaviour through the service layer.

use super::helpers::{Services, services};
use eyre::Result;
use rstest::rstest;
use std::collections::HashSet;
use todo_api::pagination::PageRequest;
use todo_api::todo::{
    domain::ListId,
    services::{CreateListRequest, ServiceErrorKind, UpdateListRequest},
};

#[rstest]
#[case(1)]
#[case(50)]
#[case(100)]
#[tokio::test]
async fn titles_within_bounds_round_trip(services: Services, #[case] length: usize) -> Result<()> {
    let title = "t".repeat(length);

    let created = services
        .lists
        .create_list(CreateListRequest::new(title.clone()))
        .await?;
    let fetched = services.lists.get_list(created.id()).await?;

    assert_eq!(fetched.title().as_str(), title);
    assert_eq!(fetched, created);
    Ok(())
}

#[rstest]
#[case(0)]
#[case(101)]
#[tokio::test]
async fn titles_out_of_bounds_persist_nothing(
    services: Services,
    #[case] length: usize,
) -> Result<()> {
    let err = services
        .lists
        .create_list(CreateListRequest::new("t".repeat(length)))
        .await
        .expect_err("creation should fail");

    assert_eq!(err.kind(), ServiceErrorKind::Validation);
    assert_eq!(services.lists.get_all_lists().await?.total, 0);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn pagination_windows_are_disjoint_and_cover_all(services: Services) -> Result<()> {
    let mut created = Vec::new();
    for index in 0..5 {
        let list = services
            .lists
            .create_list(CreateListRequest::new(format!("List {index}")))
            .await?;
        created.push(list.id());
    }
    created.reverse();

    let mut seen: Vec<ListId> = Vec::new();
    for offset in [0, 2, 4] {
        let page = services
            .lists
            .get_all_lists_with_pagination(PageRequest::new(2, offset))
            .await?;
        assert_eq!(page.total, 5);
        seen.extend(page.items.iter().map(|list| list.id()));
    }

    assert_eq!(seen, created);
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 5);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn offset_past_the_end_yields_empty_page(services: Services) -> Result<()> {
    services
        .lists
        .create_list(CreateListRequest::new("Only"))
        .await?;

    let page = services
        .lists
        .get_all_lists_with_pagination(PageRequest::new(10, 5))
        .await?;

    assert!(page.items.is_empty());
    assert_eq!(page.total, 1);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn search_is_case_insensitive_and_literal(services: Services) -> Result<()> {
    for title in ["Groceries", "Weekend groceries", "100% done", "Chores"] {
        services.lists.create_list(CreateListRequest::new(title)).await?;
    }

    let groceries = services.lists.search_by_title("GROCER").await?;
    let titles: Vec<&str> = groceries.iter().map(|list| list.title().as_str()).collect();
    assert_eq!(titles, vec!["Weekend groceries", "Groceries"]);

    let percent = services.lists.search_by_title("%").await?;
    assert_eq!(percent.len(), 1);

    assert!(services.lists.search_by_title("missing").await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn update_replaces_title_and_description(services: Services) -> Result<()> {
    let created = services
        .lists
        .create_list(CreateListRequest::new("Draft").with_description("old"))
        .await?;

    let updated = services
        .lists
        .update_list(created.id(), UpdateListRequest::new("Final", None))
        .await?;

    assert_eq!(updated.title().as_str(), "Final");
    assert_eq!(updated.description(), None);
    assert_eq!(updated.created_at(), created.created_at());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn deleted_list_is_not_found(services: Services) -> Result<()> {
    let created = services
        .lists
        .create_list(CreateListRequest::new("Temporary"))
        .await?;

    services.lists.delete_list(created.id()).await?;
    let err = services
        .lists
        .get_list(created.id())
        .await
        .expect_err("lookup should fail");

    assert_eq!(err.kind(), ServiceErrorKind::NotFound);
    Ok(())
}
