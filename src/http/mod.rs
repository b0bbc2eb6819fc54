//! HTTP surface: router, shared state, and handlers.

mod dto;
mod error;
mod lists;
mod tasks;

pub use dto::{
    CreateListBody, CreateTaskBody, DEFAULT_PAGE_LIMIT, ListResponse, PaginationQuery,
    SearchQuery, TaskResponse, UpdateListBody, UpdateTaskBody,
};
pub use error::{ApiError, ApiErrorResponse, FieldError, NOT_FOUND, SERVER_ERROR, VALIDATION_FAILED};

use crate::pagination::Page;
use crate::todo::{
    adapters::memory::InMemoryTodoStore,
    domain::{ListId, TaskId},
    ports::{ListRepository, TaskRepository},
    services::{ListService, TaskService},
};
use axum::{Router, extract::Request, routing::get};
use mockable::DefaultClock;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

/// Header carrying the size of the unrestricted result set.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// List service over a runtime-selected repository.
pub type DynListService = ListService<dyn ListRepository, DefaultClock>;

/// Task service over runtime-selected repositories.
pub type DynTaskService = TaskService<dyn TaskRepository, dyn ListRepository, DefaultClock>;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    lists: Arc<DynListService>,
    tasks: Arc<DynTaskService>,
}

impl AppState {
    /// Builds services over the given repositories.
    #[must_use]
    pub fn new(lists: Arc<dyn ListRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        let clock = Arc::new(DefaultClock);
        Self {
            lists: Arc::new(ListService::new(Arc::clone(&lists), Arc::clone(&clock))),
            tasks: Arc::new(TaskService::new(tasks, lists, clock)),
        }
    }

    /// Builds state over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        let store = InMemoryTodoStore::new();
        Self::new(
            Arc::new(store.list_repository()),
            Arc::new(store.task_repository()),
        )
    }
}

/// Builds the application router with tracing and request-id layers.
#[must_use]
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/lists", get(lists::list_lists).post(lists::create_list))
        .route("/lists/search", get(lists::search_lists))
        .route(
            "/lists/{id}",
            get(lists::get_list)
                .patch(lists::update_list)
                .delete(lists::delete_list),
        )
        .route(
            "/lists/{id}/tasks",
            get(tasks::list_tasks).post(tasks::create_task),
        )
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                    let request_id = request
                        .headers()
                        .get("x-request-id")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// Parses a list identifier from a path segment.
///
/// A segment that is not a UUID cannot name a stored list.
fn parse_list_id(raw: &str) -> Result<ListId, ApiErrorResponse> {
    Uuid::parse_str(raw)
        .map(ListId::from_uuid)
        .map_err(|_| ApiErrorResponse::not_found(format!("list not found: {raw}")))
}

fn parse_task_id(raw: &str) -> Result<TaskId, ApiErrorResponse> {
    Uuid::parse_str(raw)
        .map(TaskId::from_uuid)
        .map_err(|_| ApiErrorResponse::not_found(format!("task not found: {raw}")))
}

fn total_header(page: &Page<impl Sized>) -> [(&'static str, String); 1] {
    [(TOTAL_COUNT_HEADER, page.total.to_string())]
}
