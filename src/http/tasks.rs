//! Task endpoints.

use super::{
    AppState, CreateTaskBody, DEFAULT_PAGE_LIMIT, PaginationQuery, TaskResponse, UpdateTaskBody,
    error::ApiErrorResponse, parse_list_id, parse_task_id, total_header,
};
use crate::pagination::PageRequest;
use crate::todo::services::UpdateTaskRequest;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

type ApiResult<T> = Result<T, ApiErrorResponse>;

pub(super) async fn create_task(
    State(state): State<AppState>,
    Path(raw_list_id): Path<String>,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let list_id = parse_list_id(&raw_list_id)?;
    let Json(body) = body?;
    let task = state.tasks.create_task(list_id, body.text).await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

pub(super) async fn list_tasks(
    State(state): State<AppState>,
    Path(raw_list_id): Path<String>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> ApiResult<([(&'static str, String); 1], Json<Vec<TaskResponse>>)> {
    let list_id = parse_list_id(&raw_list_id)?;
    let Query(query) = query?;
    let page = PageRequest::new(
        query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        query.offset.unwrap_or_default(),
    );
    let tasks = state.tasks.list_tasks(list_id, page).await?;
    let headers = total_header(&tasks);
    Ok((headers, Json(tasks.map(TaskResponse::from).items)))
}

pub(super) async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks.get_task(parse_task_id(&id)?).await?;
    Ok(Json(task.into()))
}

pub(super) async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = parse_task_id(&id)?;
    let Json(body) = body?;
    let request = UpdateTaskRequest {
        text: body.text,
        completed: body.completed,
    };
    let task = state.tasks.update_task(task_id, request).await?;
    Ok(Json(task.into()))
}

pub(super) async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.tasks.delete_task(parse_task_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
