//! List endpoints.

use super::{
    AppState, CreateListBody, DEFAULT_PAGE_LIMIT, ListResponse, PaginationQuery, SearchQuery,
    UpdateListBody, error::ApiErrorResponse, parse_list_id, total_header,
};
use crate::pagination::PageRequest;
use crate::todo::services::{CreateListRequest, UpdateListRequest};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

type ApiResult<T> = Result<T, ApiErrorResponse>;

pub(super) async fn create_list(
    State(state): State<AppState>,
    body: Result<Json<CreateListBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ListResponse>)> {
    let Json(body) = body?;
    let request = CreateListRequest {
        title: body.title,
        description: body.description,
        tasks: body.tasks,
    };
    let list = state.lists.create_list(request).await?;
    Ok((StatusCode::CREATED, Json(list.into())))
}

pub(super) async fn list_lists(
    State(state): State<AppState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> ApiResult<([(&'static str, String); 1], Json<Vec<ListResponse>>)> {
    let Query(query) = query?;
    let page = PageRequest::new(
        query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        query.offset.unwrap_or_default(),
    );
    let lists = state.lists.get_all_lists_with_pagination(page).await?;
    let headers = total_header(&lists);
    let body = lists.map(ListResponse::from).items;
    Ok((headers, Json(body)))
}

pub(super) async fn search_lists(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ListResponse>>> {
    let Query(query) = query?;
    let lists = state.lists.search_by_title(&query.title).await?;
    Ok(Json(lists.into_iter().map(ListResponse::from).collect()))
}

pub(super) async fn get_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ListResponse>> {
    let list = state.lists.get_list(parse_list_id(&id)?).await?;
    Ok(Json(list.into()))
}

pub(super) async fn update_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateListBody>, JsonRejection>,
) -> ApiResult<Json<ListResponse>> {
    let list_id = parse_list_id(&id)?;
    let Json(body) = body?;
    let list = state
        .lists
        .update_list(list_id, UpdateListRequest::new(body.title, body.description))
        .await?;
    Ok(Json(list.into()))
}

pub(super) async fn delete_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.lists.delete_list(parse_list_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
