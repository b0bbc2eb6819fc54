//! Request and response bodies.

use crate::todo::domain::{List, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Page size applied when `limit` is absent.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Body of `POST /lists`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateListBody {
    /// List title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Texts of tasks to create with the list.
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// Body of `PATCH /lists/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateListBody {
    /// Replacement title.
    pub title: String,
    /// Replacement description; absent clears it.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /lists/{id}/tasks`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskBody {
    /// Task text.
    pub text: String,
}

/// Body of `PATCH /tasks/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskBody {
    /// Replacement text.
    #[serde(default)]
    pub text: Option<String>,
    /// Replacement completion flag.
    #[serde(default)]
    pub completed: Option<bool>,
}

/// `limit`/`offset` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationQuery {
    /// Page size; zero or below means unlimited.
    pub limit: Option<i64>,
    /// Number of leading items to skip.
    pub offset: Option<i64>,
}

/// `title` query parameter for list search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Substring to look for.
    #[serde(default)]
    pub title: String,
}

/// List representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    /// List identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<List> for ListResponse {
    fn from(list: List) -> Self {
        Self {
            id: list.id().into_inner(),
            title: list.title().as_str().to_owned(),
            description: list.description().map(str::to_owned),
            created_at: list.created_at(),
        }
    }
}

/// Task representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: Uuid,
    /// Owning list identifier.
    pub list_id: Uuid,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id().into_inner(),
            list_id: task.list_id().into_inner(),
            text: task.text().as_str().to_owned(),
            completed: task.completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
