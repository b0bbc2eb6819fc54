//! Diesel row models for list and task persistence.

use super::schema::{lists, tasks};
use crate::todo::domain::{
    List, ListId, ListTitle, PersistedListData, PersistedTaskData, Task, TaskId, TaskText,
    TodoDomainError,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for list records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// List title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for list records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lists)]
pub struct NewListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// List title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Mutable list columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = lists, treat_none_as_null = true)]
pub struct ListChangeset {
    /// New title.
    pub title: String,
    /// New description; `None` clears the column.
    pub description: Option<String>,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning list identifier.
    pub list_id: uuid::Uuid,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning list identifier.
    pub list_id: uuid::Uuid,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Caller-controlled task columns; `updated_at` is set by the statement.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New text.
    pub text: String,
    /// New completion flag.
    pub completed: bool,
}

impl From<&List> for NewListRow {
    fn from(list: &List) -> Self {
        Self {
            id: list.id().into_inner(),
            title: list.title().as_str().to_owned(),
            description: list.description().map(str::to_owned),
            created_at: list.created_at(),
        }
    }
}

impl From<&List> for ListChangeset {
    fn from(list: &List) -> Self {
        Self {
            title: list.title().as_str().to_owned(),
            description: list.description().map(str::to_owned),
        }
    }
}

impl TryFrom<ListRow> for List {
    type Error = TodoDomainError;

    fn try_from(row: ListRow) -> Result<Self, Self::Error> {
        Ok(Self::from_persisted(PersistedListData {
            id: ListId::from_uuid(row.id),
            title: ListTitle::new(row.title)?,
            description: row.description,
            created_at: row.created_at,
        }))
    }
}

impl From<&Task> for NewTaskRow {
    fn from(task: &Task) -> Self {
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

impl From<&Task> for TaskChangeset {
    fn from(task: &Task) -> Self {
        Self {
            text: task.text().as_str().to_owned(),
            completed: task.completed(),
        }
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = TodoDomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(row.id),
            list_id: ListId::from_uuid(row.list_id),
            text: TaskText::new(row.text)?,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}
