//! `PostgreSQL` repository implementation for tasks.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    pool::BoundedPool,
    schema::tasks,
};
use crate::pagination::{Page, PageRequest};
use crate::todo::{
    domain::{ListId, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::dsl::sql;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Timestamptz;

/// Database time, or one microsecond past the stored value when that is later.
const NEXT_UPDATED_AT: &str = "GREATEST(now(), updated_at + interval '1 microsecond')";

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: BoundedPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a bounded connection pool.
    #[must_use]
    pub const fn new(pool: BoundedPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: &Task) -> TaskRepositoryResult<Task> {
        const OPERATION: &str = "create task";
        let list_id = task.list_id();
        let new_row = NewTaskRow::from(task);
        let row = self
            .pool
            .run(OPERATION, move |connection| {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .returning(TaskRow::as_returning())
                    .get_result(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                            TaskRepositoryError::ListNotFound(list_id)
                        }
                        _ => TaskRepositoryError::storage(OPERATION, err),
                    })
            })
            .await?;
        row_to_task(OPERATION, row)
    }

    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        const OPERATION: &str = "get task";
        let row = self
            .pool
            .run(OPERATION, move |connection| {
                tasks::table
                    .find(id.into_inner())
                    .select(TaskRow::as_select())
                    .first(connection)
                    .optional()
                    .map_err(|err| TaskRepositoryError::storage(OPERATION, err))
            })
            .await?
            .ok_or(TaskRepositoryError::NotFound(id))?;
        row_to_task(OPERATION, row)
    }

    async fn list_by_list_id(
        &self,
        list_id: ListId,
        page: PageRequest,
    ) -> TaskRepositoryResult<Page<Task>> {
        const OPERATION: &str = "list tasks";
        let (rows, total) = self
            .pool
            .run(OPERATION, move |connection| {
                connection
                    .transaction::<_, DieselError, _>(|tx| {
                        let total = tasks::table
                            .filter(tasks::list_id.eq(list_id.into_inner()))
                            .count()
                            .get_result::<i64>(tx)?;
                        let rows = load_page(tx, list_id, page)?;
                        Ok((rows, total))
                    })
                    .map_err(|err| TaskRepositoryError::storage(OPERATION, err))
            })
            .await?;
        let items = rows
            .into_iter()
            .map(|row| row_to_task(OPERATION, row))
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<Task> {
        const OPERATION: &str = "update task";
        let id = task.id();
        let changes = TaskChangeset::from(task);
        let row = self
            .pool
            .run(OPERATION, move |connection| {
                diesel::update(tasks::table.find(id.into_inner()))
                    .set((&changes, tasks::updated_at.eq(sql::<Timestamptz>(NEXT_UPDATED_AT))))
                    .returning(TaskRow::as_returning())
                    .get_result(connection)
                    .optional()
                    .map_err(|err| TaskRepositoryError::storage(OPERATION, err))
            })
            .await?
            .ok_or(TaskRepositoryError::NotFound(id))?;
        row_to_task(OPERATION, row)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        const OPERATION: &str = "delete task";
        let deleted = self
            .pool
            .run(OPERATION, move |connection| {
                diesel::delete(tasks::table.find(id.into_inner()))
                    .execute(connection)
                    .map_err(|err| TaskRepositoryError::storage(OPERATION, err))
            })
            .await?;
        if deleted == 0 {
            return Err(TaskRepositoryError::NotFound(id));
        }
        Ok(())
    }
}

fn load_page(
    connection: &mut PgConnection,
    list_id: ListId,
    page: PageRequest,
) -> Result<Vec<TaskRow>, DieselError> {
    let mut query = tasks::table
        .filter(tasks::list_id.eq(list_id.into_inner()))
        .order((tasks::created_at.desc(), tasks::id.desc()))
        .select(TaskRow::as_select())
        .offset(i64::from(page.offset()))
        .into_boxed();
    if let Some(limit) = page.limit() {
        query = query.limit(i64::from(limit));
    }
    query.load(connection)
}

fn row_to_task(operation: &'static str, row: TaskRow) -> TaskRepositoryResult<Task> {
    Task::try_from(row).map_err(|err| TaskRepositoryError::storage(operation, err))
}
