//! `PostgreSQL` repository implementation for lists.

use super::{
    models::{ListChangeset, ListRow, NewListRow, NewTaskRow},
    pool::BoundedPool,
    schema::{lists, tasks},
};
use crate::pagination::{Page, PageRequest};
use crate::todo::{
    domain::{List, ListId, Task},
    ports::{ListRepository, ListRepositoryError, ListRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed list repository.
#[derive(Debug, Clone)]
pub struct PostgresListRepository {
    pool: BoundedPool,
}

impl PostgresListRepository {
    /// Creates a new repository from a bounded connection pool.
    #[must_use]
    pub const fn new(pool: BoundedPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListRepository for PostgresListRepository {
    async fn create(&self, list: &List) -> ListRepositoryResult<List> {
        const OPERATION: &str = "create list";
        let new_row = NewListRow::from(list);
        let row = self
            .pool
            .run(OPERATION, move |connection| {
                diesel::insert_into(lists::table)
                    .values(&new_row)
                    .returning(ListRow::as_returning())
                    .get_result(connection)
                    .map_err(|err| ListRepositoryError::storage(OPERATION, err))
            })
            .await?;
        row_to_list(OPERATION, row)
    }

    async fn create_with_tasks(&self, list: &List, tasks: &[Task]) -> ListRepositoryResult<List> {
        const OPERATION: &str = "create list with tasks";
        let new_row = NewListRow::from(list);
        let task_rows: Vec<NewTaskRow> = tasks.iter().map(NewTaskRow::from).collect();
        let row = self
            .pool
            .run(OPERATION, move |connection| {
                connection
                    .transaction::<_, diesel::result::Error, _>(|tx| {
                        let row = diesel::insert_into(lists::table)
                            .values(&new_row)
                            .returning(ListRow::as_returning())
                            .get_result(tx)?;
                        if !task_rows.is_empty() {
                            diesel::insert_into(tasks::table)
                                .values(&task_rows)
                                .execute(tx)?;
                        }
                        Ok(row)
                    })
                    .map_err(|err| ListRepositoryError::storage(OPERATION, err))
            })
            .await?;
        row_to_list(OPERATION, row)
    }

    async fn get_by_id(&self, id: ListId) -> ListRepositoryResult<List> {
        const OPERATION: &str = "get list";
        let row = self
            .pool
            .run(OPERATION, move |connection| {
                lists::table
                    .find(id.into_inner())
                    .select(ListRow::as_select())
                    .first(connection)
                    .optional()
                    .map_err(|err| ListRepositoryError::storage(OPERATION, err))
            })
            .await?
            .ok_or(ListRepositoryError::NotFound(id))?;
        row_to_list(OPERATION, row)
    }

    async fn update(&self, list: &List) -> ListRepositoryResult<List> {
        const OPERATION: &str = "update list";
        let id = list.id();
        let changes = ListChangeset::from(list);
        let row = self
            .pool
            .run(OPERATION, move |connection| {
                diesel::update(lists::table.find(id.into_inner()))
                    .set(&changes)
                    .returning(ListRow::as_returning())
                    .get_result(connection)
                    .optional()
                    .map_err(|err| ListRepositoryError::storage(OPERATION, err))
            })
            .await?
            .ok_or(ListRepositoryError::NotFound(id))?;
        row_to_list(OPERATION, row)
    }

    async fn delete(&self, id: ListId) -> ListRepositoryResult<()> {
        const OPERATION: &str = "delete list";
        let deleted = self
            .pool
            .run(OPERATION, move |connection| {
                connection
                    .transaction::<_, diesel::result::Error, _>(|tx| {
                        diesel::delete(tasks::table.filter(tasks::list_id.eq(id.into_inner())))
                            .execute(tx)?;
                        diesel::delete(lists::table.find(id.into_inner())).execute(tx)
                    })
                    .map_err(|err| ListRepositoryError::storage(OPERATION, err))
            })
            .await?;
        if deleted == 0 {
            return Err(ListRepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn find_with_pagination(&self, page: PageRequest) -> ListRepositoryResult<Page<List>> {
        const OPERATION: &str = "find lists";
        let (rows, total) = self
            .pool
            .run(OPERATION, move |connection| {
                connection
                    .transaction::<_, diesel::result::Error, _>(|tx| {
                        let total = lists::table.count().get_result::<i64>(tx)?;
                        let rows = load_page(tx, page)?;
                        Ok((rows, total))
                    })
                    .map_err(|err| ListRepositoryError::storage(OPERATION, err))
            })
            .await?;
        let items = rows
            .into_iter()
            .map(|row| row_to_list(OPERATION, row))
            .collect::<ListRepositoryResult<Vec<_>>>()?;
        Ok(Page::new(items, u64::try_from(total).unwrap_or_default()))
    }

    async fn search_by_title(&self, query: &str) -> ListRepositoryResult<Vec<List>> {
        const OPERATION: &str = "search lists by title";
        let pattern = format!("%{}%", escape_like(query));
        let rows = self
            .pool
            .run(OPERATION, move |connection| {
                lists::table
                    .filter(lists::title.ilike(pattern))
                    .order((lists::created_at.desc(), lists::id.desc()))
                    .select(ListRow::as_select())
                    .load(connection)
                    .map_err(|err| ListRepositoryError::storage(OPERATION, err))
            })
            .await?;
        rows.into_iter()
            .map(|row| row_to_list(OPERATION, row))
            .collect()
    }
}

fn load_page(
    connection: &mut PgConnection,
    page: PageRequest,
) -> Result<Vec<ListRow>, diesel::result::Error> {
    let mut query = lists::table
        .order((lists::created_at.desc(), lists::id.desc()))
        .select(ListRow::as_select())
        .offset(i64::from(page.offset()))
        .into_boxed();
    if let Some(limit) = page.limit() {
        query = query.limit(i64::from(limit));
    }
    query.load(connection)
}

fn row_to_list(operation: &'static str, row: ListRow) -> ListRepositoryResult<List> {
    List::try_from(row).map_err(|err| ListRepositoryError::storage(operation, err))
}

/// Escapes `LIKE` metacharacters so the query matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
