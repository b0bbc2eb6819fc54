//! Shared helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use eyre::{Result, WrapErr};
use std::time::Duration;
use todo_api::config::DatabaseSettings;
use todo_api::todo::adapters::postgres::{
    BoundedPool, PostgresListRepository, PostgresTaskRepository, TodoPgPool, apply_schema,
    build_pool,
};
use uuid::Uuid;

/// Environment variable naming the database used by these tests.
pub const TEST_DATABASE_URL_ENV: &str = "TODO_API_TEST_DATABASE_URL";

/// A schema created for one test and dropped afterwards.
pub struct TestDatabase {
    base_url: String,
    schema: String,
    raw_pool: TodoPgPool,
    pool: BoundedPool,
}

impl TestDatabase {
    /// Returns the bounded pool scoped to this test's schema.
    pub fn pool(&self) -> &BoundedPool {
        &self.pool
    }

    /// Wraps the schema's pool with a different operation budget.
    pub fn pool_with_budget(&self, budget: Duration) -> BoundedPool {
        BoundedPool::new(self.raw_pool.clone(), budget)
    }

    /// Returns a list repository over this schema.
    pub fn list_repository(&self) -> PostgresListRepository {
        PostgresListRepository::new(self.pool.clone())
    }

    /// Returns a task repository over this schema.
    pub fn task_repository(&self) -> PostgresTaskRepository {
        PostgresTaskRepository::new(self.pool.clone())
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        if let Ok(mut connection) = PgConnection::establish(&self.base_url) {
            connection
                .batch_execute(&format!("DROP SCHEMA IF EXISTS \"{}\" CASCADE", self.schema))
                .ok();
        }
    }
}

/// Creates a fresh schema with the application tables applied.
///
/// # Errors
///
/// Returns an error if [`TEST_DATABASE_URL_ENV`] is unset, the schema cannot
/// be created, or the pool cannot be built.
pub async fn test_database() -> Result<TestDatabase> {
    let base_url = std::env::var(TEST_DATABASE_URL_ENV)
        .wrap_err_with(|| format!("{TEST_DATABASE_URL_ENV} must name a PostgreSQL database"))?;
    let schema = format!("todo_test_{}", Uuid::new_v4().simple());

    let mut admin = PgConnection::establish(&base_url)?;
    admin.batch_execute(&format!("CREATE SCHEMA \"{schema}\""))?;

    let separator = if base_url.contains('?') { '&' } else { '?' };
    let mut settings = DatabaseSettings::new(format!(
        "{base_url}{separator}options=-csearch_path%3D{schema}"
    ));
    settings.pool_size = 2;
    let budget = settings.operation_timeout;
    let raw_pool = tokio::task::spawn_blocking(move || build_pool(&settings)).await??;
    let pool = BoundedPool::new(raw_pool.clone(), budget);
    apply_schema(&pool).await?;

    Ok(TestDatabase {
        base_url,
        schema,
        raw_pool,
        pool,
    })
}
