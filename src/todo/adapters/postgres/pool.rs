//! Connection pool construction and deadline-bounded execution.

use crate::config::DatabaseSettings;
use crate::todo::ports::StorageError;
use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use std::time::Duration;

/// `PostgreSQL` connection pool type used by the todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL creating the `lists` and `tasks` tables.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_lists_and_tasks/up.sql");

/// Sets `statement_timeout` on every connection the pool hands out.
#[derive(Debug, Clone, Copy)]
struct StatementTimeout(Duration);

impl CustomizeConnection<PgConnection, r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), r2d2::Error> {
        connection
            .batch_execute(&format!("SET statement_timeout = {}", self.0.as_millis()))
            .map_err(r2d2::Error::QueryError)
    }
}

/// Builds a connection pool from database settings.
///
/// Checkout waits and server-side statements share the configured operation
/// timeout.
///
/// # Errors
///
/// Returns [`StorageError`] when the initial connections cannot be opened.
pub fn build_pool(settings: &DatabaseSettings) -> Result<TodoPgPool, StorageError> {
    let manager = ConnectionManager::<PgConnection>::new(settings.url.as_str());
    Pool::builder()
        .max_size(settings.pool_size)
        .connection_timeout(settings.operation_timeout)
        .connection_customizer(Box::new(StatementTimeout(settings.operation_timeout)))
        .build(manager)
        .map_err(|err| StorageError::failure("build connection pool", err))
}

/// Creates the tables and indexes if they do not exist yet.
///
/// # Errors
///
/// Returns [`StorageError`] when the DDL fails or exceeds the pool's budget.
pub async fn apply_schema(pool: &BoundedPool) -> Result<(), StorageError> {
    const OPERATION: &str = "apply schema";
    pool.run(OPERATION, |connection| {
        connection
            .batch_execute(SCHEMA_SQL)
            .map_err(|err| StorageError::failure(OPERATION, err))
    })
    .await
}

/// Connection pool paired with a per-operation deadline.
#[derive(Debug, Clone)]
pub struct BoundedPool {
    pool: TodoPgPool,
    budget: Duration,
}

impl BoundedPool {
    /// Wraps a pool with the deadline applied to every [`Self::run`] call.
    #[must_use]
    pub const fn new(pool: TodoPgPool, budget: Duration) -> Self {
        Self { pool, budget }
    }

    /// Returns the per-operation deadline.
    #[must_use]
    pub const fn budget(&self) -> Duration {
        self.budget
    }

    /// Runs a blocking Diesel closure on a pooled connection.
    ///
    /// The closure executes on the blocking thread pool. If it has not
    /// finished within the budget the caller receives
    /// [`StorageError::Timeout`]; the server-side `statement_timeout` aborts
    /// the query itself.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a [`StorageError`] converted into `E`
    /// for checkout failures, panics on the blocking thread, and timeouts.
    pub async fn run<F, T, E>(&self, operation: &'static str, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<StorageError> + Send + 'static,
    {
        let pool = self.pool.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| E::from(StorageError::failure(operation, err)))?;
            f(&mut connection)
        });

        match tokio::time::timeout(self.budget, handle).await {
            Ok(joined) => joined.map_err(|err| E::from(StorageError::failure(operation, err)))?,
            Err(_) => {
                tracing::warn!(operation, budget = ?self.budget, "storage operation timed out");
                Err(E::from(StorageError::timeout(operation, self.budget)))
            }
        }
    }
}
