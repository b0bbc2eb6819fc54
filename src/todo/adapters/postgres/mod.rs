//! `PostgreSQL` adapters for list and task persistence.
//!
//! Both repositories share a [`BoundedPool`], which runs Diesel work on the
//! blocking thread pool under a per-operation deadline.

mod list_repository;
mod models;
mod pool;
mod schema;
mod task_repository;

pub use list_repository::PostgresListRepository;
pub use pool::{BoundedPool, SCHEMA_SQL, TodoPgPool, apply_schema, build_pool};
pub use task_repository::PostgresTaskRepository;
