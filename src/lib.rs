//! Todo API: list and task management over HTTP.
//!
//! This crate provides a CRUD backend for todo lists and the tasks they own,
//! with pagination, title search, and a relational persistence layer.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`todo`]: Lists, tasks, their repositories, and orchestration services
//! - [`pagination`]: Offset/limit windows shared by list queries
//! - [`http`]: Axum router, handlers, and the JSON error envelope
//! - [`config`]: Environment-driven process configuration
//! - [`telemetry`]: Tracing subscriber installation

pub mod config;
pub mod http;
pub mod pagination;
pub mod telemetry;
pub mod todo;
