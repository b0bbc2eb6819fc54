//! Todo API server.
//!
//! Reads configuration from the environment (see [`todo_api::config`]),
//! installs tracing, wires repositories for the selected storage mode, and
//! serves the HTTP API until SIGINT or SIGTERM.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use todo_api::config::{AppConfig, ConfigError, DEFAULT_LOG_FILTER, StorageMode};
use todo_api::http::{AppState, router};
use todo_api::telemetry;
use todo_api::todo::adapters::postgres::{
    BoundedPool, PostgresListRepository, PostgresTaskRepository, apply_schema, build_pool,
};
use todo_api::todo::ports::StorageError;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialise storage")]
    Storage(#[from] StorageError),
    #[error("failed to bind or serve")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            if telemetry::init(DEFAULT_LOG_FILTER).is_ok() {
                tracing::error!(%error, "configuration error");
            }
            return ExitCode::FAILURE;
        }
    };
    if telemetry::init(&config.log_filter).is_err() {
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(%error, "failed to create tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(serve(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = ?error, "server stopped with an error");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), StartupError> {
    tracing::info!(storage_mode = ?config.storage_mode, "starting todo API");
    let state = build_state(&config).await?;

    let listener = TcpListener::bind(config.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    let (signalled, shutdown_started) = oneshot::channel();
    let server = axum::serve(listener, router(state)).with_graceful_shutdown(async move {
        shutdown_signal().await;
        signalled.send(()).ok();
    });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut server => {
            joined.map_err(std::io::Error::other)??;
        }
        () = drain_deadline(shutdown_started, config.shutdown_timeout) => {
            tracing::warn!(
                timeout = ?config.shutdown_timeout,
                "in-flight requests did not finish in time; aborting"
            );
            server.abort();
        }
    }

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn build_state(config: &AppConfig) -> Result<AppState, StartupError> {
    match (config.storage_mode, &config.database) {
        (StorageMode::InMemory, _) => Ok(AppState::in_memory()),
        (StorageMode::Postgres, None) => Err(ConfigError::MissingDatabaseUrl.into()),
        (StorageMode::Postgres, Some(settings)) => {
            let owned = settings.clone();
            let connections = tokio::task::spawn_blocking(move || build_pool(&owned))
                .await
                .map_err(|err| StorageError::failure("build connection pool", err))??;
            let pool = BoundedPool::new(connections, settings.operation_timeout);
            apply_schema(&pool).await?;
            tracing::info!("database schema ready");
            Ok(AppState::new(
                Arc::new(PostgresListRepository::new(pool.clone())),
                Arc::new(PostgresTaskRepository::new(pool)),
            ))
        }
    }
}

/// Resolves once shutdown has started and the grace period has elapsed.
async fn drain_deadline(shutdown_started: oneshot::Receiver<()>, timeout: Duration) {
    if shutdown_started.await.is_err() {
        std::future::pending::<()>().await;
    }
    tokio::time::sleep(timeout).await;
}

/// Completes on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
