//! Storage failures shared by the list and task repository ports.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure at the persistence boundary, tagged with the failing operation.
///
/// The display form names only the operation; driver detail is kept as the
/// error source.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The operation exceeded its time budget.
    #[error("{operation} timed out after {budget:?}")]
    Timeout {
        /// Name of the repository operation.
        operation: &'static str,
        /// Budget that was exceeded.
        budget: Duration,
    },

    /// The store rejected the operation or could not be reached.
    #[error("{operation} failed")]
    Failure {
        /// Name of the repository operation.
        operation: &'static str,
        /// Underlying driver, pool, or runtime error.
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync>,
    },
}

impl StorageError {
    /// Wraps a lower-level error with the failing operation name.
    pub fn failure(
        operation: &'static str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Failure {
            operation,
            source: Arc::new(err),
        }
    }

    /// Creates a timeout error for the given operation and budget.
    #[must_use]
    pub const fn timeout(operation: &'static str, budget: Duration) -> Self {
        Self::Timeout { operation, budget }
    }

    /// Returns the name of the failing operation.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Timeout { operation, .. } | Self::Failure { operation, .. } => operation,
        }
    }
}
