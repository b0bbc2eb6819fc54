//! Error types for todo domain validation.

use thiserror::Error;

/// Errors returned while constructing domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The list title length is outside the accepted bounds.
    #[error("title must be {min}..{max} characters, got {actual}")]
    InvalidListTitle {
        /// Smallest accepted length.
        min: usize,
        /// Largest accepted length.
        max: usize,
        /// Length of the rejected value.
        actual: usize,
    },

    /// The task text length is outside the accepted bounds.
    #[error("text must be {min}..{max} characters, got {actual}")]
    InvalidTaskText {
        /// Smallest accepted length.
        min: usize,
        /// Largest accepted length.
        max: usize,
        /// Length of the rejected value.
        actual: usize,
    },
}
