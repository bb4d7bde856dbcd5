//! Error types for query execution.

use thiserror::Error;

/// Errors that can surface from a query execution tree.
///
/// Decorator nodes (tagging, and any future wrapper) never construct
/// errors of their own; they forward whatever the wrapped cursor reports.
/// Only leaf nodes and the storage layer originate errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The execution was cancelled through its [`CancellationToken`].
    ///
    /// [`CancellationToken`]: crate::exec::CancellationToken
    #[error("query cancelled")]
    Cancelled,

    /// A failure inside the storage backend while enumerating primitives.
    #[error("storage error: {0}")]
    Storage(String),

    /// Corrupted or otherwise invalid iteration state.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for query execution operations.
pub type QueryResult<T> = Result<T, QueryError>;
