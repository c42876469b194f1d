//! Error types for the stockroom store

use thiserror::Error;

/// The repository operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Search,
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::List => "inventory list",
            Operation::Get => "inventory item fetch",
            Operation::Search => "inventory search",
            Operation::Insert => "inventory item insert",
            Operation::Update => "inventory item update",
            Operation::Delete => "inventory item delete",
        };
        f.write_str(name)
    }
}

/// Errors that can occur when using the store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Invalid backend URL
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),

    /// HTTP transport failure
    #[error("{op} failed: {source}")]
    Http {
        /// Operation that was in flight
        op: Operation,
        #[source]
        source: reqwest::Error,
    },

    /// Backend rejected the request
    #[error("{op} rejected by backend ({status}): {message}")]
    Backend {
        /// Operation that was rejected
        op: Operation,
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No row matched the given id
    #[error("inventory item not found: {id}")]
    NotFound {
        /// The id that matched nothing
        id: String,
    },
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Emit the diagnostic for a failed operation before it reaches the caller.
pub(crate) fn log_failure(err: StoreError) -> StoreError {
    tracing::error!(error = %err, "inventory operation failed");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_name_themselves() {
        let err = StoreError::Backend {
            op: Operation::Get,
            status: 406,
            message: "0 rows".into(),
        };
        let text = err.to_string();
        assert!(text.contains("inventory item fetch"));
        assert!(text.contains("406"));
        assert!(text.contains("0 rows"));
    }

    #[test]
    fn not_found_mentions_inventory_item() {
        let err = StoreError::NotFound { id: "missing".into() };
        assert!(err.to_string().contains("inventory item"));
        assert!(err.to_string().contains("missing"));
    }
}
