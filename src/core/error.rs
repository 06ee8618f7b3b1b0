//! # Error Handling Module
//!
//! Crate-level error types for the catalog core. The document store is the
//! sole source of truth, so store failures propagate to the caller; cache
//! failures never reach this type — they are swallowed inside the caching
//! subsystem (see `caching::adapter`). Malformed entity ids are not errors
//! either: the read paths map them to "not found".

use thiserror::Error;

/// Main result type used throughout the catalog core
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors surfaced to the route layer
///
/// Each variant is a failure of the current operation. The route layer owns
/// the mapping to user-visible responses.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Document store failures (connection loss, query errors, timeouts
    /// enforced by the collection client)
    #[error("store error: {message}")]
    Store { message: String },

    /// Serialization failures for data crossing the store boundary
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    /// Create a store error with a custom message
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_formats_message() {
        let err = CatalogError::store("connection refused");
        assert_eq!(err.to_string(), "store error: connection refused");
    }
}
