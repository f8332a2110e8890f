//! Storage Errors
//!
//! Explicit error types with context. Backend-facing functions return
//! deferred results; validation failures fail fast before any storage
//! traffic. No retries anywhere.

use thiserror::Error;

/// Errors from storage operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A non-string value was supplied while the page-local backend is in
    /// effect. Raised before any storage mutation.
    #[error("non-string value for key '{key}' under local storage backend")]
    NonStringValue {
        /// Logical key carrying the offending value.
        key: String,
    },

    /// The host store rejected an operation. Propagated unchanged; aborts a
    /// whole reconciling load with no partial result.
    #[error("backend failure: {message}")]
    Backend {
        /// Host-supplied failure description.
        message: String,
    },

    /// An operation required a grant that is not held and has no fallback.
    #[error("missing grant: {grant}")]
    MissingGrant {
        /// Name of the absent grant.
        grant: &'static str,
    },

    /// A logical key was deleted, read, or written that is not present in
    /// the in-memory map.
    #[error("key not present: {key}")]
    KeyAbsent {
        /// The unknown logical key.
        key: String,
    },
}

impl StoreError {
    /// Create a string-only violation error.
    #[must_use]
    pub fn non_string(key: impl Into<String>) -> Self {
        Self::NonStringValue { key: key.into() }
    }

    /// Create a host backend failure.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create a missing-grant error.
    #[must_use]
    pub fn missing_grant(grant: &'static str) -> Self {
        Self::MissingGrant { grant }
    }

    /// Create a key-absence error.
    #[must_use]
    pub fn key_absent(key: impl Into<String>) -> Self {
        Self::KeyAbsent { key: key.into() }
    }

    /// Whether this is a contract violation by the caller (as opposed to a
    /// backend-side failure).
    #[must_use]
    pub fn is_violation(&self) -> bool {
        matches!(self, Self::NonStringValue { .. } | Self::KeyAbsent { .. })
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = StoreError::non_string("count");
        assert!(matches!(err, StoreError::NonStringValue { key } if key == "count"));

        let err = StoreError::key_absent("missing");
        assert!(matches!(err, StoreError::KeyAbsent { key } if key == "missing"));
    }

    #[test]
    fn test_is_violation() {
        assert!(StoreError::non_string("k").is_violation());
        assert!(StoreError::key_absent("k").is_violation());

        assert!(!StoreError::backend("down").is_violation());
        assert!(!StoreError::missing_grant("getValue").is_violation());
    }
}
