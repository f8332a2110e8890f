//! Extension-Host Backend
//!
//! Delegates every operation to the host's asynchronous store. Operations
//! may suspend and may fail; host failures propagate unchanged. Each
//! operation kind is guarded by its grant.

use std::sync::Arc;

use async_trait::async_trait;

use super::adapter::StoreBackend;
use super::error::{StoreError, StoreResult};
use crate::grants::{Grant, GrantSet};
use crate::value::Value;

// =============================================================================
// HostStore boundary trait
// =============================================================================

/// The host extension's key-value store, implemented by the embedder.
///
/// Presence of each operation is gated at the session level by a grant; the
/// trait itself is the full surface.
#[async_trait]
pub trait HostStore: Send + Sync {
    /// Read a value; `None` when the key was never written.
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Write a value.
    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Remove a key.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Enumerate all stored keys.
    async fn list(&self) -> StoreResult<Vec<String>>;
}

// =============================================================================
// HostBackend
// =============================================================================

/// [`StoreBackend`] adapter over a granted host store.
///
/// An operation whose grant is not in the set fails with
/// [`StoreError::MissingGrant`]; the [`ValueStore`] never constructs such a
/// call (it falls back to page storage instead), so the guard only fires
/// when the adapter is driven directly.
///
/// [`ValueStore`]: crate::store::ValueStore
#[derive(Clone)]
pub struct HostBackend {
    host: Arc<dyn HostStore>,
    granted: GrantSet,
}

impl HostBackend {
    /// Wrap a host store with the given grant set.
    #[must_use]
    pub fn new(host: Arc<dyn HostStore>, granted: GrantSet) -> Self {
        Self { host, granted }
    }

    fn require(&self, grant: Grant) -> StoreResult<()> {
        if self.granted.contains(grant) {
            Ok(())
        } else {
            Err(StoreError::missing_grant(grant.name()))
        }
    }
}

impl std::fmt::Debug for HostBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBackend")
            .field("granted", &self.granted)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl StoreBackend for HostBackend {
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        self.require(Grant::GetValue)?;
        self.host.get(key).await
    }

    #[tracing::instrument(skip(self, value))]
    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        self.require(Grant::SetValue)?;
        self.host.set(key, value).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.require(Grant::DeleteValue)?;
        self.host.delete(key).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_keys(&self) -> StoreResult<Vec<String>> {
        self.require(Grant::ListValues)?;
        self.host.list().await
    }
}

// =============================================================================
// Tests
// =============================================================================
