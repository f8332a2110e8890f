//! Page-Local Backend
//!
//! Wraps synchronous page storage in the same asynchronous contract as the
//! host backend. Operations never suspend. Values are string-only: writing
//! anything else is a contract violation raised before the store is
//! touched.

use std::sync::Arc;

use async_trait::async_trait;

use super::adapter::StoreBackend;
use super::error::{StoreError, StoreResult};
use crate::value::Value;

// =============================================================================
// PageStore boundary trait
// =============================================================================

/// Synchronous page-local storage, implemented by the embedder.
///
/// Mirrors the web storage surface: string keys, string values, no failure
/// modes.
pub trait PageStore: Send + Sync {
    /// Read an item; `None` when absent.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write an item.
    fn set_item(&self, key: &str, value: &str);

    /// Remove an item; removing an absent item is a no-op.
    fn remove_item(&self, key: &str);

    /// All currently-stored keys.
    fn keys(&self) -> Vec<String>;
}

// =============================================================================
// LocalBackend
// =============================================================================

/// [`StoreBackend`] adapter over page-local storage.
#[derive(Clone)]
pub struct LocalBackend {
    page: Arc<dyn PageStore>,
}

impl LocalBackend {
    /// Wrap a page store.
    #[must_use]
    pub fn new(page: Arc<dyn PageStore>) -> Self {
        Self { page }
    }
}

impl std::fmt::Debug for LocalBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalBackend").finish_non_exhaustive()
    }
}

#[async_trait]
impl StoreBackend for LocalBackend {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.page.get_item(key).map(Value::Str))
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        let Value::Str(s) = &value else {
            return Err(StoreError::non_string(key));
        };
        self.page.set_item(key, s);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.page.remove_item(key);
        Ok(())
    }

    async fn list_keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.page.keys())
    }

    fn is_local(&self) -> bool {
        true
    }
}

// =============================================================================
// Tests
// =============================================================================
