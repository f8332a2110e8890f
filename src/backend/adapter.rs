//! Backend Adapter Trait
//!
//! The uniform async contract both physical stores are driven through. All
//! implementations must satisfy the same semantics: absent keys read as
//! `None`, deletes of absent keys succeed, `list_keys` returns physical
//! keys.

use async_trait::async_trait;

use super::error::StoreResult;
use crate::value::Value;

/// Uniform asynchronous contract over one physical backend.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Read a value by physical key.
    ///
    /// Returns `None` when the key has never been written.
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Write a value to a physical key.
    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Remove a physical key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Enumerate all currently-stored physical keys.
    async fn list_keys(&self) -> StoreResult<Vec<String>>;

    /// Whether this backend is the page-local fallback, whose values are
    /// string-only. Callers apply the string contract before dispatch.
    fn is_local(&self) -> bool {
        false
    }
}
