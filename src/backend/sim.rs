//! Sim Stores - In-Memory Hosts for Testing
//!
//! Deterministic stand-ins for the two boundary collaborators. Faults are
//! explicit per-operation switches rather than probabilistic: a test flips
//! exactly the failure it wants to observe.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::error::{StoreError, StoreResult};
use super::host::HostStore;
use super::local::PageStore;
use crate::value::Value;

// =============================================================================
// SimOp
// =============================================================================

/// One host operation kind, for fault switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimOp {
    /// Read operations.
    Get,
    /// Write operations.
    Set,
    /// Delete operations.
    Delete,
    /// Key enumeration.
    List,
}

// =============================================================================
// SimHostStore
// =============================================================================

/// In-memory host extension store.
///
/// Clones share state, so a test can keep a handle for inspection while the
/// store is driven through the [`ValueStore`].
///
/// [`ValueStore`]: crate::store::ValueStore
#[derive(Debug, Clone, Default)]
pub struct SimHostStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
    failing: Arc<RwLock<HashSet<SimOp>>>,
    set_calls: Arc<RwLock<usize>>,
}

impl SimHostStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation of the given kind fail.
    #[must_use]
    pub fn with_failing(self, op: SimOp) -> Self {
        self.failing.write().unwrap().insert(op);
        self
    }

    /// Flip a fault switch on after construction.
    pub fn fail_on(&self, op: SimOp) {
        self.failing.write().unwrap().insert(op);
    }

    /// Clear all fault switches.
    pub fn clear_faults(&self) {
        self.failing.write().unwrap().clear();
    }

    /// Pre-populate a key, bypassing fault switches.
    pub fn seed(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.write().unwrap().insert(key.into(), value.into());
    }

    /// Direct read, bypassing fault switches (for assertions).
    #[must_use]
    pub fn raw_get(&self, key: &str) -> Option<Value> {
        self.entries.read().unwrap().get(key).cloned()
    }

    /// Whether a key is stored.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().unwrap().contains_key(key)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    /// Number of `set` calls observed, including failed ones.
    #[must_use]
    pub fn set_calls(&self) -> usize {
        *self.set_calls.read().unwrap()
    }

    fn check(&self, op: SimOp) -> StoreResult<()> {
        if self.failing.read().unwrap().contains(&op) {
            Err(StoreError::backend(format!("simulated {op:?} failure")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl HostStore for SimHostStore {
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        self.check(SimOp::Get)?;
        Ok(self.entries.read().unwrap().get(key).cloned())
    }

    #[tracing::instrument(skip(self, value))]
    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        *self.set_calls.write().unwrap() += 1;
        self.check(SimOp::Set)?;
        self.entries.write().unwrap().insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.check(SimOp::Delete)?;
        self.entries.write().unwrap().remove(key);
        Ok(())
    }

    async fn list(&self) -> StoreResult<Vec<String>> {
        self.check(SimOp::List)?;
        let mut keys: Vec<String> = self.entries.read().unwrap().keys().cloned().collect();
        keys.sort(); // deterministic order
        Ok(keys)
    }
}

// =============================================================================
// SimPageStore
// =============================================================================

/// In-memory page-local storage. String values only, never fails, clones
/// share state.
#[derive(Debug, Clone, Default)]
pub struct SimPageStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl SimPageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key.
    pub fn seed(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().unwrap().insert(key.into(), value.into());
    }

    /// Direct read, for assertions.
    #[must_use]
    pub fn raw_get(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    /// Whether a key is stored.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.read().unwrap().contains_key(key)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

impl PageStore for SimPageStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.entries.write().unwrap().remove(key);
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.read().unwrap().keys().cloned().collect();
        keys.sort(); // deterministic order
        keys
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_host_store_crud() {
        let store = SimHostStore::new();

        store.set("k", Value::from("v")).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(Value::from("v")));
        assert_eq!(store.list().await.unwrap(), vec!["k".to_owned()]);

        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_host_store_fault_switch() {
        let store = SimHostStore::new().with_failing(SimOp::Set);

        let err = store.set("k", Value::from("v")).await.unwrap_err();
        assert!(matches!(err, StoreError::Backend { .. }));
        assert!(store.is_empty(), "failed write must not land");
        assert_eq!(store.set_calls(), 1, "failed call is still counted");

        store.clear_faults();
        store.set("k", Value::from("v")).await.unwrap();
        assert!(store.contains("k"));
    }

    #[test]
    fn test_page_store_round_trip() {
        let store = SimPageStore::new();

        store.set_item("k", "v");
        assert_eq!(store.get_item("k"), Some("v".to_owned()));

        store.remove_item("k");
        assert_eq!(store.get_item("k"), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SimPageStore::new();
        let handle = store.clone();

        store.set_item("k", "v");
        assert_eq!(handle.raw_get("k"), Some("v".to_owned()));
    }
}
