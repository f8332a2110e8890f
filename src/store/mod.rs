//! Value Store - Main Interface
//!
//! Orchestrates grant-aware backend selection and the reconciling load:
//! merge caller defaults with persisted state, write back anything missing,
//! and hand out live wrappers over the result.
//!
//! # Example
//!
//! ```rust,ignore
//! use script_values::{Defaults, Grant, GrantPolicy, ValueStore};
//! use script_values::{SimHostStore, SimPageStore};
//! use std::sync::Arc;
//!
//! let store = ValueStore::new(
//!     GrantPolicy::Full,
//!     Arc::new(SimHostStore::new()),
//!     Arc::new(SimPageStore::new()),
//! );
//!
//! let values = store
//!     .load_values(Defaults::from_iter([("greeting", "hi")]), Some("ns"), true)
//!     .await?;
//! assert_eq!(values.get("greeting").and_then(|v| v.as_str()), Some("hi"));
//! ```

mod builder;

pub use builder::ValueStoreBuilder;

use std::sync::Arc;

use futures::future;

use crate::backend::{
    HostBackend, HostStore, LocalBackend, PageStore, SimHostStore, SimPageStore, StoreBackend,
    StoreError, StoreResult,
};
use crate::grants::{Grant, GrantPolicy};
use crate::keys::physical_key;
use crate::proxy::{OnWriteSettled, ReadThroughValues, WriteSyncValues};
use crate::value::{Defaults, Value, Values};

// =============================================================================
// ValueStore
// =============================================================================

/// Grant-aware value persistence over a host store with page-local fallback.
///
/// The grant policy is fixed at construction. Every entry point picks its
/// backend independently per operation kind: host iff a host is attached and
/// the policy allows that kind's grant, page storage otherwise. Asymmetric
/// grants therefore split traffic (e.g. reads from the host while writes
/// land in page storage), mirroring the host's grant model.
#[derive(Clone)]
pub struct ValueStore {
    policy: GrantPolicy,
    host: Option<Arc<dyn HostStore>>,
    page: Arc<dyn PageStore>,
}

impl std::fmt::Debug for ValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueStore")
            .field("policy", &self.policy)
            .field("has_host", &self.host.is_some())
            .finish_non_exhaustive()
    }
}

impl ValueStore {
    /// Create a store over a live host and a page-storage fallback.
    #[must_use]
    pub fn new(policy: GrantPolicy, host: Arc<dyn HostStore>, page: Arc<dyn PageStore>) -> Self {
        Self {
            policy,
            host: Some(host),
            page,
        }
    }

    /// Create a store with no live host; everything uses page storage.
    #[must_use]
    pub fn without_host(page: Arc<dyn PageStore>) -> Self {
        Self {
            policy: GrantPolicy::NoHost,
            host: None,
            page,
        }
    }

    /// Fully-granted store over fresh in-memory sim stores (tests, demos).
    #[must_use]
    pub fn sim() -> Self {
        Self::new(
            GrantPolicy::Full,
            Arc::new(SimHostStore::new()),
            Arc::new(SimPageStore::new()),
        )
    }

    /// Start building a store.
    #[must_use]
    pub fn builder() -> ValueStoreBuilder {
        ValueStoreBuilder::new()
    }

    /// Whether a live host exists and every listed grant is held.
    ///
    /// Cheap and synchronous; callers may query different subsets for
    /// different operations.
    #[must_use]
    pub fn has_capabilities(&self, grants: &[Grant]) -> bool {
        self.host.is_some() && self.policy.allows_all(grants)
    }

    /// Select the backend for one operation kind.
    fn backend_for(&self, grant: Grant) -> Arc<dyn StoreBackend> {
        match &self.host {
            Some(host) if self.policy.allows(grant) => Arc::new(HostBackend::new(
                Arc::clone(host),
                self.policy.grant_set(),
            )),
            _ => Arc::new(LocalBackend::new(Arc::clone(&self.page))),
        }
    }

    // =========================================================================
    // Reconciling loads
    // =========================================================================

    /// Load values for the given defaults, reconciling against storage.
    ///
    /// For each key: a persisted, present value wins; otherwise the default
    /// is used, and written back when `persist_defaults` is set (the
    /// page-local backend always persists defaults on first sight). All keys
    /// are read concurrently; the call resolves only once every key has
    /// settled, and any single failure aborts the whole call with no partial
    /// result.
    ///
    /// # Errors
    ///
    /// [`StoreError::NonStringValue`] before any storage traffic if a
    /// non-string default is supplied while either selected backend is page
    /// storage; [`StoreError::Backend`] if the host rejects any per-key
    /// operation.
    #[tracing::instrument(skip(self, defaults), fields(keys = defaults.len()))]
    pub async fn load_values(
        &self,
        defaults: Defaults,
        namespace: Option<&str>,
        persist_defaults: bool,
    ) -> StoreResult<Values> {
        let read = self.backend_for(Grant::GetValue);
        let write = self.backend_for(Grant::SetValue);

        // String-only contract: checked up front, before any storage traffic
        if read.is_local() || write.is_local() {
            if let Some((key, _)) = defaults.iter().find(|(_, v)| !v.is_string()) {
                return Err(StoreError::non_string(key));
            }
        }

        let persist = persist_defaults || write.is_local();

        let tasks = defaults.into_iter().map(|(key, default)| {
            let read = Arc::clone(&read);
            let write = Arc::clone(&write);
            let physical = physical_key(&key, namespace);
            async move {
                match read.get(&physical).await? {
                    Some(stored) if stored.is_present() => Ok((key, stored)),
                    _ => {
                        if persist {
                            write.set(&physical, default.clone()).await?;
                        }
                        Ok::<_, StoreError>((key, default))
                    }
                }
            }
        });

        // Fan-in: completion order across keys is unspecified
        let pairs = future::try_join_all(tasks).await?;
        Ok(pairs.into_iter().collect())
    }

    /// Load everything currently stored.
    ///
    /// Enumerates stored physical keys and runs a reconciliation pass with
    /// empty-string defaults, surfacing every persisted value. The returned
    /// map is keyed by physical key (no namespace is applied).
    ///
    /// # Errors
    ///
    /// [`StoreError::Backend`] if enumeration or any per-key read fails.
    #[tracing::instrument(skip(self))]
    pub async fn load_all_values(&self) -> StoreResult<Values> {
        let list = self.backend_for(Grant::ListValues);
        let keys = list.list_keys().await?;

        let defaults: Defaults = keys.into_iter().map(|k| (k, Value::from(""))).collect();
        self.load_values(defaults, None, false).await
    }

    /// Delete a logical key from both the backend and the in-memory map.
    ///
    /// Membership is confirmed before the backend is touched; on rejection
    /// or backend failure the map is left unmodified.
    ///
    /// # Errors
    ///
    /// [`StoreError::KeyAbsent`] if `key` is not in `values`;
    /// [`StoreError::Backend`] if the host rejects the delete.
    #[tracing::instrument(skip(self, values))]
    pub async fn delete_value(
        &self,
        values: &mut Values,
        key: &str,
        namespace: Option<&str>,
    ) -> StoreResult<()> {
        if !values.contains_key(key) {
            return Err(StoreError::key_absent(key));
        }

        let backend = self.backend_for(Grant::DeleteValue);
        backend.delete(&physical_key(key, namespace)).await?;

        values.remove(key);
        Ok(())
    }

    // =========================================================================
    // Live wrappers
    // =========================================================================

    /// Wrap a value map so assignments are mirrored to the write-selected
    /// backend, fire-and-forget.
    #[must_use]
    pub fn write_proxy(
        &self,
        values: Values,
        namespace: Option<&str>,
        on_settled: Option<OnWriteSettled>,
    ) -> WriteSyncValues {
        WriteSyncValues::new(
            values,
            self.backend_for(Grant::SetValue),
            namespace.map(ToOwned::to_owned),
            on_settled,
        )
    }

    /// Wrap a value map so every read re-fetches from the read-selected
    /// backend.
    #[must_use]
    pub fn read_proxy(&self, values: Values, namespace: Option<&str>) -> ReadThroughValues {
        ReadThroughValues::new(
            values,
            self.backend_for(Grant::GetValue),
            namespace.map(ToOwned::to_owned),
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
