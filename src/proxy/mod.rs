//! Live Value Wrappers
//!
//! Two independent wrappers over a loaded value map:
//!
//! - [`WriteSyncValues`]: assignments are mirrored to the backend
//!   fire-and-forget and applied to memory immediately; reads are memory
//!   passthrough.
//! - [`ReadThroughValues`]: every read re-fetches from the backend,
//!   bypassing memory; no write surface exists.
//!
//! They may be composed by the caller but never compose each other. A value
//! map has one owner: two write-sync wrappers over overlapping keys race
//! with last-write-wins and no ordering guarantee.

use std::sync::Arc;

use tokio::sync::oneshot;

use crate::backend::{StoreBackend, StoreError, StoreResult};
use crate::keys::physical_key;
use crate::value::{Value, Values};

// =============================================================================
// Settlement signal
// =============================================================================

/// Completion signal for one fire-and-forget backend write.
///
/// Resolves with the write's result once the backend settles. Dropping it
/// detaches from the outcome; the write itself is never cancelled.
pub type WriteSignal = oneshot::Receiver<StoreResult<()>>;

/// Callback invoked with the [`WriteSignal`] of each dispatched write.
pub type OnWriteSettled = Box<dyn FnMut(WriteSignal) + Send>;

// =============================================================================
// WriteSyncValues
// =============================================================================

/// A value map whose assignments are mirrored to a backend.
///
/// Reads never contact the backend, so concurrent external writers are not
/// observed; use [`ReadThroughValues`] or a reload for that.
pub struct WriteSyncValues {
    values: Values,
    backend: Arc<dyn StoreBackend>,
    namespace: Option<String>,
    on_settled: Option<OnWriteSettled>,
}

impl std::fmt::Debug for WriteSyncValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteSyncValues")
            .field("values", &self.values)
            .field("namespace", &self.namespace)
            .field("has_callback", &self.on_settled.is_some())
            .finish_non_exhaustive()
    }
}

impl WriteSyncValues {
    pub(crate) fn new(
        values: Values,
        backend: Arc<dyn StoreBackend>,
        namespace: Option<String>,
        on_settled: Option<OnWriteSettled>,
    ) -> Self {
        Self {
            values,
            backend,
            namespace,
            on_settled,
        }
    }

    /// Assign a value to an existing logical key.
    ///
    /// Dispatches exactly one backend write (fire-and-forget), hands its
    /// [`WriteSignal`] to the `on_settled` callback if one is set, and
    /// applies the assignment to memory immediately, regardless of the
    /// backend's eventual outcome.
    ///
    /// Must be called within a tokio runtime context.
    ///
    /// # Errors
    ///
    /// [`StoreError::KeyAbsent`] for a key not already in the map (no
    /// dynamic key growth; memory unchanged, nothing dispatched);
    /// [`StoreError::NonStringValue`] for a non-string value while the
    /// backend is page-local.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> StoreResult<()> {
        let value = value.into();

        if !self.values.contains_key(key) {
            return Err(StoreError::key_absent(key));
        }
        if self.backend.is_local() && !value.is_string() {
            return Err(StoreError::non_string(key));
        }

        let physical = physical_key(key, self.namespace.as_deref());
        let backend = Arc::clone(&self.backend);
        let pending = value.clone();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let result = backend.set(&physical, pending).await;
            // Receiver may have been dropped; the write already ran
            let _ = tx.send(result);
        });

        if let Some(on_settled) = self.on_settled.as_mut() {
            on_settled(rx);
        }

        self.values.insert(key, value);
        Ok(())
    }

    /// Read a value from memory. No backend contact.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Whether the map holds the given logical key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The wrapped map.
    #[must_use]
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Unwrap into the inner map.
    #[must_use]
    pub fn into_values(self) -> Values {
        self.values
    }
}

// =============================================================================
// ReadThroughValues
// =============================================================================

/// A read-only view whose every read is a fresh backend fetch.
///
/// The wrapped map only determines key membership; its values are never
/// returned. There is no write surface: read-only by construction, not by
/// convention.
pub struct ReadThroughValues {
    values: Values,
    backend: Arc<dyn StoreBackend>,
    namespace: Option<String>,
}

impl std::fmt::Debug for ReadThroughValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadThroughValues")
            .field("values", &self.values)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl ReadThroughValues {
    pub(crate) fn new(
        values: Values,
        backend: Arc<dyn StoreBackend>,
        namespace: Option<String>,
    ) -> Self {
        Self {
            values,
            backend,
            namespace,
        }
    }

    /// Fetch the current backend value for a wrapped key.
    ///
    /// # Errors
    ///
    /// [`StoreError::KeyAbsent`] for a key not in the wrapped map, and for a
    /// backend miss (absence is not distinguished from error);
    /// [`StoreError::Backend`] if the host rejects the read.
    pub async fn get(&self, key: &str) -> StoreResult<Value> {
        if !self.values.contains_key(key) {
            return Err(StoreError::key_absent(key));
        }

        match self
            .backend
            .get(&physical_key(key, self.namespace.as_deref()))
            .await?
        {
            Some(value) => Ok(value),
            None => Err(StoreError::key_absent(key)),
        }
    }

    /// The wrapped keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys()
    }

    /// Unwrap into the inner map (values as of load time).
    #[must_use]
    pub fn into_values(self) -> Values {
        self.values
    }
}

// =============================================================================
// Tests
// =============================================================================
