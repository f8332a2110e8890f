//! Value Store Builder
//!
//! Fluent construction with fail-fast validation: `build()` panics on a
//! missing required component rather than deferring the error.

use std::sync::Arc;

use super::ValueStore;
use crate::backend::{HostStore, PageStore};
use crate::grants::GrantPolicy;

// =============================================================================
// ValueStoreBuilder
// =============================================================================

/// Builder for [`ValueStore`] instances.
///
/// The page store is always required (it is the unconditional fallback); the
/// host is optional and its absence forces [`GrantPolicy::NoHost`].
///
/// # Example
///
/// ```rust
/// use script_values::{GrantPolicy, SimHostStore, SimPageStore, ValueStore};
/// use std::sync::Arc;
///
/// let store = ValueStore::builder()
///     .with_policy(GrantPolicy::Full)
///     .with_host(Arc::new(SimHostStore::new()))
///     .with_page(Arc::new(SimPageStore::new()))
///     .build();
/// ```
#[derive(Default)]
pub struct ValueStoreBuilder {
    policy: Option<GrantPolicy>,
    host: Option<Arc<dyn HostStore>>,
    page: Option<Arc<dyn PageStore>>,
}

impl ValueStoreBuilder {
    /// Create a builder with no components set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grant policy.
    #[must_use]
    pub fn with_policy(mut self, policy: GrantPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Attach a live host store.
    #[must_use]
    pub fn with_host(mut self, host: Arc<dyn HostStore>) -> Self {
        self.host = Some(host);
        self
    }

    /// Set the page-storage fallback.
    #[must_use]
    pub fn with_page(mut self, page: Arc<dyn PageStore>) -> Self {
        self.page = Some(page);
        self
    }

    /// Build the store.
    ///
    /// # Panics
    ///
    /// Panics if the page store is missing, or if a host is attached without
    /// a policy (fail fast).
    #[must_use]
    pub fn build(self) -> ValueStore {
        let page = self.page.expect("page store is required");

        match self.host {
            Some(host) => {
                let policy = self.policy.expect("grant policy is required with a host");
                ValueStore::new(policy, host, page)
            }
            None => ValueStore::without_host(page),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
