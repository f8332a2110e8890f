//! # Script Values
//!
//! Typed key-value persistence for userscripts, with grant-aware fallback
//! from a host extension store to page-local storage.
//!
//! ## Features
//!
//! - **Reconciling loads**: merge caller defaults with persisted values,
//!   writing back anything missing
//! - **Grant-aware backends**: extension-host store when the grant is held,
//!   page-local storage otherwise, chosen independently per operation kind
//! - **Live wrappers**: write-sync values that mirror assignments to the
//!   backend fire-and-forget, and read-through values that always re-fetch
//! - **Deterministic testing**: in-memory sim stores with per-operation
//!   fault switches
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use script_values::{Defaults, ValueStore};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Fully-granted in-memory store (tests, demos)
//!     let store = ValueStore::sim();
//!
//!     let defaults = Defaults::from_iter([("greeting", "hi"), ("theme", "dark")]);
//!     let values = store.load_values(defaults, Some("ns"), true).await?;
//!
//!     assert_eq!(values.get("greeting").and_then(|v| v.as_str()), Some("hi"));
//!
//!     // Mirror subsequent assignments to the backend
//!     let mut live = store.write_proxy(values, Some("ns"), None);
//!     live.set("theme", "light")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      ValueStore                          │
//! │   load_values / load_all_values / delete_value           │
//! ├─────────────────────────────────────────────────────────┤
//! │  GrantPolicy            │ per-operation backend choice   │
//! ├──────────────────────────┬──────────────────────────────┤
//! │      HostBackend         │        LocalBackend          │
//! │  (async extension store) │  (sync page storage, string  │
//! │                          │   values only)               │
//! └──────────────────────────┴──────────────────────────────┘
//!          ▲                              ▲
//!          │                              │
//!   WriteSyncValues ── fire-and-forget ───┘
//!   ReadThroughValues ── fresh read per access
//! ```
//!
//! ## Concurrency
//!
//! Single-threaded cooperative async. The loader fans out one task per key
//! and resolves only once every key has settled; completion order between
//! keys is unspecified. Write-sync assignments do not await the backend;
//! callers who need confirmation take a [`WriteSignal`] through the
//! `on_settled` callback.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod constants;
pub mod grants;
pub mod keys;
pub mod proxy;
pub mod store;
pub mod value;

pub use backend::{
    HostBackend, HostStore, LocalBackend, PageStore, SimHostStore, SimOp, SimPageStore,
    StoreBackend, StoreError, StoreResult,
};
pub use grants::{Grant, GrantPolicy, GrantSet};
pub use keys::physical_key;
pub use proxy::{OnWriteSettled, ReadThroughValues, WriteSignal, WriteSyncValues};
pub use store::{ValueStore, ValueStoreBuilder};
pub use value::{Defaults, Value, Values};
