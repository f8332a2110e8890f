//! Storage Backends
//!
//! One uniform async contract over two physical stores:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    StoreBackend Trait                        │
//! └─────────────────────────────────────────────────────────────┘
//!          ▲                                   ▲
//!          │                                   │
//! ┌────────┴────────┐                 ┌────────┴────────┐
//! │   HostBackend   │                 │   LocalBackend  │
//! │ (async extension│                 │ (sync page      │
//! │  store, granted)│                 │  storage)       │
//! └─────────────────┘                 └─────────────────┘
//! ```
//!
//! The boundary traits [`HostStore`] and [`PageStore`] are implemented by
//! the embedder; [`SimHostStore`] and [`SimPageStore`] are in-memory
//! implementations for deterministic tests.

mod adapter;
mod error;
mod host;
mod local;
mod sim;

pub use adapter::StoreBackend;
pub use error::{StoreError, StoreResult};
pub use host::{HostBackend, HostStore};
pub use local::{LocalBackend, PageStore};
pub use sim::{SimHostStore, SimOp, SimPageStore};
