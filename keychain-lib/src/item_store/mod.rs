//! Native secure item store abstraction.
//!
//! The accessor never stores anything itself: encryption at rest, access
//! control and persistence belong to the item store behind this trait.
//! Backends:
//! - In-memory storage (for testing and non-Apple targets)
//! - Keychain Services (macOS / iOS, via the Security framework)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keychain_lib::item_store::{InMemoryItemStore, SecureItemStore};
//!
//! let store = InMemoryItemStore::new();
//! store.add(&query, b"payload")?;
//! let payload = store.copy_matching(&query.clone().returning_data())?;
//! store.delete(&query)?;
//! ```

use std::sync::Arc;

use crate::query::ItemQuery;
use crate::status::Status;

mod memory;

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod apple;

pub use memory::InMemoryItemStore;

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use apple::KeychainItemStore;

/// A platform secure item store.
///
/// Every call is synchronous and reports the native status on failure.
/// Implementations must be safe to share between threads; any atomicity
/// across separate calls is up to the implementation.
pub trait SecureItemStore: Send + Sync {
    /// Add a new item holding `data`.
    ///
    /// # Errors
    /// - `DUPLICATE_ITEM` if an item already matches `query`
    fn add(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status>;

    /// Replace the payload of the item matching `query`.
    ///
    /// # Errors
    /// - `ITEM_NOT_FOUND` if no item matches `query`
    fn update(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status>;

    /// Look up the item matching `query`.
    ///
    /// Returns `Ok(None)` when the call succeeded but the store did not hand
    /// back a byte buffer (for instance when `query.return_data` is unset).
    ///
    /// # Errors
    /// - `ITEM_NOT_FOUND` if no item matches `query`
    fn copy_matching(&self, query: &ItemQuery) -> Result<Option<Vec<u8>>, Status>;

    /// Delete the item matching `query`.
    ///
    /// # Errors
    /// - `ITEM_NOT_FOUND` if no item matches `query`
    fn delete(&self, query: &ItemQuery) -> Result<(), Status>;
}

impl<S: SecureItemStore + ?Sized> SecureItemStore for &S {
    fn add(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        (**self).add(query, data)
    }

    fn update(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        (**self).update(query, data)
    }

    fn copy_matching(&self, query: &ItemQuery) -> Result<Option<Vec<u8>>, Status> {
        (**self).copy_matching(query)
    }

    fn delete(&self, query: &ItemQuery) -> Result<(), Status> {
        (**self).delete(query)
    }
}

impl<S: SecureItemStore + ?Sized> SecureItemStore for Arc<S> {
    fn add(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        (**self).add(query, data)
    }

    fn update(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        (**self).update(query, data)
    }

    fn copy_matching(&self, query: &ItemQuery) -> Result<Option<Vec<u8>>, Status> {
        (**self).copy_matching(query)
    }

    fn delete(&self, query: &ItemQuery) -> Result<(), Status> {
        (**self).delete(query)
    }
}
