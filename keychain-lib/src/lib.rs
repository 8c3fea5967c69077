//! Typed keychain accessor.
//!
//! This crate is a thin layer over a platform secure item store. It builds
//! slot queries from typed [`Key`]s, serializes values, and turns native
//! status codes into small per-operation error enums. Encryption, access
//! control and persistence stay with the item store.
//!
//! # Features
//!
//! - **Typed keys**: a `Key<T>` can only store and retrieve a `T`
//! - **Overwrite semantics**: storing under an occupied key replaces the value
//! - **Pluggable backends**: the system keychain on Apple targets, an
//!   in-memory store everywhere
//!
//! # Example
//!
//! ```
//! use keychain_lib::{Accessibility, InMemoryItemStore, Key, Keychain, KeychainConfig};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Credentials {
//!     user: String,
//!     token: String,
//! }
//!
//! let config = KeychainConfig::new()
//!     .with_access_group("group.com.example.shared")
//!     .with_accessibility(Accessibility::AfterFirstUnlock);
//! let keychain = Keychain::new(config, InMemoryItemStore::new());
//! let key: Key<Credentials> = Key::new("credentials");
//!
//! let creds = Credentials { user: "ana".into(), token: "t0k3n".into() };
//! keychain.store(&creds, &key).unwrap();
//! assert_eq!(keychain.retrieve(&key).unwrap(), creds);
//! ```

pub mod accessibility;
pub mod codec;
pub mod config;
pub mod errors;
pub mod item_store;
pub mod key;
pub mod keychain;
pub mod prelude;
pub mod query;
pub mod status;

/// Test utilities for keychain testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use accessibility::Accessibility;
pub use codec::{CodecError, CodecErrorKind};
pub use config::KeychainConfig;
pub use errors::{
    DeleteError, DeleteResult, KeychainErrorCode, RetrieveError, RetrieveResult, StoreError,
    StoreResult,
};
pub use item_store::{InMemoryItemStore, SecureItemStore};
pub use key::Key;
pub use keychain::Keychain;
pub use query::ItemQuery;
pub use status::Status;

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use item_store::KeychainItemStore;
