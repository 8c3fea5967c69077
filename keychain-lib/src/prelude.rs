//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use keychain_lib::prelude::*;
//! ```

// Accessor and keys
pub use crate::{Key, Keychain, KeychainConfig};

// Policy
pub use crate::Accessibility;

// Error handling
pub use crate::errors::{DeleteError, RetrieveError, StoreError};
pub use crate::Status;

// Item stores
pub use crate::item_store::{InMemoryItemStore, SecureItemStore};

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use crate::item_store::KeychainItemStore;
