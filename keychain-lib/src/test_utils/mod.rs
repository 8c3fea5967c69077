//! Test utilities for keychain-lib.
//!
//! This module provides testing infrastructure including:
//! - Item stores that record native calls or fail on demand
//! - Fixtures for common scenarios
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keychain_lib::test_utils::{FailingItemStore, SampleRecord};
//! use keychain_lib::{Key, Keychain, KeychainConfig, Status};
//!
//! let store = FailingItemStore::new().fail_add(Status::INTERACTION_NOT_ALLOWED);
//! let keychain = Keychain::new(KeychainConfig::default(), store);
//! let key: Key<SampleRecord> = Key::new("sampleKey");
//!
//! assert!(keychain.store(&SampleRecord::new("x"), &key).is_err());
//! ```

mod fixtures;
mod mock_store;

pub use fixtures::{sample_key, SampleRecord, SAMPLE_KEY_NAME};
pub use mock_store::{CallCounts, FailingItemStore, RecordingItemStore};
