//! The typed keychain accessor.

use serde::de::DeserializeOwned;
use serde::Serialize;
use zeroize::Zeroize;

use crate::codec;
use crate::config::KeychainConfig;
use crate::errors::{
    DeleteError, DeleteResult, RetrieveError, RetrieveResult, StoreError, StoreResult,
};
use crate::item_store::SecureItemStore;
use crate::key::Key;
use crate::query::ItemQuery;

/// Typed accessor over a secure item store.
///
/// The accessor holds no mutable state: it pairs a [`KeychainConfig`] with a
/// handle to the native store and turns each call into one or two native
/// calls. Accessors built from equal configurations over the same store
/// address the same slots and may be used from any thread.
///
/// # Example
///
/// ```
/// use keychain_lib::{InMemoryItemStore, Key, Keychain, KeychainConfig};
///
/// let backend = InMemoryItemStore::new();
/// let keychain = Keychain::new(KeychainConfig::default(), &backend);
/// let token: Key<String> = Key::new("auth-token");
///
/// keychain.store(&"s3cr3t".to_string(), &token).unwrap();
/// assert_eq!(keychain.retrieve(&token).unwrap(), "s3cr3t");
///
/// keychain.delete(&token).unwrap();
/// assert!(keychain.retrieve(&token).unwrap_err().is_not_found());
/// ```
#[derive(Clone, Debug)]
pub struct Keychain<S> {
    config: KeychainConfig,
    backend: S,
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
impl Keychain<crate::item_store::KeychainItemStore> {
    /// Create an accessor over the system keychain.
    pub fn system(config: KeychainConfig) -> Self {
        Self::new(config, crate::item_store::KeychainItemStore::new())
    }
}

impl<S: SecureItemStore> Keychain<S> {
    /// Create an accessor over `backend`.
    pub fn new(config: KeychainConfig, backend: S) -> Self {
        Self { config, backend }
    }

    /// The accessor's configuration.
    pub fn config(&self) -> &KeychainConfig {
        &self.config
    }

    /// The underlying item store.
    pub fn store_backend(&self) -> &S {
        &self.backend
    }

    /// Store `value` under `key`, replacing any value already there.
    ///
    /// An add is attempted first; if the native store reports a duplicate,
    /// the existing item is updated in place. The two calls are not atomic:
    /// concurrent writers to the same key race, and the last update wins.
    ///
    /// # Errors
    /// - `EncodingFailure` if `value` cannot be encoded faithfully, for
    ///   instance a non-finite float or `Some(None)`; the store is not called
    /// - `NativeStoreFailure` if the add, or the update after a duplicate,
    ///   fails natively
    ///
    /// # Panics
    ///
    /// Panics before touching the store if `key` synchronizes and the
    /// configured accessibility tier is device-only.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(key = %key.name())))]
    pub fn store<T: Serialize>(&self, value: &T, key: &Key<T>) -> StoreResult {
        let mut payload = codec::encode(value).map_err(StoreError::EncodingFailure)?;
        let query = ItemQuery::for_key(key, &self.config);

        let outcome = match self.backend.add(&query, &payload) {
            Err(status) if status.is_duplicate_item() => {
                #[cfg(feature = "tracing")]
                tracing::debug!("item exists, updating in place");
                self.backend.update(&query, &payload)
            }
            other => other,
        };
        payload.zeroize();

        outcome.map_err(|status| StoreError::NativeStoreFailure {
            key: key.name().to_string(),
            status,
        })
    }

    /// Retrieve the value stored under `key`.
    ///
    /// # Errors
    /// - `NativeRetrieveFailure` if the native query fails, including when
    ///   nothing is stored (`Status::ITEM_NOT_FOUND`)
    /// - `ObjectNotFound` if the query succeeded without a payload
    /// - `DecodingFailure` if the payload is not a valid `T`
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(key = %key.name())))]
    pub fn retrieve<T: DeserializeOwned>(&self, key: &Key<T>) -> RetrieveResult<T> {
        let query = ItemQuery::for_key(key, &self.config).returning_data();

        let mut payload = self
            .backend
            .copy_matching(&query)
            .map_err(|status| RetrieveError::NativeRetrieveFailure {
                key: key.name().to_string(),
                status,
            })?
            .ok_or_else(|| RetrieveError::ObjectNotFound {
                key: key.name().to_string(),
            })?;

        let value = codec::decode(&payload).map_err(RetrieveError::DecodingFailure);
        payload.zeroize();
        value
    }

    /// Delete the value stored under `key`.
    ///
    /// Deleting an empty slot is reported as `NativeDeleteFailure` with
    /// `Status::ITEM_NOT_FOUND`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(key = %key.name())))]
    pub fn delete<T>(&self, key: &Key<T>) -> DeleteResult {
        let query = ItemQuery::for_key(key, &self.config);

        self.backend
            .delete(&query)
            .map_err(|status| DeleteError::NativeDeleteFailure {
                key: key.name().to_string(),
                status,
            })
    }

    /// Check whether anything is stored under `key`, without decoding it.
    pub fn contains<T>(&self, key: &Key<T>) -> Result<bool, RetrieveError> {
        let query = ItemQuery::for_key(key, &self.config);

        match self.backend.copy_matching(&query) {
            Ok(_) => Ok(true),
            Err(status) if status.is_item_not_found() => Ok(false),
            Err(status) => Err(RetrieveError::NativeRetrieveFailure {
                key: key.name().to_string(),
                status,
            }),
        }
    }

    /// Read the value under `key`, or `None` on any failure.
    ///
    /// **Discards error information.** A missing value, a locked keychain
    /// and an undecodable payload all look the same. Use
    /// [`retrieve`](Self::retrieve) wherever failure must be observable.
    pub fn get_or_none<T: DeserializeOwned>(&self, key: &Key<T>) -> Option<T> {
        self.retrieve(key)
            .map_err(|err| discarded(key.name(), &err))
            .ok()
    }

    /// Store `Some(value)` or delete on `None`, ignoring the outcome.
    ///
    /// **Discards error information.** There is no way to learn whether the
    /// write or delete took effect. Use [`store`](Self::store) and
    /// [`delete`](Self::delete) wherever failure must be observable.
    pub fn set_or_ignore<T: Serialize>(&self, key: &Key<T>, value: Option<T>) {
        let outcome = match value {
            Some(value) => self.store(&value, key).map_err(|err| err.to_string()),
            None => self.delete(key).map_err(|err| err.to_string()),
        };

        if let Err(message) = outcome {
            discarded(key.name(), &message);
        }
    }
}

// Helper to avoid requiring the tracing feature
fn discarded(_key: &str, _err: &dyn std::fmt::Display) {
    #[cfg(feature = "tracing")]
    tracing::debug!(key = _key, "discarding keychain error: {}", _err);
}
