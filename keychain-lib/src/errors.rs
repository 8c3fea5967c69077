//! Error types for keychain operations.
//!
//! Each accessor operation has its own closed error enum so that callers
//! only have to handle the failures that operation can actually produce.
//! Every native failure carries the offending key's name and the native
//! status; codec failures wrap the underlying serde error.

use crate::codec::CodecError;
use crate::status::Status;

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum KeychainErrorCode {
    /// Native store rejected a write
    NativeStore = 1000,
    /// Native store rejected a read
    NativeRetrieve = 2000,
    /// Query succeeded but returned no payload
    ObjectNotFound = 2001,
    /// Native store rejected a delete
    NativeDelete = 3000,
    /// Value could not be serialized
    Encoding = 4000,
    /// Payload could not be deserialized
    Decoding = 4001,
}

/// Failure of [`Keychain::store`](crate::Keychain::store).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The native store rejected the add or update.
    #[error("failed to store '{key}': {status}")]
    NativeStoreFailure {
        /// Name of the key being written
        key: String,
        /// Native status returned by the store
        status: Status,
    },

    /// The value could not be serialized.
    #[error("failed to encode value: {0}")]
    EncodingFailure(#[source] CodecError),
}

impl StoreError {
    /// Numeric code for FFI consumers.
    pub fn code(&self) -> KeychainErrorCode {
        match self {
            Self::NativeStoreFailure { .. } => KeychainErrorCode::NativeStore,
            Self::EncodingFailure(_) => KeychainErrorCode::Encoding,
        }
    }

    /// Name of the key involved, if the failure came from the native store.
    pub fn key_name(&self) -> Option<&str> {
        match self {
            Self::NativeStoreFailure { key, .. } => Some(key),
            Self::EncodingFailure(_) => None,
        }
    }

    /// Native status, if the failure came from the native store.
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::NativeStoreFailure { status, .. } => Some(*status),
            Self::EncodingFailure(_) => None,
        }
    }
}

/// Failure of [`Keychain::retrieve`](crate::Keychain::retrieve).
#[derive(Debug, thiserror::Error)]
pub enum RetrieveError {
    /// The native query failed.
    #[error("failed to retrieve '{key}': {status}")]
    NativeRetrieveFailure {
        /// Name of the key being read
        key: String,
        /// Native status returned by the store
        status: Status,
    },

    /// The query succeeded but did not yield a byte buffer.
    #[error("no stored object for '{key}'")]
    ObjectNotFound {
        /// Name of the key being read
        key: String,
    },

    /// The stored payload could not be deserialized as the key's type.
    #[error("failed to decode value: {0}")]
    DecodingFailure(#[source] CodecError),
}

impl RetrieveError {
    /// Numeric code for FFI consumers.
    pub fn code(&self) -> KeychainErrorCode {
        match self {
            Self::NativeRetrieveFailure { .. } => KeychainErrorCode::NativeRetrieve,
            Self::ObjectNotFound { .. } => KeychainErrorCode::ObjectNotFound,
            Self::DecodingFailure(_) => KeychainErrorCode::Decoding,
        }
    }

    /// Name of the key involved, if known.
    pub fn key_name(&self) -> Option<&str> {
        match self {
            Self::NativeRetrieveFailure { key, .. } | Self::ObjectNotFound { key } => Some(key),
            Self::DecodingFailure(_) => None,
        }
    }

    /// Native status, if the failure came from the native store.
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::NativeRetrieveFailure { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error means nothing is stored under the key.
    ///
    /// True both for [`RetrieveError::ObjectNotFound`] and for a native
    /// failure reporting that no item matched.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ObjectNotFound { .. } => true,
            Self::NativeRetrieveFailure { status, .. } => status.is_item_not_found(),
            Self::DecodingFailure(_) => false,
        }
    }
}

/// Failure of [`Keychain::delete`](crate::Keychain::delete).
#[derive(Debug, thiserror::Error)]
pub enum DeleteError {
    /// The native store rejected the delete, including when nothing was stored.
    #[error("failed to delete '{key}': {status}")]
    NativeDeleteFailure {
        /// Name of the key being deleted
        key: String,
        /// Native status returned by the store
        status: Status,
    },
}

impl DeleteError {
    /// Numeric code for FFI consumers.
    pub fn code(&self) -> KeychainErrorCode {
        KeychainErrorCode::NativeDelete
    }

    /// Name of the key involved.
    pub fn key_name(&self) -> Option<&str> {
        match self {
            Self::NativeDeleteFailure { key, .. } => Some(key),
        }
    }

    /// Native status returned by the store.
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::NativeDeleteFailure { status, .. } => Some(*status),
        }
    }

    /// Check if the delete failed because nothing was stored under the key.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NativeDeleteFailure { status, .. } => status.is_item_not_found(),
        }
    }
}

/// Result of a store operation.
pub type StoreResult = Result<(), StoreError>;

/// Result of a retrieve operation.
pub type RetrieveResult<T> = Result<T, RetrieveError>;

/// Result of a delete operation.
pub type DeleteResult = Result<(), DeleteError>;
