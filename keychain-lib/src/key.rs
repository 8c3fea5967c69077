//! Typed keys naming storage slots.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Name of a storage slot, bound to the type of value it holds.
///
/// The binding is purely static: a `Key<T>` can only be used to store or
/// retrieve a `T`. Names must be unique within an access group, otherwise
/// two keys share a slot.
///
/// # Example
///
/// ```
/// use keychain_lib::Key;
///
/// let token: Key<String> = Key::new("auth-token");
/// assert_eq!(token.name(), "auth-token");
/// assert!(!token.synchronizes());
///
/// let shared: Key<Vec<u8>> = Key::synchronizing("device-seed");
/// assert!(shared.synchronizes());
/// ```
pub struct Key<T> {
    name: String,
    synchronizes: bool,
    // fn() -> T keeps Key Send + Sync regardless of T
    _value: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    /// Create a key that is not synchronized across devices.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            synchronizes: false,
            _value: PhantomData,
        }
    }

    /// Create a key whose values replicate through the user's cloud account.
    pub fn synchronizing(name: impl Into<String>) -> Self {
        Self::new(name).with_synchronization(true)
    }

    /// Set whether values stored under this key are synchronized.
    pub fn with_synchronization(mut self, synchronizes: bool) -> Self {
        self.synchronizes = synchronizes;
        self
    }

    /// The slot name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether values stored under this key are synchronized.
    pub fn synchronizes(&self) -> bool {
        self.synchronizes
    }
}

// Manual impls: deriving would put bounds on T.

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            synchronizes: self.synchronizes,
            _value: PhantomData,
        }
    }
}

impl<T> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.synchronizes == other.synchronizes
    }
}

impl<T> Eq for Key<T> {}

impl<T> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.synchronizes.hash(state);
    }
}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("synchronizes", &self.synchronizes)
            .field("value_type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> fmt::Display for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> AsRef<str> for Key<T> {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
