//! In-memory secure item store.
//!
//! This store is for testing and development only. Payloads are not
//! encrypted and are lost when the process exits.
//!
//! # Thread Safety
//!
//! This store uses `RwLock` for thread-safe access. Lock poisoning is
//! reported as `Status::NOT_AVAILABLE` rather than panicking.

use std::collections::HashMap;
use std::sync::RwLock;

use super::SecureItemStore;
use crate::accessibility::Accessibility;
use crate::query::ItemQuery;
use crate::status::Status;

/// Everything that identifies one stored item.
///
/// The accessibility tier is part of the identity here, so each tier gets
/// its own slot. Keychain Services differs: `kSecAttrAccessible` is not part
/// of a generic password's primary key there. Adding under a second tier
/// reports `DUPLICATE_ITEM`, and the update that follows, filtered by the new
/// tier, reports `ITEM_NOT_FOUND`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SlotId {
    access_group: Option<String>,
    accessibility: Accessibility,
    service: String,
    account: String,
    synchronizable: bool,
}

impl From<&ItemQuery> for SlotId {
    fn from(query: &ItemQuery) -> Self {
        Self {
            access_group: query.access_group.clone(),
            accessibility: query.accessibility,
            service: query.service.clone(),
            account: query.account.clone(),
            synchronizable: query.synchronizable,
        }
    }
}

/// In-memory implementation of the secure item store.
///
/// **Warning**: This is for testing only. Share one instance between
/// accessors through a reference or an `Arc`.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<HashMap<SlotId, Vec<u8>>>,
}

fn lock_error() -> Status {
    Status::NOT_AVAILABLE
}

impl InMemoryItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored items.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    ///
    /// Returns true if the lock is poisoned.
    pub fn is_empty(&self) -> bool {
        self.items.read().map(|items| items.is_empty()).unwrap_or(true)
    }

    /// Remove every item.
    pub fn clear(&self) -> Result<(), Status> {
        self.items.write().map_err(|_| lock_error())?.clear();
        Ok(())
    }
}

impl SecureItemStore for InMemoryItemStore {
    fn add(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        let mut items = self.items.write().map_err(|_| lock_error())?;
        let slot = SlotId::from(query);

        if items.contains_key(&slot) {
            return Err(Status::DUPLICATE_ITEM);
        }

        items.insert(slot, data.to_vec());
        Ok(())
    }

    fn update(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        let mut items = self.items.write().map_err(|_| lock_error())?;

        match items.get_mut(&SlotId::from(query)) {
            Some(existing) => {
                *existing = data.to_vec();
                Ok(())
            }
            None => Err(Status::ITEM_NOT_FOUND),
        }
    }

    fn copy_matching(&self, query: &ItemQuery) -> Result<Option<Vec<u8>>, Status> {
        let items = self.items.read().map_err(|_| lock_error())?;

        match items.get(&SlotId::from(query)) {
            Some(data) if query.return_data => Ok(Some(data.clone())),
            Some(_) => Ok(None),
            None => Err(Status::ITEM_NOT_FOUND),
        }
    }

    fn delete(&self, query: &ItemQuery) -> Result<(), Status> {
        let mut items = self.items.write().map_err(|_| lock_error())?;

        if items.remove(&SlotId::from(query)).is_some() {
            Ok(())
        } else {
            Err(Status::ITEM_NOT_FOUND)
        }
    }
}
