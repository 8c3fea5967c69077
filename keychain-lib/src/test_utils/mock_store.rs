//! Item stores for exercising the accessor's native call handling.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::item_store::{InMemoryItemStore, SecureItemStore};
use crate::query::ItemQuery;
use crate::status::Status;

/// Snapshot of how many native calls a store has seen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// Calls to `add`.
    pub add: usize,
    /// Calls to `update`.
    pub update: usize,
    /// Calls to `copy_matching`.
    pub copy_matching: usize,
    /// Calls to `delete`.
    pub delete: usize,
}

impl CallCounts {
    /// Sum of all calls.
    pub fn total(&self) -> usize {
        self.add + self.update + self.copy_matching + self.delete
    }
}

#[derive(Debug, Default)]
struct Counters {
    add: AtomicUsize,
    update: AtomicUsize,
    copy_matching: AtomicUsize,
    delete: AtomicUsize,
}

impl Counters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }

    fn snapshot(&self) -> CallCounts {
        CallCounts {
            add: self.add.load(Ordering::SeqCst),
            update: self.update.load(Ordering::SeqCst),
            copy_matching: self.copy_matching.load(Ordering::SeqCst),
            delete: self.delete.load(Ordering::SeqCst),
        }
    }
}

/// In-memory store that counts every native call.
#[derive(Debug, Default)]
pub struct RecordingItemStore {
    inner: InMemoryItemStore,
    counters: Counters,
}

impl RecordingItemStore {
    /// Create an empty recording store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls seen so far.
    pub fn calls(&self) -> CallCounts {
        self.counters.snapshot()
    }
}

impl SecureItemStore for RecordingItemStore {
    fn add(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        Counters::bump(&self.counters.add);
        self.inner.add(query, data)
    }

    fn update(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        Counters::bump(&self.counters.update);
        self.inner.update(query, data)
    }

    fn copy_matching(&self, query: &ItemQuery) -> Result<Option<Vec<u8>>, Status> {
        Counters::bump(&self.counters.copy_matching);
        self.inner.copy_matching(query)
    }

    fn delete(&self, query: &ItemQuery) -> Result<(), Status> {
        Counters::bump(&self.counters.delete);
        self.inner.delete(query)
    }
}

/// Store that returns configured statuses and otherwise behaves in-memory.
#[derive(Debug, Default)]
pub struct FailingItemStore {
    inner: RecordingItemStore,
    add: Option<Status>,
    update: Option<Status>,
    copy_matching: Option<Status>,
    delete: Option<Status>,
    no_payload: bool,
}

impl FailingItemStore {
    /// Create a store with no failures configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `add` fail with `status`.
    pub fn fail_add(mut self, status: Status) -> Self {
        self.add = Some(status);
        self
    }

    /// Make every `update` fail with `status`.
    pub fn fail_update(mut self, status: Status) -> Self {
        self.update = Some(status);
        self
    }

    /// Make every `copy_matching` fail with `status`.
    pub fn fail_copy(mut self, status: Status) -> Self {
        self.copy_matching = Some(status);
        self
    }

    /// Make every `delete` fail with `status`.
    pub fn fail_delete(mut self, status: Status) -> Self {
        self.delete = Some(status);
        self
    }

    /// Make `copy_matching` succeed without handing back a payload.
    pub fn return_no_payload(mut self) -> Self {
        self.no_payload = true;
        self
    }

    /// Calls seen so far, failed ones included.
    pub fn calls(&self) -> CallCounts {
        self.inner.calls()
    }
}

impl SecureItemStore for FailingItemStore {
    fn add(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        match self.add {
            Some(status) => {
                Counters::bump(&self.inner.counters.add);
                Err(status)
            }
            None => self.inner.add(query, data),
        }
    }

    fn update(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        match self.update {
            Some(status) => {
                Counters::bump(&self.inner.counters.update);
                Err(status)
            }
            None => self.inner.update(query, data),
        }
    }

    fn copy_matching(&self, query: &ItemQuery) -> Result<Option<Vec<u8>>, Status> {
        match self.copy_matching {
            Some(status) => {
                Counters::bump(&self.inner.counters.copy_matching);
                Err(status)
            }
            None if self.no_payload => {
                Counters::bump(&self.inner.counters.copy_matching);
                Ok(None)
            }
            None => self.inner.copy_matching(query),
        }
    }

    fn delete(&self, query: &ItemQuery) -> Result<(), Status> {
        match self.delete {
            Some(status) => {
                Counters::bump(&self.inner.counters.delete);
                Err(status)
            }
            None => self.inner.delete(query),
        }
    }
}
