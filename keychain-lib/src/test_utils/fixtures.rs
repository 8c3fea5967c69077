//! Test fixtures.

use serde::{Deserialize, Serialize};

use crate::key::Key;

/// Name used by the sample key.
pub const SAMPLE_KEY_NAME: &str = "sampleKey";

/// A minimal structured value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Payload text.
    pub value: String,
}

impl SampleRecord {
    /// Create a record holding `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// The key `"sampleKey"`, bound to [`SampleRecord`].
pub fn sample_key() -> Key<SampleRecord> {
    Key::new(SAMPLE_KEY_NAME)
}
