//! Native queries identifying a storage slot.

use crate::accessibility::Accessibility;
use crate::config::KeychainConfig;
use crate::key::Key;

/// Attributes sent to the native item store for one call.
///
/// The key name is used as both the service and the account, so distinct
/// keys never collide and the same key always maps to the same item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemQuery {
    /// `kSecAttrService`
    pub service: String,
    /// `kSecAttrAccount`
    pub account: String,
    /// `kSecAttrAccessible`
    pub accessibility: Accessibility,
    /// `kSecAttrAccessGroup`, omitted when `None`
    pub access_group: Option<String>,
    /// `kSecAttrSynchronizable`
    pub synchronizable: bool,
    /// `kSecReturnData`
    pub return_data: bool,
    /// `kSecMatchLimit = kSecMatchLimitOne`
    pub match_limit_one: bool,
}

impl ItemQuery {
    /// Build the slot query for `key` under `config`.
    ///
    /// # Panics
    ///
    /// Panics if `key` synchronizes and the configured tier is device-only.
    /// The platform rejects that combination, so it is treated as a
    /// programming error rather than a recoverable failure.
    pub fn for_key<T>(key: &Key<T>, config: &KeychainConfig) -> Self {
        assert!(
            !key.synchronizes() || config.accessibility.is_sync_compatible(),
            "key '{}' synchronizes but accessibility '{}' is device-only",
            key.name(),
            config.accessibility,
        );

        Self {
            service: key.name().to_string(),
            account: key.name().to_string(),
            accessibility: config.accessibility,
            access_group: config.access_group.clone(),
            synchronizable: key.synchronizes(),
            return_data: false,
            match_limit_one: false,
        }
    }

    /// Ask for the stored payload of exactly one item.
    pub fn returning_data(mut self) -> Self {
        self.return_data = true;
        self.match_limit_one = true;
        self
    }
}
