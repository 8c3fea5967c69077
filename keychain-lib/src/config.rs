//! Configuration for a keychain accessor.

use serde::{Deserialize, Serialize};

use crate::accessibility::Accessibility;

/// Access group and accessibility tier shared by every item an accessor touches.
///
/// Two accessors built from equal configurations address the same slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KeychainConfig {
    /// Access group used to share items between apps and extensions.
    ///
    /// `None` leaves the platform's default group in effect.
    pub access_group: Option<String>,

    /// When stored items may be read.
    pub accessibility: Accessibility,
}

impl KeychainConfig {
    /// Create a configuration with no access group and the default tier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access group.
    pub fn with_access_group(mut self, group: impl Into<String>) -> Self {
        self.access_group = Some(group.into());
        self
    }

    /// Set the accessibility tier.
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    /// Get the access group if set.
    pub fn access_group(&self) -> Option<&str> {
        self.access_group.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = KeychainConfig::new()
            .with_access_group("group.com.example.shared")
            .with_accessibility(Accessibility::AfterFirstUnlock);

        assert_eq!(config.access_group(), Some("group.com.example.shared"));
        assert_eq!(config.accessibility, Accessibility::AfterFirstUnlock);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: KeychainConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, KeychainConfig::default());

        let config: KeychainConfig = serde_json::from_str(
            r#"{"access_group": "group.a", "accessibility": "always_this_device_only"}"#,
        )
        .unwrap();
        assert_eq!(config.access_group(), Some("group.a"));
        assert_eq!(config.accessibility, Accessibility::AlwaysThisDeviceOnly);
    }
}
