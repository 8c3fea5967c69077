//! Accessibility tiers controlling when a stored value may be read.

use serde::{Deserialize, Serialize};

/// When a stored item is readable, mirroring the `kSecAttrAccessible*` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// Readable only while the device is unlocked.
    #[default]
    WhenUnlocked,
    /// Readable after the first unlock following a restart.
    AfterFirstUnlock,
    /// Always readable, regardless of lock state.
    Always,
    /// Readable while unlocked, only if a passcode is set. Never leaves the device.
    WhenPasscodeSetThisDeviceOnly,
    /// Readable while unlocked. Never leaves the device.
    WhenUnlockedThisDeviceOnly,
    /// Readable after first unlock. Never leaves the device.
    AfterFirstUnlockThisDeviceOnly,
    /// Always readable. Never leaves the device.
    AlwaysThisDeviceOnly,
}

impl Accessibility {
    /// Every tier, in declaration order.
    pub const ALL: [Accessibility; 7] = [
        Self::WhenUnlocked,
        Self::AfterFirstUnlock,
        Self::Always,
        Self::WhenPasscodeSetThisDeviceOnly,
        Self::WhenUnlockedThisDeviceOnly,
        Self::AfterFirstUnlockThisDeviceOnly,
        Self::AlwaysThisDeviceOnly,
    ];

    /// Get the tier name as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhenUnlocked => "when_unlocked",
            Self::AfterFirstUnlock => "after_first_unlock",
            Self::Always => "always",
            Self::WhenPasscodeSetThisDeviceOnly => "when_passcode_set_this_device_only",
            Self::WhenUnlockedThisDeviceOnly => "when_unlocked_this_device_only",
            Self::AfterFirstUnlockThisDeviceOnly => "after_first_unlock_this_device_only",
            Self::AlwaysThisDeviceOnly => "always_this_device_only",
        }
    }

    /// Whether items with this tier are bound to the current device.
    pub fn is_device_only(&self) -> bool {
        matches!(
            self,
            Self::WhenPasscodeSetThisDeviceOnly
                | Self::WhenUnlockedThisDeviceOnly
                | Self::AfterFirstUnlockThisDeviceOnly
                | Self::AlwaysThisDeviceOnly
        )
    }

    /// Whether items with this tier may be synchronized across devices.
    pub fn is_sync_compatible(&self) -> bool {
        !self.is_device_only()
    }
}

impl std::fmt::Display for Accessibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
