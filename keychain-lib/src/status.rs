//! Native status codes returned by the secure item store.
//!
//! The values mirror the Security framework's `OSStatus` result codes so
//! that errors surfaced by this crate can be matched against Apple's
//! documentation directly.

use std::fmt;

/// A native status code (`OSStatus`) returned by an item store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(pub i32);

impl Status {
    /// `errSecSuccess`
    pub const SUCCESS: Status = Status(0);
    /// `errSecUnimplemented`
    pub const UNIMPLEMENTED: Status = Status(-4);
    /// `errSecParam`
    pub const PARAM: Status = Status(-50);
    /// `errSecAllocate`
    pub const ALLOCATE: Status = Status(-108);
    /// `errSecNotAvailable`
    pub const NOT_AVAILABLE: Status = Status(-25291);
    /// `errSecAuthFailed`
    pub const AUTH_FAILED: Status = Status(-25293);
    /// `errSecDuplicateItem`
    pub const DUPLICATE_ITEM: Status = Status(-25299);
    /// `errSecItemNotFound`
    pub const ITEM_NOT_FOUND: Status = Status(-25300);
    /// `errSecInteractionNotAllowed`
    pub const INTERACTION_NOT_ALLOWED: Status = Status(-25308);
    /// `errSecDecode`
    pub const DECODE: Status = Status(-26275);
    /// `errSecMissingEntitlement`
    pub const MISSING_ENTITLEMENT: Status = Status(-34018);

    /// Get the raw status code.
    pub fn code(self) -> i32 {
        self.0
    }

    /// Check if the native call succeeded.
    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Check if the native call found no matching item.
    pub fn is_item_not_found(self) -> bool {
        self == Self::ITEM_NOT_FOUND
    }

    /// Check if an add collided with an existing item.
    pub fn is_duplicate_item(self) -> bool {
        self == Self::DUPLICATE_ITEM
    }

    /// Convert a raw native return value into a `Result`.
    pub fn into_result(self) -> Result<(), Status> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Human-readable description of the status.
    pub fn description(self) -> String {
        match self.known_description() {
            Some(text) => text.to_string(),
            None => platform_description(self),
        }
    }

    fn known_description(self) -> Option<&'static str> {
        let text = match self {
            Self::SUCCESS => "No error",
            Self::UNIMPLEMENTED => "Function or operation not implemented",
            Self::PARAM => "One or more parameters passed to the function were not valid",
            Self::ALLOCATE => "Failed to allocate memory",
            Self::NOT_AVAILABLE => "No keychain is available",
            Self::AUTH_FAILED => "The user name or passphrase you entered is not correct",
            Self::DUPLICATE_ITEM => "The specified item already exists in the keychain",
            Self::ITEM_NOT_FOUND => "The specified item could not be found in the keychain",
            Self::INTERACTION_NOT_ALLOWED => "User interaction is not allowed",
            Self::DECODE => "Unable to decode the provided data",
            Self::MISSING_ENTITLEMENT => "A required entitlement isn't present",
            _ => return None,
        };
        Some(text)
    }
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
fn platform_description(status: Status) -> String {
    security_framework::base::Error::from_code(status.0).to_string()
}

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
fn platform_description(status: Status) -> String {
    format!("Unknown status {}", status.0)
}

impl From<i32> for Status {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (OSStatus {})", self.description(), self.0)
    }
}
