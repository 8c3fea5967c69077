//! Keychain Services implementation of the secure item store.
//!
//! Items are generic passwords (`kSecClassGenericPassword`). Every query
//! attribute in [`ItemQuery`] is passed through to the Security framework,
//! which performs encryption, access-group and accessibility enforcement.

use std::ptr;

use core_foundation::base::{CFType, CFTypeRef, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::data::CFData;
use core_foundation::dictionary::CFDictionary;
use core_foundation::string::{CFString, CFStringRef};
use security_framework_sys::item::{
    kSecAttrAccount, kSecAttrService, kSecClass, kSecClassGenericPassword, kSecMatchLimit,
    kSecMatchLimitOne, kSecReturnData, kSecValueData,
};
use security_framework_sys::keychain_item::{
    SecItemAdd, SecItemCopyMatching, SecItemDelete, SecItemUpdate,
};

use super::SecureItemStore;
use crate::accessibility::Accessibility;
use crate::query::ItemQuery;
use crate::status::Status;

#[link(name = "Security", kind = "framework")]
extern "C" {
    static kSecAttrAccessible: CFStringRef;
    static kSecAttrAccessGroup: CFStringRef;
    static kSecAttrSynchronizable: CFStringRef;

    static kSecAttrAccessibleWhenUnlocked: CFStringRef;
    static kSecAttrAccessibleAfterFirstUnlock: CFStringRef;
    static kSecAttrAccessibleAlways: CFStringRef;
    static kSecAttrAccessibleWhenPasscodeSetThisDeviceOnly: CFStringRef;
    static kSecAttrAccessibleWhenUnlockedThisDeviceOnly: CFStringRef;
    static kSecAttrAccessibleAfterFirstUnlockThisDeviceOnly: CFStringRef;
    static kSecAttrAccessibleAlwaysThisDeviceOnly: CFStringRef;
}

/// Keychain Services-backed secure item store.
///
/// Stateless; construct as many as needed.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeychainItemStore;

impl KeychainItemStore {
    /// Create a handle to the system keychain.
    pub fn new() -> Self {
        Self
    }
}

fn cf_key(key: CFStringRef) -> CFString {
    // SAFETY: Security framework constants are valid for the process lifetime
    unsafe { CFString::wrap_under_get_rule(key) }
}

fn accessibility_value(accessibility: Accessibility) -> CFString {
    // SAFETY: as above
    let raw = unsafe {
        match accessibility {
            Accessibility::WhenUnlocked => kSecAttrAccessibleWhenUnlocked,
            Accessibility::AfterFirstUnlock => kSecAttrAccessibleAfterFirstUnlock,
            Accessibility::Always => kSecAttrAccessibleAlways,
            Accessibility::WhenPasscodeSetThisDeviceOnly => {
                kSecAttrAccessibleWhenPasscodeSetThisDeviceOnly
            }
            Accessibility::WhenUnlockedThisDeviceOnly => {
                kSecAttrAccessibleWhenUnlockedThisDeviceOnly
            }
            Accessibility::AfterFirstUnlockThisDeviceOnly => {
                kSecAttrAccessibleAfterFirstUnlockThisDeviceOnly
            }
            Accessibility::AlwaysThisDeviceOnly => kSecAttrAccessibleAlwaysThisDeviceOnly,
        }
    };
    cf_key(raw)
}

/// Attribute pairs identifying the slot described by `query`.
fn slot_pairs(query: &ItemQuery) -> Vec<(CFString, CFType)> {
    // SAFETY: reading extern statics exported by the Security framework
    let mut pairs = unsafe {
        vec![
            (
                cf_key(kSecClass),
                cf_key(kSecClassGenericPassword).as_CFType(),
            ),
            (
                cf_key(kSecAttrService),
                CFString::new(&query.service).as_CFType(),
            ),
            (
                cf_key(kSecAttrAccount),
                CFString::new(&query.account).as_CFType(),
            ),
            (
                cf_key(kSecAttrAccessible),
                accessibility_value(query.accessibility).as_CFType(),
            ),
        ]
    };

    if let Some(group) = &query.access_group {
        // SAFETY: as above
        let key = unsafe { cf_key(kSecAttrAccessGroup) };
        pairs.push((key, CFString::new(group).as_CFType()));
    }

    if query.synchronizable {
        // SAFETY: as above
        let key = unsafe { cf_key(kSecAttrSynchronizable) };
        pairs.push((key, CFBoolean::true_value().as_CFType()));
    }

    if query.return_data {
        // SAFETY: as above
        let key = unsafe { cf_key(kSecReturnData) };
        pairs.push((key, CFBoolean::true_value().as_CFType()));
    }

    if query.match_limit_one {
        // SAFETY: as above
        let (key, value) = unsafe { (cf_key(kSecMatchLimit), cf_key(kSecMatchLimitOne)) };
        pairs.push((key, value.as_CFType()));
    }

    pairs
}

fn value_data_pair(data: &[u8]) -> (CFString, CFType) {
    // SAFETY: as above
    let key = unsafe { cf_key(kSecValueData) };
    (key, CFData::from_buffer(data).as_CFType())
}

impl SecureItemStore for KeychainItemStore {
    fn add(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        let mut pairs = slot_pairs(query);
        pairs.push(value_data_pair(data));
        let attributes = CFDictionary::from_CFType_pairs(&pairs);

        // SAFETY: the dictionary outlives the call; no result is requested
        let status = unsafe { SecItemAdd(attributes.as_concrete_TypeRef(), ptr::null_mut()) };
        Status(status).into_result()
    }

    fn update(&self, query: &ItemQuery, data: &[u8]) -> Result<(), Status> {
        let matching = CFDictionary::from_CFType_pairs(&slot_pairs(query));
        let changes = CFDictionary::from_CFType_pairs(&[value_data_pair(data)]);

        // SAFETY: both dictionaries outlive the call
        let status = unsafe {
            SecItemUpdate(
                matching.as_concrete_TypeRef(),
                changes.as_concrete_TypeRef(),
            )
        };
        Status(status).into_result()
    }

    fn copy_matching(&self, query: &ItemQuery) -> Result<Option<Vec<u8>>, Status> {
        let matching = CFDictionary::from_CFType_pairs(&slot_pairs(query));
        let mut result: CFTypeRef = ptr::null();

        // SAFETY: the dictionary outlives the call; `result` is an out-parameter
        let status = unsafe { SecItemCopyMatching(matching.as_concrete_TypeRef(), &mut result) };
        Status(status).into_result()?;

        if result.is_null() {
            return Ok(None);
        }

        // SAFETY: SecItemCopyMatching follows the create rule for `result`
        let object = unsafe { CFType::wrap_under_create_rule(result) };
        Ok(object
            .downcast_into::<CFData>()
            .map(|data| data.bytes().to_vec()))
    }

    fn delete(&self, query: &ItemQuery) -> Result<(), Status> {
        let matching = CFDictionary::from_CFType_pairs(&slot_pairs(query));

        // SAFETY: the dictionary outlives the call
        let status = unsafe { SecItemDelete(matching.as_concrete_TypeRef()) };
        Status(status).into_result()
    }
}
