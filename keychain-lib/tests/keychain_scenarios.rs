//! Integration tests for the keychain accessor.
//!
//! These run against the in-memory item store, so no platform keychain or
//! entitlements are needed:
//!
//! ```bash
//! cargo test -p keychain-lib --test keychain_scenarios
//! ```

use std::sync::Arc;
use std::thread;

use keychain_lib::{
    Accessibility, InMemoryItemStore, Key, Keychain, KeychainConfig, RetrieveError, Status,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Sample {
    value: String,
}

fn sample(value: &str) -> Sample {
    Sample {
        value: value.to_string(),
    }
}

fn sample_key() -> Key<Sample> {
    Key::new("sampleKey")
}

// ============================================================================
// Store / retrieve / delete lifecycle
// ============================================================================

#[test]
fn store_overwrite_delete_lifecycle() {
    let keychain = Keychain::new(KeychainConfig::default(), InMemoryItemStore::new());
    let key = sample_key();

    keychain.store(&sample("storeTest"), &key).unwrap();
    assert_eq!(keychain.retrieve(&key).unwrap(), sample("storeTest"));

    keychain.store(&sample("overwriteTestTwo"), &key).unwrap();
    assert_eq!(keychain.retrieve(&key).unwrap(), sample("overwriteTestTwo"));

    keychain.delete(&key).unwrap();
    let err = keychain.retrieve(&key).unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        err,
        RetrieveError::NativeRetrieveFailure { ref key, status }
            if key == "sampleKey" && status == Status::ITEM_NOT_FOUND
    ));
}

#[test]
fn overwrite_replaces_instead_of_merging() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Profile {
        name: String,
        #[serde(default)]
        nickname: Option<String>,
    }

    let keychain = Keychain::new(KeychainConfig::default(), InMemoryItemStore::new());
    let key: Key<Profile> = Key::new("profile");

    keychain
        .store(
            &Profile {
                name: "first".into(),
                nickname: Some("f".into()),
            },
            &key,
        )
        .unwrap();
    keychain
        .store(
            &Profile {
                name: "second".into(),
                nickname: None,
            },
            &key,
        )
        .unwrap();

    let stored = keychain.retrieve(&key).unwrap();
    assert_eq!(stored.name, "second");
    assert_eq!(stored.nickname, None);
}

#[test]
fn distinct_keys_are_isolated() {
    let backend = InMemoryItemStore::new();
    let keychain = Keychain::new(KeychainConfig::default(), &backend);
    let first: Key<Sample> = Key::new("first");
    let second: Key<Sample> = Key::new("second");

    keychain.store(&sample("one"), &first).unwrap();
    assert!(keychain.retrieve(&second).unwrap_err().is_not_found());

    keychain.store(&sample("two"), &second).unwrap();
    keychain.delete(&first).unwrap();

    assert!(keychain.retrieve(&first).unwrap_err().is_not_found());
    assert_eq!(keychain.retrieve(&second).unwrap(), sample("two"));
    assert_eq!(backend.len(), 1);
}

#[test]
fn delete_of_missing_slot_is_reported() {
    let keychain = Keychain::new(KeychainConfig::default(), InMemoryItemStore::new());

    let err = keychain.delete(&sample_key()).unwrap_err();
    assert_eq!(err.status(), Some(Status::ITEM_NOT_FOUND));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn equal_configs_address_the_same_slots() {
    let backend = Arc::new(InMemoryItemStore::new());
    let config = KeychainConfig::new()
        .with_access_group("group.com.example.shared")
        .with_accessibility(Accessibility::AfterFirstUnlock);

    Keychain::new(config.clone(), Arc::clone(&backend))
        .store(&sample("shared"), &sample_key())
        .unwrap();

    let again = Keychain::new(config, Arc::clone(&backend));
    assert_eq!(again.retrieve(&sample_key()).unwrap(), sample("shared"));
}

// In-memory behavior only. On Keychain Services the tier is not part of the
// item's primary key, and the second tier's store fails with ITEM_NOT_FOUND.
#[test]
fn accessibility_tier_partitions_in_memory_slots() {
    let backend = InMemoryItemStore::new();
    let unlocked = Keychain::new(KeychainConfig::default(), &backend);
    let always = Keychain::new(
        KeychainConfig::new().with_accessibility(Accessibility::Always),
        &backend,
    );

    unlocked.store(&sample("unlocked"), &sample_key()).unwrap();
    assert!(always.retrieve(&sample_key()).unwrap_err().is_not_found());
}

#[test]
fn config_from_json() {
    let config: KeychainConfig = serde_json::from_str(
        r#"{"access_group": "group.example", "accessibility": "after_first_unlock"}"#,
    )
    .unwrap();
    let keychain = Keychain::new(config, InMemoryItemStore::new());

    assert_eq!(keychain.config().access_group(), Some("group.example"));
    assert_eq!(keychain.config().accessibility, Accessibility::AfterFirstUnlock);

    keychain.store(&sample("configured"), &sample_key()).unwrap();
    assert_eq!(keychain.retrieve(&sample_key()).unwrap(), sample("configured"));

    let default_group = Keychain::new(KeychainConfig::default(), keychain.store_backend());
    assert!(default_group.retrieve(&sample_key()).unwrap_err().is_not_found());
}

// ============================================================================
// Synchronization precondition
// ============================================================================

#[test]
fn synchronizing_key_with_compatible_tier() {
    let keychain = Keychain::new(
        KeychainConfig::new().with_accessibility(Accessibility::AfterFirstUnlock),
        InMemoryItemStore::new(),
    );
    let key: Key<Sample> = Key::synchronizing("synced");

    keychain.store(&sample("cloud"), &key).unwrap();
    assert_eq!(keychain.retrieve(&key).unwrap(), sample("cloud"));
}

#[test]
#[should_panic(expected = "device-only")]
fn synchronizing_key_with_device_only_tier_panics() {
    let keychain = Keychain::new(
        KeychainConfig::new().with_accessibility(Accessibility::WhenPasscodeSetThisDeviceOnly),
        InMemoryItemStore::new(),
    );
    let key: Key<Sample> = Key::synchronizing("synced");

    let _ = keychain.store(&sample("never"), &key);
}

// ============================================================================
// Lossy convenience access
// ============================================================================

#[test]
fn convenience_access_mirrors_primary_api() {
    let keychain = Keychain::new(KeychainConfig::default(), InMemoryItemStore::new());
    let key = sample_key();

    keychain.set_or_ignore(&key, Some(sample("indexed")));
    assert_eq!(keychain.get_or_none(&key), Some(sample("indexed")));
    assert_eq!(keychain.retrieve(&key).unwrap(), sample("indexed"));

    keychain.set_or_ignore(&key, None);
    assert_eq!(keychain.get_or_none(&key), None);
    assert!(!keychain.contains(&key).unwrap());
}

#[test]
fn convenience_read_hides_decoding_failures() {
    let backend = InMemoryItemStore::new();
    let keychain = Keychain::new(KeychainConfig::default(), &backend);
    let as_text: Key<String> = Key::new("shape");
    let as_number: Key<u32> = Key::new("shape");

    keychain.store(&"not a number".to_string(), &as_text).unwrap();

    assert!(matches!(
        keychain.retrieve(&as_number),
        Err(RetrieveError::DecodingFailure(_))
    ));
    assert_eq!(keychain.get_or_none(&as_number), None);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn concurrent_writers_leave_one_of_their_values() {
    let keychain = Arc::new(Keychain::new(
        KeychainConfig::default(),
        InMemoryItemStore::new(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let keychain = Arc::clone(&keychain);
            thread::spawn(move || {
                for round in 0..25 {
                    // a racing writer may see DUPLICATE_ITEM then update; both succeed
                    keychain
                        .store(&sample(&format!("{i}-{round}")), &sample_key())
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let last = keychain.retrieve(&sample_key()).unwrap();
    assert!(last.value.ends_with("-24"));
}
