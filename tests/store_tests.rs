// tests/store_tests.rs
mod support;
use support::{init_tracing, KEY, PLAINTEXT, WRONG_KEY};

use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secure_preferences::{
    AesEncryptionProvider, AsymmetricEncryptionProvider, CryptoError, EncryptionProvider,
    InMemoryPreferences, Preferences, Result, RsaEncryptionProvider, SecurePreferences,
};

/// Provider double. Clones share the call log, so a test can hand one
/// handle to the store and keep the other for inspection.
#[derive(Clone, Default)]
struct RecordingProvider {
    calls: Arc<Mutex<Vec<String>>>,
}

impl EncryptionProvider for RecordingProvider {
    fn encrypt(&self, plain_text: &str, key: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("encrypt({plain_text}, {key})"));
        Ok(format!("enc:{plain_text}"))
    }

    fn decrypt(&self, cipher_text: &str, key: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("decrypt({cipher_text}, {key})"));
        Ok(cipher_text.trim_start_matches("enc:").to_owned())
    }
}

#[test]
fn save_and_get_delegate_to_the_provider() {
    init_tracing();
    let provider = RecordingProvider::default();
    let prefs = InMemoryPreferences::new();
    let store = SecurePreferences::new(provider.clone(), prefs.clone());

    store
        .save_with_key("per-call-key", "token", PLAINTEXT)
        .expect("save");
    let value = store.get_with_key("per-call-key", "token").expect("get");

    assert_eq!(value.as_deref(), Some(PLAINTEXT));
    // The collaborator only ever sees provider output.
    assert_eq!(prefs.get("token", None), Some(format!("enc:{PLAINTEXT}")));
    let calls = provider.calls.lock().unwrap();
    assert_eq!(
        *calls,
        [
            format!("encrypt({PLAINTEXT}, per-call-key)"),
            format!("decrypt(enc:{PLAINTEXT}, per-call-key)"),
        ]
    );
}

#[test]
fn aes_round_trip_through_the_collaborator() {
    init_tracing();
    let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());

    store.save_with_key(KEY, "password", PLAINTEXT).expect("save");
    let value = store.get_with_key(KEY, "password").expect("get");
    assert_eq!(value.as_deref(), Some(PLAINTEXT));
}

#[test]
fn stored_values_are_never_plaintext() {
    let prefs = InMemoryPreferences::new();
    let store = SecurePreferences::new(AesEncryptionProvider::new(), prefs.clone());

    store.save_with_key(KEY, "password", PLAINTEXT).expect("save");

    let at_rest = prefs.get("password", None).expect("stored entry");
    assert_ne!(at_rest, PLAINTEXT);
    assert!(!at_rest.contains(PLAINTEXT));
    let decoded = STANDARD.decode(&at_rest).expect("stored entry is Base64");
    assert!(decoded.len() > 16, "IV plus at least one block");
}

#[test]
fn saving_twice_replaces_the_stored_value() {
    let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());

    store.save_with_key(KEY, "entry", "first").expect("save");
    store.save_with_key(KEY, "entry", "second").expect("save");
    assert_eq!(
        store.get_with_key(KEY, "entry").expect("get").as_deref(),
        Some("second")
    );
}

#[test]
fn entries_can_be_written_under_different_keys() {
    let other_key = "0123456789abcdef0123456789abcdef";
    let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());

    store.save_with_key(KEY, "first", "alpha").expect("save");
    store.save_with_key(other_key, "second", "beta").expect("save");

    assert_eq!(
        store.get_with_key(KEY, "first").expect("get").as_deref(),
        Some("alpha")
    );
    assert_eq!(
        store
            .get_with_key(other_key, "second")
            .expect("get")
            .as_deref(),
        Some("beta")
    );
}

#[test]
fn absent_key_reads_back_as_none() {
    let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());
    let value = store.get_with_key(KEY, "never-written").expect("get");
    assert_eq!(value, None);
}

#[test]
fn remove_deletes_a_single_entry() {
    let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());
    store.save_with_key(KEY, "a", "1").expect("save");
    store.save_with_key(KEY, "b", "2").expect("save");

    store.remove("a");

    assert_eq!(store.get_with_key(KEY, "a").expect("get"), None);
    assert_eq!(
        store.get_with_key(KEY, "b").expect("get").as_deref(),
        Some("2")
    );
}

#[test]
fn clear_empties_the_collaborator() {
    let prefs = InMemoryPreferences::new();
    let store = SecurePreferences::new(AesEncryptionProvider::new(), prefs.clone());
    store.save_with_key(KEY, "a", "1").expect("save");
    store.save_with_key(KEY, "b", "2").expect("save");

    store.clear();

    assert!(prefs.is_empty());
    assert_eq!(store.get_with_key(KEY, "a").expect("get"), None);
}

#[test]
fn save_rejects_an_empty_storage_key() {
    let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());
    let err = store.save_with_key(KEY, "", PLAINTEXT).unwrap_err();
    assert_eq!(err.to_string(), "Storage key cannot be null or empty.");
    assert!(matches!(err, CryptoError::InvalidArgument { .. }));
}

#[test]
fn get_rejects_an_empty_storage_key() {
    let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());
    let err = store.get_with_key(KEY, "").unwrap_err();
    assert_eq!(err.to_string(), "Storage key cannot be null or empty.");
}

#[test]
fn storage_key_validation_runs_before_the_provider() {
    let provider = RecordingProvider::default();
    let store = SecurePreferences::new(provider.clone(), InMemoryPreferences::new());

    let _ = store.save_with_key(KEY, "", PLAINTEXT);
    let _ = store.get_with_key(KEY, "");

    assert!(provider.calls.lock().unwrap().is_empty());
}

#[test]
fn an_empty_value_is_rejected_by_the_provider() {
    let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());
    let err = store.save_with_key(KEY, "entry", "").unwrap_err();
    assert_eq!(err.to_string(), "Plaintext cannot be null or empty.");
}

#[test]
fn reading_with_the_wrong_key_surfaces_the_provider_error() {
    let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());
    store.save_with_key(KEY, "password", PLAINTEXT).expect("save");

    let err = store.get_with_key(WRONG_KEY, "password").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Decryption failed, likely due to incorrect key or corrupted data."
    );
}

#[test]
fn bound_key_mode_round_trips() {
    init_tracing();
    let store = SecurePreferences::with_key(
        AesEncryptionProvider::new(),
        InMemoryPreferences::new(),
        KEY,
    )
    .expect("construct");

    store.save("password", PLAINTEXT).expect("save");
    assert_eq!(
        store.get("password").expect("get").as_deref(),
        Some(PLAINTEXT)
    );
}

#[test]
fn bound_and_per_call_forms_share_one_format() {
    let store = SecurePreferences::with_key(
        AesEncryptionProvider::new(),
        InMemoryPreferences::new(),
        KEY,
    )
    .expect("construct");

    store.save("password", PLAINTEXT).expect("save");
    assert_eq!(
        store.get_with_key(KEY, "password").expect("get").as_deref(),
        Some(PLAINTEXT)
    );

    store.save_with_key(KEY, "other", "second").expect("save");
    assert_eq!(store.get("other").expect("get").as_deref(), Some("second"));
}

#[test]
fn a_sixteen_byte_key_is_long_enough_to_bind() {
    let store = SecurePreferences::with_key(
        AesEncryptionProvider::new(),
        InMemoryPreferences::new(),
        "sixteen-bytes!!!",
    )
    .expect("construct");

    store.save("entry", PLAINTEXT).expect("save");
    assert_eq!(store.get("entry").expect("get").as_deref(), Some(PLAINTEXT));
}

#[test]
fn binding_a_short_key_is_rejected() {
    let err = SecurePreferences::with_key(
        AesEncryptionProvider::new(),
        InMemoryPreferences::new(),
        "fifteen-bytes!!",
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Encryption key must be at least 16 characters long."
    );
    assert!(matches!(err, CryptoError::InvalidArgument { .. }));
}

#[test]
fn the_bound_key_forms_need_a_bound_key() {
    let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());

    let err = store.save("entry", PLAINTEXT).unwrap_err();
    assert_eq!(err.to_string(), "No encryption key was bound at construction.");
    let err = store.get("entry").unwrap_err();
    assert_eq!(err.to_string(), "No encryption key was bound at construction.");
}

#[test]
fn the_store_is_provider_agnostic() {
    init_tracing();
    let provider = RsaEncryptionProvider::new().expect("generate keypair");
    let public_key = provider.export_public_key().expect("export public key");
    let private_key = provider.export_private_key().expect("export private key");
    let store = SecurePreferences::new(provider, InMemoryPreferences::new());

    // Asymmetric providers split the roles: the write side only ever
    // holds the public half.
    store
        .save_with_key(&public_key, "token", PLAINTEXT)
        .expect("save");
    let value = store.get_with_key(&private_key, "token").expect("get");
    assert_eq!(value.as_deref(), Some(PLAINTEXT));
}
