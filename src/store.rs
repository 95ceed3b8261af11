// src/store.rs
//! Encrypting wrapper around a preference collaborator

use tracing::instrument;

use crate::consts::MIN_BOUND_KEY_LENGTH;
use crate::error::{CryptoError, Result};
use crate::preferences::Preferences;
use crate::providers::EncryptionProvider;

/// Encrypts values on the way into a [`Preferences`] collaborator and
/// decrypts them on the way out.
///
/// Two modes, fixed at construction: [`new`](Self::new) leaves the
/// encryption key to the caller on every operation, [`with_key`](Self::with_key)
/// binds one key up front so call sites stay key-free. Every call is an
/// independent unit of work; the store keeps no other state.
///
/// ```
/// use secure_preferences::{AesEncryptionProvider, InMemoryPreferences, SecurePreferences};
///
/// # fn main() -> secure_preferences::Result<()> {
/// let store = SecurePreferences::with_key(
///     AesEncryptionProvider::new(),
///     InMemoryPreferences::new(),
///     "5a46d6975d51764f10eda8fe266aa599352cd6ae",
/// )?;
/// store.save("api-token", "swordfish")?;
/// assert_eq!(store.get("api-token")?.as_deref(), Some("swordfish"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SecurePreferences<P, S> {
    provider: P,
    preferences: S,
    bound_key: Option<String>,
}

impl<P: EncryptionProvider, S: Preferences> SecurePreferences<P, S> {
    /// Per-call-key mode: every save/get takes the encryption key explicitly.
    pub fn new(provider: P, preferences: S) -> Self {
        Self {
            provider,
            preferences,
            bound_key: None,
        }
    }

    /// Fixed-key mode: `key` is bound once and used by [`save`](Self::save)
    /// and [`get`](Self::get). Keys shorter than 16 bytes are rejected —
    /// that is the floor the symmetric derivation needs.
    pub fn with_key(provider: P, preferences: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.len() < MIN_BOUND_KEY_LENGTH {
            return Err(CryptoError::invalid_argument(
                "Encryption key must be at least 16 characters long.",
            ));
        }
        Ok(Self {
            provider,
            preferences,
            bound_key: Some(key),
        })
    }

    /// Encrypt `value` under `encryption_key` and store it at `storage_key`.
    #[instrument(skip_all, fields(storage_key))]
    pub fn save_with_key(
        &self,
        encryption_key: &str,
        storage_key: &str,
        value: &str,
    ) -> Result<()> {
        if storage_key.is_empty() {
            return Err(CryptoError::invalid_argument(
                "Storage key cannot be null or empty.",
            ));
        }
        let encrypted = self.provider.encrypt(value, encryption_key)?;
        self.preferences.set(storage_key, &encrypted);
        Ok(())
    }

    /// Bound-key form of [`save_with_key`](Self::save_with_key).
    pub fn save(&self, storage_key: &str, value: &str) -> Result<()> {
        self.save_with_key(self.bound_key()?, storage_key, value)
    }

    /// Fetch and decrypt the value at `storage_key`; `Ok(None)` when nothing
    /// is stored there. Decryption failures propagate as the provider's
    /// error.
    #[instrument(skip_all, fields(storage_key))]
    pub fn get_with_key(&self, decryption_key: &str, storage_key: &str) -> Result<Option<String>> {
        if storage_key.is_empty() {
            return Err(CryptoError::invalid_argument(
                "Storage key cannot be null or empty.",
            ));
        }
        match self.preferences.get(storage_key, None) {
            None => Ok(None),
            Some(encrypted) => self.provider.decrypt(&encrypted, decryption_key).map(Some),
        }
    }

    /// Bound-key form of [`get_with_key`](Self::get_with_key).
    pub fn get(&self, storage_key: &str) -> Result<Option<String>> {
        self.get_with_key(self.bound_key()?, storage_key)
    }

    /// Remove the entry at `storage_key`. Pass-through to the collaborator.
    #[instrument(skip_all, fields(storage_key))]
    pub fn remove(&self, storage_key: &str) {
        self.preferences.remove(storage_key);
    }

    /// Remove every entry. Pass-through to the collaborator.
    #[instrument(skip_all)]
    pub fn clear(&self) {
        self.preferences.clear();
    }

    fn bound_key(&self) -> Result<&str> {
        self.bound_key.as_deref().ok_or_else(|| {
            CryptoError::invalid_argument("No encryption key was bound at construction.")
        })
    }
}
