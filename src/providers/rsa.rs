// src/providers/rsa.rs
//! RSA provider — keypair owned per instance, key halves travel as
//! Base64-encoded PKCS#1 DER
//!
//! Encryption always uses OAEP-SHA256. Decryption tries OAEP-SHA256 first so
//! its own output round-trips, then falls back to PKCS#1 v1.5 for blobs
//! produced by older writers; OAEP's label hash makes a false match on a
//! v1.5 blob negligible.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rsa::pkcs1::{
    DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey,
};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use crate::consts::{DEFAULT_RSA_KEY_SIZE_BITS, MAX_RSA_KEY_SIZE_BITS, MIN_RSA_KEY_SIZE_BITS};
use crate::error::{CryptoError, Result};
use crate::providers::{AsymmetricEncryptionProvider, EncryptionProvider};

/// RSA provider owning a keypair generated at construction.
///
/// The owned keypair exists to be handed out through the export methods;
/// encrypt and decrypt never read it. Key material for a call always comes
/// from the caller and lives in a context scoped to that call, so a single
/// instance is safe to share across threads.
pub struct RsaEncryptionProvider {
    public_key: RsaPublicKey,
    private_key: RsaPrivateKey,
}

impl RsaEncryptionProvider {
    /// Generate a provider with a fresh 2048-bit keypair.
    pub fn new() -> Result<Self> {
        Self::with_key_size(DEFAULT_RSA_KEY_SIZE_BITS)
    }

    /// Generate a provider with a fresh keypair of `key_size_bits` bits.
    /// Sizes outside [2048, 16384] are rejected before any generation work.
    pub fn with_key_size(key_size_bits: usize) -> Result<Self> {
        if !(MIN_RSA_KEY_SIZE_BITS..=MAX_RSA_KEY_SIZE_BITS).contains(&key_size_bits) {
            return Err(CryptoError::out_of_range(
                "Key size must be between 2048 and 16384 bits.",
            ));
        }
        let private_key = RsaPrivateKey::new(&mut OsRng, key_size_bits)
            .map_err(|e| CryptoError::operation_failed("generate the keypair", e))?;
        let public_key = RsaPublicKey::from(&private_key);
        Ok(Self {
            public_key,
            private_key,
        })
    }
}

impl EncryptionProvider for RsaEncryptionProvider {
    /// Encrypt `plain_text` under the supplied public key (Base64 PKCS#1
    /// DER) with OAEP-SHA256. The key is imported into a call-scoped
    /// context; the instance's own keypair is untouched.
    fn encrypt(&self, plain_text: &str, key: &str) -> Result<String> {
        if plain_text.is_empty() {
            return Err(CryptoError::invalid_argument("value cannot be null here."));
        }
        if key.is_empty() {
            return Err(CryptoError::invalid_argument("key cannot be null here."));
        }

        let der = STANDARD
            .decode(key)
            .map_err(|e| CryptoError::operation_failed("encrypt", e))?;
        let public_key = RsaPublicKey::from_pkcs1_der(&der)
            .map_err(|e| CryptoError::operation_failed("encrypt", e))?;
        let encrypted = public_key
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), plain_text.as_bytes())
            .map_err(|e| CryptoError::operation_failed("encrypt", e))?;
        Ok(STANDARD.encode(encrypted))
    }

    /// Decrypt `cipher_text` under the supplied private key (Base64 PKCS#1
    /// DER): OAEP-SHA256 first, PKCS#1 v1.5 as the legacy fallback.
    fn decrypt(&self, cipher_text: &str, key: &str) -> Result<String> {
        if cipher_text.is_empty() {
            return Err(CryptoError::invalid_argument(
                "Cipher Text cannot be null here.",
            ));
        }
        if key.is_empty() {
            return Err(CryptoError::invalid_argument("key cannot be null here."));
        }

        let der = STANDARD
            .decode(key)
            .map_err(|e| CryptoError::operation_failed("decrypt", e))?;
        let private_key = RsaPrivateKey::from_pkcs1_der(&der)
            .map_err(|e| CryptoError::operation_failed("decrypt", e))?;
        let encrypted = STANDARD
            .decode(cipher_text)
            .map_err(|e| CryptoError::operation_failed("decrypt", e))?;
        let decrypted = private_key
            .decrypt(Oaep::new::<Sha256>(), &encrypted)
            .or_else(|_| private_key.decrypt(Pkcs1v15Encrypt, &encrypted))
            .map_err(|e| CryptoError::operation_failed("decrypt", e))?;
        String::from_utf8(decrypted).map_err(|e| CryptoError::operation_failed("decrypt", e))
    }
}

impl AsymmetricEncryptionProvider for RsaEncryptionProvider {
    fn export_public_key(&self) -> Result<String> {
        let der = self
            .public_key
            .to_pkcs1_der()
            .map_err(|e| CryptoError::operation_failed("export the public key", e))?;
        Ok(STANDARD.encode(der.as_bytes()))
    }

    fn export_private_key(&self) -> Result<String> {
        let der = self
            .private_key
            .to_pkcs1_der()
            .map_err(|e| CryptoError::operation_failed("export the private key", e))?;
        Ok(STANDARD.encode(der.as_bytes()))
    }
}

// Hand-written so private key components never end up in debug output.
impl fmt::Debug for RsaEncryptionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaEncryptionProvider")
            .field("key_size_bits", &(self.public_key.size() * 8))
            .finish_non_exhaustive()
    }
}
