// src/providers/aes.rs
//! AES-CBC provider — string-keyed encryption with per-call random IVs
//!
//! Blob layout, Base64-encoded as one opaque string:
//!
//! ```text
//! [ IV (16 bytes) | AES-CBC ciphertext, PKCS#7 padded ]
//! ```
//!
//! String keys are normalized to AES key material by truncating their UTF-8
//! bytes to the largest of 32/24/16 that fits. This is compatibility
//! behavior carried from the stored-data format, not a KDF — it adds no
//! stretching and no entropy.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use crate::consts::AES_BLOCK_SIZE;
use crate::error::{CryptoError, Result};
use crate::providers::EncryptionProvider;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes192CbcEnc = cbc::Encryptor<aes::Aes192>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Stateless AES-CBC encryption provider.
///
/// Key material is derived from the caller's key on every call and a fresh
/// IV is drawn from the OS RNG, so one instance can serve any number of
/// threads concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct AesEncryptionProvider;

impl AesEncryptionProvider {
    pub fn new() -> Self {
        Self
    }

    /// Encrypt with pre-derived raw key bytes instead of a string key.
    ///
    /// `key` must be exactly 16, 24, or 32 bytes — what [`generate_aes_key`]
    /// produces.
    ///
    /// [`generate_aes_key`]: crate::keygen::generate_aes_key
    pub fn encrypt_with_key_bytes(&self, plain_text: &str, key: &[u8]) -> Result<String> {
        if plain_text.is_empty() {
            return Err(CryptoError::invalid_argument(
                "Plaintext cannot be null or empty.",
            ));
        }
        if !matches!(key.len(), 16 | 24 | 32) {
            return Err(CryptoError::invalid_argument(
                "Key must be 16, 24, or 32 bytes long.",
            ));
        }
        encrypt_with_fresh_iv(plain_text, key)
    }
}

impl EncryptionProvider for AesEncryptionProvider {
    fn encrypt(&self, plain_text: &str, key: &str) -> Result<String> {
        if plain_text.is_empty() {
            return Err(CryptoError::invalid_argument(
                "Plaintext cannot be null or empty.",
            ));
        }
        let key_bytes = derive_key_bytes(key);
        if !matches!(key_bytes.len(), 16 | 24 | 32) {
            return Err(CryptoError::invalid_argument(
                "Key provided is too short. Provide a longer key to complete the operation.",
            ));
        }
        encrypt_with_fresh_iv(plain_text, key_bytes)
    }

    fn decrypt(&self, cipher_text: &str, key: &str) -> Result<String> {
        if cipher_text.is_empty() {
            return Err(CryptoError::invalid_argument(
                "Ciphertext cannot be null or empty.",
            ));
        }
        if key.is_empty() {
            return Err(CryptoError::invalid_argument(
                "Key cannot be null or empty.",
            ));
        }
        let combined = STANDARD.decode(cipher_text).map_err(|_| {
            CryptoError::invalid_argument("Ciphertext is not a valid Base64 string.")
        })?;
        if combined.len() < AES_BLOCK_SIZE {
            return Err(CryptoError::invalid_argument(
                "Ciphertext is too short to contain IV.",
            ));
        }
        let (iv, cipher_bytes) = combined.split_at(AES_BLOCK_SIZE);

        // Length is not re-checked here: undersized derived material fails
        // inside the cipher exactly like a wrong key would.
        let key_bytes = derive_key_bytes(key);
        let plain_bytes =
            cbc_decrypt(key_bytes, iv, cipher_bytes).map_err(CryptoError::decryption_failed)?;
        String::from_utf8(plain_bytes).map_err(CryptoError::decryption_failed)
    }
}

/// Normalize a string key to AES key material: the first 32, 24, or 16 UTF-8
/// bytes, whichever is the largest that fits. Inputs shorter than 16 bytes
/// come back unchanged for the caller (or the cipher) to reject.
fn derive_key_bytes(key: &str) -> &[u8] {
    let bytes = key.as_bytes();
    if bytes.len() >= 32 {
        &bytes[..32]
    } else if bytes.len() >= 24 {
        &bytes[..24]
    } else if bytes.len() >= 16 {
        &bytes[..16]
    } else {
        bytes
    }
}

fn encrypt_with_fresh_iv(plain_text: &str, key: &[u8]) -> Result<String> {
    let mut iv = [0u8; AES_BLOCK_SIZE];
    OsRng.fill_bytes(&mut iv);

    // Callers have already validated the key length, so init cannot fail
    // here; keep the message consistent with the length check anyway.
    let cipher_bytes = cbc_encrypt(key, &iv, plain_text.as_bytes())
        .map_err(|_| CryptoError::invalid_argument("Key must be 16, 24, or 32 bytes long."))?;

    let mut combined = Vec::with_capacity(AES_BLOCK_SIZE + cipher_bytes.len());
    combined.extend_from_slice(&iv);
    combined.extend_from_slice(&cipher_bytes);
    Ok(STANDARD.encode(combined))
}

/// Block-cipher-level failure; public APIs re-wrap this before returning.
#[derive(Error, Debug, Clone, Copy)]
enum CipherFailure {
    #[error("key length not valid for AES")]
    KeyLength,
    #[error("block padding verification failed")]
    Padding,
}

fn cbc_encrypt(key: &[u8], iv: &[u8], plain: &[u8]) -> std::result::Result<Vec<u8>, CipherFailure> {
    match key.len() {
        16 => encrypt_padded::<Aes128CbcEnc>(key, iv, plain),
        24 => encrypt_padded::<Aes192CbcEnc>(key, iv, plain),
        32 => encrypt_padded::<Aes256CbcEnc>(key, iv, plain),
        _ => Err(CipherFailure::KeyLength),
    }
}

fn cbc_decrypt(key: &[u8], iv: &[u8], data: &[u8]) -> std::result::Result<Vec<u8>, CipherFailure> {
    match key.len() {
        16 => decrypt_padded::<Aes128CbcDec>(key, iv, data),
        24 => decrypt_padded::<Aes192CbcDec>(key, iv, data),
        32 => decrypt_padded::<Aes256CbcDec>(key, iv, data),
        _ => Err(CipherFailure::KeyLength),
    }
}

fn encrypt_padded<E>(
    key: &[u8],
    iv: &[u8],
    plain: &[u8],
) -> std::result::Result<Vec<u8>, CipherFailure>
where
    E: BlockEncryptMut + KeyIvInit,
{
    let cipher = E::new_from_slices(key, iv).map_err(|_| CipherFailure::KeyLength)?;
    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plain))
}

fn decrypt_padded<D>(
    key: &[u8],
    iv: &[u8],
    data: &[u8],
) -> std::result::Result<Vec<u8>, CipherFailure>
where
    D: BlockDecryptMut + KeyIvInit,
{
    let cipher = D::new_from_slices(key, iv).map_err(|_| CipherFailure::KeyLength)?;
    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| CipherFailure::Padding)
}
