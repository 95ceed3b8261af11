// src/keygen.rs
//! Random AES key generation and export

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{CryptoError, Result};

/// Generate a cryptographically random AES key of `key_size_bits` bits.
///
/// Only 128, 192, and 256 are accepted; anything else is rejected before the
/// RNG is touched.
pub fn generate_aes_key(key_size_bits: usize) -> Result<Vec<u8>> {
    if !matches!(key_size_bits, 128 | 192 | 256) {
        return Err(CryptoError::invalid_argument(
            "Key size must be 128, 192, or 256 bits.",
        ));
    }
    let mut key = vec![0u8; key_size_bits / 8];
    OsRng.fill_bytes(&mut key);
    Ok(key)
}

/// Generate a random AES key and return it as Base64 text, ready to store or
/// transmit. Same validation as [`generate_aes_key`].
pub fn export_aes_key(key_size_bits: usize) -> Result<String> {
    Ok(STANDARD.encode(generate_aes_key(key_size_bits)?))
}
