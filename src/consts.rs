// src/consts.rs
//! Shared constants — cipher parameters and size limits

/// AES block size in bytes; also the IV length leading every cipher blob.
pub const AES_BLOCK_SIZE: usize = 16;

/// Conventional AES key size for export when the caller has no preference.
pub const DEFAULT_AES_KEY_SIZE_BITS: usize = 256;

/// Smallest accepted RSA modulus size.
pub const MIN_RSA_KEY_SIZE_BITS: usize = 2048;

/// Largest accepted RSA modulus size.
// Anything above this takes minutes to generate and buys nothing
pub const MAX_RSA_KEY_SIZE_BITS: usize = 16384;

/// Modulus size used by `RsaEncryptionProvider::new`.
pub const DEFAULT_RSA_KEY_SIZE_BITS: usize = 2048;

/// Minimum length in bytes for a key bound at store construction — the floor
/// the string-key derivation needs to reach AES-128 material.
pub const MIN_BOUND_KEY_LENGTH: usize = 16;
