// src/providers/mod.rs
//! Encryption providers and the capability traits the store depends on

mod aes;
mod rsa;

pub use aes::AesEncryptionProvider;
pub use rsa::RsaEncryptionProvider;

use crate::error::Result;

/// Capability contract every provider satisfies.
///
/// Both methods take the key material as text and return opaque Base64
/// ciphertext; what the key text means (symmetric passphrase, encoded RSA
/// key half) is the implementor's business. Storage code depends on this
/// trait only.
pub trait EncryptionProvider {
    /// Encrypt `plain_text` under `key`, returning an opaque Base64 blob.
    fn encrypt(&self, plain_text: &str, key: &str) -> Result<String>;

    /// Reverse of [`encrypt`](Self::encrypt): decode, decrypt, and return
    /// the original plaintext.
    fn decrypt(&self, cipher_text: &str, key: &str) -> Result<String>;
}

/// Extended capability for providers that own an exportable keypair.
pub trait AsymmetricEncryptionProvider: EncryptionProvider {
    /// Base64 encoding of the instance's public key half.
    fn export_public_key(&self) -> Result<String>;

    /// Base64 encoding of the instance's private key half. Handle with the
    /// same care as any other secret.
    fn export_private_key(&self) -> Result<String>;
}
