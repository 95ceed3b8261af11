// src/lib.rs
//! secure-preferences — encrypted at-rest storage for string key/value pairs
//!
//! Features:
//! - AES-CBC provider with per-call random IVs and string-key normalization
//! - RSA provider (OAEP-SHA256, PKCS#1 v1.5 legacy decrypt) with PKCS#1 DER
//!   key export/import
//! - Provider traits so storage code never names an algorithm
//! - `SecurePreferences` wrapper over any [`Preferences`] collaborator
//!
//! Quick start:
//!
//! ```
//! use secure_preferences::{AesEncryptionProvider, InMemoryPreferences, SecurePreferences};
//!
//! # fn main() -> secure_preferences::Result<()> {
//! let store = SecurePreferences::new(AesEncryptionProvider::new(), InMemoryPreferences::new());
//! store.save_with_key("5a46d6975d51764f10eda8fe266aa599352cd6ae", "token", "secret value")?;
//! let value = store.get_with_key("5a46d6975d51764f10eda8fe266aa599352cd6ae", "token")?;
//! assert_eq!(value.as_deref(), Some("secret value"));
//! # Ok(())
//! # }
//! ```

pub mod consts;
pub mod error;
pub mod keygen;
pub mod preferences;
pub mod providers;
pub mod store;

// Re-export everything users need at the crate root
pub use error::{CryptoError, Result};
pub use keygen::{export_aes_key, generate_aes_key};
pub use preferences::{InMemoryPreferences, Preferences};
pub use providers::{
    AesEncryptionProvider, AsymmetricEncryptionProvider, EncryptionProvider, RsaEncryptionProvider,
};
pub use store::SecurePreferences;
