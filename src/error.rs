// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Boxed low-level error kept as the cause of a wrapped failure.
pub type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by key generation, the providers, and the secure store.
///
/// Every failure is input- or key-related; nothing is retried or swallowed
/// internally. Symmetric decryption failures share one fixed message and
/// keep the cipher-level cause reachable through `source()` only.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Malformed or missing input, rejected before any cryptographic work.
    /// Also wraps symmetric decryption failures, in which case `source`
    /// carries the cipher-level error behind a fixed message.
    #[error("{message}")]
    InvalidArgument {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// Numeric parameter outside the supported range.
    #[error("{message}")]
    OutOfRange { message: String },

    /// The cryptographic engine rejected the operation. The message names
    /// the operation and repeats the cause.
    #[error("{message}")]
    OperationFailed {
        message: String,
        #[source]
        source: Cause,
    },
}

impl CryptoError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        CryptoError::InvalidArgument {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn out_of_range(message: impl Into<String>) -> Self {
        CryptoError::OutOfRange {
            message: message.into(),
        }
    }

    /// Fixed-message wrapper for symmetric decryption failures. Wrong key and
    /// corrupted data are deliberately indistinguishable to the caller.
    pub(crate) fn decryption_failed(cause: impl Into<Cause>) -> Self {
        CryptoError::InvalidArgument {
            message: "Decryption failed, likely due to incorrect key or corrupted data.".to_owned(),
            source: Some(cause.into()),
        }
    }

    /// Wrapper for engine-level failures: "Failed to <operation> due to <cause>".
    pub(crate) fn operation_failed(operation: &str, cause: impl Into<Cause>) -> Self {
        let cause = cause.into();
        CryptoError::OperationFailed {
            message: format!("Failed to {operation} due to {cause}"),
            source: cause,
        }
    }
}
