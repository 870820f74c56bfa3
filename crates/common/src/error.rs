//! Common error types shared across crates.

use thiserror::Error;

/// Message returned for every decryption failure, whatever the cause.
pub const DECRYPTION_FAILED_MESSAGE: &str = "Invalid encrypted data or wrong password";

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::DecryptionFailure`] → 400
/// - [`ServiceError::EncryptionFailure`] → 500
/// - [`ServiceError::Unavailable`] → 503
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: missing field, empty password, or invalid JSON.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The blob could not be decrypted. Carries no detail on purpose.
    #[error("decryption failure")]
    DecryptionFailure,

    /// Encryption failed due to a crypto-layer error.
    #[error("encryption failure: {0}")]
    EncryptionFailure(String),

    /// The service cannot accept work right now.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::DecryptionFailure => 400,
            ServiceError::EncryptionFailure(_) => 500,
            ServiceError::Unavailable(_) => 503,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Message safe to show callers. Internal detail is never included.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::BadRequest(msg) => msg.clone(),
            ServiceError::DecryptionFailure => DECRYPTION_FAILED_MESSAGE.into(),
            ServiceError::EncryptionFailure(_) => "Encryption failed".into(),
            ServiceError::Unavailable(_) => "Service temporarily unavailable".into(),
            ServiceError::Internal(_) => "Internal server error".into(),
        }
    }
}
