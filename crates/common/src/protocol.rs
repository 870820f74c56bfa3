//! Request and response types exchanged with callers.
//!
//! These types are serialised as JSON over the public HTTP API.

use serde::{Deserialize, Serialize};

/// Blob format requested by the caller.
///
/// Omitted in a request means [`CipherMode::Legacy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherMode {
    /// Unauthenticated AES-256-CBC blobs, compatible with existing data.
    #[default]
    Legacy,
    /// AES-256-CBC plus HMAC-SHA256 tag.
    Authenticated,
}

// ---------------------------------------------------------------------------
// Encrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /encrypt`.
///
/// Fields are optional at the serde level so that a missing field is reported
/// with the service's own error body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncryptRequest {
    /// Plaintext to encrypt. May be empty.
    pub text: Option<String>,
    /// Passphrase the key is derived from.
    pub password: Option<String>,
    /// Blob format to produce.
    #[serde(default)]
    pub mode: CipherMode,
}

/// Successful response body for `POST /encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Always `true`.
    pub success: bool,
    /// Base64 blob holding salt, IV and ciphertext.
    pub encrypted_data: String,
}

impl EncryptResponse {
    pub fn new(encrypted_data: String) -> Self {
        Self {
            success: true,
            encrypted_data,
        }
    }
}

// ---------------------------------------------------------------------------
// Decrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /decrypt`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecryptRequest {
    /// Blob previously returned by `POST /encrypt`.
    pub encrypted_data: Option<String>,
    /// Candidate passphrase.
    pub password: Option<String>,
    /// Blob format to expect. Must match the mode used to encrypt.
    #[serde(default)]
    pub mode: CipherMode,
}

/// Successful response body for `POST /decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    /// Always `true`.
    pub success: bool,
    /// Recovered plaintext.
    pub decrypted_text: String,
}

impl DecryptResponse {
    pub fn new(decrypted_text: String) -> Self {
        Self {
            success: true,
            decrypted_text,
        }
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Human-readable description safe to expose to callers.
    pub error: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: `"healthy"` or `"degraded"`.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Crate version of the running binary.
    pub version: String,
    /// Key derivations that could start right now without queueing.
    pub derivation_slots_available: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encrypt_request_defaults_to_legacy() {
        let req: EncryptRequest =
            serde_json::from_value(json!({"text": "hi", "password": "pw"})).unwrap();
        assert_eq!(req.text.as_deref(), Some("hi"));
        assert_eq!(req.mode, CipherMode::Legacy);
    }

    #[test]
    fn missing_fields_deserialise_as_none() {
        let req: DecryptRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.encrypted_data.is_none());
        assert!(req.password.is_none());
    }

    #[test]
    fn mode_uses_lowercase_names() {
        let req: DecryptRequest = serde_json::from_value(
            json!({"encrypted_data": "x", "password": "y", "mode": "authenticated"}),
        )
        .unwrap();
        assert_eq!(req.mode, CipherMode::Authenticated);
        assert!(serde_json::from_value::<DecryptRequest>(json!({"mode": "gcm"})).is_err());
    }

    #[test]
    fn success_bodies_match_wire_shape() {
        let body = serde_json::to_value(EncryptResponse::new("blob".into())).unwrap();
        assert_eq!(body, json!({"success": true, "encrypted_data": "blob"}));

        let body = serde_json::to_value(DecryptResponse::new("text".into())).unwrap();
        assert_eq!(body, json!({"success": true, "decrypted_text": "text"}));
    }

    #[test]
    fn error_response_new() {
        let body = serde_json::to_value(ErrorResponse::new("password is required")).unwrap();
        assert_eq!(body, json!({"success": false, "error": "password is required"}));
    }

    #[test]
    fn health_response_serde() {
        let h = HealthResponse {
            status: "healthy".into(),
            service: "AESConnect".into(),
            version: "0.1.0".into(),
            derivation_slots_available: 4,
        };
        let json = serde_json::to_string(&h).unwrap();
        let decoded: HealthResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.derivation_slots_available, 4);
    }
}
