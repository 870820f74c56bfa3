//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use codec::{Mode, SymmetricTextCodec};
use common::protocol::{
    CipherMode, DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse, ErrorResponse,
    HealthResponse,
};
use common::ServiceError;
use tracing::{debug, error, info, warn};

use super::state::AppState;
use crate::pool::PoolError;
use crate::telemetry::SERVICE_NAME;

/// `POST /encrypt` — encrypt `text` under `password`.
///
/// Responds `200` with `{success: true, encrypted_data}`, `400` when a field is
/// missing or the password violates policy, and `500` if the random source
/// fails.
pub async fn encrypt(
    State(state): State<AppState>,
    payload: Result<Json<EncryptRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(rejection),
    };
    let mode = req.mode;

    let (Some(text), Some(password)) = (req.text, req.password) else {
        return failure(ServiceError::BadRequest(
            "Text and password are required".into(),
        ));
    };
    if let Err(e) = check_password(&password, state.min_password_len) {
        return failure(e);
    }

    let plaintext_bytes = text.len();
    let result = state
        .pool
        .run(move || SymmetricTextCodec::new(codec_mode(mode)).encrypt(&text, &password))
        .await;

    match result {
        Ok(Ok(blob)) => {
            info!(?mode, plaintext_bytes, "text encrypted");
            (StatusCode::OK, Json(EncryptResponse::new(blob))).into_response()
        }
        Ok(Err(e)) => {
            error!(error = %e, "encryption failed");
            failure(ServiceError::EncryptionFailure(e.to_string()))
        }
        Err(e) => pool_failure(e),
    }
}

/// `POST /decrypt` — recover the plaintext of `encrypted_data` under `password`.
///
/// Every decryption failure, structural or cryptographic, is answered with the
/// same `400` body so callers learn nothing about the cause.
pub async fn decrypt(
    State(state): State<AppState>,
    payload: Result<Json<DecryptRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(rejection),
    };
    let mode = req.mode;

    let (Some(blob), Some(password)) = (req.encrypted_data, req.password) else {
        return failure(ServiceError::BadRequest(
            "Encrypted data and password are required".into(),
        ));
    };
    // Minimum length is an encrypt-time policy; decrypt only needs a password.
    if let Err(e) = check_password(&password, 1) {
        return failure(e);
    }

    let blob_len = blob.len();
    let result = state
        .pool
        .run(move || SymmetricTextCodec::new(codec_mode(mode)).decrypt(&blob, &password))
        .await;

    match result {
        Ok(Ok(text)) => {
            info!(?mode, plaintext_bytes = text.len(), "blob decrypted");
            (StatusCode::OK, Json(DecryptResponse::new(text))).into_response()
        }
        Ok(Err(_)) => {
            info!(?mode, blob_len, "decryption rejected");
            failure(ServiceError::DecryptionFailure)
        }
        Err(e) => pool_failure(e),
    }
}

/// `GET /health` — liveness and readiness check.
///
/// Returns `200 OK` while the service accepts work and `503` once shutdown
/// has begun.
pub async fn health(State(state): State<AppState>) -> Response {
    let (status_code, status_str) = if state.pool.is_closed() {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    } else {
        (StatusCode::OK, "healthy")
    };

    let body = HealthResponse {
        status: status_str.into(),
        service: SERVICE_NAME.into(),
        version: env!("CARGO_PKG_VERSION").into(),
        derivation_slots_available: state.pool.available(),
    };
    (status_code, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("The requested resource does not exist")),
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn codec_mode(mode: CipherMode) -> Mode {
    match mode {
        CipherMode::Legacy => Mode::Legacy,
        CipherMode::Authenticated => Mode::Authenticated,
    }
}

/// Reject empty passwords and passwords shorter than `min_len` characters.
fn check_password(password: &str, min_len: usize) -> Result<(), ServiceError> {
    if password.is_empty() {
        return Err(ServiceError::BadRequest("Password must not be empty".into()));
    }
    if password.chars().count() < min_len {
        return Err(ServiceError::BadRequest(format!(
            "Password must be at least {min_len} characters"
        )));
    }
    Ok(())
}

/// Render a [`ServiceError`] as a JSON error response.
fn failure(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.public_message()))).into_response()
}

fn pool_failure(err: PoolError) -> Response {
    match err {
        PoolError::Closed => {
            warn!("request refused: derivation pool closed");
            failure(ServiceError::Unavailable(err.to_string()))
        }
        PoolError::Join(_) => {
            error!(error = %err, "codec task failed");
            failure(ServiceError::Internal(err.to_string()))
        }
    }
}

/// Answer an unreadable body with the service's own error shape.
fn json_rejection(rejection: JsonRejection) -> Response {
    debug!(reason = %rejection.body_text(), "rejected request body");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let body = ErrorResponse::new("Request body too large");
        return (StatusCode::PAYLOAD_TOO_LARGE, Json(body)).into_response();
    }
    failure(ServiceError::BadRequest("Invalid JSON body".into()))
}
