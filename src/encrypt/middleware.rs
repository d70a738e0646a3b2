//! Identity-header transform stage.
//!
//! # Responsibilities
//! - Read the identity header from each inbound request
//! - Replace it with the encryption service's pseudonym before forwarding
//! - Short-circuit the pipeline with a fixed 500 when encryption fails
//!
//! # Design Decisions
//! - Absent or empty header means no outbound call and no mutation
//! - One attempt per request; a failure never reaches the upstream
//! - The failure body is a fixed string clients can match on

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;

/// Name of the header carrying the plaintext user identity.
pub const X_USER_NAME: &str = "x-user-name";

/// Fixed body returned to the caller when pseudonymization fails.
pub const ENCRYPT_FAILURE_BODY: &str = "Failed to encrypt user name";

/// Pipeline stage that pseudonymizes the identity header.
///
/// Runs before the forwarding handler. Requests without a non-empty
/// `x-user-name` header pass through untouched.
pub async fn pseudonymize_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let plaintext = request
        .headers()
        .get(X_USER_NAME)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if plaintext.is_empty() {
        return next.run(request).await;
    }

    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let encrypted = match state.encryptor.encrypt_user_name(&plaintext).await {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                "Failed to pseudonymize identity header"
            );
            return encrypt_failure();
        }
    };

    let header_value = match HeaderValue::from_str(&encrypted) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                error = %e,
                "Encryption service returned a value unusable as a header"
            );
            return encrypt_failure();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        "Identity header pseudonymized"
    );

    request.headers_mut().insert(X_USER_NAME, header_value);
    next.run(request).await
}

fn encrypt_failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, ENCRYPT_FAILURE_BODY).into_response()
}
