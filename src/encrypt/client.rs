//! Encryption-service client with timeout and error handling.
//!
//! # Responsibilities
//! - POST the plaintext identity value to the external encryption endpoint
//! - Enforce a bounded timeout on each call
//! - Map transport, status, and body-shape failures to a single error type
//!
//! # Design Decisions
//! - One reqwest::Client shared across requests (connection reuse is
//!   whatever reqwest provides by default)
//! - Exactly one attempt per inbound request, fail-fast, no retries

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format of the request sent to the encryption service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EncryptRequest<'a> {
    user_name: &'a str,
}

/// Wire format of the response expected from the encryption service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EncryptResponse {
    encrypted_user_name: String,
}

/// Errors that can occur while pseudonymizing an identity value.
#[derive(Debug, Error)]
pub enum EncryptError {
    /// The encryption service could not be reached.
    #[error("encryption service unreachable: {0}")]
    Transport(reqwest::Error),

    /// The call did not complete within the configured bound.
    #[error("encryption call timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered with a status other than 200.
    #[error("encryption service responded with status {0}")]
    Status(StatusCode),

    /// The response body was not JSON or lacked the expected key.
    #[error("encryption service returned a malformed body: {0}")]
    Body(reqwest::Error),
}

/// Client for the external identity-encryption service.
#[derive(Clone)]
pub struct EncryptionClient {
    /// Shared HTTP client.
    http: reqwest::Client,
    /// Full URL of the encryption endpoint.
    endpoint: String,
    /// Per-call timeout.
    timeout: Duration,
}

impl EncryptionClient {
    /// Create a new client for the given endpoint.
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            timeout,
        }
    }

    /// Exchange a plaintext identity value for its pseudonymized form.
    ///
    /// Sends `{"userName": <plaintext>}` and expects HTTP 200 with
    /// `{"encryptedUserName": <replacement>}`. Any other status, a
    /// transport failure, or a body without that key is an error.
    pub async fn encrypt_user_name(&self, plaintext: &str) -> Result<String, EncryptError> {
        let response = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&EncryptRequest {
                user_name: plaintext,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EncryptError::Timeout(self.timeout)
                } else {
                    EncryptError::Transport(e)
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(EncryptError::Status(status));
        }

        let body: EncryptResponse = response.json().await.map_err(EncryptError::Body)?;

        Ok(body.encrypted_user_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_key() {
        let json = serde_json::to_string(&EncryptRequest { user_name: "alice" }).unwrap();
        assert_eq!(json, r#"{"userName":"alice"}"#);
    }

    #[test]
    fn response_requires_the_expected_key() {
        let ok: Result<EncryptResponse, _> =
            serde_json::from_str(r#"{"encryptedUserName":"enc_alice_123"}"#);
        assert_eq!(ok.unwrap().encrypted_user_name, "enc_alice_123");

        let missing: Result<EncryptResponse, _> = serde_json::from_str(r#"{"other":"x"}"#);
        assert!(missing.is_err());
    }
}
