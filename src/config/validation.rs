//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (the loader handles presence and parsing)
//! - Check that the upstream and encryption URLs are usable http(s) URLs
//! - Check that the bind address parses as a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid URL ({value:?}): {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("{field} must use http or https ({value:?})")]
    UnsupportedScheme { field: &'static str, value: String },

    #[error("bind address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("{field} must not be zero")]
    ZeroTimeout { field: &'static str },
}

/// Validate the assembled configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url("TARGET_SERVER_URL", &config.target_server_url, &mut errors);
    check_url(
        "ENCRYPTION_SERVICE_URL",
        &config.encryption_service_url,
        &mut errors,
    );

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "REQUEST_TIMEOUT_SECS",
        });
    }
    if config.timeouts.encryption_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "ENCRYPTION_TIMEOUT_SECS",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedScheme {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Err(e) => {
            errors.push(ValidationError::InvalidUrl {
                field,
                value: value.to_string(),
                reason: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::GatewayConfig;

    fn base_config() -> GatewayConfig {
        GatewayConfig {
            listener: Default::default(),
            target_server_url: "http://127.0.0.1:8081".into(),
            encryption_service_url: "http://127.0.0.1:8082/encrypt".into(),
            timeouts: Default::default(),
        }
    }

    #[test]
    fn accepts_well_formed_config() {
        assert!(validate_config(&base_config()).is_ok());
    }

    #[test]
    fn rejects_non_http_scheme() {
        let mut config = base_config();
        config.target_server_url = "ftp://example.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::UnsupportedScheme { .. }));
    }

    #[test]
    fn collects_every_error() {
        let mut config = base_config();
        config.target_server_url = "not a url".into();
        config.encryption_service_url = "also not a url".into();
        config.listener.bind_address = "nope".into();
        config.timeouts.encryption_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
