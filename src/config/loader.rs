//! Configuration loading from the process environment.

use std::env;

use thiserror::Error;

use crate::config::schema::{GatewayConfig, ListenerConfig, TimeoutConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Name of the required upstream-origin variable.
pub const TARGET_SERVER_URL: &str = "TARGET_SERVER_URL";

/// Name of the required encryption-endpoint variable.
pub const ENCRYPTION_SERVICE_URL: &str = "ENCRYPTION_SERVICE_URL";

/// Name of the optional bind-address variable.
pub const LISTEN_ADDR: &str = "LISTEN_ADDR";

/// Name of the optional encryption-call timeout variable.
pub const ENCRYPTION_TIMEOUT_SECS: &str = "ENCRYPTION_TIMEOUT_SECS";

/// Name of the optional whole-request timeout variable.
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    /// An optional variable is set but does not parse.
    #[error("environment variable {name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// Semantic validation of the assembled config failed.
    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl GatewayConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an injected variable lookup.
    ///
    /// Tests use this to supply variables without touching process-global
    /// environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match lookup(name) {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(ConfigError::Missing(name)),
            }
        };

        let target_server_url = required(TARGET_SERVER_URL)?;
        let encryption_service_url = required(ENCRYPTION_SERVICE_URL)?;

        let mut listener = ListenerConfig::default();
        if let Some(addr) = lookup(LISTEN_ADDR).filter(|v| !v.is_empty()) {
            listener.bind_address = addr;
        }

        let mut timeouts = TimeoutConfig::default();
        if let Some(secs) = lookup(ENCRYPTION_TIMEOUT_SECS).filter(|v| !v.is_empty()) {
            timeouts.encryption_secs = parse_secs(ENCRYPTION_TIMEOUT_SECS, &secs)?;
        }
        if let Some(secs) = lookup(REQUEST_TIMEOUT_SECS).filter(|v| !v.is_empty()) {
            timeouts.request_secs = parse_secs(REQUEST_TIMEOUT_SECS, &secs)?;
        }

        let config = GatewayConfig {
            listener,
            target_server_url,
            encryption_service_url,
            timeouts,
        };

        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(config)
    }
}

fn parse_secs(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|e| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
