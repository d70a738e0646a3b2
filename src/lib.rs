//! Identity-Pseudonymizing Gateway Library

pub mod config;
pub mod encrypt;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::GatewayConfig;
pub use encrypt::{EncryptionClient, ENCRYPT_FAILURE_BODY, X_USER_NAME};
pub use http::HttpServer;
