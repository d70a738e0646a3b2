//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (TARGET_SERVER_URL, ENCRYPTION_SERVICE_URL, ...)
//!     → loader.rs (read & parse variables)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → passed explicitly into the server at construction time
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload path
//! - Missing required variables are fatal before the listener binds
//! - Validation separates presence/parse errors from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::TimeoutConfig;
