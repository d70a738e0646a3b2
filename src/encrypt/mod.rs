//! Identity pseudonymization subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → middleware.rs (read x-user-name, skip if absent/empty)
//!     → client.rs (POST {"userName": ...} to the encryption service)
//!     → header replaced with {"encryptedUserName": ...} value
//!     → request continues to the forwarding proxy
//!
//! On any failure (transport, non-200, malformed body):
//!     → fixed 500 "Failed to encrypt user name", upstream never contacted
//! ```
//!
//! # Design Decisions
//! - The encryption algorithm is an opaque external HTTP collaborator
//! - Failures are local to the request that triggered them
//! - A bounded per-call timeout keeps one slow call from pinning a request
//!   forever; other requests proceed concurrently regardless

pub mod client;
pub mod middleware;

pub use client::{EncryptError, EncryptionClient};
pub use middleware::{pseudonymize_identity, ENCRYPT_FAILURE_BODY, X_USER_NAME};
