//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → encrypt::middleware (identity header pseudonymized or 500)
//!     → forward_handler (URI rewritten to the single upstream)
//!     → upstream response relayed verbatim to the client
//! ```

pub mod server;

pub use server::{AppState, HttpServer, ServerError};
