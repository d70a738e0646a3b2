//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Init logging → Load config from env → Validate → Bind → Serve
//!
//! Shutdown (signals.rs):
//!     SIGTERM/SIGINT → axum graceful shutdown → drain → exit
//! ```
//!
//! # Design Decisions
//! - Config failures are fatal before the listener binds
//! - Shutdown drains in-flight requests via axum's graceful shutdown

pub mod signals;
