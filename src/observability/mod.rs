//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; request IDs flow through all stages
//! - tower-http's TraceLayer covers per-request spans
//! - No metrics endpoint; log aggregation is the observability surface

pub mod logging;
