//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`, initialized in `main`
//! - Metrics go through the `metrics` facade behind small `record_*`
//!   helpers; a run without an installed recorder pays almost nothing

pub mod metrics;
