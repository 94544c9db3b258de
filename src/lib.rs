//! Rate limit probing tool.
//!
//! Probes a remote authentication endpoint with repeated HTTP requests under
//! configurable timing/concurrency profiles, classifies each response, and
//! detects the point at which a rate-limiting defense engages.
//!
//! # Architecture Overview
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────────┐
//!  │                         LIMITPROBE                           │
//!  │                                                              │
//!  │  cli ──▶ config ──▶ runner ──▶ probe::scheduler              │
//!  │                        │            │                        │
//!  │                        │            ▼                        │
//!  │                        │      probe::worker ──▶ transport ───┼──▶ Target
//!  │                        │            │                        │
//!  │                        │       classify                      │
//!  │                        │            │                        │
//!  │                        │      probe::state ◀── probe::stop   │
//!  │                        ▼            │                        │
//!  │                     report ◀────────┘                        │
//!  │                                                              │
//!  │  Cross-cutting: observability (tracing + metrics)            │
//!  └──────────────────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod classify;
pub mod config;
pub mod probe;
pub mod transport;

// Run orchestration
pub mod runner;
pub mod target;

// Surfaces
pub mod cli;
pub mod report;

// Cross-cutting concerns
pub mod observability;

pub use classify::Status;
pub use config::{ExecutionMode, Profile};
pub use report::RunReport;
pub use runner::TestRunner;
pub use target::Target;
