//! Request-pacing and detection engine.
//!
//! # Data Flow
//! ```text
//! PacingScheduler (mode selection, pacing, pool joins)
//!     → ProbeWorker (issue → classify → record, per attempt)
//!         → Transport (send, bounded by the request timeout)
//!         → classify (status)
//!         → RunState (counters, streaks, detection latch, attempt log)
//!             → StopSignal (latched, observed cooperatively by all workers)
//! ```
//!
//! # Design Decisions
//! - RunState is the sole shared mutable resource; every read-modify-write
//!   happens under its mutex
//! - Rate-limit detection is a first-trigger latch: qualifying outcomes after
//!   the first are recorded but change nothing
//! - Cancellation is advisory: polled between attempts, never mid-request

pub mod scheduler;
pub mod sequence;
pub mod state;
pub mod stop;
pub mod worker;

pub use scheduler::PacingScheduler;
pub use state::{AttemptRecord, Detection, RunOutcome, RunState};
pub use stop::StopSignal;
pub use worker::ProbeWorker;
