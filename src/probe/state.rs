//! Shared per-run state.
//!
//! # Responsibilities
//! - Own every counter, flag, and log that probe workers mutate
//! - Guarantee the rate-limit detection latch fires exactly once
//! - Freeze into an immutable outcome for report generation
//!
//! # Design Decisions
//! - One `std::sync::Mutex` guards all read-modify-write sequences; the
//!   critical sections are short and never cross an await point
//! - Detection check-then-act happens inside the same critical section that
//!   appends the attempt, so concurrent triggers cannot both latch
//! - The stop signal is latched while still holding the lock, making
//!   "first trigger wins" race-free

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;
use std::time::Instant;

use crate::classify::Status;
use crate::probe::sequence::{SequenceEvent, SequenceTracker};
use crate::probe::stop::StopSignal;

/// Maximum characters of response body kept per attempt.
const SNIPPET_LEN: usize = 100;

/// One observed probe outcome. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRecord {
    /// Wall-clock completion time.
    pub time: DateTime<Utc>,
    /// Worker that issued the request (1-based).
    pub worker: usize,
    /// Attempt index within that worker (1-based).
    pub attempt: u32,
    /// Classified status.
    pub status: Status,
    /// Seconds since run start.
    pub elapsed_secs: f64,
    /// Global request count captured when this request was issued.
    pub total_requests: u64,
    /// Raw HTTP status, 0 on transport failure.
    pub http_status: u16,
    /// Truncated, newline-flattened response body or error description.
    pub response_snippet: String,
    /// Redirect hops resolved, when the mode tracks them.
    pub redirects: Option<u32>,
}

/// The latched rate-limit detection point.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Detection {
    pub at: DateTime<Utc>,
    pub elapsed_secs: f64,
    /// Global request count at the first qualifying classification.
    pub total_requests: u64,
}

/// Everything a worker reports about one completed attempt.
#[derive(Debug)]
pub struct AttemptOutcome {
    pub worker: usize,
    pub attempt: u32,
    pub status: Status,
    pub http_status: u16,
    pub response_snippet: String,
    pub redirects: Option<u32>,
    /// Sequence number captured when the request was issued.
    pub sequence_no: u64,
}

struct RunShared {
    total_requests: u64,
    successful_requests: u64,
    detection: Option<Detection>,
    tracker: SequenceTracker,
    attempts: Vec<AttemptRecord>,
}

/// Mutable state shared by all workers of one run.
pub struct RunState {
    started_instant: Instant,
    started_at: DateTime<Utc>,
    shared: Mutex<RunShared>,
    stop: StopSignal,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            started_instant: Instant::now(),
            started_at: Utc::now(),
            shared: Mutex::new(RunShared {
                total_requests: 0,
                successful_requests: 0,
                detection: None,
                tracker: SequenceTracker::new(),
                attempts: Vec::new(),
            }),
            stop: StopSignal::new(),
        }
    }

    pub fn stop(&self) -> &StopSignal {
        &self.stop
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started_instant.elapsed().as_secs_f64()
    }

    /// Claim the next global sequence number for an outgoing request.
    pub fn begin_attempt(&self) -> u64 {
        let mut shared = self.shared.lock().expect("run state mutex poisoned");
        shared.total_requests += 1;
        shared.total_requests
    }

    /// Fold one completed attempt into the run state.
    ///
    /// Success counting, streak tracking, detection latching, and the
    /// attempt-log append all happen under one lock acquisition. Returns the
    /// detection if this attempt latched it.
    pub fn record_attempt(&self, outcome: AttemptOutcome) -> Option<Detection> {
        let now = Utc::now();
        let elapsed = self.elapsed_secs();

        let mut shared = self.shared.lock().expect("run state mutex poisoned");

        if outcome.status == Status::Success {
            shared.successful_requests += 1;
        }

        shared
            .tracker
            .record(outcome.status, now, elapsed, outcome.sequence_no);

        let mut latched = None;
        if outcome.status.triggers_detection() && shared.detection.is_none() {
            let detection = Detection {
                at: now,
                elapsed_secs: elapsed,
                total_requests: outcome.sequence_no,
            };
            shared.detection = Some(detection);
            latched = Some(detection);
            // Latch while holding the lock: no second trigger can win.
            self.stop.trigger();
        }

        shared.attempts.push(AttemptRecord {
            time: now,
            worker: outcome.worker,
            attempt: outcome.attempt,
            status: outcome.status,
            elapsed_secs: elapsed,
            total_requests: outcome.sequence_no,
            http_status: outcome.http_status,
            response_snippet: truncate_snippet(&outcome.response_snippet),
            redirects: outcome.redirects,
        });

        latched
    }

    /// (total, successful) counters, for progress observation.
    pub fn snapshot(&self) -> (u64, u64) {
        let shared = self.shared.lock().expect("run state mutex poisoned");
        (shared.total_requests, shared.successful_requests)
    }

    /// Freeze the run into an immutable outcome.
    ///
    /// Takes a snapshot under the lock rather than consuming the state: a
    /// worker abandoned at the timeframe ceiling may still hold a reference.
    pub fn finish(&self) -> RunOutcome {
        let shared = self.shared.lock().expect("run state mutex poisoned");
        let first_failure_elapsed = shared.tracker.first_failure_elapsed();
        let last_success_elapsed = shared.tracker.last_success_elapsed();
        let successes_before_first_failure = shared.tracker.successes_before_first_failure();
        let (failure_sequences, success_sequences) = shared.tracker.clone().into_sequences();
        RunOutcome {
            started_at: self.started_at,
            total_requests: shared.total_requests,
            successful_requests: shared.successful_requests,
            detection: shared.detection,
            successes_before_first_failure,
            first_failure_elapsed,
            last_success_elapsed,
            failure_sequences,
            success_sequences,
            attempts: shared.attempts.clone(),
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable result of a finished run, input to report generation.
#[derive(Debug, Serialize)]
pub struct RunOutcome {
    pub started_at: DateTime<Utc>,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub detection: Option<Detection>,
    /// Successful attempts observed before the first failure-like one.
    pub successes_before_first_failure: u64,
    pub first_failure_elapsed: Option<f64>,
    pub last_success_elapsed: Option<f64>,
    pub failure_sequences: Vec<SequenceEvent>,
    pub success_sequences: Vec<SequenceEvent>,
    pub attempts: Vec<AttemptRecord>,
}

fn truncate_snippet(body: &str) -> String {
    body.chars()
        .take(SNIPPET_LEN)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
