//! Success/failure streak tracking.
//!
//! # Responsibilities
//! - Fold the stream of per-attempt classifications into sequence boundaries
//! - Record first-failure and last-success instants
//!
//! # Design Decisions
//! - "success" is the only non-failure classification; everything else
//!   (failure, rate_limit, dropped, unknown, error) extends a failure streak
//! - Failure events mark only the start of a contiguous failure run, so event
//!   volume is bounded by the number of distinct outage episodes

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::Status;

/// A sequence boundary: the start of a failure run, or a success instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceEvent {
    /// Seconds since run start.
    pub elapsed_secs: f64,
    /// Cumulative request count when the event occurred.
    pub total_requests: u64,
}

/// Running streak state for one probe run.
#[derive(Debug, Clone, Default)]
pub struct SequenceTracker {
    consecutive_failures: u64,
    successes_before_first_failure: u64,
    first_failure_at: Option<DateTime<Utc>>,
    first_failure_elapsed: Option<f64>,
    last_success_elapsed: Option<f64>,
    failure_sequences: Vec<SequenceEvent>,
    success_sequences: Vec<SequenceEvent>,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified attempt into the streak state.
    pub fn record(
        &mut self,
        status: Status,
        at: DateTime<Utc>,
        elapsed_secs: f64,
        total_requests: u64,
    ) {
        if status == Status::Success {
            self.consecutive_failures = 0;
            if self.first_failure_at.is_none() {
                self.successes_before_first_failure += 1;
            }
            self.last_success_elapsed = Some(elapsed_secs);
            self.success_sequences.push(SequenceEvent {
                elapsed_secs,
                total_requests,
            });
        } else {
            if self.first_failure_at.is_none() {
                self.first_failure_at = Some(at);
                self.first_failure_elapsed = Some(elapsed_secs);
            }
            self.consecutive_failures += 1;
            if self.consecutive_failures == 1 {
                // 0 -> 1 transition: a new failure run starts here.
                self.failure_sequences.push(SequenceEvent {
                    elapsed_secs,
                    total_requests,
                });
            }
        }
    }

    pub fn consecutive_failures(&self) -> u64 {
        self.consecutive_failures
    }

    /// Successful attempts observed before any failure-like classification.
    pub fn successes_before_first_failure(&self) -> u64 {
        self.successes_before_first_failure
    }

    pub fn first_failure_elapsed(&self) -> Option<f64> {
        self.first_failure_elapsed
    }

    pub fn last_success_elapsed(&self) -> Option<f64> {
        self.last_success_elapsed
    }

    pub fn failure_sequences(&self) -> &[SequenceEvent] {
        &self.failure_sequences
    }

    pub fn success_sequences(&self) -> &[SequenceEvent] {
        &self.success_sequences
    }

    /// Consume the tracker, yielding (failure, success) sequence lists.
    pub fn into_sequences(self) -> (Vec<SequenceEvent>, Vec<SequenceEvent>) {
        (self.failure_sequences, self.success_sequences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tracker: &mut SequenceTracker, status: Status, elapsed: f64, total: u64) {
        tracker.record(status, Utc::now(), elapsed, total);
    }

    #[test]
    fn test_failure_event_only_on_streak_start() {
        let mut t = SequenceTracker::new();
        record(&mut t, Status::Failure, 0.0, 1);
        record(&mut t, Status::Failure, 1.0, 2);
        record(&mut t, Status::Failure, 2.0, 3);

        assert_eq!(t.consecutive_failures(), 3);
        assert_eq!(t.failure_sequences().len(), 1);
        assert_eq!(t.failure_sequences()[0].total_requests, 1);
    }

    #[test]
    fn test_success_resets_streak_and_opens_new_sequence() {
        let mut t = SequenceTracker::new();
        record(&mut t, Status::Failure, 0.0, 1);
        record(&mut t, Status::Success, 1.0, 2);
        record(&mut t, Status::Failure, 2.0, 3);
        record(&mut t, Status::Failure, 3.0, 4);

        assert_eq!(t.failure_sequences().len(), 2);
        assert_eq!(t.failure_sequences()[1].total_requests, 3);
        assert_eq!(t.success_sequences().len(), 1);
        assert_eq!(t.last_success_elapsed(), Some(1.0));
    }

    #[test]
    fn test_every_success_is_an_event() {
        let mut t = SequenceTracker::new();
        record(&mut t, Status::Success, 0.0, 1);
        record(&mut t, Status::Success, 1.0, 2);
        assert_eq!(t.success_sequences().len(), 2);
        assert_eq!(t.failure_sequences().len(), 0);
        assert!(t.first_failure_elapsed().is_none());
    }

    #[test]
    fn test_all_non_success_statuses_extend_streak() {
        let mut t = SequenceTracker::new();
        for status in [
            Status::Failure,
            Status::RateLimited,
            Status::Dropped,
            Status::Unknown,
            Status::Error,
        ] {
            record(&mut t, status, 0.0, 1);
        }
        assert_eq!(t.consecutive_failures(), 5);
        assert_eq!(t.failure_sequences().len(), 1);
    }

    #[test]
    fn test_successes_counted_only_until_first_failure() {
        let mut t = SequenceTracker::new();
        record(&mut t, Status::Success, 0.0, 1);
        record(&mut t, Status::Success, 1.0, 2);
        record(&mut t, Status::Failure, 2.0, 3);
        record(&mut t, Status::Success, 3.0, 4);
        assert_eq!(t.successes_before_first_failure(), 2);
    }

    #[test]
    fn test_first_failure_recorded_once() {
        let mut t = SequenceTracker::new();
        record(&mut t, Status::Failure, 2.5, 1);
        record(&mut t, Status::Success, 3.0, 2);
        record(&mut t, Status::Failure, 4.0, 3);
        assert_eq!(t.first_failure_elapsed(), Some(2.5));
    }
}
