//! Reporting subsystem.
//!
//! # Data Flow
//! ```text
//! RunOutcome (frozen run state)
//!     → RunReport (adds run identity, profile, derived metrics)
//!     → format.rs (human-readable rendering)
//!     → sink.rs (persist to results dir, console summary)
//! ```
//!
//! # Design Decisions
//! - Derived ratios (success rate, requests/sec at detection) are `Option`:
//!   zero requests or zero elapsed time yields `None`, never a division panic
//! - Report format is human-readable and timestamped; no wire compatibility

pub mod format;
pub mod sink;

pub use sink::{
    FileReportSink, JsonReportSink, LogProgress, NullProgress, ProgressSink, ReportSink,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::config::Profile;
use crate::probe::state::RunOutcome;

/// Final report of one probe run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// Target host.
    pub hostname: String,
    /// Full URL that was probed.
    pub url: String,
    /// Profile the run executed under.
    pub profile: Profile,
    /// Frozen run state.
    pub outcome: RunOutcome,
    /// Wall-clock completion time.
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// successful / total, defined only when at least one request went out.
    pub fn success_rate(&self) -> Option<f64> {
        if self.outcome.total_requests == 0 {
            return None;
        }
        Some(self.outcome.successful_requests as f64 / self.outcome.total_requests as f64)
    }

    /// Implied requests-per-second at the detection point, defined only when
    /// detection latched after a non-zero elapsed time.
    pub fn detection_rps(&self) -> Option<f64> {
        let detection = self.outcome.detection.as_ref()?;
        if detection.elapsed_secs <= 0.0 {
            return None;
        }
        Some(detection.total_requests as f64 / detection.elapsed_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::state::Detection;

    fn empty_report() -> RunReport {
        RunReport {
            run_id: Uuid::new_v4(),
            hostname: "gateway.example.com".into(),
            url: "https://gateway.example.com/nf/auth/doAuthentication.do".into(),
            profile: Profile::builtin("fast_rate").unwrap(),
            outcome: RunOutcome {
                started_at: Utc::now(),
                total_requests: 0,
                successful_requests: 0,
                detection: None,
                successes_before_first_failure: 0,
                first_failure_elapsed: None,
                last_success_elapsed: None,
                failure_sequences: vec![],
                success_sequences: vec![],
                attempts: vec![],
            },
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_success_rate_undefined_for_zero_requests() {
        assert!(empty_report().success_rate().is_none());
    }

    #[test]
    fn test_success_rate_defined() {
        let mut report = empty_report();
        report.outcome.total_requests = 8;
        report.outcome.successful_requests = 2;
        assert_eq!(report.success_rate(), Some(0.25));
    }

    #[test]
    fn test_detection_rps_guards_zero_elapsed() {
        let mut report = empty_report();
        report.outcome.detection = Some(Detection {
            at: Utc::now(),
            elapsed_secs: 0.0,
            total_requests: 3,
        });
        assert!(report.detection_rps().is_none());

        report.outcome.detection = Some(Detection {
            at: Utc::now(),
            elapsed_secs: 2.0,
            total_requests: 10,
        });
        assert_eq!(report.detection_rps(), Some(5.0));
    }
}
