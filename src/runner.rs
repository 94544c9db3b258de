//! Run ownership: profile resolution checkpoint, scheduling, report assembly.
//!
//! # Responsibilities
//! - Hold the resolved, validated profile for one run
//! - Drive the scheduler against fresh run state
//! - Assemble the final report from the frozen outcome
//!
//! # Design Decisions
//! - Validation failures surface at construction, before any request is sent
//! - The runner borrows collaborators through traits; the binary wires the
//!   real transport and sinks, tests wire scripted ones

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{validate_profile, ConfigError, Profile};
use crate::probe::{PacingScheduler, RunState};
use crate::report::{ProgressSink, RunReport};
use crate::target::Target;
use crate::transport::Transport;

/// Owns one probe run end to end.
pub struct TestRunner {
    profile: Profile,
    target: Target,
    transport: Arc<dyn Transport>,
    progress: Arc<dyn ProgressSink>,
}

impl TestRunner {
    /// Build a runner with a validated profile. Fails fast before any
    /// request is issued.
    pub fn new(
        profile: Profile,
        target: Target,
        transport: Arc<dyn Transport>,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Self, ConfigError> {
        validate_profile(&profile).map_err(ConfigError::Validation)?;
        Ok(Self {
            profile,
            target,
            transport,
            progress,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Execute the run and produce its report.
    pub async fn run(&self) -> RunReport {
        let run_id = Uuid::new_v4();

        tracing::info!(
            run_id = %run_id,
            hostname = %self.target.hostname,
            profile = %self.profile.name,
            attempts = self.profile.attempts,
            timeframe_secs = self.profile.timeframe_secs,
            delay_secs = self.profile.delay_secs,
            workers = self.profile.workers,
            mode = ?self.profile.mode,
            "Starting probe run"
        );

        let state = Arc::new(RunState::new());
        let scheduler = PacingScheduler::new(
            self.profile.clone(),
            self.target.clone(),
            self.transport.clone(),
            self.progress.clone(),
        );
        scheduler.run(state.clone()).await;

        let outcome = state.finish();

        tracing::info!(
            run_id = %run_id,
            total_requests = outcome.total_requests,
            successful_requests = outcome.successful_requests,
            rate_limit_detected = outcome.detection.is_some(),
            "Probe run finished"
        );

        RunReport {
            run_id,
            hostname: self.target.hostname.clone(),
            url: self.target.url(),
            profile: self.profile.clone(),
            outcome,
            finished_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullProgress;
    use crate::transport::{ProbeRequest, TransportOutcome};
    use futures_util::future::BoxFuture;

    struct OkTransport;

    impl Transport for OkTransport {
        fn send(&self, _request: ProbeRequest) -> BoxFuture<'static, TransportOutcome> {
            Box::pin(async {
                TransportOutcome::Response {
                    status: 200,
                    body: "ok".into(),
                    redirects: 0,
                }
            })
        }
    }

    #[test]
    fn test_invalid_profile_rejected_before_running() {
        let profile = Profile::custom(0, 10, 1.0, 1);
        let result = TestRunner::new(
            profile,
            Target::new("h", "/p", "u"),
            Arc::new(OkTransport),
            Arc::new(NullProgress),
        );
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
