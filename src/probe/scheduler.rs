//! Pacing and worker orchestration.
//!
//! # Responsibilities
//! - Drive the attempt loop under the profile's execution mode
//! - Sequential: enforce the delay as a minimum inter-attempt interval
//! - Concurrent: spawn the worker pool and bound each join by the timeframe
//!
//! # Design Decisions
//! - Sequential mode breaks immediately on a local `rate_limit`
//!   classification; dropped/error outcomes stop via the shared latch at the
//!   next loop check
//! - Progress snapshots are observational only: a ticker task in concurrent
//!   mode, a per-attempt update in sequential mode

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::classify::Status;
use crate::config::{ExecutionMode, Profile};
use crate::observability::metrics;
use crate::probe::state::RunState;
use crate::probe::worker::{jittered, ProbeWorker};
use crate::report::ProgressSink;
use crate::target::Target;
use crate::transport::{Transport, REQUEST_TIMEOUT};

/// Interval between progress snapshots in concurrent mode.
const PROGRESS_TICK: Duration = Duration::from_millis(100);

/// Grace period granted to an overrunning worker after the stop signal:
/// enough for its in-flight request to complete or hit the transport timeout.
const STOP_DRAIN: Duration = Duration::from_secs(REQUEST_TIMEOUT.as_secs() + 1);

/// Orchestrates probe workers for one run.
pub struct PacingScheduler {
    profile: Profile,
    target: Target,
    transport: Arc<dyn Transport>,
    progress: Arc<dyn ProgressSink>,
}

impl PacingScheduler {
    pub fn new(
        profile: Profile,
        target: Target,
        transport: Arc<dyn Transport>,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            profile,
            target,
            transport,
            progress,
        }
    }

    pub async fn run(&self, state: Arc<RunState>) {
        match self.profile.mode {
            ExecutionMode::Sequential => self.run_sequential(state).await,
            ExecutionMode::Concurrent => self.run_concurrent(state).await,
        }
    }

    /// Single worker, one attempt at a time. The delay is a minimum interval
    /// measured from the end of the previous attempt: an attempt slower than
    /// the delay is followed immediately by the next one.
    async fn run_sequential(&self, state: Arc<RunState>) {
        let worker = ProbeWorker::new(
            1,
            self.profile.attempts,
            self.profile.delay(),
            self.target.request(1, true),
        );

        let mut last_finished: Option<Instant> = None;

        for attempt in 1..=self.profile.attempts {
            if state.stop().is_triggered() {
                break;
            }

            if let Some(end) = last_finished {
                let floor = pacing_floor(self.profile.delay());
                let since_last = end.elapsed();
                if since_last < floor {
                    tokio::time::sleep(floor - since_last).await;
                }
            }

            let status = worker.probe_once(&*self.transport, &state, attempt).await;
            last_finished = Some(Instant::now());
            metrics::record_attempt(status);

            let (total, successful) = state.snapshot();
            self.progress.update(total, successful);

            if status == Status::RateLimited {
                // Local early exit; tighter than waiting for the next
                // stop-signal poll.
                break;
            }
        }
    }

    /// Fixed pool of workers, each running the full attempt loop. Joins are
    /// bounded by the profile timeframe; a worker that overruns it is told to
    /// stop and drained, never cancelled mid-request.
    async fn run_concurrent(&self, state: Arc<RunState>) {
        let mut handles = Vec::with_capacity(self.profile.workers);
        for id in 1..=self.profile.workers {
            let worker = ProbeWorker::new(
                id,
                self.profile.attempts,
                self.profile.delay(),
                self.target.request(id, false),
            );
            handles.push((
                id,
                tokio::spawn(worker.run(self.transport.clone(), state.clone())),
            ));
        }

        let ticker = {
            let state = state.clone();
            let progress = self.progress.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(PROGRESS_TICK);
                loop {
                    interval.tick().await;
                    let (total, successful) = state.snapshot();
                    progress.update(total, successful);
                }
            })
        };

        for (id, mut handle) in handles {
            match tokio::time::timeout(self.profile.timeframe(), &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::error!(worker = id, error = %e, "Worker task failed");
                }
                Err(_) => {
                    tracing::warn!(
                        worker = id,
                        timeframe_secs = self.profile.timeframe_secs,
                        "Worker did not finish within timeframe, signalling stop"
                    );
                    // Aborting here would cancel the task mid-request and
                    // leave a claimed sequence number with no matching log
                    // entry. Signal stop and drain instead: the in-flight
                    // request completes or times out, gets recorded, and the
                    // worker exits at its next stop check.
                    state.stop().trigger();
                    match tokio::time::timeout(STOP_DRAIN, &mut handle).await {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => {
                            tracing::error!(worker = id, error = %e, "Worker task failed");
                        }
                        Err(_) => {
                            tracing::error!(
                                worker = id,
                                "Worker unresponsive after stop signal, detaching"
                            );
                        }
                    }
                }
            }
        }

        ticker.abort();
        let (total, successful) = state.snapshot();
        self.progress.update(total, successful);
    }
}

/// Minimum inter-attempt interval for sequential mode: the configured delay
/// is a hard floor, jitter only ever stretches it.
fn pacing_floor(delay: Duration) -> Duration {
    delay.max(jittered(delay))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacing_floor_never_undercuts_delay() {
        let delay = Duration::from_millis(100);
        for _ in 0..100 {
            let floor = pacing_floor(delay);
            assert!(floor >= delay);
            assert!(floor <= Duration::from_millis(110));
        }
    }
}
