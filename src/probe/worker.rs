//! Probe worker loop.
//!
//! # Responsibilities
//! - Issue a bounded number of requests, one per iteration
//! - Classify each outcome and fold it into the shared run state
//! - Pace iterations with the configured delay plus jitter
//!
//! # Design Decisions
//! - The stop signal is polled between attempts only; an in-flight request
//!   always completes or times out first
//! - The inter-attempt sleep races against the stop broadcast so a latched
//!   detection ends the pool without waiting out long delays
//! - No retries: every classified outcome is recorded once

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::classify::{self, Status};
use crate::observability::metrics;
use crate::probe::state::{AttemptOutcome, RunState};
use crate::transport::{ProbeRequest, Transport, TransportOutcome};

/// One worker of the probe pool.
pub struct ProbeWorker {
    id: usize,
    attempts: u32,
    delay: Duration,
    request: ProbeRequest,
}

impl ProbeWorker {
    pub fn new(id: usize, attempts: u32, delay: Duration, request: ProbeRequest) -> Self {
        Self {
            id,
            attempts,
            delay,
            request,
        }
    }

    /// Run the attempt loop to completion or until the stop signal latches.
    pub async fn run(self, transport: Arc<dyn Transport>, state: Arc<RunState>) {
        let mut stop_rx = state.stop().subscribe();

        for attempt in 1..=self.attempts {
            if state.stop().is_triggered() {
                metrics::record_worker_stop();
                tracing::debug!(worker = self.id, attempt, "Stop signal observed, exiting");
                break;
            }

            let status = self.probe_once(&*transport, &state, attempt).await;
            metrics::record_attempt(status);

            if attempt < self.attempts {
                let pause = jittered(self.delay);
                tokio::select! {
                    _ = tokio::time::sleep(pause) => {}
                    _ = stop_rx.recv() => {
                        metrics::record_worker_stop();
                        tracing::debug!(worker = self.id, "Stop signal during pacing sleep");
                        break;
                    }
                }
            }
        }
    }

    pub(crate) async fn probe_once(
        &self,
        transport: &dyn Transport,
        state: &RunState,
        attempt: u32,
    ) -> Status {
        // Claim the global sequence number before the request goes out.
        let sequence_no = state.begin_attempt();

        let outcome = transport.send(self.request.clone()).await;
        let status = classify::classify(&outcome);

        let (http_status, snippet, redirects) = match &outcome {
            TransportOutcome::Response {
                status,
                body,
                redirects,
            } => {
                let redirects = self.request.resolve_redirects.then_some(*redirects);
                (*status, body.clone(), redirects)
            }
            TransportOutcome::Failed(e) => (0, e.to_string(), None),
        };

        tracing::debug!(
            worker = self.id,
            attempt,
            sequence_no,
            status = %status,
            http_status,
            "Attempt classified"
        );

        let latched = state.record_attempt(AttemptOutcome {
            worker: self.id,
            attempt,
            status,
            http_status,
            response_snippet: snippet,
            redirects,
            sequence_no,
        });

        if let Some(detection) = latched {
            metrics::record_detection();
            tracing::warn!(
                worker = self.id,
                total_requests = detection.total_requests,
                elapsed_secs = format!("{:.2}", detection.elapsed_secs),
                "Rate limit detected, stopping run"
            );
        }

        status
    }
}

/// Delay with ±10% uniform jitter, clamped at zero.
pub fn jittered(delay: Duration) -> Duration {
    if delay.is_zero() {
        return delay;
    }
    let secs = delay.as_secs_f64();
    let jitter = rand::thread_rng().gen_range(-0.1..=0.1) * secs;
    Duration::from_secs_f64((secs + jitter).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_stays_within_ten_percent() {
        let delay = Duration::from_millis(1000);
        for _ in 0..100 {
            let j = jittered(delay);
            assert!(j >= Duration::from_millis(900));
            assert!(j <= Duration::from_millis(1100));
        }
    }

    #[test]
    fn test_zero_delay_has_no_jitter() {
        assert_eq!(jittered(Duration::ZERO), Duration::ZERO);
    }
}
