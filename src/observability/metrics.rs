//! Metrics collection.
//!
//! # Metrics
//! - `limitprobe_requests_total` (counter): attempts by classified status
//! - `limitprobe_detections_total` (counter): rate-limit latch events
//! - `limitprobe_worker_stops_total` (counter): workers stopped by the latch

use crate::classify::Status;

/// Record one classified attempt.
pub fn record_attempt(status: Status) {
    metrics::counter!("limitprobe_requests_total", "status" => status.label()).increment(1);
}

/// Record the rate-limit detection latch firing.
pub fn record_detection() {
    metrics::counter!("limitprobe_detections_total").increment(1);
}

/// Record a worker observing the stop signal and exiting early.
pub fn record_worker_stop() {
    metrics::counter!("limitprobe_worker_stops_total").increment(1);
}
