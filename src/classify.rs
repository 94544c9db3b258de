//! Response classification.
//!
//! # Responsibilities
//! - Map a raw transport outcome (status + body, or a failure) to a semantic status
//! - Keep the pattern table as data, evaluated in a fixed priority order
//!
//! # Design Decisions
//! - Case-insensitive substring matching, first matching category wins
//! - Transport-level connect/timeout failures bypass text matching entirely
//! - Pure function: no state, no side effects

use serde::Serialize;

use crate::transport::{TransportError, TransportOutcome};

/// Semantic status of one probe attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Response body indicates an accepted authentication.
    Success,
    /// Response body indicates a rejected authentication.
    Failure,
    /// Response body indicates the rate limiter has engaged.
    #[serde(rename = "rate_limit")]
    RateLimited,
    /// Connection refused/reset, request timeout, or a body reporting one.
    Dropped,
    /// Response received but no pattern matched.
    Unknown,
    /// Unclassified transport error (DNS, TLS handshake, protocol, ...).
    Error,
}

impl Status {
    /// Label used in reports and structured log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::RateLimited => "rate_limit",
            Status::Dropped => "dropped",
            Status::Unknown => "unknown",
            Status::Error => "error",
        }
    }

    /// Whether this status counts toward a failure streak.
    pub fn is_failure_like(&self) -> bool {
        !matches!(self, Status::Success)
    }

    /// Whether this status latches rate-limit detection.
    pub fn triggers_detection(&self) -> bool {
        matches!(self, Status::RateLimited | Status::Dropped)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered pattern table. Priority is the slice order: the first category
/// with a matching substring wins, so a body containing both "success" and
/// "too many requests" classifies as `Success`.
const PATTERNS: &[(Status, &[&str])] = &[
    (
        Status::Success,
        &["success", "authenticated", "login successful"],
    ),
    (Status::Failure, &["failure", "invalid", "error", "denied"]),
    (
        Status::RateLimited,
        &["rate limit", "too many requests", "429", "blocked", "unusual rate"],
    ),
    (
        Status::Dropped,
        &["connection refused", "connection reset", "timeout"],
    ),
];

/// Classify a response body by scanning for known patterns.
pub fn scan_body(body: &str) -> Status {
    let body = body.to_lowercase();
    for (status, patterns) in PATTERNS {
        if patterns.iter().any(|p| body.contains(p)) {
            return *status;
        }
    }
    Status::Unknown
}

/// Classify a full transport outcome.
pub fn classify(outcome: &TransportOutcome) -> Status {
    match outcome {
        TransportOutcome::Response { body, .. } => scan_body(body),
        TransportOutcome::Failed(TransportError::Connection(_)) => Status::Dropped,
        TransportOutcome::Failed(TransportError::Timeout) => Status::Dropped,
        TransportOutcome::Failed(TransportError::Other(_)) => Status::Error,
    }
}
