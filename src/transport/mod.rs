//! HTTP transport abstraction.
//!
//! # Responsibilities
//! - Define the collaborator contract the probe engine sends requests through
//! - Distinguish the three transport outcomes the classifier cares about:
//!   normal response, connection failure, timeout
//!
//! # Design Decisions
//! - Trait object over an async method (`BoxFuture`) so the engine and tests
//!   can swap the real client for scripted transports
//! - Redirect resolution is a per-request choice: sequential probing resolves
//!   redirects manually and counts them, pooled probing follows them silently

pub mod client;

pub use client::HttpTransport;

use futures_util::future::BoxFuture;
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout; the only suspension point a worker blocks on.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// One outbound probe request.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    /// Full target URL.
    pub url: String,
    /// Form-encoded body fields.
    pub form: Vec<(String, String)>,
    /// Resolve redirect responses manually, capturing a redirect count.
    pub resolve_redirects: bool,
}

/// Transport-level failures, distinguished because they classify differently.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused or reset before a response arrived.
    #[error("connection dropped/refused: {0}")]
    Connection(String),

    /// The request exceeded the per-request timeout.
    #[error("request timeout")]
    Timeout,

    /// Any other client error (DNS, TLS, protocol).
    #[error("transport error: {0}")]
    Other(String),
}

/// Result of one transport send.
#[derive(Debug)]
pub enum TransportOutcome {
    /// A response came back, possibly after resolving redirects.
    Response {
        status: u16,
        body: String,
        redirects: u32,
    },
    /// The request never produced a response.
    Failed(TransportError),
}

/// Collaborator contract for issuing probe requests.
///
/// Implementations must bound each send by the configured per-request
/// timeout; the engine never cancels an in-flight request.
pub trait Transport: Send + Sync {
    fn send(&self, request: ProbeRequest) -> BoxFuture<'static, TransportOutcome>;
}
