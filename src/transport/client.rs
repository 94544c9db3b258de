//! reqwest-backed transport.
//!
//! # Responsibilities
//! - Issue form POSTs with browser-simulating headers
//! - Accept self-signed certificates (test environments)
//! - Resolve redirect chains manually when asked, capturing the hop count
//!
//! # Design Decisions
//! - Two underlying clients: one with redirects disabled (manual resolution),
//!   one with reqwest's default policy (silent following)
//! - reqwest errors fold into the three-way transport outcome: timeout,
//!   connect failure, everything else

use futures_util::future::BoxFuture;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::time::Duration;

use super::{ProbeRequest, Transport, TransportError, TransportOutcome};

/// Cap on manual redirect hops, matching reqwest's default policy depth.
const MAX_REDIRECTS: u32 = 10;

/// Production transport over `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    /// Redirects disabled; used when the caller resolves them manually.
    direct: reqwest::Client,
    /// Default redirect policy; used for pooled probing.
    following: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the given per-request timeout.
    ///
    /// Certificate verification is disabled: the targets this tool probes
    /// are test environments behind self-signed certificates.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let base = || {
            reqwest::Client::builder()
                .danger_accept_invalid_certs(true)
                .timeout(timeout)
                .default_headers(browser_headers())
        };

        let direct = base()
            .redirect(Policy::none())
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        let following = base()
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { direct, following })
    }

    async fn send_inner(self, request: ProbeRequest) -> Result<TransportOutcome, TransportError> {
        let client = if request.resolve_redirects {
            &self.direct
        } else {
            &self.following
        };

        let mut response = client
            .post(&request.url)
            .form(&request.form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let mut redirects = 0u32;
        if request.resolve_redirects {
            while is_redirect(response.status()) && redirects < MAX_REDIRECTS {
                let Some(location) = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned)
                else {
                    break;
                };

                let target = resolve_location(response.url(), &location)
                    .map_err(|e| TransportError::Other(e))?;

                redirects += 1;
                response = self
                    .direct
                    .get(target)
                    .send()
                    .await
                    .map_err(map_reqwest_error)?;
            }
        }

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        Ok(TransportOutcome::Response {
            status,
            body,
            redirects,
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: ProbeRequest) -> BoxFuture<'static, TransportOutcome> {
        let this = self.clone();
        Box::pin(async move {
            match this.send_inner(request).await {
                Ok(outcome) => outcome,
                Err(e) => TransportOutcome::Failed(e),
            }
        })
    }
}

fn is_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301 | 302 | 303 | 307 | 308)
}

/// Resolve a Location header value, which may be relative, against the
/// URL the response came from.
fn resolve_location(base: &reqwest::Url, location: &str) -> Result<reqwest::Url, String> {
    match reqwest::Url::parse(location) {
        Ok(url) => Ok(url),
        Err(_) => base
            .join(location)
            .map_err(|e| format!("invalid redirect location '{}': {}", location, e)),
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::Other(e.to_string())
    }
}

/// Headers simulating an interactive browser session.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    headers.insert(
        reqwest::header::USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        ),
    );
    headers.insert(
        reqwest::header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        reqwest::header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(
        reqwest::header::CONNECTION,
        HeaderValue::from_static("keep-alive"),
    );
    headers.insert(
        "Upgrade-Insecure-Requests",
        HeaderValue::from_static("1"),
    );
    headers
}
