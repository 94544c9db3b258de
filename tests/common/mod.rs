//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use futures_util::future::BoxFuture;
use limitprobe::transport::{ProbeRequest, Transport, TransportError, TransportOutcome};

/// One scripted HTTP response.
#[derive(Clone)]
pub struct Scripted {
    pub status: u16,
    pub body: &'static str,
    /// Optional extra header line, e.g. a Location for redirects.
    pub header: Option<&'static str>,
}

impl Scripted {
    pub fn reply(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            header: None,
        }
    }

    pub fn redirect(status: u16, location: &'static str) -> Self {
        Self {
            status,
            body: "",
            header: Some(location),
        }
    }
}

/// Start a mock backend serving scripted responses in request order,
/// repeating the last entry once the script is exhausted. Returns the bound
/// address.
pub async fn start_scripted_backend(script: Vec<Scripted>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let script = Arc::new(script);
    let counter = Arc::new(AtomicUsize::new(0));

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let script = script.clone();
                    let counter = counter.clone();
                    tokio::spawn(async move {
                        // Drain the request before replying.
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let index = counter.fetch_add(1, Ordering::SeqCst);
                        let entry = script
                            .get(index)
                            .or_else(|| script.last())
                            .cloned()
                            .unwrap_or(Scripted::reply(200, ""));

                        let status_text = match entry.status {
                            200 => "200 OK",
                            302 => "302 Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let extra = entry
                            .header
                            .map(|loc| format!("Location: {}\r\n", loc))
                            .unwrap_or_default();
                        let response = format!(
                            "HTTP/1.1 {} \r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            extra,
                            entry.body.len(),
                            entry.body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a backend that accepts connections but never responds.
pub async fn start_stalling_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Transport that serves canned bodies without any network, in call order.
/// The last entry repeats once the script runs out.
pub struct ScriptedTransport {
    bodies: Vec<&'static str>,
    calls: AtomicUsize,
    latency: Duration,
}

impl ScriptedTransport {
    pub fn new(bodies: Vec<&'static str>) -> Self {
        Self {
            bodies,
            calls: AtomicUsize::new(0),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, _request: ProbeRequest) -> BoxFuture<'static, TransportOutcome> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let body = self
            .bodies
            .get(index)
            .or_else(|| self.bodies.last())
            .copied()
            .unwrap_or("");
        let latency = self.latency;
        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            TransportOutcome::Response {
                status: 200,
                body: body.to_string(),
                redirects: 0,
            }
        })
    }
}

/// Transport that always fails at the connection level.
pub struct RefusingTransport;

impl Transport for RefusingTransport {
    fn send(&self, _request: ProbeRequest) -> BoxFuture<'static, TransportOutcome> {
        Box::pin(async {
            TransportOutcome::Failed(TransportError::Connection("connection refused".into()))
        })
    }
}
