//! Probe target: endpoint and credential payload.

use crate::transport::ProbeRequest;

/// The authentication endpoint a run probes.
#[derive(Debug, Clone)]
pub struct Target {
    /// Target hostname.
    pub hostname: String,
    /// Authentication endpoint path.
    pub path: String,
    /// Credential stem; worker N authenticates as `<stem>N`.
    pub user_stem: String,
}

impl Target {
    pub fn new(
        hostname: impl Into<String>,
        path: impl Into<String>,
        user_stem: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            path: path.into(),
            user_stem: user_stem.into(),
        }
    }

    pub fn url(&self) -> String {
        format!("https://{}{}", self.hostname, self.path)
    }

    /// NetScaler-style authentication form for one worker.
    fn payload(&self, worker: usize) -> Vec<(String, String)> {
        let credential = format!("{}{}", self.user_stem, worker);
        vec![
            ("login".into(), credential.clone()),
            ("passwd".into(), credential),
            ("passwd1".into(), String::new()),
            ("otpmanualentry".into(), "false".into()),
            ("otppush".into(), "true".into()),
            ("passwdreset".into(), "0".into()),
            ("Logon".into(), "Submit".into()),
            ("StateContext".into(), String::new()),
        ]
    }

    /// Build the request a given worker sends each attempt.
    pub fn request(&self, worker: usize, resolve_redirects: bool) -> ProbeRequest {
        ProbeRequest {
            url: self.url(),
            form: self.payload(worker),
            resolve_redirects,
        }
    }
}
