//! Report and progress collaborator sinks.
//!
//! # Responsibilities
//! - Persist the final report (file sink)
//! - Surface periodic progress snapshots (log sink)
//!
//! # Design Decisions
//! - Both collaborators are traits so tests and alternative front-ends can
//!   substitute their own sinks
//! - Progress is purely observational; sinks never influence control flow

use std::fs;
use std::path::PathBuf;
use thiserror::Error;

use super::format::render_report;
use super::RunReport;

/// Errors surfaced while persisting a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create results directory '{dir}': {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write report '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Accepts the final report and persists or displays it.
pub trait ReportSink {
    /// Write the report, returning the path it landed at, if any.
    fn write(&self, report: &RunReport) -> Result<Option<PathBuf>, ReportError>;
}

/// Writes timestamped human-readable reports under a results directory.
pub struct FileReportSink {
    dir: PathBuf,
}

impl FileReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for FileReportSink {
    fn write(&self, report: &RunReport) -> Result<Option<PathBuf>, ReportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::CreateDir {
            dir: self.dir.clone(),
            source,
        })?;

        let filename = format!(
            "rate_limit_test_{}.txt",
            report.finished_at.format("%Y%m%d_%H%M%S")
        );
        let path = self.dir.join(filename);

        fs::write(&path, render_report(report)).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "Report written");
        Ok(Some(path))
    }
}

/// Writes the report as pretty-printed JSON, for downstream tooling.
pub struct JsonReportSink {
    dir: PathBuf,
}

impl JsonReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for JsonReportSink {
    fn write(&self, report: &RunReport) -> Result<Option<PathBuf>, ReportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::CreateDir {
            dir: self.dir.clone(),
            source,
        })?;

        let filename = format!(
            "rate_limit_test_{}.json",
            report.finished_at.format("%Y%m%d_%H%M%S")
        );
        let path = self.dir.join(filename);

        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "JSON report written");
        Ok(Some(path))
    }
}

/// Receives periodic (total, successful) snapshots during a run.
pub trait ProgressSink: Send + Sync {
    fn update(&self, total_requests: u64, successful_requests: u64);
}

/// Emits progress as structured log events.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn update(&self, total_requests: u64, successful_requests: u64) {
        tracing::info!(
            total = total_requests,
            successful = successful_requests,
            "Progress"
        );
    }
}

/// Discards progress updates.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&self, _total_requests: u64, _successful_requests: u64) {}
}
