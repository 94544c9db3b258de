//! Human-readable report rendering.

use std::fmt::Write;

use super::RunReport;

const RULE_WIDE: usize = 120;
const RULE_NARROW: usize = 40;

/// Render the full on-disk report: configuration, analysis sections,
/// sequence lists, and the per-attempt detail table.
pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    let outcome = &report.outcome;

    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDE));
    let _ = writeln!(out, "Rate Limit Probe Results");
    let _ = writeln!(out, "Run ID: {}", report.run_id);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDE));
    let _ = writeln!(out);

    let _ = writeln!(out, "Test Configuration:");
    let _ = writeln!(out, "{}", "-".repeat(RULE_NARROW));
    let _ = writeln!(
        out,
        "Date/Time: {}",
        report.finished_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "Hostname: {}", report.hostname);
    let _ = writeln!(out, "URL: {}", report.url);
    let _ = writeln!(out, "Profile: {}", report.profile.name);
    let _ = writeln!(out, "Description: {}", report.profile.description);
    let _ = writeln!(
        out,
        "Attempts: {}  Timeframe: {}s  Delay: {}s  Workers: {}",
        report.profile.attempts,
        report.profile.timeframe_secs,
        report.profile.delay_secs,
        report.profile.workers
    );

    if let Some(detection) = &outcome.detection {
        let _ = writeln!(out);
        let _ = writeln!(out, "Rate Limit Analysis:");
        let _ = writeln!(out, "{}", "-".repeat(RULE_NARROW));
        let _ = writeln!(
            out,
            "Rate limit detected after: {:.2} seconds",
            detection.elapsed_secs
        );
        let _ = writeln!(
            out,
            "Total requests at detection: {}",
            detection.total_requests
        );
        let _ = writeln!(
            out,
            "Successful requests before limit: {}",
            outcome.successful_requests
        );
        match report.detection_rps() {
            Some(rps) => {
                let _ = writeln!(out, "Requests per second: {:.2}", rps);
            }
            None => {
                let _ = writeln!(out, "Requests per second: undefined (zero elapsed time)");
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Timing Analysis:");
    let _ = writeln!(out, "{}", "-".repeat(RULE_NARROW));
    if let Some(elapsed) = outcome.first_failure_elapsed {
        let _ = writeln!(out, "First failure occurred at: {:.2} seconds", elapsed);
        let _ = writeln!(
            out,
            "Requests before first failure: {}",
            outcome.successes_before_first_failure
        );
    }
    if let Some(elapsed) = outcome.last_success_elapsed {
        let _ = writeln!(out, "Last successful request at: {:.2} seconds", elapsed);
    }

    if !outcome.failure_sequences.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Failure Sequences:");
        for (i, seq) in outcome.failure_sequences.iter().enumerate() {
            let _ = writeln!(
                out,
                "Sequence {}: Started at {:.2}s (Request #{})",
                i + 1,
                seq.elapsed_secs,
                seq.total_requests
            );
        }
    }

    if !outcome.success_sequences.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Success Sequences:");
        for (i, seq) in outcome.success_sequences.iter().enumerate() {
            let _ = writeln!(
                out,
                "Success {}: At {:.2}s (Request #{})",
                i + 1,
                seq.elapsed_secs,
                seq.total_requests
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Detailed Test Results:");
    let _ = writeln!(out, "{}", "-".repeat(RULE_NARROW));
    let _ = writeln!(
        out,
        "{:<20} {:<8} {:<8} {:<10} {:<10} {:<8} {:<6} {:<50} {:<10}",
        "Time", "Worker", "Attempt", "Status", "Elapsed(s)", "Total", "HTTP", "Response Text", "Redirects"
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDE));
    for record in &outcome.attempts {
        let redirects = record
            .redirects
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<20} {:<8} {:<8} {:<10} {:<10.2} {:<8} {:<6} {:<50} {:<10}",
            record.time.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.worker,
            record.attempt,
            record.status.label(),
            record.elapsed_secs,
            record.total_requests,
            record.http_status,
            record.response_snippet,
            redirects
        );
    }
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDE));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Test completed at: {}",
        report.finished_at.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDE));

    out
}

/// Render the shorter console summary printed at run end.
pub fn render_summary(report: &RunReport) -> String {
    let mut out = String::new();
    let outcome = &report.outcome;

    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "TEST SUMMARY");
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "Total Requests: {}", outcome.total_requests);
    let _ = writeln!(out, "Successful Requests: {}", outcome.successful_requests);
    match report.success_rate() {
        Some(rate) => {
            let _ = writeln!(out, "Success Rate: {:.2}%", rate * 100.0);
        }
        None => {
            let _ = writeln!(out, "Success Rate: undefined (no requests sent)");
        }
    }

    if let Some(detection) = &outcome.detection {
        let _ = writeln!(out);
        let _ = writeln!(out, "Rate Limit Analysis:");
        let _ = writeln!(
            out,
            "Rate limit detected after: {:.2} seconds",
            detection.elapsed_secs
        );
        let _ = writeln!(
            out,
            "Total requests at detection: {}",
            detection.total_requests
        );
        if let Some(rps) = report.detection_rps() {
            let _ = writeln!(out, "Requests per second: {:.2}", rps);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Timing Analysis:");
    if let Some(elapsed) = outcome.first_failure_elapsed {
        let _ = writeln!(out, "First failure occurred at: {:.2} seconds", elapsed);
        let _ = writeln!(
            out,
            "Requests before first failure: {}",
            outcome.successes_before_first_failure
        );
    }
    if let Some(elapsed) = outcome.last_success_elapsed {
        let _ = writeln!(out, "Last successful request at: {:.2} seconds", elapsed);
    }
    let _ = writeln!(out, "{}", "=".repeat(80));

    out
}
