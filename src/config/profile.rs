//! Probe profile definitions.
//!
//! This module defines the timing/concurrency profile a run executes under.
//! All types derive Serde traits for deserialization from profile files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How attempts are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One worker, attempts paced one at a time.
    Sequential,
    /// A fixed pool of workers probing in parallel.
    Concurrent,
}

/// A named bundle of attempt count, delay, worker count, and execution mode.
///
/// Immutable once a run starts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Profile identifier for logging and reports.
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Attempts per worker.
    pub attempts: u32,

    /// Expected test window in seconds (informational; also the bounded
    /// wait ceiling per worker in concurrent mode).
    pub timeframe_secs: u64,

    /// Delay between attempts, in seconds.
    pub delay_secs: f64,

    /// Worker count (used in concurrent mode).
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Execution mode.
    pub mode: ExecutionMode,
}

fn default_workers() -> usize {
    1
}

impl Profile {
    /// Look up a built-in profile by name.
    pub fn builtin(name: &str) -> Option<Profile> {
        let (description, attempts, timeframe_secs, delay_secs, workers, mode) = match name {
            "slow_brute_force" => (
                "Slow brute force attack (20 attempts over 10 minutes)",
                20,
                600,
                30.0,
                1,
                ExecutionMode::Sequential,
            ),
            "slow_rate" => (
                "Slow rate (6 attempts over 1 minute)",
                6,
                60,
                8.0,
                1,
                ExecutionMode::Sequential,
            ),
            "high_rate" => (
                "High frequency attempts (10 in 30 seconds)",
                10,
                30,
                3.0,
                2,
                ExecutionMode::Sequential,
            ),
            "fast_rate" => (
                "Fast rate (5 attempts in 2 seconds)",
                5,
                2,
                0.4,
                2,
                ExecutionMode::Sequential,
            ),
            "ultra_high_rate" => (
                "Ultra high frequency attempts (150 in 5 seconds)",
                150,
                5,
                0.05,
                5,
                ExecutionMode::Concurrent,
            ),
            _ => return None,
        };
        Some(Profile {
            name: name.to_string(),
            description: description.to_string(),
            attempts,
            timeframe_secs,
            delay_secs,
            workers,
            mode,
        })
    }

    /// Fully custom profile from explicit parameters.
    pub fn custom(attempts: u32, timeframe_secs: u64, delay_secs: f64, workers: usize) -> Profile {
        Profile {
            name: "custom".to_string(),
            description: "Custom test parameters".to_string(),
            attempts,
            timeframe_secs,
            delay_secs,
            workers,
            mode: if workers > 1 {
                ExecutionMode::Concurrent
            } else {
                ExecutionMode::Sequential
            },
        }
    }

    /// "Threshold over timeslice" shorthand: probe at the rate the limit is
    /// believed to allow, for twice the threshold over twice the window.
    pub fn from_threshold(threshold: u32, timeslice_secs: u64) -> Profile {
        Profile {
            name: "custom_rate".to_string(),
            description: format!(
                "Custom rate test (threshold: {} requests per {} seconds)",
                threshold, timeslice_secs
            ),
            attempts: threshold.saturating_mul(2),
            timeframe_secs: timeslice_secs.saturating_mul(2),
            delay_secs: timeslice_secs as f64 / threshold as f64,
            workers: 1,
            mode: ExecutionMode::Sequential,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.delay_secs.max(0.0))
    }

    pub fn timeframe(&self) -> Duration {
        Duration::from_secs(self.timeframe_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        for name in [
            "slow_brute_force",
            "slow_rate",
            "high_rate",
            "fast_rate",
            "ultra_high_rate",
        ] {
            let profile = Profile::builtin(name).unwrap();
            assert_eq!(profile.name, name);
            assert!(profile.attempts >= 1);
            assert!(profile.workers >= 1);
        }
        assert!(Profile::builtin("warp_speed").is_none());
    }

    #[test]
    fn test_only_ultra_high_rate_is_concurrent() {
        assert_eq!(
            Profile::builtin("ultra_high_rate").unwrap().mode,
            ExecutionMode::Concurrent
        );
        assert_eq!(
            Profile::builtin("fast_rate").unwrap().mode,
            ExecutionMode::Sequential
        );
    }

    #[test]
    fn test_threshold_shorthand_derivation() {
        let profile = Profile::from_threshold(100, 60);
        assert_eq!(profile.attempts, 200);
        assert_eq!(profile.timeframe_secs, 120);
        assert!((profile.delay_secs - 0.6).abs() < 1e-9);
        assert_eq!(profile.workers, 1);
        assert_eq!(profile.mode, ExecutionMode::Sequential);
    }

    #[test]
    fn test_threshold_shorthand_saturates_on_huge_values() {
        let profile = Profile::from_threshold(u32::MAX, u64::MAX);
        assert_eq!(profile.attempts, u32::MAX);
        assert_eq!(profile.timeframe_secs, u64::MAX);
    }
}
