//! Command-line surface.
//!
//! # Responsibilities
//! - Declare the argument schema
//! - Resolve `--speed` into a validated profile (built-in, profiles file,
//!   or one of the two custom-parameter modes)
//!
//! # Design Decisions
//! - `--speed` is an open string: built-in names and profiles-file names
//!   share one namespace, `custom`/`custom_rate` switch to flag-derived
//!   profiles
//! - Missing custom parameters are a `ConfigError`, surfaced before any
//!   request is sent

use clap::Parser;
use std::path::PathBuf;

use crate::config::{load_profiles, ConfigError, Profile};

#[derive(Parser, Debug)]
#[command(name = "limitprobe")]
#[command(about = "Probe an authentication endpoint and detect rate-limit onset", long_about = None)]
pub struct Cli {
    /// Target hostname
    #[arg(long)]
    pub hostname: String,

    /// Speed profile: slow_brute_force, slow_rate, high_rate, fast_rate,
    /// ultra_high_rate, custom, custom_rate, or a name from --profiles-file
    #[arg(long)]
    pub speed: String,

    /// Rate limit threshold (required for custom_rate)
    #[arg(long)]
    pub threshold: Option<u32>,

    /// Rate limit timeslice in seconds (required for custom_rate)
    #[arg(long)]
    pub timeslice: Option<u64>,

    /// Number of attempts (required for custom)
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Timeframe in seconds (required for custom)
    #[arg(long)]
    pub timeframe: Option<u64>,

    /// Delay between attempts in seconds (required for custom)
    #[arg(long)]
    pub delay: Option<f64>,

    /// Worker count (required for custom)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Authentication endpoint path
    #[arg(long, default_value = "/nf/auth/doAuthentication.do")]
    pub path: String,

    /// Credential stem; worker N authenticates as <user>N
    #[arg(long, default_value = "testuser")]
    pub user: String,

    /// TOML file defining extra named profiles
    #[arg(long)]
    pub profiles_file: Option<PathBuf>,

    /// Directory reports are written to
    #[arg(long, default_value = "results")]
    pub results_dir: PathBuf,

    /// Also write the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Resolve `--speed` into a profile.
    pub fn resolve_profile(&self) -> Result<Profile, ConfigError> {
        match self.speed.as_str() {
            "custom" => match (self.attempts, self.timeframe, self.delay, self.workers) {
                (Some(attempts), Some(timeframe), Some(delay), Some(workers)) => {
                    Ok(Profile::custom(attempts, timeframe, delay, workers))
                }
                _ => Err(ConfigError::MissingParameters {
                    speed: "custom",
                    required: "--attempts, --timeframe, --delay, and --workers",
                }),
            },
            "custom_rate" => match (self.threshold, self.timeslice) {
                (Some(threshold), Some(timeslice)) => {
                    Ok(Profile::from_threshold(threshold, timeslice))
                }
                _ => Err(ConfigError::MissingParameters {
                    speed: "custom_rate",
                    required: "--threshold and --timeslice",
                }),
            },
            name => {
                if let Some(profile) = Profile::builtin(name) {
                    return Ok(profile);
                }
                if let Some(path) = &self.profiles_file {
                    let profiles = load_profiles(path)?;
                    if let Some(profile) = profiles.into_iter().find(|p| p.name == name) {
                        return Ok(profile);
                    }
                }
                Err(ConfigError::UnknownProfile(name.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionMode;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["limitprobe"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn test_builtin_speed_resolves() {
        let cli = parse(&["--hostname", "h", "--speed", "fast_rate"]);
        let profile = cli.resolve_profile().unwrap();
        assert_eq!(profile.name, "fast_rate");
        assert_eq!(profile.attempts, 5);
    }

    #[test]
    fn test_custom_requires_all_four_flags() {
        let cli = parse(&[
            "--hostname", "h", "--speed", "custom", "--attempts", "10", "--delay", "0.5",
        ]);
        let err = cli.resolve_profile().unwrap_err();
        assert!(matches!(err, ConfigError::MissingParameters { speed: "custom", .. }));
    }

    #[test]
    fn test_custom_resolves_with_all_flags() {
        let cli = parse(&[
            "--hostname", "h", "--speed", "custom", "--attempts", "10", "--timeframe", "30",
            "--delay", "0.5", "--workers", "4",
        ]);
        let profile = cli.resolve_profile().unwrap();
        assert_eq!(profile.attempts, 10);
        assert_eq!(profile.workers, 4);
        assert_eq!(profile.mode, ExecutionMode::Concurrent);
    }

    #[test]
    fn test_custom_rate_shorthand() {
        let cli = parse(&[
            "--hostname", "h", "--speed", "custom_rate", "--threshold", "100", "--timeslice",
            "60",
        ]);
        let profile = cli.resolve_profile().unwrap();
        assert_eq!(profile.attempts, 200);
        assert_eq!(profile.timeframe_secs, 120);
        assert!((profile.delay_secs - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_custom_rate_missing_flags() {
        let cli = parse(&["--hostname", "h", "--speed", "custom_rate", "--threshold", "100"]);
        assert!(matches!(
            cli.resolve_profile().unwrap_err(),
            ConfigError::MissingParameters { speed: "custom_rate", .. }
        ));
    }

    #[test]
    fn test_unknown_speed_is_an_error() {
        let cli = parse(&["--hostname", "h", "--speed", "ludicrous"]);
        assert!(matches!(
            cli.resolve_profile().unwrap_err(),
            ConfigError::UnknownProfile(_)
        ));
    }
}
