//! Profile-file loading from disk.

use std::fs;
use std::path::Path;
use serde::Deserialize;
use thiserror::Error;

use crate::config::profile::Profile;
use crate::config::validation::{validate_profile, ValidationError};

/// Error type for configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),

    /// A custom speed was selected without its required flags.
    #[error("{speed} requires {required}")]
    MissingParameters {
        speed: &'static str,
        required: &'static str,
    },

    #[error("unknown profile '{0}'")]
    UnknownProfile(String),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// On-disk shape of a profiles file.
#[derive(Debug, Deserialize)]
struct ProfilesFile {
    #[serde(default)]
    profiles: Vec<Profile>,
}

/// Load and validate extra named profiles from a TOML file.
pub fn load_profiles(path: &Path) -> Result<Vec<Profile>, ConfigError> {
    let content = fs::read_to_string(path)?;
    let file: ProfilesFile = toml::from_str(&content)?;

    for profile in &file.profiles {
        validate_profile(profile).map_err(ConfigError::Validation)?;
    }

    Ok(file.profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::profile::ExecutionMode;

    #[test]
    fn test_parse_profiles_file() {
        let file: ProfilesFile = toml::from_str(
            r#"
            [[profiles]]
            name = "gateway_probe"
            attempts = 40
            timeframe_secs = 90
            delay_secs = 1.5
            workers = 3
            mode = "concurrent"
            "#,
        )
        .unwrap();
        assert_eq!(file.profiles.len(), 1);
        let p = &file.profiles[0];
        assert_eq!(p.name, "gateway_probe");
        assert_eq!(p.mode, ExecutionMode::Concurrent);
        assert_eq!(p.workers, 3);
    }

    #[test]
    fn test_workers_defaults_to_one() {
        let file: ProfilesFile = toml::from_str(
            r#"
            [[profiles]]
            name = "single"
            attempts = 5
            timeframe_secs = 10
            delay_secs = 0.5
            mode = "sequential"
            "#,
        )
        .unwrap();
        assert_eq!(file.profiles[0].workers, 1);
    }
}
