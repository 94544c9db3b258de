//! Profile validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts ≥ 1, workers ≥ 1, delay ≥ 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: Profile → Result<(), Vec<ValidationError>>
//! - Runs before a profile is accepted into a run

use thiserror::Error;

use crate::config::profile::Profile;

/// A single semantic violation in a profile.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("profile '{name}': attempts must be at least 1")]
    NoAttempts { name: String },

    #[error("profile '{name}': workers must be at least 1")]
    NoWorkers { name: String },

    #[error("profile '{name}': delay must be a non-negative number, got {delay}")]
    NegativeDelay { name: String, delay: f64 },

    #[error("profile '{name}': timeframe must be at least 1 second")]
    ZeroTimeframe { name: String },

    #[error("profile name must not be empty")]
    EmptyName,
}

/// Check a profile against the invariants a run depends on.
pub fn validate_profile(profile: &Profile) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let name = profile.name.clone();

    if profile.name.is_empty() {
        errors.push(ValidationError::EmptyName);
    }
    if profile.attempts < 1 {
        errors.push(ValidationError::NoAttempts { name: name.clone() });
    }
    if profile.workers < 1 {
        errors.push(ValidationError::NoWorkers { name: name.clone() });
    }
    if !(profile.delay_secs >= 0.0) || !profile.delay_secs.is_finite() {
        errors.push(ValidationError::NegativeDelay {
            name: name.clone(),
            delay: profile.delay_secs,
        });
    }
    if profile.timeframe_secs == 0 {
        errors.push(ValidationError::ZeroTimeframe { name });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
