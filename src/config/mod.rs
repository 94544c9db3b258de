//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags (--speed, custom parameters)
//!     → profile.rs (built-in table or derivation)
//! profiles file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Profile (validated, immutable)
//!     → shared by value with the runner
//! ```
//!
//! # Design Decisions
//! - A profile is immutable once a run starts
//! - Built-in profiles are a static table; custom modes derive from flags
//! - Validation separates syntactic (serde) from semantic checks and
//!   returns every violation, not just the first

pub mod loader;
pub mod profile;
pub mod validation;

pub use loader::{load_profiles, ConfigError};
pub use profile::{ExecutionMode, Profile};
pub use validation::validate_profile;
