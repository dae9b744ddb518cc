//! Configuration APIs for padcmp
//!
//! Configuration types share the [`Config`] trait: validation, environment
//! initialization, presets and JSON file persistence.
//!
//! ```rust
//! use padcmp::config::{CompareConfig, Config};
//! use padcmp::compare::CompareTier;
//!
//! let config = CompareConfig::default();
//! assert_eq!(config.default_tier, CompareTier::Word);
//!
//! // Byte tier, no vector scanners
//! let config = CompareConfig::memory_preset();
//! assert_eq!(config.default_tier, CompareTier::Byte);
//! ```
//!
//! Environment variables use the `PADCMP_` prefix by default:
//!
//! - `PADCMP_COMPARE_TIER`: `byte`, `word` or `lane`
//! - `PADCMP_SIMD_SSE42`, `PADCMP_SIMD_SSE2`, `PADCMP_SIMD_NEON`: booleans

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod compare;


pub use compare::CompareConfig;

/// Common configuration trait providing validation, environment
/// initialization, and preset management.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables with the
    /// `PADCMP_` prefix.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix("PADCMP_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    ///
    /// Unset variables keep their default values.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset favoring throughput.
    fn performance_preset() -> Self;

    /// Preset favoring a small memory footprint.
    fn memory_preset() -> Self;

    /// Preset favoring predictable latency.
    fn realtime_preset() -> Self;

    /// Balanced preset; the default configuration.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse a boolean environment variable.
///
/// Accepts "true", "1", "yes", "on" (case-insensitive) as true, anything
/// else as false. Returns `default` if the variable is unset.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}
