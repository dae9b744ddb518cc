//! Comparison tier and vector-scan configuration.

use super::{parse_env_bool, Config};
use crate::compare::CompareTier;
use crate::error::{PadCmpError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which tier [`Comparator`](crate::compare::Comparator) uses and which
/// vector scanners the lane tier may pick from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Tier used by the configurable selector
    pub default_tier: CompareTier,
    /// Allow the SSE4.2 PCMPESTRI scanner
    pub enable_sse42: bool,
    /// Allow the SSE2 movemask scanner
    pub enable_sse2: bool,
    /// Allow the NEON scanner
    pub enable_neon: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            default_tier: CompareTier::Word,
            enable_sse42: true,
            enable_sse2: true,
            enable_neon: true,
        }
    }
}

impl CompareConfig {
    /// Whether any hardware scanner is allowed
    pub fn vector_scan_enabled(&self) -> bool {
        self.enable_sse42 || self.enable_sse2 || self.enable_neon
    }
}

impl Config for CompareConfig {
    /// Always succeeds. Every field combination is usable because the lane
    /// tier falls back to the portable scanner when no vector scan is allowed.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        let tier_var = format!("{}COMPARE_TIER", prefix);
        if let Ok(value) = std::env::var(&tier_var) {
            config.default_tier = value.parse()?;
        }
        config.enable_sse42 = parse_env_bool(&format!("{}SIMD_SSE42", prefix), config.enable_sse42);
        config.enable_sse2 = parse_env_bool(&format!("{}SIMD_SSE2", prefix), config.enable_sse2);
        config.enable_neon = parse_env_bool(&format!("{}SIMD_NEON", prefix), config.enable_neon);
        config.validate()?;
        Ok(config)
    }

    /// Lane tier with every vector scanner the CPU offers
    fn performance_preset() -> Self {
        Self { default_tier: CompareTier::Lane, ..Self::default() }
    }

    /// Byte tier, vector scans off: nothing is read past the logical end
    fn memory_preset() -> Self {
        Self {
            default_tier: CompareTier::Byte,
            enable_sse42: false,
            enable_sse2: false,
            enable_neon: false,
        }
    }

    /// Word tier, vector scans off: the same code path on every CPU
    fn realtime_preset() -> Self {
        Self {
            default_tier: CompareTier::Word,
            enable_sse42: false,
            enable_sse2: false,
            enable_neon: false,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| PadCmpError::configuration(format!("Failed to serialize compare config: {}", e)))?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| PadCmpError::configuration(format!("Failed to parse compare config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}
