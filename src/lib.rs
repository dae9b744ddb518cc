//! # padcmp: Padding-Safe Tiered Buffer Comparison
//!
//! Compare two equal-length byte spans whose storage is followed by at least
//! [`PADDING`] readable bytes. Because the slack is guaranteed, the wider tiers
//! load full chunks past the logical end and mask the excess away instead of
//! running a byte tail loop.
//!
//! ## Tiers
//!
//! - **Byte** ([`cmp8`], [`eq8`]): one byte per step, returns the byte difference
//! - **Word** ([`cmp64`], [`eq64`]): eight bytes per step with a remainder mask,
//!   returns the sign of the lexicographic comparison
//! - **Lane** ([`cmp128`], [`eq128`]): sixteen bytes per step using SSE4.2,
//!   SSE2 or NEON when available, returns the byte difference
//! - **Default** ([`cmp`], [`eq`]): the word tier
//!
//! Every `cmp*` result agrees in sign with lexicographic order. Every `eq*`
//! result is zero exactly when the spans hold the same bytes.
//!
//! ## Quick Start
//!
//! ```rust
//! use padcmp::{cmp, cmp8, eq128, PaddedBuf, PaddedPair};
//!
//! let left = PaddedBuf::from_slice(b"hello world").unwrap();
//! let right = PaddedBuf::from_slice(b"hello there").unwrap();
//! let pair = PaddedPair::new(left.as_padded(), right.as_padded()).unwrap();
//!
//! assert!(cmp(&pair) > 0);
//! assert_eq!(cmp8(&pair), i32::from(b'w') - i32::from(b't'));
//! assert_ne!(eq128(&pair), 0);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod compare;
pub mod config;
pub mod error;
pub mod memory;
pub mod system;

pub use compare::{
    cmp, cmp128, cmp64, cmp8, eq, eq128, eq64, eq8, global_lane_scanner, Comparator, CompareTier,
    LaneScanner, LaneTier,
};
pub use config::{CompareConfig, Config};
pub use error::{PadCmpError, Result};
pub use memory::{PaddedBuf, PaddedPair, PaddedSlice, LANE_PADDING, PADDING, WORD_PADDING};
pub use system::{get_cpu_features, CpuFeatures};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if the lane tier runs on a hardware scanner
pub fn has_simd_support() -> bool {
    global_lane_scanner().tier() != LaneTier::Portable
}

/// Initialize the library and log the selected lane scanner
pub fn init() {
    log::debug!(
        "Initializing padcmp v{} (lane scanner: {:?})",
        VERSION,
        global_lane_scanner().tier()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        init();
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_version_info() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2);
    }

    #[test]
    fn test_simd_support() {
        let has_simd = has_simd_support();

        #[cfg(target_arch = "x86_64")]
        assert_eq!(has_simd, get_cpu_features().has_sse2);

        #[cfg(target_arch = "aarch64")]
        assert!(has_simd);

        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        assert!(!has_simd);
    }

    #[test]
    fn test_reexports_agree() {
        let left = PaddedBuf::from_slice(b"abc").unwrap();
        let right = PaddedBuf::from_slice(b"abd").unwrap();
        let pair = PaddedPair::new(left.as_padded(), right.as_padded()).unwrap();

        assert_eq!(cmp8(&pair), -1);
        assert!(cmp64(&pair) < 0);
        assert_eq!(cmp128(&pair), -1);
        assert!(cmp(&pair) < 0);
        assert_ne!(eq8(&pair), 0);
        assert_ne!(eq64(&pair), 0);
        assert_ne!(eq128(&pair), 0);
        assert_ne!(eq(&pair), 0);
        assert!(Comparator::default().compare(&pair) < 0);
    }
}
