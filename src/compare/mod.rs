//! # Padded Memory Comparison
//!
//! Ordering and equality of two equal-length byte spans, in three tiers:
//!
//! - **Byte** ([`cmp8`], [`eq8`]): one byte per step, reads nothing past the end
//! - **Word** ([`cmp64`], [`eq64`]): eight bytes per step, masked tail
//! - **Lane** ([`cmp128`], [`eq128`]): sixteen bytes per step, vector scan
//!
//! [`cmp`] and [`eq`] use the word tier. [`Comparator`] makes the tier a
//! configuration choice.
//!
//! ## Results
//!
//! Ordering results are negative, zero or positive following unsigned
//! lexicographic byte order. The byte and lane tiers return the difference of
//! the first mismatching bytes; the word tier returns only -1 or 1. Compare
//! signs across tiers, never magnitudes.
//!
//! Equality results are 0 for equal spans and nonzero otherwise.
//!
//! ## Example
//!
//! ```
//! use padcmp::compare::{cmp, cmp8, eq};
//! use padcmp::memory::{PaddedBuf, PaddedPair};
//!
//! let a = PaddedBuf::from_slice(&[0x01, 0x02]).unwrap();
//! let b = PaddedBuf::from_slice(&[0x01, 0x03]).unwrap();
//! let pair = PaddedPair::new(a.as_padded(), b.as_padded()).unwrap();
//!
//! assert_eq!(cmp8(&pair), -1);
//! assert!(cmp(&pair) < 0);
//! assert_ne!(eq(&pair), 0);
//! ```

pub mod byte;
pub mod lane;
pub mod policy;
pub mod word;

pub use byte::{cmp8, eq8};
pub use lane::{cmp128, cmp128_with, eq128, eq128_with, global_lane_scanner, LaneScanner, LaneTier};
pub use policy::{to_lexicographic, OrderPolicy, PresencePolicy, ScanPolicy, MISMATCH};
pub use word::{cmp64, eq64, remainder_mask64};

use crate::config::CompareConfig;
use crate::error::PadCmpError;
use crate::memory::{PaddedPair, LANE_PADDING, WORD_PADDING};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareTier {
    /// One byte per step
    Byte,
    /// Eight bytes per step
    Word,
    /// Sixteen bytes per step through a vector scan
    Lane,
}

impl CompareTier {
    /// Bytes consumed per step
    pub const fn chunk_width(self) -> usize {
        match self {
            CompareTier::Byte => 1,
            CompareTier::Word => word::WORD,
            CompareTier::Lane => lane::LANE,
        }
    }

    /// Readable slack this tier needs after the logical end
    pub const fn required_padding(self) -> usize {
        match self {
            CompareTier::Byte => 0,
            CompareTier::Word => WORD_PADDING,
            CompareTier::Lane => LANE_PADDING,
        }
    }

    /// Name used in configuration
    pub const fn as_str(self) -> &'static str {
        match self {
            CompareTier::Byte => "byte",
            CompareTier::Word => "word",
            CompareTier::Lane => "lane",
        }
    }
}

impl Default for CompareTier {
    fn default() -> Self {
        CompareTier::Word
    }
}

impl fmt::Display for CompareTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareTier {
    type Err = PadCmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "byte" | "8" => Ok(CompareTier::Byte),
            "word" | "64" => Ok(CompareTier::Word),
            "lane" | "simd" | "128" => Ok(CompareTier::Lane),
            other => Err(PadCmpError::configuration(format!("Unknown comparison tier: {}", other))),
        }
    }
}

/// Ordering comparison with the default tier (word).
#[inline]
pub fn cmp(pair: &PaddedPair<'_>) -> i32 {
    cmp64(pair)
}

/// Equality comparison with the default tier (word).
#[inline]
pub fn eq(pair: &PaddedPair<'_>) -> i32 {
    eq64(pair)
}

/// Comparison entry point with a configurable tier
#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    tier: CompareTier,
    scanner: LaneScanner,
}

impl Comparator {
    /// Comparator using the default configuration (word tier)
    pub fn new() -> Self {
        Self::with_config(&CompareConfig::default())
    }

    /// Comparator using `config.default_tier`
    pub fn with_config(config: &CompareConfig) -> Self {
        let scanner = if config.default_tier == CompareTier::Lane {
            LaneScanner::with_config(config)
        } else {
            *global_lane_scanner()
        };
        log::debug!("Comparator using {} tier", config.default_tier);
        Self { tier: config.default_tier, scanner }
    }

    /// Comparator pinned to `tier`, with default scanner selection
    pub fn with_tier(tier: CompareTier) -> Self {
        Self { tier, scanner: *global_lane_scanner() }
    }

    /// Selected tier
    pub fn tier(&self) -> CompareTier {
        self.tier
    }

    /// Vector scanner used by the lane tier
    pub fn scanner(&self) -> &LaneScanner {
        &self.scanner
    }

    /// Ordering comparison with the selected tier
    #[inline]
    pub fn compare(&self, pair: &PaddedPair<'_>) -> i32 {
        match self.tier {
            CompareTier::Byte => cmp8(pair),
            CompareTier::Word => cmp64(pair),
            CompareTier::Lane => cmp128_with(&self.scanner, pair),
        }
    }

    /// Equality comparison with the selected tier
    #[inline]
    pub fn equals(&self, pair: &PaddedPair<'_>) -> i32 {
        match self.tier {
            CompareTier::Byte => eq8(pair),
            CompareTier::Word => eq64(pair),
            CompareTier::Lane => eq128_with(&self.scanner, pair),
        }
    }

    /// [`compare`](Self::compare) as a [`std::cmp::Ordering`]
    #[inline]
    pub fn ordering(&self, pair: &PaddedPair<'_>) -> Ordering {
        self.compare(pair).cmp(&0)
    }

    /// Whether the spans are byte-for-byte identical
    #[inline]
    pub fn is_equal(&self, pair: &PaddedPair<'_>) -> bool {
        self.equals(pair) == 0
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pointer-based entry points for callers that manage padded memory
/// themselves.
///
/// None of these check anything. Reading past the readable region is
/// undefined behavior.
pub mod raw {
    use super::byte::scan_bytes;
    use super::lane::{global_lane_scanner, scan_lanes};
    use super::policy::{OrderPolicy, PresencePolicy};
    use super::word::scan_words;

    /// Byte-tier ordering comparison.
    ///
    /// # Safety
    /// `a` and `b` must be valid for reads of `len` bytes.
    #[inline]
    pub unsafe fn cmp8(a: *const u8, b: *const u8, len: usize) -> i32 {
        unsafe { scan_bytes::<OrderPolicy>(a, b, len) }
    }

    /// Byte-tier equality comparison.
    ///
    /// # Safety
    /// Same as [`cmp8`].
    #[inline]
    pub unsafe fn eq8(a: *const u8, b: *const u8, len: usize) -> i32 {
        unsafe { scan_bytes::<PresencePolicy>(a, b, len) }
    }

    /// Word-tier ordering comparison.
    ///
    /// # Safety
    /// `a` and `b` must each be valid for reads of `len + 8` initialized
    /// bytes.
    #[inline]
    pub unsafe fn cmp64(a: *const u8, b: *const u8, len: usize) -> i32 {
        unsafe { scan_words::<OrderPolicy>(a, b, len) }
    }

    /// Word-tier equality comparison.
    ///
    /// # Safety
    /// Same as [`cmp64`].
    #[inline]
    pub unsafe fn eq64(a: *const u8, b: *const u8, len: usize) -> i32 {
        unsafe { scan_words::<PresencePolicy>(a, b, len) }
    }

    /// Lane-tier ordering comparison.
    ///
    /// # Safety
    /// `a` and `b` must each be valid for reads of `len + 16` initialized
    /// bytes. Neither is dereferenced when `len == 0`.
    #[inline]
    pub unsafe fn cmp128(a: *const u8, b: *const u8, len: usize) -> i32 {
        unsafe { scan_lanes::<OrderPolicy>(global_lane_scanner(), a, b, len) }
    }

    /// Lane-tier equality comparison.
    ///
    /// # Safety
    /// Same as [`cmp128`].
    #[inline]
    pub unsafe fn eq128(a: *const u8, b: *const u8, len: usize) -> i32 {
        unsafe { scan_lanes::<PresencePolicy>(global_lane_scanner(), a, b, len) }
    }

    /// Default ordering comparison (word tier).
    ///
    /// # Safety
    /// Same as [`cmp64`].
    #[inline]
    pub unsafe fn cmp(a: *const u8, b: *const u8, len: usize) -> i32 {
        unsafe { cmp64(a, b, len) }
    }

    /// Default equality comparison (word tier).
    ///
    /// # Safety
    /// Same as [`cmp64`].
    #[inline]
    pub unsafe fn eq(a: *const u8, b: *const u8, len: usize) -> i32 {
        unsafe { eq64(a, b, len) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::PaddedBuf;

    fn bufs(a: &[u8], b: &[u8]) -> (PaddedBuf, PaddedBuf) {
        (PaddedBuf::from_slice(a).unwrap(), PaddedBuf::from_slice(b).unwrap())
    }

    #[test]
    fn test_selectors_use_word_tier() {
        let (a, b) = bufs(&[0x00, 0xFF], &[0x00, 0x01]);
        let pair = PaddedPair::new(a.as_padded(), b.as_padded()).unwrap();

        assert_eq!(cmp(&pair), cmp64(&pair));
        assert_eq!(cmp(&pair), 1);
        assert_eq!(eq(&pair), eq64(&pair));
        assert_eq!(Comparator::new().tier(), CompareTier::Word);
    }

    #[test]
    fn test_comparator_tiers_agree_on_sign() {
        let (a, b) = bufs(b"padded comparison!", b"padded comparisoN!");
        let pair = PaddedPair::new(a.as_padded(), b.as_padded()).unwrap();

        for tier in [CompareTier::Byte, CompareTier::Word, CompareTier::Lane] {
            let comparator = Comparator::with_tier(tier);
            assert_eq!(comparator.ordering(&pair), Ordering::Greater, "{}", tier);
            assert_eq!(comparator.ordering(&pair.swapped()), Ordering::Less, "{}", tier);
            assert!(!comparator.is_equal(&pair), "{}", tier);
        }
    }

    #[test]
    fn test_comparator_from_config() {
        let config = CompareConfig { default_tier: CompareTier::Lane, ..CompareConfig::default() };
        let comparator = Comparator::with_config(&config);
        assert_eq!(comparator.tier(), CompareTier::Lane);
        assert!(comparator.scanner().tier().is_available());

        let (a, b) = bufs(&[9; 33], &[9; 33]);
        let pair = PaddedPair::new(a.as_padded(), b.as_padded()).unwrap();
        assert_eq!(comparator.compare(&pair), 0);
        assert!(comparator.is_equal(&pair));
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!("byte".parse::<CompareTier>().unwrap(), CompareTier::Byte);
        assert_eq!(" Word ".parse::<CompareTier>().unwrap(), CompareTier::Word);
        assert_eq!("simd".parse::<CompareTier>().unwrap(), CompareTier::Lane);
        assert_eq!("128".parse::<CompareTier>().unwrap(), CompareTier::Lane);
        assert!("nibble".parse::<CompareTier>().is_err());

        for tier in [CompareTier::Byte, CompareTier::Word, CompareTier::Lane] {
            assert_eq!(tier.to_string().parse::<CompareTier>().unwrap(), tier);
        }
    }

    #[test]
    fn test_tier_properties() {
        assert_eq!(CompareTier::Byte.chunk_width(), 1);
        assert_eq!(CompareTier::Word.chunk_width(), 8);
        assert_eq!(CompareTier::Lane.chunk_width(), 16);
        assert_eq!(CompareTier::Byte.required_padding(), 0);
        assert_eq!(CompareTier::Word.required_padding(), 8);
        assert_eq!(CompareTier::Lane.required_padding(), 16);
        assert_eq!(CompareTier::default(), CompareTier::Word);
    }

    #[test]
    fn test_raw_zero_length_never_dereferences() {
        let dangling = std::ptr::NonNull::<u8>::dangling().as_ptr();
        unsafe {
            assert_eq!(raw::cmp8(dangling, dangling, 0), 0);
            assert_eq!(raw::eq8(dangling, dangling, 0), 0);
            assert_eq!(raw::cmp64(dangling, dangling, 0), 0);
            assert_eq!(raw::eq64(dangling, dangling, 0), 0);
            assert_eq!(raw::cmp128(dangling, dangling, 0), 0);
            assert_eq!(raw::eq128(dangling, dangling, 0), 0);
            assert_eq!(raw::cmp(dangling, dangling, 0), 0);
            assert_eq!(raw::eq(dangling, dangling, 0), 0);
        }
    }

    #[test]
    fn test_raw_matches_safe_api() {
        let (a, b) = bufs(b"0123456789abcdefXYZ", b"0123456789abcdefXYz");
        let pair = PaddedPair::new(a.as_padded(), b.as_padded()).unwrap();
        let (pa, pb, len) = (pair.left().as_ptr(), pair.right().as_ptr(), pair.len());

        unsafe {
            assert_eq!(raw::cmp8(pa, pb, len), cmp8(&pair));
            assert_eq!(raw::cmp64(pa, pb, len), cmp64(&pair));
            assert_eq!(raw::cmp128(pa, pb, len), cmp128(&pair));
            assert_eq!(raw::eq64(pa, pb, len), eq64(&pair));
            assert_eq!(raw::eq128(pa, pb, len), eq128(&pair));
        }
    }
}
