//! # Lane Tier
//!
//! Sixteen bytes per step through a vector equality scan: given two 16-byte
//! chunks and the number of valid bytes, report the first differing index.
//!
//! ## Scanners
//!
//! - **SSE4.2**: `PCMPESTRI`, equal-each with negative polarity, told the
//!   exact valid length of both operands
//! - **SSE2**: byte compare + movemask, mask trimmed to the valid length
//! - **NEON**: byte compare + shift-narrow to a 64-bit nibble mask
//! - **Portable**: plain loop over the loaded chunk
//!
//! Every scanner loads a full 16-byte chunk, so the final partial chunk reads
//! up to fifteen bytes past the logical end. Bytes beyond the valid length are
//! never compared.

use super::policy::{OrderPolicy, PresencePolicy, ScanPolicy};
use crate::config::CompareConfig;
use crate::memory::PaddedPair;
use crate::system::cpu_features::get_cpu_features;
use std::sync::OnceLock;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

/// Bytes per lane-tier chunk
pub const LANE: usize = 16;

/// Vector equality scan implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneTier {
    /// Software scan (any target)
    Portable,
    /// SSE2 compare + movemask (x86_64)
    Sse2,
    /// SSE4.2 PCMPESTRI (x86_64)
    Sse42,
    /// Advanced SIMD (aarch64)
    Neon,
}

impl LaneTier {
    /// Whether this scanner can run on the current machine
    pub fn is_available(self) -> bool {
        let features = get_cpu_features();
        match self {
            LaneTier::Portable => true,
            LaneTier::Sse2 => cfg!(target_arch = "x86_64") && features.has_sse2,
            LaneTier::Sse42 => cfg!(target_arch = "x86_64") && features.has_sse42,
            LaneTier::Neon => cfg!(target_arch = "aarch64") && features.has_neon,
        }
    }

    /// All scanners usable on the current machine
    pub fn available() -> Vec<LaneTier> {
        [LaneTier::Portable, LaneTier::Sse2, LaneTier::Sse42, LaneTier::Neon]
            .into_iter()
            .filter(|tier| tier.is_available())
            .collect()
    }
}

/// Vector equality scanner bound to one [`LaneTier`]
#[derive(Debug, Clone, Copy)]
pub struct LaneScanner {
    tier: LaneTier,
}

impl LaneScanner {
    /// Scanner using the best tier the default configuration allows
    pub fn new() -> Self {
        Self::with_config(&CompareConfig::default())
    }

    /// Scanner using the best tier `config` allows on this CPU
    pub fn with_config(config: &CompareConfig) -> Self {
        let tier = Self::detect_optimal_tier(config);
        log::debug!("Lane scanner selected tier {:?}", tier);
        Self { tier }
    }

    /// Scanner pinned to `tier`, or `None` if the CPU lacks it
    pub fn with_tier(tier: LaneTier) -> Option<Self> {
        tier.is_available().then_some(Self { tier })
    }

    /// Software-only scanner
    pub fn portable() -> Self {
        Self { tier: LaneTier::Portable }
    }

    fn detect_optimal_tier(config: &CompareConfig) -> LaneTier {
        let features = get_cpu_features();

        #[cfg(target_arch = "x86_64")]
        {
            if config.enable_sse42 && features.has_sse42 {
                return LaneTier::Sse42;
            }
            if config.enable_sse2 && features.has_sse2 {
                return LaneTier::Sse2;
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            if config.enable_neon && features.has_neon {
                return LaneTier::Neon;
            }
        }

        let _ = (config, features);
        LaneTier::Portable
    }

    /// Selected scan implementation
    pub fn tier(&self) -> LaneTier {
        self.tier
    }

    /// Index of the first differing byte among the first `valid` bytes of
    /// the chunks at `a` and `b`, or a value `>= valid` if they match.
    ///
    /// # Safety
    /// `valid` must be in `1..=16` and [`LANE`] bytes must be readable at
    /// both `a` and `b`.
    #[inline]
    pub unsafe fn first_mismatch(&self, a: *const u8, b: *const u8, valid: usize) -> usize {
        debug_assert!((1..=LANE).contains(&valid));
        match self.tier {
            #[cfg(target_arch = "x86_64")]
            LaneTier::Sse42 => unsafe { sse42_first_mismatch(a, b, valid) },
            #[cfg(target_arch = "x86_64")]
            LaneTier::Sse2 => unsafe { sse2_first_mismatch(a, b, valid) },
            #[cfg(target_arch = "aarch64")]
            LaneTier::Neon => unsafe { neon_first_mismatch(a, b, valid) },
            _ => unsafe { portable_first_mismatch(a, b, valid) },
        }
    }
}

impl Default for LaneScanner {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_LANE_SCANNER: OnceLock<LaneScanner> = OnceLock::new();

/// Process-wide scanner built from the default configuration
pub fn global_lane_scanner() -> &'static LaneScanner {
    GLOBAL_LANE_SCANNER.get_or_init(LaneScanner::new)
}

// ============================================================================
// Scan implementations
// ============================================================================

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse4.2")]
unsafe fn sse42_first_mismatch(a: *const u8, b: *const u8, valid: usize) -> usize {
    let (va, vb) = unsafe {
        (
            _mm_loadu_si128(a as *const __m128i),
            _mm_loadu_si128(b as *const __m128i),
        )
    };
    let index = unsafe {
        _mm_cmpestri(
            va,
            valid as i32,
            vb,
            valid as i32,
            _SIDD_UBYTE_OPS | _SIDD_CMP_EQUAL_EACH | _SIDD_NEGATIVE_POLARITY,
        )
    };
    index as usize
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn sse2_first_mismatch(a: *const u8, b: *const u8, valid: usize) -> usize {
    let mask = unsafe {
        let va = _mm_loadu_si128(a as *const __m128i);
        let vb = _mm_loadu_si128(b as *const __m128i);
        _mm_movemask_epi8(_mm_cmpeq_epi8(va, vb)) as u32
    };
    let live = (1u32 << valid) - 1;
    let diff = !mask & live;
    if diff == 0 {
        LANE
    } else {
        diff.trailing_zeros() as usize
    }
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
unsafe fn neon_first_mismatch(a: *const u8, b: *const u8, valid: usize) -> usize {
    let nibbles = unsafe {
        let eq = vceqq_u8(vld1q_u8(a), vld1q_u8(b));
        // 4 bits per byte lane, lane i at bits 4i..4i+4
        let narrowed = vshrn_n_u16(vreinterpretq_u16_u8(eq), 4);
        vget_lane_u64(vreinterpret_u64_u8(narrowed), 0)
    };
    let index = ((!nibbles).trailing_zeros() / 4) as usize;
    if index < valid {
        index
    } else {
        LANE
    }
}

#[inline]
unsafe fn portable_first_mismatch(a: *const u8, b: *const u8, valid: usize) -> usize {
    let (chunk_a, chunk_b) = unsafe {
        (
            std::ptr::read_unaligned(a as *const [u8; LANE]),
            std::ptr::read_unaligned(b as *const [u8; LANE]),
        )
    };
    chunk_a[..valid]
        .iter()
        .zip(&chunk_b[..valid])
        .position(|(x, y)| x != y)
        .unwrap_or(LANE)
}

// ============================================================================
// Chunk loop
// ============================================================================

/// Compare `len` bytes a lane at a time.
///
/// # Safety
/// `a` and `b` must be valid for reads of `len` bytes, and the 16-byte load
/// at the start of the final chunk must be readable: allow
/// [`LANE_PADDING`](crate::memory::LANE_PADDING) bytes of initialized slack.
#[inline]
pub(crate) unsafe fn scan_lanes<P: ScanPolicy>(
    scanner: &LaneScanner,
    mut a: *const u8,
    mut b: *const u8,
    mut len: usize,
) -> i32 {
    // Nothing may be loaded for an empty span
    if len == 0 {
        return 0;
    }

    while len > 0 {
        let chunk = len.min(LANE);
        let index = unsafe { scanner.first_mismatch(a, b, chunk) };
        if index < chunk {
            let (byte_a, byte_b) = unsafe { (*a.add(index), *b.add(index)) };
            return P::lane_mismatch(byte_a, byte_b);
        }
        len -= chunk;
        unsafe {
            a = a.add(chunk);
            b = b.add(chunk);
        }
    }
    0
}

/// Ordering comparison, sixteen bytes at a time, using the global scanner.
///
/// Returns the difference of the first mismatching bytes, like the byte tier.
pub fn cmp128(pair: &PaddedPair<'_>) -> i32 {
    cmp128_with(global_lane_scanner(), pair)
}

/// Equality comparison, sixteen bytes at a time, using the global scanner.
pub fn eq128(pair: &PaddedPair<'_>) -> i32 {
    eq128_with(global_lane_scanner(), pair)
}

/// [`cmp128`] with an explicit scanner
pub fn cmp128_with(scanner: &LaneScanner, pair: &PaddedPair<'_>) -> i32 {
    // SAFETY: PaddedSlice guarantees PADDING >= LANE_PADDING bytes of slack
    unsafe { scan_lanes::<OrderPolicy>(scanner, pair.left().as_ptr(), pair.right().as_ptr(), pair.len()) }
}

/// [`eq128`] with an explicit scanner
pub fn eq128_with(scanner: &LaneScanner, pair: &PaddedPair<'_>) -> i32 {
    // SAFETY: as in cmp128_with
    unsafe {
        scan_lanes::<PresencePolicy>(scanner, pair.left().as_ptr(), pair.right().as_ptr(), pair.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::PaddedBuf;

    fn scanners() -> Vec<LaneScanner> {
        LaneTier::available()
            .into_iter()
            .filter_map(LaneScanner::with_tier)
            .collect()
    }

    #[test]
    fn test_tier_detection() {
        let scanner = LaneScanner::new();
        println!("Selected lane tier: {:?}", scanner.tier());
        assert!(scanner.tier().is_available());
        assert_eq!(global_lane_scanner().tier(), scanner.tier());
    }

    #[test]
    fn test_disabled_config_falls_back_to_portable() {
        let config = CompareConfig {
            enable_sse42: false,
            enable_sse2: false,
            enable_neon: false,
            ..CompareConfig::default()
        };
        assert_eq!(LaneScanner::with_config(&config).tier(), LaneTier::Portable);
    }

    #[test]
    fn test_first_mismatch_every_position() {
        let base = [0x33u8; 32];
        for scanner in scanners() {
            for valid in 1..=LANE {
                let same = unsafe { scanner.first_mismatch(base.as_ptr(), base.as_ptr(), valid) };
                assert!(same >= valid, "{:?} valid {}", scanner.tier(), valid);

                for pos in 0..LANE {
                    let mut other = base;
                    other[pos] = 0x34;
                    let index = unsafe { scanner.first_mismatch(base.as_ptr(), other.as_ptr(), valid) };
                    if pos < valid {
                        assert_eq!(index, pos, "{:?} valid {} pos {}", scanner.tier(), valid, pos);
                    } else {
                        assert!(index >= valid, "{:?} valid {} pos {}", scanner.tier(), valid, pos);
                    }
                }
            }
        }
    }

    #[test]
    fn test_cmp128_reports_byte_difference() {
        let mut left = vec![0u8; 40];
        let mut right = left.clone();
        left[37] = 0x90;
        right[37] = 0x10;
        let a = PaddedBuf::from_slice(&left).unwrap();
        let b = PaddedBuf::from_slice(&right).unwrap();
        let pair = PaddedPair::new(a.as_padded(), b.as_padded()).unwrap();

        for scanner in scanners() {
            assert_eq!(cmp128_with(&scanner, &pair), 0x80);
            assert_eq!(cmp128_with(&scanner, &pair.swapped()), -0x80);
            assert_eq!(eq128_with(&scanner, &pair), 1);
        }
    }

    #[test]
    fn test_partial_chunk_ignores_padding() {
        for len in 0..=LANE + 3 {
            let data: Vec<u8> = (0..len as u8).collect();
            let a = PaddedBuf::with_fill(&data, 0x00).unwrap();
            let b = PaddedBuf::with_fill(&data, 0xEE).unwrap();
            let pair = PaddedPair::new(a.as_padded(), b.as_padded()).unwrap();
            for scanner in scanners() {
                assert_eq!(cmp128_with(&scanner, &pair), 0, "{:?} len {}", scanner.tier(), len);
                assert_eq!(eq128_with(&scanner, &pair), 0, "{:?} len {}", scanner.tier(), len);
            }
        }
    }
}
