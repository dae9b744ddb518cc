//! Word tier: eight bytes per step.
//!
//! The loop runs while more than eight bytes remain, so the last one to
//! eight bytes always go through the masked tail. The tail load reads a full
//! word and may therefore touch up to seven bytes past the logical end.

use super::policy::{OrderPolicy, PresencePolicy, ScanPolicy};
use crate::memory::PaddedPair;
use std::ptr;

/// Bytes per word-tier chunk
pub const WORD: usize = 8;

/// Mask keeping the first `rem` bytes (in memory order) of a native-endian
/// word and zeroing the rest.
///
/// `rem` must be in `1..=8`.
#[inline]
pub fn remainder_mask64(rem: usize) -> u64 {
    debug_assert!((1..=WORD).contains(&rem), "remainder {} out of range", rem);
    if rem >= WORD {
        return u64::MAX;
    }
    let bits = (rem * 8) as u32;

    #[cfg(target_endian = "little")]
    {
        (1u64 << bits) - 1
    }

    #[cfg(target_endian = "big")]
    {
        !(u64::MAX >> bits)
    }
}

#[inline(always)]
unsafe fn load_word(p: *const u8) -> u64 {
    unsafe { ptr::read_unaligned(p as *const u64) }
}

/// Compare `len` bytes a word at a time.
///
/// # Safety
/// `a` and `b` must be valid for reads of `len` bytes, and the word
/// covering the final one to eight bytes must be readable: allow
/// [`WORD_PADDING`](crate::memory::WORD_PADDING) bytes of initialized slack.
#[inline]
pub(crate) unsafe fn scan_words<P: ScanPolicy>(mut a: *const u8, mut b: *const u8, len: usize) -> i32 {
    let mut rem = len;

    while rem > WORD {
        let (word_a, word_b) = unsafe { (load_word(a), load_word(b)) };
        if word_a != word_b {
            return P::word_mismatch(word_a, word_b);
        }
        rem -= WORD;
        unsafe {
            a = a.add(WORD);
            b = b.add(WORD);
        }
    }

    if rem == 0 {
        return 0;
    }

    let mask = remainder_mask64(rem);
    let (word_a, word_b) = unsafe { (load_word(a) & mask, load_word(b) & mask) };
    if word_a == word_b {
        0
    } else {
        P::word_mismatch(word_a, word_b)
    }
}

/// Ordering comparison, a word at a time.
///
/// Returns -1, 0 or 1. Only the sign is comparable with other tiers.
pub fn cmp64(pair: &PaddedPair<'_>) -> i32 {
    // SAFETY: PaddedSlice guarantees PADDING >= WORD_PADDING bytes of slack
    unsafe { scan_words::<OrderPolicy>(pair.left().as_ptr(), pair.right().as_ptr(), pair.len()) }
}

/// Equality comparison, a word at a time. Skips byte-order normalization.
pub fn eq64(pair: &PaddedPair<'_>) -> i32 {
    // SAFETY: as in cmp64
    unsafe { scan_words::<PresencePolicy>(pair.left().as_ptr(), pair.right().as_ptr(), pair.len()) }
}
