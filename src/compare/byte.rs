//! Byte tier: one byte per step, no overread.

use super::policy::{OrderPolicy, PresencePolicy, ScanPolicy};
use crate::memory::PaddedPair;

/// Compare `len` bytes one at a time.
///
/// # Safety
/// `a` and `b` must be valid for reads of `len` bytes. No padding is needed.
#[inline]
pub(crate) unsafe fn scan_bytes<P: ScanPolicy>(a: *const u8, b: *const u8, len: usize) -> i32 {
    for i in 0..len {
        let (byte_a, byte_b) = unsafe { (*a.add(i), *b.add(i)) };
        if byte_a != byte_b {
            return P::byte_mismatch(byte_a, byte_b);
        }
    }
    0
}

/// Ordering comparison, one byte at a time.
///
/// Returns the difference of the first mismatching bytes as unsigned values,
/// or 0 if the spans are identical.
pub fn cmp8(pair: &PaddedPair<'_>) -> i32 {
    // SAFETY: both spans hold pair.len() readable bytes
    unsafe { scan_bytes::<OrderPolicy>(pair.left().as_ptr(), pair.right().as_ptr(), pair.len()) }
}

/// Equality comparison, one byte at a time. Same value as [`cmp8`].
pub fn eq8(pair: &PaddedPair<'_>) -> i32 {
    // SAFETY: as in cmp8
    unsafe { scan_bytes::<PresencePolicy>(pair.left().as_ptr(), pair.right().as_ptr(), pair.len()) }
}
