//! Result policies shared by every tier's scan loop.
//!
//! Each tier owns its chunking and tail handling; a policy only decides what
//! to report once a differing chunk has been found.

/// Fixed nonzero result for a mismatch whose position is not reported
pub const MISMATCH: i32 = 1;

/// What a scan returns when it finds a difference
pub trait ScanPolicy {
    /// Result for differing bytes `a != b` at the first mismatch.
    fn byte_mismatch(a: u8, b: u8) -> i32;

    /// Result for differing native-order words `a != b`, already masked.
    fn word_mismatch(a: u64, b: u64) -> i32;

    /// Result for differing bytes located by a lane scan.
    fn lane_mismatch(a: u8, b: u8) -> i32;
}

/// Ordering: sign follows unsigned lexicographic byte order
#[derive(Debug, Clone, Copy)]
pub struct OrderPolicy;

/// Equality: any nonzero value means "different"
#[derive(Debug, Clone, Copy)]
pub struct PresencePolicy;

#[inline(always)]
fn byte_difference(a: u8, b: u8) -> i32 {
    i32::from(a) - i32::from(b)
}

/// Reorder a native-endian word so that integer order matches byte order
/// in memory (first byte most significant).
#[inline(always)]
pub fn to_lexicographic(word: u64) -> u64 {
    u64::from_be(word)
}

impl ScanPolicy for OrderPolicy {
    #[inline(always)]
    fn byte_mismatch(a: u8, b: u8) -> i32 {
        byte_difference(a, b)
    }

    #[inline(always)]
    fn word_mismatch(a: u64, b: u64) -> i32 {
        // Only the sign is meaningful: a scaled difference would overflow i32
        if to_lexicographic(a) > to_lexicographic(b) {
            1
        } else {
            -1
        }
    }

    #[inline(always)]
    fn lane_mismatch(a: u8, b: u8) -> i32 {
        byte_difference(a, b)
    }
}

impl ScanPolicy for PresencePolicy {
    // One byte at a time there is nothing cheaper than the difference itself
    #[inline(always)]
    fn byte_mismatch(a: u8, b: u8) -> i32 {
        byte_difference(a, b)
    }

    #[inline(always)]
    fn word_mismatch(_a: u64, _b: u64) -> i32 {
        MISMATCH
    }

    #[inline(always)]
    fn lane_mismatch(_a: u8, _b: u8) -> i32 {
        MISMATCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(bytes: [u8; 8]) -> u64 {
        u64::from_ne_bytes(bytes)
    }

    #[test]
    fn test_byte_difference_is_unsigned() {
        assert_eq!(OrderPolicy::byte_mismatch(0x02, 0x03), -1);
        assert_eq!(OrderPolicy::byte_mismatch(0xFF, 0x00), 255);
        assert_eq!(OrderPolicy::byte_mismatch(0x00, 0xFF), -255);
        assert_eq!(PresencePolicy::byte_mismatch(0x80, 0x7F), 1);
    }

    #[test]
    fn test_word_order_follows_first_byte() {
        // Native integer order would say a > b on little-endian hosts
        let a = word([0x01, 0, 0, 0, 0, 0, 0, 0xFF]);
        let b = word([0x02, 0, 0, 0, 0, 0, 0, 0x00]);
        assert_eq!(OrderPolicy::word_mismatch(a, b), -1);
        assert_eq!(OrderPolicy::word_mismatch(b, a), 1);
    }

    #[test]
    fn test_to_lexicographic() {
        let w = word([0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
        assert_eq!(to_lexicographic(w), 0x1122_3344_5566_7788);
    }

    #[test]
    fn test_presence_sentinel() {
        assert_eq!(PresencePolicy::word_mismatch(1, 2), MISMATCH);
        assert_eq!(PresencePolicy::word_mismatch(2, 1), MISMATCH);
        assert_eq!(PresencePolicy::lane_mismatch(9, 3), MISMATCH);
        assert_ne!(MISMATCH, 0);
    }
}
