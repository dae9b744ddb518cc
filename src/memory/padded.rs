//! # Padded Spans
//!
//! Byte regions whose logical end is followed by readable slack. The word and
//! lane comparators load whole chunks and may touch up to [`PADDING`] - 1
//! bytes past the logical end; these types make that requirement part of the
//! signature instead of a comment on a raw pointer.
//!
//! All padding bytes are initialized. Their value is unspecified and never
//! influences a comparison result.

use crate::error::{check_padding, PadCmpError, Result};

/// Trailing bytes the word tier may read past the logical end
pub const WORD_PADDING: usize = 8;

/// Trailing bytes the lane tier may read past the logical end
pub const LANE_PADDING: usize = 16;

/// Trailing slack every [`PaddedSlice`] guarantees (the widest tier)
pub const PADDING: usize = LANE_PADDING;

/// Read-only view over `len` logical bytes backed by at least
/// `len + PADDING` readable bytes.
#[derive(Debug, Clone, Copy)]
pub struct PaddedSlice<'a> {
    storage: &'a [u8],
    len: usize,
}

impl<'a> PaddedSlice<'a> {
    /// Wrap `storage`, treating its first `len` bytes as the logical content.
    ///
    /// Fails if `len` exceeds the storage or fewer than [`PADDING`] bytes
    /// follow it.
    pub fn new(storage: &'a [u8], len: usize) -> Result<Self> {
        check_padding(len, storage.len(), PADDING)?;
        Ok(Self { storage, len })
    }

    /// Wrap `storage` whose last [`PADDING`] bytes are slack.
    pub fn from_storage(storage: &'a [u8]) -> Result<Self> {
        let len = storage
            .len()
            .checked_sub(PADDING)
            .ok_or_else(|| PadCmpError::insufficient_padding(PADDING, storage.len()))?;
        Ok(Self { storage, len })
    }

    /// Logical length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the logical content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The logical bytes, without padding
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.storage[..self.len]
    }

    /// Number of readable bytes after the logical end
    #[inline]
    pub fn padding(&self) -> usize {
        self.storage.len() - self.len
    }

    /// Pointer to the first logical byte.
    ///
    /// At least `len() + PADDING` bytes starting here are readable.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.storage.as_ptr()
    }
}

/// Two padded spans of identical logical length.
#[derive(Debug, Clone, Copy)]
pub struct PaddedPair<'a> {
    left: PaddedSlice<'a>,
    right: PaddedSlice<'a>,
}

impl<'a> PaddedPair<'a> {
    /// Pair two spans, rejecting unequal lengths.
    pub fn new(left: PaddedSlice<'a>, right: PaddedSlice<'a>) -> Result<Self> {
        if left.len() != right.len() {
            return Err(PadCmpError::length_mismatch(left.len(), right.len()));
        }
        Ok(Self { left, right })
    }

    /// Pair the first `len` bytes of two padded storages.
    pub fn from_storage(left: &'a [u8], right: &'a [u8], len: usize) -> Result<Self> {
        Self::new(PaddedSlice::new(left, len)?, PaddedSlice::new(right, len)?)
    }

    /// Shared logical length
    #[inline]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether both spans are empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Left operand
    #[inline]
    pub fn left(&self) -> PaddedSlice<'a> {
        self.left
    }

    /// Right operand
    #[inline]
    pub fn right(&self) -> PaddedSlice<'a> {
        self.right
    }

    /// The same pair with operands exchanged
    #[inline]
    pub fn swapped(&self) -> Self {
        Self { left: self.right, right: self.left }
    }
}

/// Heap buffer that always carries [`PADDING`] initialized bytes after its
/// logical content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedBuf {
    storage: Vec<u8>,
    len: usize,
}

impl PaddedBuf {
    /// Buffer of `len` zero bytes
    pub fn zeroed(len: usize) -> Result<Self> {
        let total = Self::storage_len(len)?;
        Ok(Self { storage: vec![0u8; total], len })
    }

    /// Copy `data` into a new buffer with zeroed padding
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::with_fill(data, 0)
    }

    /// Copy `data` into a new buffer whose padding is `fill`
    pub fn with_fill(data: &[u8], fill: u8) -> Result<Self> {
        let total = Self::storage_len(data.len())?;
        let mut storage = Vec::with_capacity(total);
        storage.extend_from_slice(data);
        storage.resize(total, fill);
        Ok(Self { storage, len: data.len() })
    }

    fn storage_len(len: usize) -> Result<usize> {
        len.checked_add(PADDING)
            .ok_or_else(|| PadCmpError::invalid_data("Capacity overflow"))
    }

    /// Logical length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the logical content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Logical content
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Mutable logical content
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.storage[..self.len]
    }

    /// Mutable padding bytes. Whatever is written here must not change any
    /// comparison result.
    #[inline]
    pub fn padding_mut(&mut self) -> &mut [u8] {
        &mut self.storage[self.len..]
    }

    /// Borrow as a padded span
    #[inline]
    pub fn as_padded(&self) -> PaddedSlice<'_> {
        PaddedSlice { storage: &self.storage, len: self.len }
    }
}

impl<'a> From<&'a PaddedBuf> for PaddedSlice<'a> {
    fn from(buf: &'a PaddedBuf) -> Self {
        buf.as_padded()
    }
}
