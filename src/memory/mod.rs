//! Memory types carrying the overread contract
//!
//! The comparators never allocate. Callers hand them [`PaddedSlice`] views,
//! either over storage they manage themselves or over a [`PaddedBuf`].

pub mod padded;

pub use padded::{PaddedBuf, PaddedPair, PaddedSlice, LANE_PADDING, PADDING, WORD_PADDING};
