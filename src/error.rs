//! Error handling for the padcmp library
//!
//! Comparison itself never fails. Errors only arise where the padding
//! contract is checked: building spans, pairing them, and loading
//! configuration.

use thiserror::Error;

/// Main error type for the padcmp library
#[derive(Error, Debug)]
pub enum PadCmpError {
    /// Reading or writing a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid data or parameters
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },

    /// Logical length exceeds the backing storage
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Not enough readable bytes after the logical end
    #[error("Insufficient padding: required {required} bytes, available {available}")]
    InsufficientPadding {
        /// Trailing bytes the widest tier may read
        required: usize,
        /// Trailing bytes actually present
        available: usize,
    },

    /// Buffers of different logical length were paired
    #[error("Length mismatch: left {left} bytes, right {right} bytes")]
    LengthMismatch {
        /// Logical length of the left span
        left: usize,
        /// Logical length of the right span
        right: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl PadCmpError {
    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData { message: message.into() }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create an insufficient padding error
    pub fn insufficient_padding(required: usize, available: usize) -> Self {
        Self::InsufficientPadding { required, available }
    }

    /// Create a length mismatch error
    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Self::LengthMismatch { left, right }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Check if this is a recoverable error. Only I/O failures are worth
    /// retrying; the rest describe bad input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::InvalidData { .. } => false,
            Self::OutOfBounds { .. } => false,
            Self::InsufficientPadding { .. } => false,
            Self::LengthMismatch { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidData { .. } => "data",
            Self::OutOfBounds { .. } => "bounds",
            Self::InsufficientPadding { .. } => "padding",
            Self::LengthMismatch { .. } => "length",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PadCmpError>;

/// Check that `storage_len` covers `len` logical bytes followed by at least
/// `required` bytes of slack.
#[inline]
pub fn check_padding(len: usize, storage_len: usize, required: usize) -> Result<()> {
    if len > storage_len {
        return Err(PadCmpError::out_of_bounds(len, storage_len));
    }
    let available = storage_len - len;
    if available < required {
        return Err(PadCmpError::insufficient_padding(required, available));
    }
    Ok(())
}
