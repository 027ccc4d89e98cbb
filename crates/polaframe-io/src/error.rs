//! Error types for I/O operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid or corrupted file.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Image too large for the JPEG format.
    #[error("{width}x{height} exceeds the JPEG limit of 65535 pixels per side")]
    DimensionTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Quality outside 1-100.
    #[error("invalid JPEG quality {0}, expected 1-100")]
    InvalidQuality(u8),

    /// A metadata block is present but cannot be parsed.
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),

    /// Format-specific error.
    #[error("format error: {0}")]
    Format(String),

    /// Decoded buffer rejected by the core types.
    #[error(transparent)]
    Core(#[from] polaframe_core::CoreError),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
