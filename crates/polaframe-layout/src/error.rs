//! Error types for frame layout.

use thiserror::Error;

/// Error type for frame layout computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The reference length does not exceed a pair of opposing pads.
    ///
    /// The printable area along that axis would be zero or negative, so no
    /// proportional scale exists.
    #[error(
        "reference length {reference_length} must exceed {axis} padding {first} + {second}"
    )]
    DegenerateReference {
        /// Configured reference length
        reference_length: u32,
        /// `"horizontal"` or `"vertical"`
        axis: &'static str,
        /// Left or top base pad
        first: u32,
        /// Right or bottom base pad
        second: u32,
    },

    /// Image has no pixels.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A computed pad or canvas size does not fit in `u32`.
    #[error("padding overflow: {0}")]
    Overflow(String),
}

/// Result type for layout computation.
pub type LayoutResult<T> = Result<T, LayoutError>;
