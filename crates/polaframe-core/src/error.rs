//! Error types for polaframe-core operations.
//!
//! # Overview
//!
//! The [`CoreError`] enum covers the failure modes of building buffers and
//! views:
//! - Buffer length not matching the declared dimensions
//! - Canvas dimensions that overflow `u32`
//! - Negative padding coming from signed configuration input
//! - Unparsable color strings
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`CoreError`] as the error type.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while building images and views.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Image dimensions are invalid or don't match the pixel data.
    ///
    /// # Example
    ///
    /// ```rust
    /// use polaframe_core::CoreError;
    ///
    /// let err = CoreError::invalid_dimensions(0, 100, "zero width");
    /// assert!(err.to_string().contains("0x100"));
    /// ```
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Why the dimensions were rejected
        reason: String,
    },

    /// A padding amount was negative.
    ///
    /// Shrinking the canvas would be a crop, which a frame never does.
    #[error("negative padding on {side} side: {value}")]
    NegativePadding {
        /// Name of the offending side
        side: &'static str,
        /// The rejected value
        value: i64,
    },

    /// A color string could not be parsed.
    #[error("invalid color '{0}': expected #RGB, #RRGGBB or a color name")]
    InvalidColor(String),
}

impl CoreError {
    /// Creates an [`InvalidDimensions`](CoreError::InvalidDimensions) error.
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
