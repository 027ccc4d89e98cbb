//! Image-shaped types.
//!
//! - [`ImageSource`] - The read-only capability every image offers
//! - [`RgbImage`] - Owned RGB8 buffer, as produced by the decoder
//! - [`Solid`] - A single color of arbitrary size, no storage
//!
//! # Memory Layout
//!
//! [`RgbImage`] stores pixels in **row-major** order, top-to-bottom,
//! channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! # Used By
//!
//! - [`crate::view`] - Views wrap any [`ImageSource`]
//! - `polaframe-io` - Decoder output, encoder input

use crate::{CoreError, CoreResult, Rgb8};

/// Read-only pixel access.
///
/// Anything that can answer `pixel(x, y)` for `0 <= x < width`,
/// `0 <= y < height` is an image: a decoded file, a solid color, or another
/// virtual view. Implementations must be pure: the same coordinate always
/// yields the same color, which lets callers read in any order or from
/// several threads.
pub trait ImageSource: Sync {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Color at `(x, y)`.
    ///
    /// Callers must stay in bounds; implementations may panic otherwise.
    fn pixel(&self, x: u32, y: u32) -> Rgb8;

    /// Returns `(width, height)`.
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb8 {
        (**self).pixel(x, y)
    }
}

// ============================================================================
// RgbImage
// ============================================================================

/// Owned, decoded RGB8 raster.
///
/// # Example
///
/// ```rust
/// use polaframe_core::{ImageSource, Rgb8, RgbImage};
///
/// let mut img = RgbImage::new(2, 2);
/// img.set_pixel(1, 0, Rgb8::new(255, 0, 0));
/// assert_eq!(img.pixel(1, 0), Rgb8::new(255, 0, 0));
/// assert_eq!(img.pixel(0, 1), Rgb8::BLACK);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbImage {
    /// Creates a black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgb8::BLACK)
    }

    /// Creates an image with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgb8) -> Self {
        let count = width as usize * height as usize;
        let data = std::iter::repeat_n(color.to_array(), count)
            .flatten()
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps interleaved RGB8 data.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDimensions`] if `data` is not exactly
    /// `width * height * 3` bytes long.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> CoreResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| CoreError::invalid_dimensions(width, height, "size overflows usize"))?;
        if data.len() != expected {
            return Err(CoreError::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb8) {
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&color.to_array());
    }

    /// Raw interleaved bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the image, returning its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for image {}x{}",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * 3
    }
}

impl ImageSource for RgbImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Rgb8 {
        let i = self.offset(x, y);
        Rgb8::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }
}

impl std::fmt::Debug for RgbImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RgbImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Solid
// ============================================================================

/// An image of a single color. Holds no pixel storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solid {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// The color of every pixel
    pub color: Rgb8,
}

impl Solid {
    /// Creates a solid image.
    pub fn new(width: u32, height: u32, color: Rgb8) -> Self {
        Self {
            width,
            height,
            color,
        }
    }
}

impl ImageSource for Solid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, _x: u32, _y: u32) -> Rgb8 {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_validates_length() {
        assert!(RgbImage::from_raw(2, 2, vec![0; 12]).is_ok());
        let err = RgbImage::from_raw(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDimensions { width: 2, height: 2, .. }));
    }

    #[test]
    fn test_pixel_layout() {
        let data = (0..18).collect::<Vec<u8>>();
        let img = RgbImage::from_raw(3, 2, data).unwrap();
        assert_eq!(img.pixel(0, 0), Rgb8::new(0, 1, 2));
        assert_eq!(img.pixel(2, 0), Rgb8::new(6, 7, 8));
        assert_eq!(img.pixel(0, 1), Rgb8::new(9, 10, 11));
        assert_eq!(img.dimensions(), (3, 2));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_pixel_out_of_bounds_panics() {
        let img = RgbImage::new(2, 2);
        img.pixel(2, 0);
    }

    #[test]
    fn test_solid() {
        let s = Solid::new(5, 7, Rgb8::WHITE);
        assert_eq!(s.dimensions(), (5, 7));
        assert_eq!(s.pixel(4, 6), Rgb8::WHITE);
    }

    #[test]
    fn test_reference_is_a_source() {
        fn area<S: ImageSource>(s: S) -> u64 {
            s.width() as u64 * s.height() as u64
        }
        let img = RgbImage::new(4, 3);
        assert_eq!(area(&img), 12);
    }
}
