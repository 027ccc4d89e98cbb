//! Virtual compositing: a border around an image without a new buffer.
//!
//! Two pieces cooperate:
//!
//! - [`EdgeFill`] answers "what color is at logical `(x, y)`" for *any*
//!   integer coordinate: the source pixel inside the source bounds, the fill
//!   color everywhere else.
//! - [`PaddedView`] shifts that sampler by `(left, top)` and reports a canvas
//!   grown by the [`Padding`] on each side.
//!
//! Nothing is decided at construction time about which pixels belong to the
//! border; the bounds check happens on every read. Every read is O(1) and
//! independent of the padding size, and the view holds only a reference to
//! its source, the padding and the fill color.
//!
//! ```text
//!          left          src.width           right
//!        +------+---------------------------+------+
//!   top  | fill |           fill            | fill |
//!        +------+---------------------------+------+
//!        | fill |  src.pixel(x-left, y-top) | fill |
//!        +------+---------------------------+------+
//! bottom | fill |           fill            | fill |
//!        +------+---------------------------+------+
//! ```

use crate::{CoreError, CoreResult, ImageSource, Rgb8};

// ============================================================================
// Padding
// ============================================================================

/// Pixel counts to add on each side of a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    /// Rows added above
    pub top: u32,
    /// Columns added to the left
    pub left: u32,
    /// Rows added below
    pub bottom: u32,
    /// Columns added to the right
    pub right: u32,
}

impl Padding {
    /// No padding.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates padding in `(top, left, bottom, right)` order.
    pub const fn new(top: u32, left: u32, bottom: u32, right: u32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same amount on every side.
    pub const fn uniform(amount: u32) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    /// Builds padding from signed values, rejecting negatives.
    ///
    /// # Errors
    ///
    /// [`CoreError::NegativePadding`] for the first negative side, or
    /// [`CoreError::InvalidDimensions`] if a value exceeds `u32`.
    pub fn from_signed(top: i64, left: i64, bottom: i64, right: i64) -> CoreResult<Self> {
        fn side(name: &'static str, value: i64) -> CoreResult<u32> {
            if value < 0 {
                return Err(CoreError::NegativePadding { side: name, value });
            }
            u32::try_from(value).map_err(|_| {
                CoreError::invalid_dimensions(0, 0, format!("{name} padding {value} exceeds u32"))
            })
        }
        Ok(Self::new(
            side("top", top)?,
            side("left", left)?,
            side("bottom", bottom)?,
            side("right", right)?,
        ))
    }

    /// `left + right`, widened to avoid overflow.
    pub const fn horizontal(&self) -> u64 {
        self.left as u64 + self.right as u64
    }

    /// `top + bottom`, widened to avoid overflow.
    pub const fn vertical(&self) -> u64 {
        self.top as u64 + self.bottom as u64
    }

    /// Whether no side receives any padding.
    pub const fn is_zero(&self) -> bool {
        self.top == 0 && self.left == 0 && self.bottom == 0 && self.right == 0
    }
}

// ============================================================================
// Edge-fill sampler
// ============================================================================

/// Samples a source at any integer coordinate, returning `fill` outside it.
#[derive(Debug, Clone, Copy)]
pub struct EdgeFill<S> {
    source: S,
    fill: Rgb8,
}

impl<S: ImageSource> EdgeFill<S> {
    /// Wraps `source` with `fill` as the out-of-bounds color.
    pub fn new(source: S, fill: Rgb8) -> Self {
        Self { source, fill }
    }

    /// Color at logical `(x, y)`. Total over all `i64` coordinates.
    #[inline]
    pub fn sample(&self, x: i64, y: i64) -> Rgb8 {
        if x < 0
            || y < 0
            || x >= self.source.width() as i64
            || y >= self.source.height() as i64
        {
            return self.fill;
        }
        self.source.pixel(x as u32, y as u32)
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The out-of-bounds color.
    pub fn fill(&self) -> Rgb8 {
        self.fill
    }
}

/// One-shot form of [`EdgeFill::sample`].
pub fn sample<S: ImageSource>(image: &S, fill: Rgb8, x: i64, y: i64) -> Rgb8 {
    EdgeFill::new(image, fill).sample(x, y)
}

// ============================================================================
// Padded view
// ============================================================================

/// A source surrounded by a solid border, computed on read.
///
/// # Example
///
/// ```rust
/// use polaframe_core::{ImageSource, PaddedView, Padding, Rgb8, Solid};
///
/// let src = Solid::new(10, 10, Rgb8::BLACK);
/// let view = PaddedView::new(&src, Padding::uniform(2), Rgb8::WHITE).unwrap();
/// assert_eq!(view.dimensions(), (14, 14));
/// assert_eq!(view.pixel(1, 5), Rgb8::WHITE);
/// assert_eq!(view.pixel(2, 2), Rgb8::BLACK);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PaddedView<S> {
    sampler: EdgeFill<S>,
    padding: Padding,
    width: u32,
    height: u32,
}

impl<S: ImageSource> PaddedView<S> {
    /// Builds the view.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidDimensions`] if the padded canvas would not fit
    /// in `u32`.
    pub fn new(source: S, padding: Padding, fill: Rgb8) -> CoreResult<Self> {
        let (w, h) = source.dimensions();
        let width = u32::try_from(w as u64 + padding.horizontal());
        let height = u32::try_from(h as u64 + padding.vertical());
        let (Ok(width), Ok(height)) = (width, height) else {
            return Err(CoreError::invalid_dimensions(
                w,
                h,
                format!("padding {padding:?} overflows the canvas size"),
            ));
        };
        Ok(Self {
            sampler: EdgeFill::new(source, fill),
            padding,
            width,
            height,
        })
    }

    /// The padding applied around the source.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// The border color.
    pub fn fill(&self) -> Rgb8 {
        self.sampler.fill()
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        self.sampler.source()
    }
}

impl<S: ImageSource> ImageSource for PaddedView<S> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Rgb8 {
        self.sampler.sample(
            x as i64 - self.padding.left as i64,
            y as i64 - self.padding.top as i64,
        )
    }
}

/// Builds a [`PaddedView`] of `image`.
pub fn make_view<S: ImageSource>(
    image: S,
    padding: Padding,
    fill: Rgb8,
) -> CoreResult<PaddedView<S>> {
    PaddedView::new(image, padding, fill)
}
