//! EXIF orientation and padding remapping.
//!
//! Padding is authored as a viewer sees the photo: the wide margin goes at
//! the *displayed* bottom. The pixel buffer, however, is stored unrotated and
//! the viewer applies the EXIF orientation tag when showing it. Since the
//! frame is added to the stored buffer, each displayed side's amount has to
//! be moved to whichever stored edge ends up on that side.
//!
//! The EXIF tag says exactly that, per value, by naming the displayed side
//! of the stored 0th row and 0th column:
//!
//! ```text
//! code | 0th row | 0th column
//! -----+---------+-----------
//!   1  | top     | left
//!   2  | top     | right
//!   3  | bottom  | right
//!   4  | bottom  | left
//!   5  | left    | top
//!   6  | right   | top
//!   7  | right   | bottom
//!   8  | left    | bottom
//! ```
//!
//! The stored top edge *is* the 0th row and the stored left edge *is* the
//! 0th column, so [`Orientation::remap`] reads the table directly instead of
//! chaining swaps.

use polaframe_core::Padding;
use serde::{Deserialize, Serialize};

/// A side of an image as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Top edge
    Top,
    /// Left edge
    Left,
    /// Bottom edge
    Bottom,
    /// Right edge
    Right,
}

impl Side {
    /// The side across from this one.
    pub const fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Amount `padding` assigns to this side.
    pub const fn of(self, padding: &Padding) -> u32 {
        match self {
            Side::Top => padding.top,
            Side::Left => padding.left,
            Side::Bottom => padding.bottom,
            Side::Right => padding.right,
        }
    }
}

/// EXIF orientation (TIFF tag 274).
///
/// Describes how a viewer transforms the stored pixels for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// 1: stored as displayed.
    #[default]
    Normal = 1,
    /// 2: mirrored left-right.
    MirrorHorizontal = 2,
    /// 3: rotated 180 degrees.
    Rotate180 = 3,
    /// 4: mirrored top-bottom.
    MirrorVertical = 4,
    /// 5: reflected over the main diagonal.
    Transpose = 5,
    /// 6: displayed after rotating 90 degrees clockwise.
    Rotate90 = 6,
    /// 7: reflected over the anti-diagonal.
    Transverse = 7,
    /// 8: displayed after rotating 270 degrees clockwise.
    Rotate270 = 8,
}

impl Orientation {
    /// All orientations in EXIF order.
    pub const ALL: [Self; 8] = [
        Self::Normal,
        Self::MirrorHorizontal,
        Self::Rotate180,
        Self::MirrorVertical,
        Self::Transpose,
        Self::Rotate90,
        Self::Transverse,
        Self::Rotate270,
    ];

    /// From an EXIF value. Anything outside `1..=8` is [`Normal`](Self::Normal).
    pub fn from_exif(value: u32) -> Self {
        match value {
            1..=8 => Self::ALL[value as usize - 1],
            _ => Self::Normal,
        }
    }

    /// From an optional EXIF value; absent metadata means [`Normal`](Self::Normal).
    pub fn from_exif_opt(value: Option<u32>) -> Self {
        value.map(Self::from_exif).unwrap_or_default()
    }

    /// EXIF tag value (1-8).
    pub fn exif_value(self) -> u8 {
        self as u8
    }

    /// Displayed sides of the stored 0th row and 0th column.
    pub const fn stored_edges(self) -> (Side, Side) {
        match self {
            Self::Normal => (Side::Top, Side::Left),
            Self::MirrorHorizontal => (Side::Top, Side::Right),
            Self::Rotate180 => (Side::Bottom, Side::Right),
            Self::MirrorVertical => (Side::Bottom, Side::Left),
            Self::Transpose => (Side::Left, Side::Top),
            Self::Rotate90 => (Side::Right, Side::Top),
            Self::Transverse => (Side::Right, Side::Bottom),
            Self::Rotate270 => (Side::Left, Side::Bottom),
        }
    }

    /// Whether the displayed image has width and height swapped.
    pub fn swaps_axes(self) -> bool {
        self.exif_value() >= 5
    }

    /// Displayed `(width, height)` of a stored `width x height` buffer.
    pub fn display_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Moves displayed-side padding onto the stored edges.
    ///
    /// The result, applied to the stored buffer and then shown through this
    /// orientation, puts `displayed.bottom` at the displayed bottom, and so
    /// on for every side.
    pub fn remap(self, displayed: Padding) -> Padding {
        let (row0, col0) = self.stored_edges();
        Padding::new(
            row0.of(&displayed),
            col0.of(&displayed),
            row0.opposite().of(&displayed),
            col0.opposite().of(&displayed),
        )
    }
}

/// Remaps `base` for an optional EXIF orientation code.
pub fn remap(base: Padding, code: Option<u32>) -> Padding {
    Orientation::from_exif_opt(code).remap(base)
}
