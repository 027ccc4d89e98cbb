//! Proportional frame padding.
//!
//! Margins are specified the way instant film is: relative to the short side
//! of the *finished* print. A [`FrameSpec`] gives a `reference_length` for
//! that short side and the four base margins in the same unit; the defaults
//! (900 with 60/60/60 and a 225 bottom) reproduce the classic
//! proportions of a Polaroid print.
//!
//! # Algorithm
//!
//! 1. With `fill_squared`, the short source axis is first padded on both
//!    sides by `(long - short) / 2` so the photo becomes square.
//! 2. Each axis is scaled into the reference frame,
//!    `reference * dim / (reference - pad_a - pad_b)`, and the axis with the
//!    smaller result is the finished print's short side (ties pick width).
//! 3. Every base pad becomes `base * short_side / length` pixels (floor),
//!    where `length` is the reference length minus the two pads of the pad's
//!    own axis: `reference - left - right` for left and right,
//!    `reference - top - bottom` for top and bottom.
//! 4. The square-fill pads from step 1 are added on top.
//!
//! Integer (floor) division is used throughout; results are reproducible
//! bit for bit.

use crate::{LayoutError, LayoutResult, Orientation};
use polaframe_core::Padding;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Frame proportions.
///
/// # Example
///
/// ```rust
/// use polaframe_layout::FrameSpec;
///
/// let square = FrameSpec {
///     fill_squared: true,
///     ..Default::default()
/// };
/// assert!(square.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameSpec {
    /// Length of the finished short side, in the same unit as the pads.
    pub reference_length: u32,
    /// Base margin above the photo.
    pub top: u32,
    /// Base margin left of the photo.
    pub left: u32,
    /// Base margin below the photo.
    pub bottom: u32,
    /// Base margin right of the photo.
    pub right: u32,
    /// Pad the short source axis until the photo is square first.
    pub fill_squared: bool,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            reference_length: 900,
            top: 60,
            left: 60,
            bottom: 225,
            right: 60,
            fill_squared: false,
        }
    }
}

impl FrameSpec {
    /// Base pads as a [`Padding`].
    pub fn base(&self) -> Padding {
        Padding::new(self.top, self.left, self.bottom, self.right)
    }

    /// Same spec with the base pads replaced.
    pub fn with_base(self, base: Padding) -> Self {
        Self {
            top: base.top,
            left: base.left,
            bottom: base.bottom,
            right: base.right,
            ..self
        }
    }

    /// Checks that both pad pairs leave a positive printable length.
    ///
    /// # Errors
    ///
    /// [`LayoutError::DegenerateReference`] naming the failing axis.
    pub fn validate(&self) -> LayoutResult<()> {
        let reference = self.reference_length as u64;
        if reference <= self.left as u64 + self.right as u64 {
            return Err(LayoutError::DegenerateReference {
                reference_length: self.reference_length,
                axis: "horizontal",
                first: self.left,
                second: self.right,
            });
        }
        if reference <= self.top as u64 + self.bottom as u64 {
            return Err(LayoutError::DegenerateReference {
                reference_length: self.reference_length,
                axis: "vertical",
                first: self.top,
                second: self.bottom,
            });
        }
        Ok(())
    }
}

/// Computes final pixel padding for a stored `width x height` image.
///
/// The base pads in `spec` are applied to the stored buffer as given; use
/// [`plan`] to account for EXIF orientation first.
///
/// # Errors
///
/// - [`LayoutError::DegenerateReference`] if `spec` fails [`FrameSpec::validate`]
/// - [`LayoutError::InvalidDimensions`] for an empty image
/// - [`LayoutError::Overflow`] if a pad does not fit in `u32`
///
/// # Example
///
/// ```rust
/// use polaframe_core::Padding;
/// use polaframe_layout::{calculate, FrameSpec};
///
/// let pad = calculate(1200, 1600, &FrameSpec::default()).unwrap();
/// assert_eq!(pad, Padding::new(117, 92, 439, 92));
/// ```
pub fn calculate(width: u32, height: u32, spec: &FrameSpec) -> LayoutResult<Padding> {
    trace!(width, height, ?spec, "padding::calculate");
    spec.validate()?;
    if width == 0 || height == 0 {
        return Err(LayoutError::InvalidDimensions(format!(
            "image is {width}x{height}"
        )));
    }

    let reference = spec.reference_length as u64;
    let (mut w, mut h) = (width as u64, height as u64);

    // [top, left, bottom, right]
    let mut square = [0u64; 4];
    if spec.fill_squared {
        if h >= w {
            let pad = (h - w) / 2;
            square[1] = pad;
            square[3] = pad;
            w += 2 * pad;
        } else {
            let pad = (w - h) / 2;
            square[0] = pad;
            square[2] = pad;
            h += 2 * pad;
        }
    }

    let horizontal_length = reference - spec.left as u64 - spec.right as u64;
    let vertical_length = reference - spec.top as u64 - spec.bottom as u64;

    let width_is_short =
        reference * w / horizontal_length <= reference * h / vertical_length;
    let short_side = if width_is_short { w } else { h };
    debug!(
        width_is_short,
        short_side,
        horizontal_length,
        vertical_length,
        "chose short side of finished print"
    );

    // Each pad scales over the printable length of its own axis.
    let scaled = |base: u32, length: u64, extra: u64, side: &str| -> LayoutResult<u32> {
        let total = base as u64 * short_side / length + extra;
        u32::try_from(total).map_err(|_| {
            LayoutError::Overflow(format!("{side} padding {total} exceeds u32"))
        })
    };

    Ok(Padding::new(
        scaled(spec.top, vertical_length, square[0], "top")?,
        scaled(spec.left, horizontal_length, square[1], "left")?,
        scaled(spec.bottom, vertical_length, square[2], "bottom")?,
        scaled(spec.right, horizontal_length, square[3], "right")?,
    ))
}

/// Everything decided about one framed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FramePlan {
    /// Orientation the stored buffer is displayed with.
    pub orientation: Orientation,
    /// Stored source `(width, height)`.
    pub source: (u32, u32),
    /// Base pads after moving them onto stored edges.
    pub base: Padding,
    /// Final pixel padding on the stored buffer.
    pub padding: Padding,
    /// Stored output `(width, height)`.
    pub canvas: (u32, u32),
}

impl FramePlan {
    /// Output size as a viewer will show it.
    pub fn display_canvas(&self) -> (u32, u32) {
        self.orientation
            .display_dimensions(self.canvas.0, self.canvas.1)
    }
}

/// Remaps `spec`'s pads for `orientation`, then calculates padding.
///
/// Validation happens before anything else, so a bad spec is reported
/// regardless of the image.
pub fn plan(
    width: u32,
    height: u32,
    spec: &FrameSpec,
    orientation: Orientation,
) -> LayoutResult<FramePlan> {
    spec.validate()?;
    let base = orientation.remap(spec.base());
    let padding = calculate(width, height, &spec.with_base(base))?;

    let canvas_w = u32::try_from(width as u64 + padding.horizontal());
    let canvas_h = u32::try_from(height as u64 + padding.vertical());
    let (Ok(canvas_w), Ok(canvas_h)) = (canvas_w, canvas_h) else {
        return Err(LayoutError::Overflow(format!(
            "canvas for {width}x{height} with {padding:?} exceeds u32"
        )));
    };

    debug!(
        orientation = orientation.exif_value(),
        ?base,
        ?padding,
        canvas_w,
        canvas_h,
        "frame planned"
    );

    Ok(FramePlan {
        orientation,
        source: (width, height),
        base,
        padding,
        canvas: (canvas_w, canvas_h),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(reference_length: u32, t: u32, l: u32, b: u32, r: u32) -> FrameSpec {
        FrameSpec {
            reference_length,
            top: t,
            left: l,
            bottom: b,
            right: r,
            fill_squared: false,
        }
    }

    #[test]
    fn test_portrait_reference_scenario() {
        let pad = calculate(1200, 1600, &FrameSpec::default()).unwrap();
        // width is short: 900*1200/780 = 1384 < 900*1600/615 = 2341
        assert_eq!(pad.left, 60 * 1200 / 780);
        assert_eq!(pad.top, 60 * 1200 / 615);
        assert_eq!(pad.left, 92);
        assert_eq!(pad.right, 92);
        assert_eq!(pad.top, 117);
        assert_eq!(pad.bottom, 439);
    }

    #[test]
    fn test_landscape_picks_height() {
        let pad = calculate(1600, 1000, &spec(900, 60, 60, 60, 60)).unwrap();
        // 900*1600/780 = 1846 > 900*1000/780 = 1153, short side = height
        assert_eq!(pad, Padding::uniform(60 * 1000 / 780));
    }

    #[test]
    fn test_short_side_is_of_finished_print() {
        // Source is square but the wide bottom margin makes the finished
        // print taller than wide, so width is the short side.
        let pad = calculate(1000, 1000, &FrameSpec::default()).unwrap();
        assert_eq!(pad.left, 60 * 1000 / 780);
        assert_eq!(pad.top, 60 * 1000 / 615);
        assert_eq!(pad.bottom, 225 * 1000 / 615);
    }

    #[test]
    fn test_fill_squared_alone() {
        let mut s = spec(900, 0, 0, 0, 0);
        s.fill_squared = true;
        assert_eq!(calculate(1000, 500, &s).unwrap(), Padding::new(250, 0, 250, 0));
        assert_eq!(calculate(500, 1000, &s).unwrap(), Padding::new(0, 250, 0, 250));
        assert_eq!(calculate(640, 640, &s).unwrap(), Padding::ZERO);
    }

    #[test]
    fn test_fill_squared_odd_difference_floors() {
        let mut s = spec(900, 0, 0, 0, 0);
        s.fill_squared = true;
        assert_eq!(calculate(101, 100, &s).unwrap(), Padding::ZERO);
        assert_eq!(calculate(103, 100, &s).unwrap(), Padding::new(1, 0, 1, 0));
    }

    #[test]
    fn test_fill_squared_with_frame() {
        let s = FrameSpec {
            fill_squared: true,
            ..Default::default()
        };
        let pad = calculate(1000, 600, &s).unwrap();
        // squared to 1000x1000, then width is short (1153 <= 1463)
        assert_eq!(pad.top, 200 + 60 * 1000 / 615);
        assert_eq!(pad.bottom, 200 + 225 * 1000 / 615);
        assert_eq!(pad.left, 60 * 1000 / 780);
    }

    #[test]
    fn test_scale_consistency() {
        for (w, h) in [(1200, 1600), (1600, 1200), (777, 333), (1000, 1000)] {
            for s in [FrameSpec::default(), spec(100, 3, 5, 11, 7), spec(50, 0, 0, 40, 0)] {
                let doubled = FrameSpec {
                    reference_length: s.reference_length * 2,
                    top: s.top * 2,
                    left: s.left * 2,
                    bottom: s.bottom * 2,
                    right: s.right * 2,
                    ..s
                };
                assert_eq!(
                    calculate(w, h, &s).unwrap(),
                    calculate(w, h, &doubled).unwrap(),
                    "{w}x{h} {s:?}"
                );
            }
        }
    }

    #[test]
    fn test_degenerate_reference_rejected() {
        let err = calculate(10, 10, &spec(120, 0, 60, 0, 60)).unwrap_err();
        assert_eq!(
            err,
            LayoutError::DegenerateReference {
                reference_length: 120,
                axis: "horizontal",
                first: 60,
                second: 60,
            }
        );
        let err = spec(100, 50, 0, 60, 0).validate().unwrap_err();
        assert!(matches!(err, LayoutError::DegenerateReference { axis: "vertical", .. }));
    }

    #[test]
    fn test_empty_image_rejected() {
        let err = calculate(0, 10, &FrameSpec::default()).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidDimensions(_)));
    }

    #[test]
    fn test_canvas_overflow_reported() {
        let err = plan(u32::MAX, u32::MAX, &FrameSpec::default(), Orientation::Normal).unwrap_err();
        assert!(matches!(err, LayoutError::Overflow(_)));
    }

    #[test]
    fn test_plan_rotate90_moves_bottom_margin() {
        let frame = plan(1200, 1600, &FrameSpec::default(), Orientation::Rotate90).unwrap();
        // displayed bottom lands on the stored right edge
        assert_eq!(frame.base, Padding::new(60, 60, 60, 225));
        // 900*1200/615 = 1756 < 900*1600/780 = 1846, width is short
        assert_eq!(frame.padding, Padding::new(92, 117, 92, 439));
        assert_eq!(frame.canvas, (1200 + 117 + 439, 1600 + 92 + 92));
        assert_eq!(frame.display_canvas(), (1784, 1756));
    }

    #[test]
    fn test_plan_normal_matches_calculate() {
        let s = FrameSpec::default();
        let frame = plan(1200, 1600, &s, Orientation::Normal).unwrap();
        assert_eq!(frame.padding, calculate(1200, 1600, &s).unwrap());
        assert_eq!(frame.canvas, (1384, 2156));
    }

    #[test]
    fn test_spec_from_partial_yaml() {
        let s: FrameSpec = serde_yaml::from_str("bottom: 300\nfill_squared: true\n").unwrap();
        assert_eq!(s.bottom, 300);
        assert_eq!(s.reference_length, 900);
        assert!(s.fill_squared);
    }
}
