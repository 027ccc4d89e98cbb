//! # polaframe-layout
//!
//! Frame geometry: how many pixels go on which side of the stored image.
//!
//! # Modules
//!
//! - [`orientation`] - EXIF orientation and the displayed-to-stored side mapping
//! - [`padding`] - Proportional padding relative to the short side of the
//!   finished print
//!
//! # Example
//!
//! ```rust
//! use polaframe_layout::{plan, FrameSpec, Orientation};
//!
//! let spec = FrameSpec::default(); // 900 reference, 60/60/225/60
//! let frame = plan(1200, 1600, &spec, Orientation::Normal).unwrap();
//!
//! assert_eq!(frame.padding.left, 92);
//! assert_eq!(frame.padding.top, 117);
//! assert_eq!(frame.padding.bottom, 439);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod orientation;
pub mod padding;

pub use error::{LayoutError, LayoutResult};
pub use orientation::{remap, Orientation, Side};
pub use padding::{calculate, plan, FramePlan, FrameSpec};
