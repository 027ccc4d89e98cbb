//! # polaframe-core
//!
//! Core types for adding a solid frame around a photograph.
//!
//! This crate provides the foundational types used by the rest of polaframe:
//!
//! - [`Rgb8`] - 8-bit RGB color value
//! - [`ImageSource`] - The capability every image-shaped thing offers
//!   (`width`, `height`, `pixel(x, y)`)
//! - [`RgbImage`] - Owned, decoded raster
//! - [`Solid`] - A single-color image of any size
//! - [`EdgeFill`], [`PaddedView`] - Lazy compositing of a border around a source
//!
//! ## Design Philosophy
//!
//! A padded image is never materialized. [`PaddedView`] answers each pixel
//! query by offsetting into its source and falling back to the fill color
//! outside of it:
//!
//! ```
//! use polaframe_core::{make_view, ImageSource, Padding, Rgb8, RgbImage};
//!
//! let photo = RgbImage::filled(4, 3, Rgb8::new(10, 20, 30));
//! let view = make_view(&photo, Padding::new(1, 2, 5, 2), Rgb8::WHITE).unwrap();
//!
//! assert_eq!((view.width(), view.height()), (8, 9));
//! assert_eq!(view.pixel(0, 0), Rgb8::WHITE);
//! assert_eq!(view.pixel(2, 1), Rgb8::new(10, 20, 30));
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! polaframe-core (this crate)
//!    ^
//!    |
//!    +-- polaframe-layout (orientation, padding calculation)
//!    +-- polaframe-io (JPEG codec, metadata)
//!    +-- polaframe-cli (pipeline driver)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize [`Padding`] and [`Rgb8`] (colors as `"#rrggbb"` strings)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;
pub mod view;

pub use error::{CoreError, CoreResult};
pub use image::{ImageSource, RgbImage, Solid};
pub use pixel::Rgb8;
pub use view::{make_view, sample, EdgeFill, Padding, PaddedView};
