//! # polaframe-io
//!
//! The codec and metadata collaborators of polaframe.
//!
//! - [`jpeg`] - Decode to [`RgbImage`](polaframe_core::RgbImage), encode any
//!   [`ImageSource`] row by row
//! - [`metadata`] - Pull EXIF / XMP / ICC / IPTC / comment segments out of a
//!   JPEG, read the orientation tag, put the segments back verbatim
//!
//! # Example
//!
//! ```rust,ignore
//! use polaframe_core::{make_view, Padding, Rgb8};
//!
//! let decoded = polaframe_io::read("photo.jpg")?;
//! let view = make_view(&decoded.image, Padding::uniform(40), Rgb8::WHITE)?;
//! polaframe_io::write("framed.jpg", &view, &decoded.metadata, 100)?;
//! ```

#![warn(missing_docs)]

mod error;
pub mod jpeg;
pub mod metadata;

pub use error::{IoError, IoResult};
pub use jpeg::{Decoded, JpegReader, JpegWriter, JpegWriterOptions, Probe};
pub use metadata::{BlockKind, JpegMetadata, MetadataBlock};

use polaframe_core::ImageSource;
use std::path::Path;

/// Reads a JPEG file and its metadata.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Decoded> {
    JpegReader::new().read(path)
}

/// Reads a JPEG's dimensions and metadata without decoding pixels.
pub fn probe<P: AsRef<Path>>(path: P) -> IoResult<Probe> {
    JpegReader::new().probe(path)
}

/// Encodes `source` at `quality` and writes it with `metadata` re-attached.
pub fn write<P: AsRef<Path>, S: ImageSource>(
    path: P,
    source: &S,
    metadata: &JpegMetadata,
    quality: u8,
) -> IoResult<()> {
    JpegWriter::with_options(JpegWriterOptions { quality }).write(path, source, metadata)
}
