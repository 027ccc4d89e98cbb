//! JPEG decoding and encoding.
//!
//! # Overview
//!
//! - [`JpegReader`] decodes to an 8-bit RGB [`RgbImage`] with `jpeg-decoder`,
//!   expanding grayscale and converting CMYK, and lifts the metadata
//!   segments out of the same bytes.
//! - [`JpegWriter`] encodes any [`ImageSource`] with `jpeg-encoder`. Rows are
//!   pulled from the source on demand through the encoder's
//!   [`ImageBuffer`](jpeg_encoder::ImageBuffer) hook, so a virtual view is
//!   encoded without ever being materialized.
//!
//! Output files are written to a temporary sibling and renamed into place,
//! so a failed encode never leaves a partial file behind.
//!
//! # Example
//!
//! ```rust,ignore
//! use polaframe_io::jpeg::{JpegReader, JpegWriter, JpegWriterOptions};
//!
//! let decoded = JpegReader::new().read("photo.jpg")?;
//! let writer = JpegWriter::with_options(JpegWriterOptions { quality: 95 });
//! writer.write("copy.jpg", &decoded.image, &decoded.metadata)?;
//! ```

use crate::{IoError, IoResult, JpegMetadata};
use jpeg_encoder::{Encoder, ImageBuffer, JpegColorType};
use polaframe_core::{ImageSource, RgbImage};
use std::io::{BufReader, Cursor, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Largest width or height a baseline JPEG can describe.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

// ============================================================================
// Reader
// ============================================================================

/// A decoded JPEG: pixels plus the metadata segments of the file.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// Decoded pixels in stored (unrotated) order.
    pub image: RgbImage,
    /// Metadata segments of the source file.
    pub metadata: JpegMetadata,
}

/// Header facts of a JPEG, gathered without decoding pixels.
#[derive(Debug, Clone)]
pub struct Probe {
    /// Stored width.
    pub width: u32,
    /// Stored height.
    pub height: u32,
    /// Metadata segments of the file.
    pub metadata: JpegMetadata,
}

/// JPEG file reader.
#[derive(Debug, Clone, Default)]
pub struct JpegReader;

impl JpegReader {
    /// Creates a reader.
    pub fn new() -> Self {
        Self
    }

    /// Reads and decodes a JPEG file.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<Decoded> {
        let path = path.as_ref();
        trace!(path = %path.display(), "JpegReader::read");
        let data = std::fs::read(path)?;
        self.read_from_memory(&data)
    }

    /// Reads dimensions and metadata only.
    pub fn probe<P: AsRef<Path>>(&self, path: P) -> IoResult<Probe> {
        let data = std::fs::read(path.as_ref())?;
        self.probe_memory(&data)
    }

    /// In-memory form of [`probe`](Self::probe).
    pub fn probe_memory(&self, data: &[u8]) -> IoResult<Probe> {
        let metadata = JpegMetadata::extract(data)?;
        let mut decoder = jpeg_decoder::Decoder::new(Cursor::new(data));
        decoder
            .read_info()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;
        Ok(Probe {
            width: info.width as u32,
            height: info.height as u32,
            metadata,
        })
    }

    /// Decodes a JPEG held in memory.
    pub fn read_from_memory(&self, data: &[u8]) -> IoResult<Decoded> {
        let metadata = JpegMetadata::extract(data)?;

        let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(Cursor::new(data)));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let width = info.width as u32;
        let height = info.height as u32;

        let rgb = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => pixels,
            jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
            jpeg_decoder::PixelFormat::L16 => pixels
                .chunks_exact(2)
                .flat_map(|l16| [l16[0], l16[0], l16[0]])
                .collect(),
            jpeg_decoder::PixelFormat::CMYK32 => pixels
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let k = 255 - cmyk[3] as u16;
                    let ch = |c: u8| ((255 - c as u16) * k / 255) as u8;
                    [ch(cmyk[0]), ch(cmyk[1]), ch(cmyk[2])]
                })
                .collect(),
        };

        debug!(
            width,
            height,
            pixel_format = ?info.pixel_format,
            metadata_blocks = metadata.blocks().len(),
            "decoded JPEG"
        );

        Ok(Decoded {
            image: RgbImage::from_raw(width, height, rgb)?,
            metadata,
        })
    }
}

// ============================================================================
// Writer
// ============================================================================

/// Options for writing JPEG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegWriterOptions {
    /// Quality level 1-100. Default: 100, so the frame adds no visible loss
    /// beyond the unavoidable re-encode.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self { quality: 100 }
    }
}

/// JPEG file writer.
#[derive(Debug, Clone, Default)]
pub struct JpegWriter {
    options: JpegWriterOptions,
}

/// Feeds the encoder one row of an [`ImageSource`] at a time.
struct RowFeeder<'a, S> {
    source: &'a S,
    width: u16,
    height: u16,
}

impl<S: ImageSource> ImageBuffer for RowFeeder<'_, S> {
    fn get_jpeg_color_type(&self) -> JpegColorType {
        JpegColorType::Ycbcr
    }

    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn fill_buffers(&self, y: u16, buffers: &mut [Vec<u8>; 4]) {
        for x in 0..self.width as u32 {
            let px = self.source.pixel(x, y as u32);
            let (luma, cb, cr) = jpeg_encoder::rgb_to_ycbcr(px.r, px.g, px.b);
            buffers[0].push(luma);
            buffers[1].push(cb);
            buffers[2].push(cr);
        }
    }
}

impl JpegWriter {
    /// Creates a writer with default options (quality 100).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with custom options.
    pub fn with_options(options: JpegWriterOptions) -> Self {
        Self { options }
    }

    /// The writer's options.
    pub fn options(&self) -> &JpegWriterOptions {
        &self.options
    }

    /// Encodes `source` and splices `metadata` into the result.
    pub fn write_to_memory<S: ImageSource>(
        &self,
        source: &S,
        metadata: &JpegMetadata,
    ) -> IoResult<Vec<u8>> {
        let quality = self.options.quality;
        if !(1..=100).contains(&quality) {
            return Err(IoError::InvalidQuality(quality));
        }

        let (width, height) = source.dimensions();
        let (Ok(w16), Ok(h16)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(IoError::DimensionTooLarge { width, height });
        };
        if width == 0 || height == 0 {
            return Err(IoError::EncodeError(format!("cannot encode {width}x{height} image")));
        }

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, quality);
        encoder
            .encode_image(RowFeeder {
                source,
                width: w16,
                height: h16,
            })
            .map_err(|e| IoError::EncodeError(e.to_string()))?;

        debug!(width, height, quality, bytes = buffer.len(), "encoded JPEG");
        metadata.embed(&buffer)
    }

    /// Encodes `source` to `path`, replacing it atomically.
    pub fn write<P: AsRef<Path>, S: ImageSource>(
        &self,
        path: P,
        source: &S,
        metadata: &JpegMetadata,
    ) -> IoResult<()> {
        let path = path.as_ref();
        trace!(path = %path.display(), "JpegWriter::write");
        let data = self.write_to_memory(source, metadata)?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| IoError::Io(e.error))?;
        Ok(())
    }
}
