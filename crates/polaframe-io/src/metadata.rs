//! JPEG metadata segments.
//!
//! A framed photo should carry the same metadata as the original. Rather
//! than decoding and re-serializing each container, the segments are lifted
//! out of the source file byte for byte and spliced into the new file:
//!
//! | marker | signature | kind |
//! |---|---|---|
//! | APP1 (`FFE1`) | `Exif\0\0` | [`BlockKind::Exif`] |
//! | APP1 (`FFE1`) | `http://ns.adobe.com/xap/1.0/\0` | [`BlockKind::Xmp`] |
//! | APP2 (`FFE2`) | `ICC_PROFILE\0` | [`BlockKind::Icc`] |
//! | APP13 (`FFED`) | `Photoshop 3.0\0` | [`BlockKind::Iptc`] |
//! | COM (`FFFE`) | - | [`BlockKind::Comment`] |
//!
//! The only field ever interpreted is the EXIF orientation tag, read with
//! [`kamadak-exif`](exif).

use crate::{IoError, IoResult};
use tracing::{debug, trace};

const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const APP2: u8 = 0xE2;
const APP13: u8 = 0xED;
const COM: u8 = 0xFE;

const EXIF_SIGNATURE: &[u8] = b"Exif\0\0";
const XMP_SIGNATURE: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";
const ICC_SIGNATURE: &[u8] = b"ICC_PROFILE\0";
const IPTC_SIGNATURE: &[u8] = b"Photoshop 3.0\0";

/// Largest payload a segment length field can describe.
pub const MAX_SEGMENT_PAYLOAD: usize = u16::MAX as usize - 2;

/// What a [`MetadataBlock`] contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// EXIF (TIFF structure) in APP1.
    Exif,
    /// XMP packet in APP1.
    Xmp,
    /// One chunk of an ICC profile in APP2.
    Icc,
    /// Photoshop IRB / IPTC in APP13.
    Iptc,
    /// COM text.
    Comment,
}

impl BlockKind {
    fn classify(marker: u8, payload: &[u8]) -> Option<Self> {
        match marker {
            APP1 if payload.starts_with(EXIF_SIGNATURE) => Some(Self::Exif),
            APP1 if payload.starts_with(XMP_SIGNATURE) => Some(Self::Xmp),
            APP2 if payload.starts_with(ICC_SIGNATURE) => Some(Self::Icc),
            APP13 if payload.starts_with(IPTC_SIGNATURE) => Some(Self::Iptc),
            COM => Some(Self::Comment),
            _ => None,
        }
    }
}

/// One metadata segment, payload kept verbatim (signature included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataBlock {
    /// Content kind.
    pub kind: BlockKind,
    /// Marker byte (`0xE1`, `0xE2`, `0xED` or `0xFE`).
    pub marker: u8,
    /// Segment payload without marker and length.
    pub payload: Vec<u8>,
}

impl MetadataBlock {
    /// Creates a block, classifying its payload.
    ///
    /// Returns `None` for segments that are not metadata.
    pub fn new(marker: u8, payload: Vec<u8>) -> Option<Self> {
        BlockKind::classify(marker, &payload).map(|kind| Self {
            kind,
            marker,
            payload,
        })
    }

    /// The full segment: `FF`, marker, big-endian length, payload.
    pub fn to_segment(&self) -> IoResult<Vec<u8>> {
        if self.payload.len() > MAX_SEGMENT_PAYLOAD {
            return Err(IoError::Format(format!(
                "{:?} segment of {} bytes exceeds {}",
                self.kind,
                self.payload.len(),
                MAX_SEGMENT_PAYLOAD
            )));
        }
        let len = (self.payload.len() + 2) as u16;
        let mut out = Vec::with_capacity(self.payload.len() + 4);
        out.extend_from_slice(&[0xFF, self.marker]);
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&self.payload);
        Ok(out)
    }
}

/// Metadata segments of one JPEG, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JpegMetadata {
    blocks: Vec<MetadataBlock>,
}

impl JpegMetadata {
    /// Wraps blocks collected elsewhere.
    pub fn from_blocks(blocks: Vec<MetadataBlock>) -> Self {
        Self { blocks }
    }

    /// Scans the header segments of a JPEG file.
    ///
    /// Stops at the first scan (SOS) or EOI; pixel data is never touched.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidFile`] if `data` does not start with SOI or a
    /// segment runs past the end of the data.
    pub fn extract(data: &[u8]) -> IoResult<Self> {
        if data.len() < 2 || data[0] != 0xFF || data[1] != SOI {
            return Err(IoError::InvalidFile("missing JPEG SOI marker".into()));
        }

        let mut blocks = Vec::new();
        let mut pos = 2usize;

        while pos + 1 < data.len() {
            if data[pos] != 0xFF {
                pos += 1;
                continue;
            }
            while pos < data.len() && data[pos] == 0xFF {
                pos += 1;
            }
            if pos >= data.len() {
                break;
            }

            let marker = data[pos];
            pos += 1;

            if marker == EOI || marker == SOS {
                break;
            }
            // Standalone markers carry no length
            if (0xD0..=0xD7).contains(&marker) || marker == 0x01 {
                continue;
            }

            if pos + 2 > data.len() {
                return Err(IoError::InvalidFile(format!(
                    "truncated length for marker {marker:#04X}"
                )));
            }
            let seg_len = u16::from_be_bytes([data[pos], data[pos + 1]]) as usize;
            pos += 2;
            if seg_len < 2 || pos + seg_len - 2 > data.len() {
                return Err(IoError::InvalidFile(format!(
                    "segment {marker:#04X} of length {seg_len} runs past end of file"
                )));
            }
            let payload = &data[pos..pos + seg_len - 2];

            if let Some(block) = MetadataBlock::new(marker, payload.to_vec()) {
                trace!(kind = ?block.kind, bytes = payload.len(), "metadata segment");
                blocks.push(block);
            }
            pos += seg_len - 2;
        }

        debug!(blocks = blocks.len(), "extracted JPEG metadata");
        Ok(Self { blocks })
    }

    /// All blocks in file order.
    pub fn blocks(&self) -> &[MetadataBlock] {
        &self.blocks
    }

    /// True if no metadata was found.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks of one kind.
    pub fn of_kind(&self, kind: BlockKind) -> impl Iterator<Item = &MetadataBlock> {
        self.blocks.iter().filter(move |b| b.kind == kind)
    }

    /// TIFF structure of the first EXIF block, signature stripped.
    pub fn exif(&self) -> Option<&[u8]> {
        self.of_kind(BlockKind::Exif)
            .next()
            .map(|b| &b.payload[EXIF_SIGNATURE.len()..])
    }

    /// ICC profile reassembled from its chunks, ordered by sequence number.
    pub fn icc_profile(&self) -> Option<Vec<u8>> {
        // signature + sequence number + chunk count
        let header = ICC_SIGNATURE.len() + 2;
        let mut chunks: Vec<(u8, &[u8])> = self
            .of_kind(BlockKind::Icc)
            .filter(|b| b.payload.len() > header)
            .map(|b| (b.payload[header - 2], &b.payload[header..]))
            .collect();
        if chunks.is_empty() {
            return None;
        }
        chunks.sort_by_key(|(seq, _)| *seq);
        Some(chunks.into_iter().flat_map(|(_, data)| data.iter().copied()).collect())
    }

    /// EXIF orientation value as stored.
    ///
    /// `Ok(None)` when there is no EXIF block or it has no orientation tag;
    /// callers decide what to do with out-of-range codes.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidMetadata`] if an EXIF block is present but is not
    /// a readable TIFF structure.
    pub fn orientation(&self) -> IoResult<Option<u32>> {
        let Some(tiff) = self.exif() else {
            return Ok(None);
        };
        let parsed = exif::Reader::new()
            .read_raw(tiff.to_vec())
            .map_err(|e| IoError::InvalidMetadata(format!("unreadable EXIF block: {e}")))?;
        Ok(parsed
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0)))
    }

    /// Splices every block into an encoded JPEG.
    ///
    /// Blocks go right after SOI and any APP0 (JFIF) segments the encoder
    /// wrote, in their original order.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidFile`] if `encoded` is not a JPEG, or
    /// [`IoError::Format`] if a block is too large for one segment.
    pub fn embed(&self, encoded: &[u8]) -> IoResult<Vec<u8>> {
        if encoded.len() < 2 || encoded[0] != 0xFF || encoded[1] != SOI {
            return Err(IoError::InvalidFile("encoded data is not a JPEG".into()));
        }
        if self.blocks.is_empty() {
            return Ok(encoded.to_vec());
        }

        let mut insert_at = 2usize;
        while insert_at + 4 <= encoded.len()
            && encoded[insert_at] == 0xFF
            && encoded[insert_at + 1] == APP0
        {
            let len =
                u16::from_be_bytes([encoded[insert_at + 2], encoded[insert_at + 3]]) as usize;
            insert_at += 2 + len;
        }
        if insert_at > encoded.len() {
            return Err(IoError::InvalidFile("truncated APP0 segment".into()));
        }

        let extra: usize = self.blocks.iter().map(|b| b.payload.len() + 4).sum();
        let mut out = Vec::with_capacity(encoded.len() + extra);
        out.extend_from_slice(&encoded[..insert_at]);
        for block in &self.blocks {
            out.extend_from_slice(&block.to_segment()?);
        }
        out.extend_from_slice(&encoded[insert_at..]);
        Ok(out)
    }
}
