//! CLI command implementations

pub mod batch;
pub mod frame;
pub mod plan;

use crate::config::FrameConfig;
use anyhow::{Context, Result};
use polaframe_io::{Decoded, JpegMetadata};
use polaframe_layout::Orientation;
use std::path::Path;
use tracing::{debug, warn};

/// Load and decode a JPEG.
pub fn load_image(path: &Path) -> Result<Decoded> {
    polaframe_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Orientation to frame with, per config.
///
/// Absent EXIF means orientation 1; EXIF that is present but unreadable
/// is an error.
pub fn orientation_of(metadata: &JpegMetadata, config: &FrameConfig) -> Result<Orientation> {
    if !config.respect_orientation {
        return Ok(Orientation::Normal);
    }
    let code = metadata
        .orientation()
        .context("Failed to read EXIF orientation")?;
    if let Some(c) = code.filter(|c| !(1..=8).contains(c)) {
        warn!(code = c, "unknown EXIF orientation, framing as orientation 1");
    }
    let orientation = Orientation::from_exif_opt(code);
    debug!(?code, ?orientation, "EXIF orientation");
    Ok(orientation)
}
