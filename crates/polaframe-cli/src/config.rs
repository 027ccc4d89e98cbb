//! Frame settings: defaults, YAML file, command-line overrides.
//!
//! Precedence, lowest first: built-in defaults, `--config` file, flags.
//!
//! ```yaml
//! # frame.yaml
//! reference_length: 900
//! bottom: 180
//! fill_squared: true
//! color: "#fffdd0"
//! quality: 95
//! ```

use crate::FrameOptions;
use anyhow::{bail, Context, Result};
use polaframe_core::Rgb8;
use polaframe_layout::FrameSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Everything needed to frame a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frame proportions.
    #[serde(flatten)]
    pub frame: FrameSpec,
    /// Border color.
    pub color: Rgb8,
    /// JPEG quality, 1-100.
    pub quality: u8,
    /// Use the EXIF orientation tag to place the margins.
    pub respect_orientation: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame: FrameSpec::default(),
            color: Rgb8::WHITE,
            quality: 100,
            respect_orientation: true,
        }
    }
}

impl FrameConfig {
    /// Loads a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Rejects settings that cannot produce a frame.
    pub fn validate(&self) -> Result<()> {
        self.frame.validate()?;
        if !(1..=100).contains(&self.quality) {
            bail!("JPEG quality must be 1-100, got {}", self.quality);
        }
        Ok(())
    }
}

impl FrameOptions {
    /// Builds the effective config and validates it.
    pub fn resolve(&self) -> Result<FrameConfig> {
        let mut config = match &self.config {
            Some(path) => FrameConfig::load(path)?,
            None => FrameConfig::default(),
        };

        let frame = &mut config.frame;
        if let Some(v) = self.reference_length {
            frame.reference_length = v;
        }
        if let Some(v) = self.top {
            frame.top = v;
        }
        if let Some(v) = self.left {
            frame.left = v;
        }
        if let Some(v) = self.bottom {
            frame.bottom = v;
        }
        if let Some(v) = self.right {
            frame.right = v;
        }
        if self.square {
            frame.fill_squared = true;
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        if let Some(q) = self.quality {
            config.quality = q;
        }
        if self.ignore_orientation {
            config.respect_orientation = false;
        }

        config.validate()?;
        debug!(?config, "resolved frame config");
        Ok(config)
    }
}
