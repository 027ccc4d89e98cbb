//! Frame command: the full decode, plan, compose, encode pipeline.

use crate::config::FrameConfig;
use crate::FrameArgs;
use anyhow::{bail, Context, Result};
use polaframe_core::{make_view, ImageSource};
use polaframe_layout::FramePlan;
use std::path::Path;
use tracing::{info, trace};

/// Runs the frame command.
pub fn run(args: FrameArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "frame::run");
    let config = args.options.resolve()?;

    if verbose > 0 {
        println!("Framing {} -> {}", args.input.display(), args.output.display());
    }

    let frame = frame_file(&args.input, &args.output, &config)?;

    if verbose > 0 {
        let p = frame.padding;
        println!(
            "  Orientation: {}  padding t/l/b/r: {}/{}/{}/{}  canvas: {}x{}",
            frame.orientation.exif_value(),
            p.top,
            p.left,
            p.bottom,
            p.right,
            frame.canvas.0,
            frame.canvas.1
        );
        println!("Done.");
    }
    Ok(())
}

/// Frames `input` into `output`.
///
/// The padded image is never materialized: the encoder reads the view row by
/// row. Nothing is written unless every step succeeds.
pub fn frame_file(input: &Path, output: &Path, config: &FrameConfig) -> Result<FramePlan> {
    if same_file(input, output) {
        bail!("Refusing to overwrite the input: {}", input.display());
    }

    let decoded = super::load_image(input)?;
    let orientation = super::orientation_of(&decoded.metadata, config)
        .with_context(|| format!("Cannot frame {}", input.display()))?;
    let (width, height) = decoded.image.dimensions();

    let frame = polaframe_layout::plan(width, height, &config.frame, orientation)
        .with_context(|| format!("Cannot frame {}", input.display()))?;
    let view = make_view(&decoded.image, frame.padding, config.color)?;

    polaframe_io::write(output, &view, &decoded.metadata, config.quality)
        .with_context(|| format!("Failed to save: {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        orientation = orientation.exif_value(),
        padding = ?frame.padding,
        canvas = ?frame.canvas,
        "framed"
    );
    Ok(frame)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
