//! Batch command: frame every file matching a glob, in parallel.

use crate::config::FrameConfig;
use crate::BatchArgs;
use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{error, info, trace};

/// Runs the batch command.
pub fn run(args: BatchArgs, verbose: u8) -> Result<()> {
    trace!(pattern = %args.input, output_dir = %args.output_dir.display(), "batch::run");
    let config = args.options.resolve()?;

    let inputs: Vec<PathBuf> = glob::glob(&args.input)
        .with_context(|| format!("Invalid glob pattern: {}", args.input))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();

    if inputs.is_empty() {
        bail!("No files match: {}", args.input);
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create: {}", args.output_dir.display()))?;

    if verbose > 0 {
        println!(
            "Framing {} file(s) into {}",
            inputs.len(),
            args.output_dir.display()
        );
    }

    let (success, failed) =
        frame_all(&inputs, &args.output_dir, &args.suffix, &config, verbose)?;

    println!("Batch complete: {} succeeded, {} failed", success, failed);
    if failed > 0 {
        bail!("{} file(s) failed", failed);
    }
    Ok(())
}

/// Frames each input into `output_dir`, returning `(succeeded, failed)`.
///
/// A failure on one file is logged and does not stop the others. Two
/// inputs that would land on the same output file fail the whole batch
/// before anything is written.
pub fn frame_all(
    inputs: &[PathBuf],
    output_dir: &Path,
    suffix: &str,
    config: &FrameConfig,
    verbose: u8,
) -> Result<(usize, usize)> {
    let jobs = output_paths(inputs, output_dir, suffix)?;
    let success = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    jobs.par_iter().for_each(|(input, output)| {
        match super::frame::frame_file(input, output, config) {
            Ok(_) => {
                success.fetch_add(1, Ordering::Relaxed);
                info!(input = %input.display(), output = %output.display(), "batch item done");
                if verbose > 0 {
                    println!("  {} -> {}", input.display(), output.display());
                }
            }
            Err(e) => {
                failed.fetch_add(1, Ordering::Relaxed);
                error!(input = %input.display(), "{e:#}");
                eprintln!("  FAILED {}: {:#}", input.display(), e);
            }
        }
    });

    Ok((success.into_inner(), failed.into_inner()))
}

/// Pairs every input with its output path, rejecting collisions.
fn output_paths<'a>(
    inputs: &'a [PathBuf],
    output_dir: &Path,
    suffix: &str,
) -> Result<Vec<(&'a PathBuf, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::with_capacity(inputs.len());
    let mut jobs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let output = output_path(input, output_dir, suffix)?;
        if let Some(first) = claimed.insert(output.clone(), input) {
            bail!(
                "{} and {} would both be written to {}",
                first.display(),
                input.display(),
                output.display()
            );
        }
        jobs.push((input, output));
    }
    Ok(jobs)
}

/// `output_dir/<stem><suffix>.<ext>`
fn output_path(input: &Path, output_dir: &Path, suffix: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("No file name: {}", input.display()))?;
    let mut name = stem.to_os_string();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(output_dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polaframe_core::{ImageSource, Rgb8, RgbImage};
    use polaframe_io::{JpegMetadata, JpegWriter};

    fn write_photo(path: &Path, width: u32, height: u32) {
        let image = RgbImage::filled(width, height, Rgb8::BLACK);
        JpegWriter::new()
            .write(path, &image, &JpegMetadata::default())
            .unwrap();
    }

    #[test]
    fn test_output_path() {
        let out = output_path(Path::new("a/b/photo.JPG"), Path::new("out"), "_framed").unwrap();
        assert_eq!(out, Path::new("out/photo_framed.JPG"));
        let out = output_path(Path::new("noext"), Path::new("out"), "").unwrap();
        assert_eq!(out, Path::new("out/noext"));
    }

    #[test]
    fn test_frame_all_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.jpg");
        write_photo(&good, 64, 48);
        let bad = dir.path().join("bad.jpg");
        std::fs::write(&bad, b"not a jpeg").unwrap();
        let out_dir = dir.path().join("out");
        std::fs::create_dir(&out_dir).unwrap();

        let config = FrameConfig::default();
        let (ok, failed) = frame_all(&[good, bad], &out_dir, "_f", &config, 0).unwrap();
        assert_eq!((ok, failed), (1, 1));

        let framed = polaframe_io::read(out_dir.join("good_f.jpg")).unwrap();
        let (w, h) = framed.image.dimensions();
        assert!(w > 64 && h > 48);
        assert!(!out_dir.join("bad_f.jpg").exists());
    }

    #[test]
    fn test_same_stem_in_two_dirs_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut inputs = Vec::new();
        for sub in ["a", "b"] {
            let sub_dir = dir.path().join(sub);
            std::fs::create_dir(&sub_dir).unwrap();
            let photo = sub_dir.join("x.jpg");
            write_photo(&photo, 24, 16);
            inputs.push(photo);
        }
        let out_dir = dir.path().join("out");
        std::fs::create_dir(&out_dir).unwrap();

        let err = frame_all(&inputs, &out_dir, "", &FrameConfig::default(), 0).unwrap_err();
        assert!(err.to_string().contains("x.jpg"), "{err}");
        assert!(!out_dir.join("x.jpg").exists());
    }

    #[test]
    fn test_output_onto_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("p.jpg");
        write_photo(&photo, 16, 16);

        let config = FrameConfig::default();
        let (ok, failed) = frame_all(&[photo.clone()], dir.path(), "", &config, 0).unwrap();
        assert_eq!((ok, failed), (0, 1));
        assert!(polaframe_io::read(&photo).is_ok());
    }
}
