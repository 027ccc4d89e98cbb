//! Plan command: report orientation and padding without encoding.

use crate::config::FrameConfig;
use crate::PlanArgs;
use anyhow::{Context, Result};
use polaframe_layout::FramePlan;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::trace;

/// One planned input, as printed with `--json`.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub input: PathBuf,
    #[serde(flatten)]
    pub plan: FramePlan,
    pub display_canvas: (u32, u32),
    /// Metadata segment kinds that will be carried over, in file order.
    pub metadata: Vec<String>,
    /// Size of the reassembled ICC profile, if any.
    pub icc_profile_bytes: Option<usize>,
}

/// Runs the plan command.
pub fn run(args: PlanArgs, verbose: u8) -> Result<()> {
    trace!(inputs = args.input.len(), "plan::run");
    let config = args.options.resolve()?;

    let reports = args
        .input
        .iter()
        .map(|path| plan_file(path, &config))
        .collect::<Result<Vec<_>>>()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        print_report(report, verbose);
    }
    Ok(())
}

/// Plans the frame for one file, reading only its headers.
pub fn plan_file(path: &Path, config: &FrameConfig) -> Result<PlanReport> {
    let probe = polaframe_io::probe(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;
    let orientation = super::orientation_of(&probe.metadata, config)
        .with_context(|| format!("Cannot plan {}", path.display()))?;
    let plan = polaframe_layout::plan(probe.width, probe.height, &config.frame, orientation)
        .with_context(|| format!("Cannot frame {}", path.display()))?;

    let metadata = probe
        .metadata
        .blocks()
        .iter()
        .map(|b| format!("{:?}", b.kind).to_lowercase())
        .collect();

    Ok(PlanReport {
        input: path.to_path_buf(),
        display_canvas: plan.display_canvas(),
        plan,
        metadata,
        icc_profile_bytes: probe.metadata.icc_profile().map(|p| p.len()),
    })
}

fn print_report(report: &PlanReport, verbose: u8) {
    let plan = &report.plan;
    let p = plan.padding;
    println!("{}", report.input.display());
    println!("  Size:        {}x{}", plan.source.0, plan.source.1);
    println!(
        "  Orientation: {} ({:?})",
        plan.orientation.exif_value(),
        plan.orientation
    );
    println!(
        "  Padding:     top {} left {} bottom {} right {}",
        p.top, p.left, p.bottom, p.right
    );
    println!("  Canvas:      {}x{}", plan.canvas.0, plan.canvas.1);
    if verbose > 0 {
        let b = plan.base;
        println!(
            "  Base:        top {} left {} bottom {} right {}",
            b.top, b.left, b.bottom, b.right
        );
        println!(
            "  Displayed:   {}x{}",
            report.display_canvas.0, report.display_canvas.1
        );
        if report.metadata.is_empty() {
            println!("  Metadata:    none");
        } else {
            println!("  Metadata:    {}", report.metadata.join(", "));
        }
        if let Some(bytes) = report.icc_profile_bytes {
            println!("  ICC profile: {} bytes", bytes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polaframe_core::{Padding, Rgb8, RgbImage};
    use polaframe_io::{JpegMetadata, JpegWriter, MetadataBlock};

    #[test]
    fn test_plan_matches_frame_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.jpg");
        JpegWriter::new()
            .write(&path, &RgbImage::filled(1200, 1600, Rgb8::WHITE), &JpegMetadata::default())
            .unwrap();

        let report = plan_file(&path, &FrameConfig::default()).unwrap();
        assert_eq!(report.plan.padding, Padding::new(117, 92, 439, 92));
        assert_eq!(report.plan.canvas, (1384, 2156));
        assert_eq!(report.display_canvas, (1384, 2156));
    }

    #[test]
    fn test_report_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.jpg");
        JpegWriter::new()
            .write(&path, &RgbImage::filled(40, 30, Rgb8::BLACK), &JpegMetadata::default())
            .unwrap();

        let report = plan_file(&path, &FrameConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["source"], serde_json::json!([40, 30]));
        let side = |name: &str| json["padding"][name].as_u64().unwrap();
        assert!(side("bottom") > side("top"));
        assert!(json.get("input").is_some());
        assert_eq!(json["metadata"], serde_json::json!([]));
        assert!(json["icc_profile_bytes"].is_null());
    }

    #[test]
    fn test_report_lists_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.jpg");
        let mut icc = b"ICC_PROFILE\0".to_vec();
        icc.extend_from_slice(&[1, 1]);
        icc.extend_from_slice(&[7; 40]);
        let meta = JpegMetadata::from_blocks(vec![
            MetadataBlock::new(0xE2, icc).unwrap(),
            MetadataBlock::new(0xFE, b"hi".to_vec()).unwrap(),
        ]);
        JpegWriter::new()
            .write(&path, &RgbImage::filled(20, 20, Rgb8::BLACK), &meta)
            .unwrap();

        let report = plan_file(&path, &FrameConfig::default()).unwrap();
        assert_eq!(report.metadata, ["icc", "comment"]);
        assert_eq!(report.icc_profile_bytes, Some(40));
    }

    #[test]
    fn test_missing_file() {
        assert!(plan_file(Path::new("/nonexistent/x.jpg"), &FrameConfig::default()).is_err());
    }
}
