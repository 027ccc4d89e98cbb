//! End-to-end: decode, plan the frame, encode the view, re-read.

use polaframe_core::{make_view, ImageSource, Rgb8, RgbImage};
use polaframe_io::{BlockKind, JpegMetadata, JpegWriter, MetadataBlock};
use polaframe_layout::{plan, FrameSpec, Orientation};

/// Little-endian TIFF with a single Orientation entry, APP1-ready.
fn exif_payload(value: u16) -> Vec<u8> {
    let mut p = b"Exif\0\0II*\0".to_vec();
    p.extend_from_slice(&8u32.to_le_bytes());
    p.extend_from_slice(&1u16.to_le_bytes());
    p.extend_from_slice(&0x0112u16.to_le_bytes());
    p.extend_from_slice(&3u16.to_le_bytes());
    p.extend_from_slice(&1u32.to_le_bytes());
    p.extend_from_slice(&value.to_le_bytes());
    p.extend_from_slice(&[0, 0]);
    p.extend_from_slice(&0u32.to_le_bytes());
    p
}

fn icc_payload() -> Vec<u8> {
    let mut p = b"ICC_PROFILE\0".to_vec();
    p.extend_from_slice(&[1, 1]);
    p.extend_from_slice(&[0x42; 128]);
    p
}

/// Writes a 96x128 mid-gray photo carrying the given metadata.
fn source_jpeg(dir: &std::path::Path, orientation: u16) -> std::path::PathBuf {
    let photo = RgbImage::filled(96, 128, Rgb8::new(90, 90, 90));
    let meta = JpegMetadata::from_blocks(vec![
        MetadataBlock::new(0xE1, exif_payload(orientation)).unwrap(),
        MetadataBlock::new(0xE2, icc_payload()).unwrap(),
        MetadataBlock::new(0xFE, b"shot on film".to_vec()).unwrap(),
    ]);
    let path = dir.join(format!("source-{orientation}.jpg"));
    JpegWriter::new().write(&path, &photo, &meta).unwrap();
    path
}

fn near(a: Rgb8, b: Rgb8) -> bool {
    a.to_array()
        .iter()
        .zip(b.to_array())
        .all(|(x, y)| (*x as i16 - y as i16).abs() <= 3)
}

#[test]
fn frame_keeps_metadata_and_border() {
    let dir = tempfile::tempdir().unwrap();
    let spec = FrameSpec::default();

    for orientation in [1u16, 3, 6, 8] {
        let input = source_jpeg(dir.path(), orientation);
        let decoded = polaframe_io::read(&input).unwrap();
        let code = decoded.metadata.orientation().unwrap();
        assert_eq!(code, Some(orientation as u32));

        let frame = plan(96, 128, &spec, Orientation::from_exif_opt(code)).unwrap();
        let view = make_view(&decoded.image, frame.padding, Rgb8::WHITE).unwrap();
        assert_eq!(view.dimensions(), frame.canvas);

        let output = dir.path().join(format!("framed-{orientation}.jpg"));
        polaframe_io::write(&output, &view, &decoded.metadata, 100).unwrap();

        let framed = polaframe_io::read(&output).unwrap();
        assert_eq!(framed.image.dimensions(), frame.canvas);
        assert_eq!(framed.metadata, decoded.metadata, "orientation {orientation}");
        assert_eq!(framed.metadata.icc_profile().unwrap(), vec![0x42; 128]);
        assert_eq!(
            framed.metadata.of_kind(BlockKind::Comment).next().unwrap().payload,
            b"shot on film"
        );

        // corners of the stored buffer are border regardless of orientation
        let (w, h) = framed.image.dimensions();
        for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
            assert!(near(framed.image.pixel(x, y), Rgb8::WHITE), "({x}, {y}) o={orientation}");
        }
    }
}

#[test]
fn wide_margin_follows_displayed_bottom() {
    let spec = FrameSpec::default();
    let normal = plan(96, 128, &spec, Orientation::Normal).unwrap().padding;
    let rotated = plan(96, 128, &spec, Orientation::Rotate90).unwrap().padding;
    let flipped = plan(96, 128, &spec, Orientation::Rotate180).unwrap().padding;

    assert!(normal.bottom > normal.top);
    // stored right edge is displayed at the bottom for orientation 6
    assert!(rotated.right > rotated.left);
    assert_eq!(rotated.top, rotated.bottom);
    // stored top edge is displayed at the bottom for orientation 3
    assert!(flipped.top > flipped.bottom);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = polaframe_io::read(dir.path().join("nope.jpg")).unwrap_err();
    assert!(matches!(err, polaframe_io::IoError::Io(_)));
}
