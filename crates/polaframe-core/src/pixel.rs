//! RGB pixel values.
//!
//! [`Rgb8`] is the only color type polaframe needs: decoded JPEGs are
//! expanded to 8-bit RGB and the encoder consumes 8-bit RGB, so the frame
//! color and every source pixel share the same representation.
//!
//! # Parsing
//!
//! Colors can be given as hex (`#RGB`, `#RRGGBB`, with or without the
//! leading `#`) or by name:
//!
//! ```rust
//! use polaframe_core::Rgb8;
//!
//! assert_eq!("#fff".parse::<Rgb8>().unwrap(), Rgb8::WHITE);
//! assert_eq!("1a2b3c".parse::<Rgb8>().unwrap(), Rgb8::new(0x1a, 0x2b, 0x3c));
//! assert_eq!("black".parse::<Rgb8>().unwrap(), Rgb8::BLACK);
//! ```

use crate::{CoreError, CoreResult};
use std::fmt;
use std::str::FromStr;

/// An 8-bit per channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

/// Named colors accepted by [`Rgb8::parse`].
const NAMED: &[(&str, Rgb8)] = &[
    ("white", Rgb8::WHITE),
    ("black", Rgb8::BLACK),
    ("gray", Rgb8::new(0x80, 0x80, 0x80)),
    ("grey", Rgb8::new(0x80, 0x80, 0x80)),
    ("cream", Rgb8::new(0xff, 0xfd, 0xd0)),
    ("ivory", Rgb8::new(0xff, 0xff, 0xf0)),
];

impl Rgb8 {
    /// Pure white, the classic instant-film frame.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array `[r, g, b]`.
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Creates a color from an array `[r, g, b]`.
    pub const fn from_array(arr: [u8; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Parses a hex or named color.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some((_, color)) = NAMED.iter().find(|(name, _)| *name == lower) {
            return Ok(*color);
        }

        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        parse_hex(hex).ok_or_else(|| CoreError::InvalidColor(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Rgb8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => Some(Rgb8::new(
            expand_nibble(bytes[0])?,
            expand_nibble(bytes[1])?,
            expand_nibble(bytes[2])?,
        )),
        6 => Some(Rgb8::new(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        _ => None,
    }
}

/// 'f' -> 0xFF, 'a' -> 0xAA.
fn expand_nibble(ch: u8) -> Option<u8> {
    let v = (ch as char).to_digit(16)? as u8;
    Some((v << 4) | v)
}

impl FromStr for Rgb8 {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgb8 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(arr: [u8; 3]) -> Self {
        Self::from_array(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb8::parse("#FFFFFF").unwrap(), Rgb8::WHITE);
        assert_eq!(Rgb8::parse("#abc").unwrap(), Rgb8::new(0xaa, 0xbb, 0xcc));
        assert_eq!(Rgb8::parse("  102030 ").unwrap(), Rgb8::new(0x10, 0x20, 0x30));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Rgb8::parse("White").unwrap(), Rgb8::WHITE);
        assert_eq!(Rgb8::parse("grey").unwrap(), Rgb8::parse("gray").unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Rgb8::parse("#12").is_err());
        assert!(Rgb8::parse("#12345g").is_err());
        assert!(Rgb8::parse("").is_err());
        assert!(Rgb8::parse("#1234").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Rgb8::new(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Rgb8 = serde_json::from_str("\"cream\"").unwrap();
        assert_eq!(back, Rgb8::new(0xff, 0xfd, 0xd0));
    }

    #[test]
    fn test_display_roundtrip() {
        let c = Rgb8::new(1, 128, 255);
        assert_eq!(c.to_string(), "#0180ff");
        assert_eq!(c.to_string().parse::<Rgb8>().unwrap(), c);
    }
}
