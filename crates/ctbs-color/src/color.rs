// SPDX-License-Identifier: MIT
//
// 8-bit sRGB color — the unit every theme variable is stored in.
//
// Adjustments go through HSL and round back to 8-bit immediately. That
// keeps the engine honest: a contrast ratio measured on a `Color` is the
// ratio of the value that will actually be written to the stylesheet,
// with no hidden sub-integer precision that rounding could later destroy.

#![allow(clippy::many_single_char_names)]

use std::fmt;

use crate::hsl::{Hsl, hsl_to_srgb, srgb_to_hsl};

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque 8-bit sRGB color.
///
/// # Examples
///
/// ```
/// use ctbs_color::Color;
///
/// let blue = Color::hex("#0d6efd").unwrap();
/// assert_eq!(blue.to_hex(), "#0d6efd");
/// assert_eq!(blue.to_channels(), "13, 110, 253");
///
/// // HSL operations work in percentage points.
/// let darker = blue.darken(15.0);
/// assert!(darker.to_hsl().l < blue.to_hsl().l);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from 8-bit channels.
    #[inline]
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from HSL components (degrees, percent, percent).
    #[must_use]
    pub fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::from_hsl(Hsl::new(h, s, l))
    }

    /// Create a color from an [`Hsl`] value, rounding each channel.
    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        let (r, g, b) = hsl_to_srgb(hsl);
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Parse a hex color: `#rgb` or `#rrggbb`, with or without `#`.
    ///
    /// Returns `None` for anything else (including alpha forms — theme
    /// colors are always opaque).
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s.trim())
    }

    /// Pure black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    // ─── Views ───────────────────────────────────────────────────────────

    /// Unit-range sRGB channels (gamma-encoded).
    #[inline]
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// The HSL view of this color.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let (r, g, b) = self.to_srgb();
        srgb_to_hsl(r, g, b)
    }

    /// `#rrggbb`, lowercase.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `r, g, b` — the value of a companion `…Rgb` variable.
    #[must_use]
    pub fn to_channels(self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    // ─── HSL Operations ──────────────────────────────────────────────────
    //
    // Amounts are percentage points, clamped to 0–100.

    /// Increase HSL lightness by `amount` points.
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        let hsl = self.to_hsl();
        Self::from_hsl(hsl.with_lightness(hsl.l + amount))
    }

    /// Decrease HSL lightness by `amount` points.
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        let hsl = self.to_hsl();
        Self::from_hsl(hsl.with_lightness(hsl.l - amount))
    }

    /// Replace HSL lightness.
    #[must_use]
    pub fn with_lightness(self, l: f64) -> Self {
        Self::from_hsl(self.to_hsl().with_lightness(l))
    }

    /// Replace HSL saturation.
    #[must_use]
    pub fn with_saturation(self, s: f64) -> Self {
        Self::from_hsl(self.to_hsl().with_saturation(s))
    }

    /// Replace HSL hue.
    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self::from_hsl(self.to_hsl().with_hue(h))
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #rgb
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #rrggbb
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::rgb(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a unit float to a u8 with round-half-up.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Helper: channels within ±1.
    fn assert_close(actual: Color, expected: Color) {
        let close = |a: u8, b: u8| a.abs_diff(b) <= 1;
        assert!(
            close(actual.r, expected.r) && close(actual.g, expected.g) && close(actual.b, expected.b),
            "got {actual:?}, expected {expected:?}"
        );
    }

    // ── Hex ──────────────────────────────────────────────────────────────

    #[test]
    fn hex_parsing_rrggbb() {
        assert_eq!(Color::hex("#0d6efd"), Some(Color::rgb(13, 110, 253)));
        assert_eq!(Color::hex("0D6EFD"), Some(Color::rgb(13, 110, 253)));
    }

    #[test]
    fn hex_parsing_short() {
        assert_eq!(Color::hex("#fa0"), Some(Color::rgb(255, 170, 0)));
    }

    #[test]
    fn hex_parsing_invalid() {
        assert_eq!(Color::hex("#12345"), None);
        assert_eq!(Color::hex("#gggggg"), None);
        assert_eq!(Color::hex("#11223344"), None);
        assert_eq!(Color::hex(""), None);
    }

    #[test]
    fn hex_roundtrip() {
        for hex in ["#000000", "#ffffff", "#212529", "#f8f9fa", "#dc3545"] {
            assert_eq!(Color::hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn channels_format() {
        assert_eq!(Color::rgb(25, 135, 84).to_channels(), "25, 135, 84");
    }

    // ── HSL ──────────────────────────────────────────────────────────────

    #[test]
    fn bootstrap_blue_roundtrips_exactly() {
        let c = Color::rgb(13, 110, 253);
        assert_eq!(Color::from_hsl(c.to_hsl()), c);
    }

    #[test]
    fn hsl_constructor_primaries() {
        assert_eq!(Color::hsl(0.0, 100.0, 50.0), Color::rgb(255, 0, 0));
        assert_eq!(Color::hsl(120.0, 100.0, 50.0), Color::rgb(0, 255, 0));
        assert_eq!(Color::hsl(240.0, 100.0, 50.0), Color::rgb(0, 0, 255));
    }

    #[test]
    fn hsl_extremes_are_black_and_white() {
        assert_eq!(Color::hsl(200.0, 80.0, 0.0), Color::BLACK);
        assert_eq!(Color::hsl(200.0, 80.0, 100.0), Color::WHITE);
    }

    #[test]
    fn lighten_increases_lightness() {
        let c = Color::rgb(220, 53, 69);
        assert!(c.lighten(10.0).to_hsl().l > c.to_hsl().l);
    }

    #[test]
    fn darken_clamps_to_black() {
        assert_eq!(Color::rgb(220, 53, 69).darken(200.0), Color::BLACK);
    }

    #[test]
    fn lighten_clamps_to_white() {
        assert_eq!(Color::rgb(220, 53, 69).lighten(200.0), Color::WHITE);
    }

    #[test]
    fn desaturate_to_gray() {
        let gray = Color::rgb(220, 53, 69).with_saturation(0.0);
        assert_eq!(gray.r, gray.g);
        assert_eq!(gray.g, gray.b);
    }

    #[test]
    fn with_hue_keeps_lightness() {
        let c = Color::hsl(10.0, 60.0, 40.0);
        let shifted = c.with_hue(200.0);
        assert!((shifted.to_hsl().l - c.to_hsl().l).abs() < 1.0);
        assert_close(shifted, Color::hsl(200.0, 60.0, 40.0));
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(Color::rgb(1, 2, 3).to_string(), "#010203");
        assert_eq!(format!("{:?}", Color::WHITE), "Color(#ffffff)");
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hsl_roundtrip_within_one(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
                let c = Color::rgb(r, g, b);
                let back = Color::from_hsl(c.to_hsl());
                prop_assert!(back.r.abs_diff(r) <= 1, "{c:?} -> {back:?}");
                prop_assert!(back.g.abs_diff(g) <= 1, "{c:?} -> {back:?}");
                prop_assert!(back.b.abs_diff(b) <= 1, "{c:?} -> {back:?}");
            }

            #[test]
            fn hex_roundtrip_any(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
                let c = Color::rgb(r, g, b);
                prop_assert_eq!(Color::hex(&c.to_hex()), Some(c));
            }
        }
    }
}
