// SPDX-License-Identifier: MIT
//
// HSL view of an sRGB color.
//
// Single-character variable names (r, g, b, h, s, l) are the standard
// mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// Hue is in degrees [0, 360), saturation and lightness in percent
// [0, 100]. Percent rather than unit range because every tuning constant
// in the role mapper and the contrast engine is expressed in percentage
// points ("lighten by 15", "clamp lightness to 35..60").

use std::fmt;

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color in HSL space.
///
/// Not quantized: an `Hsl` can sit between two 8-bit colors. Converting to
/// [`Color`](crate::Color) rounds each channel to the nearest integer.
#[derive(Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue angle in degrees, 0.0 to 360.0 (exclusive).
    pub h: f64,
    /// Saturation in percent, 0.0 to 100.0.
    pub s: f64,
    /// Lightness in percent, 0.0 to 100.0.
    pub l: f64,
}

impl Hsl {
    /// Create an HSL value, normalizing hue and clamping `s`/`l` to 0–100.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    /// Return a copy with lightness replaced (clamped).
    #[inline]
    #[must_use]
    pub const fn with_lightness(self, l: f64) -> Self {
        Self {
            l: l.clamp(0.0, 100.0),
            ..self
        }
    }

    /// Return a copy with saturation replaced (clamped).
    #[inline]
    #[must_use]
    pub const fn with_saturation(self, s: f64) -> Self {
        Self {
            s: s.clamp(0.0, 100.0),
            ..self
        }
    }

    /// Return a copy with hue replaced (normalized).
    #[inline]
    #[must_use]
    pub fn with_hue(self, h: f64) -> Self {
        Self {
            h: normalize_hue(h),
            ..self
        }
    }
}

impl fmt::Debug for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.1}, {:.1}%, {:.1}%)", self.h, self.s, self.l)
    }
}

// ─── Conversions ─────────────────────────────────────────────────────────────

/// Convert unit-range sRGB to HSL (degrees, percent, percent).
#[must_use]
pub fn srgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let d = max - min;
    if d < 1e-12 {
        // Achromatic — hue is undefined, default to 0.
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if (max - r).abs() < f64::EPSILON {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: normalize_hue(h * 60.0),
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Convert HSL (degrees, percent, percent) to unit-range sRGB.
#[must_use]
pub fn hsl_to_srgb(hsl: Hsl) -> (f64, f64, f64) {
    let h = normalize_hue(hsl.h) / 360.0;
    let s = hsl.s.clamp(0.0, 100.0) / 100.0;
    let l = hsl.l.clamp(0.0, 100.0) / 100.0;

    if s <= 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0f64.mul_add(l, -q);

    (
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

#[inline]
fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        ((q - p) * 6.0).mul_add(t, p)
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        ((q - p) * (2.0 / 3.0 - t)).mul_add(6.0, p)
    } else {
        p
    }
}

// ─── Hue Helpers ─────────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Absolute hue difference (shortest arc on the color wheel), 0–180.
#[inline]
#[must_use]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

/// Move `from` a fraction `t` of the way toward `to`, along the shorter arc.
#[inline]
#[must_use]
pub fn shift_hue_toward(from: f64, to: f64, t: f64) -> f64 {
    let diff = to - from;
    let diff = if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    };
    normalize_hue(diff.mul_add(t, from))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn pure_red_is_hue_zero() {
        let hsl = srgb_to_hsl(1.0, 0.0, 0.0);
        assert!(approx_eq(hsl.h, 0.0, 1e-9), "{hsl:?}");
        assert!(approx_eq(hsl.s, 100.0, 1e-9), "{hsl:?}");
        assert!(approx_eq(hsl.l, 50.0, 1e-9), "{hsl:?}");
    }

    #[test]
    fn blue_is_hue_240() {
        let hsl = srgb_to_hsl(0.0, 0.0, 1.0);
        assert!(approx_eq(hsl.h, 240.0, 1e-9), "{hsl:?}");
    }

    #[test]
    fn magenta_hue_wraps_below_360() {
        let hsl = srgb_to_hsl(1.0, 0.0, 0.5);
        assert!(hsl.h > 300.0 && hsl.h < 360.0, "{hsl:?}");
    }

    #[test]
    fn gray_has_no_saturation() {
        let hsl = srgb_to_hsl(0.5, 0.5, 0.5);
        assert!(approx_eq(hsl.s, 0.0, 1e-9));
        assert!(approx_eq(hsl.l, 50.0, 1e-9));
    }

    #[test]
    fn black_and_white_lightness_extremes() {
        assert!(approx_eq(srgb_to_hsl(0.0, 0.0, 0.0).l, 0.0, 1e-9));
        assert!(approx_eq(srgb_to_hsl(1.0, 1.0, 1.0).l, 100.0, 1e-9));
    }

    #[test]
    fn hsl_to_srgb_inverts() {
        let (r, g, b) = hsl_to_srgb(Hsl::new(120.0, 100.0, 25.0));
        assert!(approx_eq(r, 0.0, 1e-9));
        assert!(approx_eq(g, 0.5, 1e-9));
        assert!(approx_eq(b, 0.0, 1e-9));
    }

    #[test]
    fn zero_lightness_is_black_for_any_hue() {
        let (r, g, b) = hsl_to_srgb(Hsl::new(210.0, 80.0, 0.0));
        assert_eq!((r, g, b), (0.0, 0.0, 0.0));
    }

    #[test]
    fn new_clamps_and_normalizes() {
        let hsl = Hsl::new(-30.0, 140.0, -5.0);
        assert!(approx_eq(hsl.h, 330.0, 1e-9));
        assert!(approx_eq(hsl.s, 100.0, 1e-9));
        assert!(approx_eq(hsl.l, 0.0, 1e-9));
    }

    #[test]
    fn hue_distance_takes_short_arc() {
        assert!(approx_eq(hue_distance(350.0, 10.0), 20.0, 1e-9));
        assert!(approx_eq(hue_distance(0.0, 180.0), 180.0, 1e-9));
        assert!(approx_eq(hue_distance(90.0, 90.0), 0.0, 1e-9));
    }

    #[test]
    fn shift_toward_crosses_zero() {
        // 340 → 0 is a 20° arc; 30% of it is 6°.
        assert!(approx_eq(shift_hue_toward(340.0, 0.0, 0.3), 346.0, 1e-9));
        assert!(approx_eq(shift_hue_toward(10.0, 350.0, 0.5), 0.0, 1e-9));
    }

    #[test]
    fn shift_toward_full_lands_on_target() {
        assert!(approx_eq(shift_hue_toward(100.0, 195.0, 1.0), 195.0, 1e-9));
    }
}
