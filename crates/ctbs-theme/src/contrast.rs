//! WCAG contrast measurement and the contrast-correction search.
//!
//! Every text color in a generated theme must reach AAA (7:1) against the
//! surface it is rendered on. Measurement happens in sRGB relative
//! luminance (the WCAG definition); adjustment happens in HSL, because
//! holding hue fixed in HSL is what keeps a corrected "danger" red looking
//! red.
//!
//! The search never returns a sub-integer color: every candidate is
//! rounded to 8-bit before it is measured, so the ratio that passes the
//! check is the ratio the stylesheet gets.

use ctbs_color::{Color, Hsl};
use tracing::trace;

/// WCAG AAA minimum for normal text.
pub const AAA_RATIO: f64 = 7.0;

/// Added to every target the search aims for, so downstream rounding can
/// never drop a pair below the nominal target.
pub const TARGET_BUFFER: f64 = 0.1;

/// Backgrounds brighter than this are "light": the search darkens first.
pub const LIGHT_BACKGROUND: f64 = 0.5;

/// Lightness step of the sweep, in percentage points.
const LIGHTNESS_STEP: f64 = 1.0;

/// Fractions of the original saturation tried after the first sweep fails.
const SATURATION_STEPS: [f64; 4] = [0.75, 0.5, 0.25, 0.0];

// ---------------------------------------------------------------------------
// Measurement
// ---------------------------------------------------------------------------

/// sRGB gamma decode (unit range in, unit range out).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// Uses the standard sRGB linearization + weighted sum formula:
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    0.2126f64.mul_add(
        srgb_to_linear(r),
        0.7152f64.mul_add(srgb_to_linear(g), 0.0722 * srgb_to_linear(b)),
    )
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0]. The formula is:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// The result is always >= 1.0 regardless of argument order.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether `background` counts as a light surface.
#[inline]
#[must_use]
pub fn is_light(background: Color) -> bool {
    relative_luminance(background) > LIGHT_BACKGROUND
}

/// Pure black or pure white, whichever contrasts more with `background`.
///
/// Ties go to the color the lightness sweep would have moved toward
/// (black on light backgrounds, white on dark ones).
#[must_use]
pub fn black_or_white(background: Color) -> Color {
    let on_black = contrast_ratio(Color::BLACK, background);
    let on_white = contrast_ratio(Color::WHITE, background);
    if on_black > on_white {
        Color::BLACK
    } else if on_white > on_black {
        Color::WHITE
    } else {
        Direction::for_background(background).extreme()
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Which way the lightness sweep moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Darken,
    Lighten,
}

impl Direction {
    /// Darken text on light backgrounds, lighten it on dark ones.
    #[must_use]
    pub fn for_background(background: Color) -> Self {
        if is_light(background) {
            Self::Darken
        } else {
            Self::Lighten
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Darken => Self::Lighten,
            Self::Lighten => Self::Darken,
        }
    }

    /// The lightness this direction ends at.
    const fn bound(self) -> f64 {
        match self {
            Self::Darken => 0.0,
            Self::Lighten => 100.0,
        }
    }

    /// The color at the end of the sweep.
    #[must_use]
    pub const fn extreme(self) -> Color {
        match self {
            Self::Darken => Color::BLACK,
            Self::Lighten => Color::WHITE,
        }
    }

    fn step(self, l: f64) -> f64 {
        match self {
            Self::Darken => (l - LIGHTNESS_STEP).max(0.0),
            Self::Lighten => (l + LIGHTNESS_STEP).min(100.0),
        }
    }
}

/// Adjust `color` until it contrasts with `background` by at least
/// `target + 0.1`, keeping its hue.
///
/// Three passes, each returning as soon as a candidate passes:
///
/// 1. Sweep lightness at the original saturation in 1-point steps: first
///    toward the extreme favored by the background (darker on light
///    surfaces), then toward the other one.
/// 2. Repeat the sweep at 75%, 50%, 25% and 0% of the original
///    saturation. Desaturating buys lightness range before the hue turns
///    into gray.
/// 3. Fall back to pure black or white, whichever contrasts more.
///
/// A color that already passes is returned unchanged, which makes the
/// function idempotent.
#[must_use]
pub fn ensure_contrast_ratio(color: Color, background: Color, target: f64) -> Color {
    let goal = target + TARGET_BUFFER;
    if contrast_ratio(color, background) >= goal {
        return color;
    }

    let hsl = color.to_hsl();
    let prefer = Direction::for_background(background);

    if let Some(found) = sweep(hsl, background, goal, prefer) {
        return found;
    }

    for factor in SATURATION_STEPS {
        let reduced = hsl.with_saturation(hsl.s * factor);
        if let Some(found) = sweep(reduced, background, goal, prefer) {
            return found;
        }
    }

    let fallback = black_or_white(background);
    trace!(
        color = %color,
        background = %background,
        result = %fallback,
        ratio = contrast_ratio(fallback, background),
        "contrast search exhausted, using black/white"
    );
    fallback
}

/// Sweep the preferred direction, then the opposite one.
fn sweep(hsl: Hsl, background: Color, goal: f64, prefer: Direction) -> Option<Color> {
    sweep_toward(hsl, background, goal, prefer)
        .or_else(|| sweep_toward(hsl, background, goal, prefer.opposite()))
}

fn sweep_toward(hsl: Hsl, background: Color, goal: f64, direction: Direction) -> Option<Color> {
    let bound = direction.bound();
    let mut l = hsl.l;
    loop {
        let candidate = Color::from_hsl(hsl.with_lightness(l));
        if contrast_ratio(candidate, background) >= goal {
            return Some(candidate);
        }
        if (l - bound).abs() < f64::EPSILON {
            return None;
        }
        l = direction.step(l);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
