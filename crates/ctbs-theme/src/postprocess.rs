//! Post-processing — the three passes that take seeded values to a theme
//! where every text variable reaches AAA against its background.
//!
//! ```text
//! VariableSet ─→ avoid_dead_zone ─→ correct_text ─→ force_extremes ─→ VariableSet
//!                (backgrounds)       (contrast       (black/white for
//!                                     search)         anything left)
//! ```
//!
//! Each pass is a pure function from one snapshot to the next, so any pass
//! can be tested on a hand-built snapshot.
//!
//! Text whose background is itself a text variable (button text on a bare
//! role color) is handled after all other text, so it is judged against the
//! already-corrected role color.

use std::collections::{BTreeMap, BTreeSet};

use ctbs_color::Color;
use tracing::{debug, info, warn};

use crate::contrast::{AAA_RATIO, black_or_white, contrast_ratio, ensure_contrast_ratio, relative_luminance};
use crate::error::{Result, ThemeError};
use crate::pairing::{Declarations, background_pair_for};
use crate::variable::{Kind, Variable};

/// Lower bound (exclusive) of the luminance dead zone.
pub const DEAD_ZONE_LOW: f64 = 0.10;
/// Upper bound (exclusive) of the luminance dead zone.
pub const DEAD_ZONE_HIGH: f64 = 0.30;
/// Dead-zone backgrounds at or below this are pushed dark.
const DARK_FAMILY_MAX: f64 = 0.20;
/// Dark-family backgrounds end at or below this luminance.
const DARK_TARGET: f64 = 0.08;
/// Light-family backgrounds end at or above this luminance.
const LIGHT_TARGET: f64 = 0.45;

// ---------------------------------------------------------------------------
// VariableSet
// ---------------------------------------------------------------------------

/// Snapshot of every variable's color during generation.
///
/// Holds declared variables plus the implicit ones pairing may point at
/// (the body background, base role colors, subtle backgrounds).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet {
    values: BTreeMap<Variable, Color>,
    declared: BTreeSet<Variable>,
}

impl VariableSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declared variable.
    pub fn declare(&mut self, var: Variable, color: Color) {
        self.declared.insert(var);
        self.values.insert(var, color);
    }

    /// Set a variable that exists only as a pairing target.
    ///
    /// Does nothing if the variable already has a value.
    pub fn imply(&mut self, var: Variable, color: Color) {
        self.values.entry(var).or_insert(color);
    }

    /// Replace the value of a variable that is already present.
    fn update(&mut self, var: Variable, color: Color) {
        if let Some(slot) = self.values.get_mut(&var) {
            *slot = color;
        }
    }

    #[must_use]
    pub fn get(&self, var: &Variable) -> Option<Color> {
        self.values.get(var).copied()
    }

    #[must_use]
    pub fn contains(&self, var: &Variable) -> bool {
        self.values.contains_key(var)
    }

    /// All variables with values, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, Color)> + '_ {
        self.values.iter().map(|(&v, &c)| (v, c))
    }

    /// Variables of one kind, in name order.
    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = (Variable, Color)> + '_ {
        self.iter().filter(move |(v, _)| v.kind() == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every text variable with its background, in processing order.
    ///
    /// Text on non-text backgrounds comes first; text whose background is
    /// another text variable comes last.
    pub fn text_pairs(&self) -> Result<Vec<(Variable, Variable)>> {
        let mut first = Vec::new();
        let mut last = Vec::new();
        for (text, _) in self.of_kind(Kind::Text) {
            let background = background_pair_for(&text, self)?;
            if !self.contains(&background) {
                return Err(ThemeError::Unpaired {
                    name: text.name(),
                    background: background.name(),
                });
            }
            if background.kind() == Kind::Text {
                last.push((text, background));
            } else {
                first.push((text, background));
            }
        }
        first.append(&mut last);
        Ok(first)
    }

    /// The color a pair's background currently has.
    fn background(&self, text: Variable, background: Variable) -> Result<Color> {
        self.get(&background).ok_or_else(|| ThemeError::Unpaired {
            name: text.name(),
            background: background.name(),
        })
    }
}

impl Declarations for VariableSet {
    fn is_declared(&self, var: &Variable) -> bool {
        self.declared.contains(var)
    }
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

/// Run all three passes.
pub fn make_text_aaa_compatible(set: &VariableSet) -> Result<VariableSet> {
    let set = avoid_dead_zone(set);
    let set = correct_text(&set)?;
    force_extremes(&set)
}

/// Pass 1: move backgrounds out of the mid-luminance band where neither
/// black nor white text can reach AAA.
#[must_use]
pub fn avoid_dead_zone(set: &VariableSet) -> VariableSet {
    let mut next = set.clone();
    let mut moved = 0usize;
    for (var, color) in set.of_kind(Kind::Background) {
        let fixed = leave_dead_zone(color);
        if fixed != color {
            debug!(variable = %var, from = %color, to = %fixed, "background moved out of dead zone");
            next.update(var, fixed);
            moved += 1;
        }
    }
    info!(moved, "dead-zone pass done");
    next
}

/// Push a color out of the dead zone, keeping hue and saturation.
#[must_use]
pub fn leave_dead_zone(color: Color) -> Color {
    let lum = relative_luminance(color);
    if lum <= DEAD_ZONE_LOW || lum >= DEAD_ZONE_HIGH {
        return color;
    }

    let hsl = color.to_hsl();
    let dark = lum <= DARK_FAMILY_MAX;
    let mut l = hsl.l;
    loop {
        l = if dark { (l - 1.0).max(0.0) } else { (l + 1.0).min(100.0) };
        let candidate = Color::from_hsl(hsl.with_lightness(l));
        let lum = relative_luminance(candidate);
        let done = if dark { lum <= DARK_TARGET } else { lum >= LIGHT_TARGET };
        if done || l <= 0.0 || l >= 100.0 {
            return candidate;
        }
    }
}

/// Pass 2: run every text variable through the contrast search against its
/// background.
pub fn correct_text(set: &VariableSet) -> Result<VariableSet> {
    let mut next = set.clone();
    let mut corrected = 0usize;
    for (text, background) in set.text_pairs()? {
        let Some(color) = next.get(&text) else { continue };
        let bg = next.background(text, background)?;
        let fixed = ensure_contrast_ratio(color, bg, AAA_RATIO);
        if fixed != color {
            debug!(
                variable = %text,
                background = %background,
                from = %color,
                to = %fixed,
                ratio = contrast_ratio(fixed, bg),
                "text corrected"
            );
            next.update(text, fixed);
            corrected += 1;
        }
    }
    info!(corrected, "text-correction pass done");
    Ok(next)
}

/// Pass 3: anything still below AAA becomes black or white.
pub fn force_extremes(set: &VariableSet) -> Result<VariableSet> {
    let mut next = set.clone();
    let mut forced = 0usize;
    for (text, background) in set.text_pairs()? {
        let Some(color) = next.get(&text) else { continue };
        let bg = next.background(text, background)?;
        let ratio = contrast_ratio(color, bg);
        if ratio < AAA_RATIO {
            let fixed = black_or_white(bg);
            warn!(
                variable = %text,
                background = %background,
                ratio,
                to = %fixed,
                "text below AAA after correction, forcing black/white"
            );
            next.update(text, fixed);
            forced += 1;
        }
    }
    info!(forced, "fallback pass done");
    Ok(next)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
