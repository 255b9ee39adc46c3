//! Role mapping — the bridge from an image palette to the eight semantic
//! colors a component framework is built from.
//!
//! ```text
//! Palette ─→ Primary    (best saturation/lightness score)
//!        ├─→ Secondary  (farthest hue from Primary)
//!        ├─→ Success / Warning / Danger / Info
//!        │              (hue bands, anchored toward canonical hues)
//!        ├─→ Light      (brightest, forced to luminance >= 0.85)
//!        ├─→ Dark       (darkest, forced to luminance <= 0.10)
//!        └─→ Indigo / Purple / Pink / Orange / Teal
//!                       (more hue bands; Blue, Green, Red, Yellow and Cyan
//!                        alias Primary and the status roles, Gray is fixed)
//!
//! RoleMap ─→ contrast check against the body background ─→ accepted roles
//! ```
//!
//! Mapping is deterministic: every tie keeps palette order.

use std::fmt;
use std::ops::Index;

use ctbs_color::hsl::{hue_distance, shift_hue_toward};
use ctbs_color::{Color, Hsl};
use tracing::debug;

use crate::contrast::{AAA_RATIO, ensure_contrast_ratio, relative_luminance};
use crate::extract::Palette;

/// Light must reach this luminance to carry dark text at AAA.
pub const LIGHT_MIN_LUMINANCE: f64 = 0.85;
/// Dark must stay at or below this luminance to carry light text at AAA.
pub const DARK_MAX_LUMINANCE: f64 = 0.10;

/// Status roles only consider entries at least this saturated.
const BAND_MIN_SATURATION: f64 = 15.0;
/// Fraction of the way a matched status color moves toward its canonical hue.
const ANCHOR_PULL: f64 = 0.3;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// One of the eight semantic colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Primary,
    Secondary,
    Success,
    Info,
    Warning,
    Danger,
    Light,
    Dark,
}

impl Role {
    pub const ALL: [Self; 8] = [
        Self::Primary,
        Self::Secondary,
        Self::Success,
        Self::Info,
        Self::Warning,
        Self::Danger,
        Self::Light,
        Self::Dark,
    ];

    /// The name used inside variable names (`Primary`, `Danger`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Success => "Success",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Danger => "Danger",
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.name() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// The hue band a status role is matched against, and the hue it is
    /// anchored to.
    const fn band(self) -> Option<HueBand> {
        match self {
            Self::Danger => Some(HueBand::RED.anchored(0.0)),
            Self::Warning => Some(HueBand::YELLOW.anchored(45.0)),
            Self::Success => Some(HueBand::GREEN.anchored(120.0)),
            Self::Info => Some(HueBand::CYAN.anchored(195.0)),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// NamedColor
// ---------------------------------------------------------------------------

/// Bootstrap's literal palette colors (`--bs-blue`, `--bs-teal`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamedColor {
    Blue,
    Indigo,
    Purple,
    Pink,
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Cyan,
    Gray,
}

/// Where a named color comes from.
enum Source {
    /// Same color as a role.
    Alias(Role),
    /// Matched in a hue band, like the status roles.
    Band(HueBand),
    /// Never taken from the image.
    Fixed(Color),
}

impl NamedColor {
    pub const ALL: [Self; 11] = [
        Self::Blue,
        Self::Indigo,
        Self::Purple,
        Self::Pink,
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Teal,
        Self::Cyan,
        Self::Gray,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "Blue",
            Self::Indigo => "Indigo",
            Self::Purple => "Purple",
            Self::Pink => "Pink",
            Self::Red => "Red",
            Self::Orange => "Orange",
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Teal => "Teal",
            Self::Cyan => "Cyan",
            Self::Gray => "Gray",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    const fn index(self) -> usize {
        self as usize
    }

    const fn source(self) -> Source {
        match self {
            Self::Blue => Source::Alias(Role::Primary),
            Self::Red => Source::Alias(Role::Danger),
            Self::Yellow => Source::Alias(Role::Warning),
            Self::Green => Source::Alias(Role::Success),
            Self::Cyan => Source::Alias(Role::Info),
            Self::Indigo => Source::Band(HueBand::BLUE.anchored(264.0)),
            Self::Purple => Source::Band(HueBand::PURPLE.anchored(282.0)),
            Self::Pink => Source::Band(HueBand::PINK.anchored(330.0)),
            Self::Orange => Source::Band(HueBand::ORANGE.anchored(30.0)),
            Self::Teal => Source::Band(HueBand::GREEN.anchored(160.0)),
            Self::Gray => Source::Fixed(GRAY),
        }
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bootstrap's `--bs-gray`.
const GRAY: Color = Color::rgb(0x6c, 0x75, 0x7d);

/// Half-open hue range `[lo, hi)`, wrapping through 0 when `lo > hi`.
#[derive(Debug, Clone, Copy)]
struct HueBand {
    lo: f64,
    hi: f64,
    canonical: f64,
}

impl HueBand {
    const RED: Self = Self::range(345.0, 15.0);
    const ORANGE: Self = Self::range(15.0, 45.0);
    const YELLOW: Self = Self::range(45.0, 75.0);
    const GREEN: Self = Self::range(75.0, 150.0);
    const CYAN: Self = Self::range(150.0, 195.0);
    const BLUE: Self = Self::range(195.0, 255.0);
    const PURPLE: Self = Self::range(255.0, 285.0);
    const PINK: Self = Self::range(285.0, 345.0);

    const fn range(lo: f64, hi: f64) -> Self {
        Self { lo, hi, canonical: lo }
    }

    /// The same band, anchored to `canonical`.
    const fn anchored(self, canonical: f64) -> Self {
        Self { canonical, ..self }
    }

    fn contains(self, h: f64) -> bool {
        if self.lo <= self.hi {
            h >= self.lo && h < self.hi
        } else {
            h >= self.lo || h < self.hi
        }
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which half of the theme is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    /// The role acting as the page background in this mode.
    #[must_use]
    pub const fn body_role(self) -> Role {
        match self {
            Self::Light => Role::Light,
            Self::Dark => Role::Dark,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

// ---------------------------------------------------------------------------
// RoleMap
// ---------------------------------------------------------------------------

/// A color for every role and every named color.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RoleMap {
    colors: [Color; 8],
    named: [Color; 11],
}

impl RoleMap {
    /// Bootstrap's stock colors.
    pub const BOOTSTRAP: Self = Self {
        colors: [
            Color::rgb(0x0d, 0x6e, 0xfd),
            Color::rgb(0x6c, 0x75, 0x7d),
            Color::rgb(0x19, 0x87, 0x54),
            Color::rgb(0x0d, 0xca, 0xf0),
            Color::rgb(0xff, 0xc1, 0x07),
            Color::rgb(0xdc, 0x35, 0x45),
            Color::rgb(0xf8, 0xf9, 0xfa),
            Color::rgb(0x21, 0x25, 0x29),
        ],
        named: [
            Color::rgb(0x0d, 0x6e, 0xfd),
            Color::rgb(0x66, 0x10, 0xf2),
            Color::rgb(0x6f, 0x42, 0xc1),
            Color::rgb(0xd6, 0x33, 0x84),
            Color::rgb(0xdc, 0x35, 0x45),
            Color::rgb(0xfd, 0x7e, 0x14),
            Color::rgb(0xff, 0xc1, 0x07),
            Color::rgb(0x19, 0x87, 0x54),
            Color::rgb(0x20, 0xc9, 0x97),
            Color::rgb(0x0d, 0xca, 0xf0),
            GRAY,
        ],
    };

    #[must_use]
    pub const fn get(&self, role: Role) -> Color {
        self.colors[role.index()]
    }

    pub const fn set(&mut self, role: Role, color: Color) {
        self.colors[role.index()] = color;
    }

    /// Roles and their colors in `Role::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Color)> + '_ {
        Role::ALL.into_iter().map(|role| (role, self.get(role)))
    }

    #[must_use]
    pub const fn named(&self, color: NamedColor) -> Color {
        self.named[color.index()]
    }

    pub const fn set_named(&mut self, color: NamedColor, value: Color) {
        self.named[color.index()] = value;
    }

    pub fn iter_named(&self) -> impl Iterator<Item = (NamedColor, Color)> + '_ {
        NamedColor::ALL.into_iter().map(|c| (c, self.named(c)))
    }
}

impl Index<Role> for RoleMap {
    type Output = Color;

    fn index(&self, role: Role) -> &Color {
        &self.colors[role.index()]
    }
}

impl Index<NamedColor> for RoleMap {
    type Output = Color;

    fn index(&self, color: NamedColor) -> &Color {
        &self.named[color.index()]
    }
}

impl fmt::Debug for RoleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(r, c)| (r.name(), c)))
            .entries(self.iter_named().map(|(n, c)| (n.name(), c)))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Knobs for [`map_roles`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapperConfig {
    /// When a banded hue is missing from the image, give its fallback
    /// Primary's saturation plus 20 (at most 85) instead of a fixed 70.
    pub harmonize_fallback: bool,
}

/// Assign every role and named color from one palette, without any
/// contrast check.
#[must_use]
pub fn map_roles(palette: &Palette, config: &MapperConfig) -> RoleMap {
    let entries: Vec<(Color, Hsl)> = palette.colors().map(|c| (c, c.to_hsl())).collect();
    let mut map = RoleMap::BOOTSTRAP;

    let primary_idx = pick_primary(&entries);
    let primary = primary_idx.map_or(RoleMap::BOOTSTRAP.get(Role::Primary), |i| entries[i].0);
    map.set(Role::Primary, primary);

    let secondary = primary_idx
        .and_then(|p| pick_secondary(&entries, p))
        .map_or(primary, |i| entries[i].0);
    map.set(Role::Secondary, secondary);

    let primary_hsl = primary.to_hsl();
    for role in [Role::Success, Role::Warning, Role::Danger, Role::Info] {
        if let Some(band) = role.band() {
            map.set(role, banded_color(band, &entries, primary_hsl, config));
        }
    }

    if let Some(light) = entries.iter().map(|e| e.0).reduce(|best, c| {
        if relative_luminance(c) > relative_luminance(best) { c } else { best }
    }) {
        map.set(Role::Light, force_light(light));
    }
    if let Some(dark) = entries.iter().map(|e| e.0).reduce(|best, c| {
        if relative_luminance(c) < relative_luminance(best) { c } else { best }
    }) {
        map.set(Role::Dark, force_dark(dark));
    }

    for named in NamedColor::ALL {
        let color = match named.source() {
            Source::Alias(role) => map.get(role),
            Source::Band(band) => banded_color(band, &entries, primary_hsl, config),
            Source::Fixed(color) => color,
        };
        map.set_named(named, color);
    }

    map
}

/// Run every role except the body background, and every named color,
/// through the contrast engine against the body background.
#[must_use]
pub fn check_roles(raw: &RoleMap, mode: Mode) -> RoleMap {
    let body_role = mode.body_role();
    let body = raw.get(body_role);
    let checked_against_body = |name: &dyn fmt::Display, color: Color| {
        let fixed = ensure_contrast_ratio(color, body, AAA_RATIO);
        if fixed != color {
            debug!(role = %name, from = %color, to = %fixed, ?mode, "role adjusted for contrast");
        }
        fixed
    };

    let mut checked = *raw;
    for (role, color) in raw.iter().filter(|&(role, _)| role != body_role) {
        checked.set(role, checked_against_body(&role, color));
    }
    for (named, color) in raw.iter_named() {
        checked.set_named(named, checked_against_body(&named, color));
    }
    checked
}

/// Accepted roles for both halves of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeRoles {
    pub light: RoleMap,
    pub dark: RoleMap,
}

impl ThemeRoles {
    #[must_use]
    pub const fn for_mode(&self, mode: Mode) -> &RoleMap {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }
}

/// Map and check roles for both modes.
///
/// With a dark palette, dark roles come from it. Without one, the light
/// palette's raw roles are re-checked against their Dark role.
#[must_use]
pub fn assign_roles(light: &Palette, dark: Option<&Palette>, config: &MapperConfig) -> ThemeRoles {
    let light_raw = map_roles(light, config);
    let dark_raw = dark.map_or(light_raw, |palette| map_roles(palette, config));
    ThemeRoles {
        light: check_roles(&light_raw, Mode::Light),
        dark: check_roles(&dark_raw, Mode::Dark),
    }
}

// ---------------------------------------------------------------------------
// Individual roles
// ---------------------------------------------------------------------------

fn primary_score(hsl: Hsl) -> f64 {
    let mut penalty = 0.0;
    if hsl.l < 20.0 || hsl.l > 85.0 {
        penalty += 50.0;
    }
    if hsl.s < 10.0 {
        penalty += 30.0;
    }
    1.5f64.mul_add(hsl.s, 2.5f64.mul_add(-(50.0 - hsl.l).abs(), 100.0)) - penalty
}

/// Index of the best-scoring entry; the first one wins a tie.
fn pick_primary(entries: &[(Color, Hsl)]) -> Option<usize> {
    first_max_by(entries.iter().enumerate().map(|(i, e)| (i, primary_score(e.1))))
}

/// Index of the entry whose hue is farthest from the primary's.
fn pick_secondary(entries: &[(Color, Hsl)], primary: usize) -> Option<usize> {
    let primary_hue = entries[primary].1.h;
    first_max_by(
        entries
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != primary)
            .map(|(i, e)| (i, hue_distance(e.1.h, primary_hue))),
    )
}

fn first_max_by(scored: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
    scored
        .fold(None, |best: Option<(usize, f64)>, (i, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((i, score)),
        })
        .map(|(i, _)| i)
}

/// The most saturated in-band entry anchored toward the band's hue, or the
/// band's fallback.
fn banded_color(band: HueBand, entries: &[(Color, Hsl)], primary: Hsl, config: &MapperConfig) -> Color {
    let in_band = entries
        .iter()
        .filter(|e| e.1.s >= BAND_MIN_SATURATION && band.contains(e.1.h))
        .fold(None, |best: Option<Hsl>, e| match best {
            Some(top) if top.s >= e.1.s => best,
            _ => Some(e.1),
        });

    if let Some(hsl) = in_band {
        let h = shift_hue_toward(hsl.h, band.canonical, ANCHOR_PULL);
        return Color::hsl(h, hsl.s.clamp(40.0, 90.0), hsl.l.clamp(35.0, 60.0));
    }

    let s = if config.harmonize_fallback { (primary.s + 20.0).min(85.0) } else { 70.0 };
    Color::hsl(band.canonical, s, 45.0)
}

/// Raise a color until it is bright enough to be the Light role.
fn force_light(color: Color) -> Color {
    if relative_luminance(color) >= LIGHT_MIN_LUMINANCE {
        return color;
    }
    let hsl = color.to_hsl();
    let mut l = 95.0;
    loop {
        let candidate = Color::from_hsl(hsl.with_lightness(l));
        if relative_luminance(candidate) >= LIGHT_MIN_LUMINANCE || l >= 100.0 {
            return candidate;
        }
        l += 1.0;
    }
}

/// Lower a color until it is dark enough to be the Dark role.
fn force_dark(color: Color) -> Color {
    if relative_luminance(color) <= DARK_MAX_LUMINANCE {
        return color;
    }
    let hsl = color.to_hsl();
    let mut l = 5.0;
    loop {
        let candidate = Color::from_hsl(hsl.with_lightness(l));
        if relative_luminance(candidate) <= DARK_MAX_LUMINANCE || l <= 0.0 {
            return candidate;
        }
        l -= 1.0;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
