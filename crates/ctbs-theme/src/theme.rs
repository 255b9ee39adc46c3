//! Theme generation — from role colors to the finished name → value map.
//!
//! ```text
//! Registry ─→ Variables ─┐
//!                        ├─→ seed ─→ VariableSet ─→ post-process ─→ render ─→ Theme
//! ThemeRoles ────────────┘
//! ```
//!
//! Seeding gives every declared variable a starting color derived from
//! its role and the mode's body background. Anything a text variable
//! pairs with but the stylesheet never declared (the body background, a
//! bare role color, a subtle surface) is seeded too, so contrast is
//! judged against what the browser will fall back to, but it is not
//! emitted.

use std::collections::{BTreeMap, BTreeSet};

use ctbs_color::Color;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::contrast::{black_or_white, ensure_contrast_ratio, relative_luminance};
use crate::error::{Result, ThemeError};
use crate::extract::extract_palette;
use crate::pairing::background_pair_for;
use crate::postprocess::{VariableSet, make_text_aaa_compatible};
use crate::registry::Registry;
use crate::roles::{Mode, NamedColor, Role, RoleMap, ThemeRoles, assign_roles};
use crate::variable::{Button, ButtonPart, ButtonState, Context, Global, Kind, Slot, Tint, Variable, Word};

/// Minimum ratio of a filled button's background against the page.
const BUTTON_SURFACE_RATIO: f64 = 3.0;
/// Seed of a literal the rewriter could not classify.
const CUSTOM_GRAY: Color = Color::rgb(128, 128, 128);

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// The finished mapping: `#rrggbb` for colors, `rgba(r, g, b, a)` for
/// translucent white and black, `r, g, b` for companions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme {
    values: BTreeMap<String, String>,
}

impl Theme {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Names and values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Pretty-printed JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Theme {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Run the whole pipeline for one configuration.
///
/// Nothing is written anywhere; the caller decides what to do with the
/// theme once it exists.
pub fn generate(config: &GeneratorConfig) -> Result<Theme> {
    config.validate()?;

    let registry = Registry::load(&config.registry_sources)?;
    let variables = registry.variables()?;
    info!(variables = variables.len(), "registry loaded");

    let light = extract_palette(&config.image, &config.light)?;
    let dark = config
        .dark_image
        .as_deref()
        .map(|path| extract_palette(path, &config.dark))
        .transpose()?;

    let roles = assign_roles(&light, dark.as_ref(), &config.mapper);
    debug!(light = ?roles.light, dark = ?roles.dark, "roles assigned");

    build_theme(&variables, &roles)
}

/// Seed, correct and render the given variables.
pub fn build_theme(variables: &[Variable], roles: &ThemeRoles) -> Result<Theme> {
    let seeded = seed(variables, roles)?;
    let finished = make_text_aaa_compatible(&seeded)?;
    render(variables, &finished)
}

/// Starting values for every declared variable and every background a
/// text variable pairs with.
///
/// The base of every companion counts as declared.
pub fn seed(variables: &[Variable], roles: &ThemeRoles) -> Result<VariableSet> {
    let mut set = VariableSet::new();
    let bases: BTreeSet<Variable> = variables.iter().map(|v| v.base()).collect();
    for &var in &bases {
        set.declare(var, initial_value(var, roles));
    }

    // An implied bare role color is text in its own right and needs a
    // background of its own.
    let mut pending: Vec<Variable> = bases.iter().copied().filter(|v| v.kind() == Kind::Text).collect();
    while let Some(var) = pending.pop() {
        let background = background_pair_for(&var, &set)?;
        if set.contains(&background) {
            continue;
        }
        debug!(variable = %var, background = %background, "seeding undeclared background");
        set.imply(background, initial_value(background, roles));
        if background.kind() == Kind::Text {
            pending.push(background);
        }
    }
    Ok(set)
}

/// Format the finished values for exactly the requested names.
pub fn render(variables: &[Variable], set: &VariableSet) -> Result<Theme> {
    let mut theme = Theme::default();
    for var in variables {
        let base = var.base();
        let color = set
            .get(&base)
            .ok_or_else(|| ThemeError::unknown(base.name()))?;
        let value = match var.slot {
            _ if var.is_companion() => color.to_channels(),
            Slot::Alpha(alpha) => format!("rgba({}, {})", color.to_channels(), alpha.opacity()),
            _ => color.to_hex(),
        };
        theme.insert(var.name(), value);
    }
    Ok(theme)
}

// ---------------------------------------------------------------------------
// Initial values
// ---------------------------------------------------------------------------

/// Role colors and derived surfaces for one mode.
struct Seeder<'a> {
    roles: &'a RoleMap,
    mode: Mode,
    body: Color,
}

impl<'a> Seeder<'a> {
    fn new(roles: &'a ThemeRoles, mode: Mode) -> Self {
        let roles = roles.for_mode(mode);
        Self {
            roles,
            mode,
            body: roles.get(mode.body_role()),
        }
    }

    /// Move lightness away from the body background.
    fn recede(&self, color: Color, amount: f64) -> Color {
        if self.mode.is_dark() { color.darken(amount) } else { color.lighten(amount) }
    }

    /// Move lightness toward stronger emphasis on the body background.
    fn deepen(&self, color: Color, amount: f64) -> Color {
        if self.mode.is_dark() { color.lighten(amount) } else { color.darken(amount) }
    }

    fn bg_subtle(&self, role: Role) -> Color {
        self.subtle_of(self.roles[role])
    }

    /// A faint tint of `color` that text can sit on.
    fn subtle_of(&self, color: Color) -> Color {
        let first = self.recede(color, 40.0);
        let lum = relative_luminance(first);
        let settled = if self.mode.is_dark() { lum <= 0.15 } else { lum >= 0.85 };
        if settled { first } else { self.recede(first, 10.0) }
    }

    fn button_bg(&self, button: Button) -> Color {
        let role = self.roles[button.role];
        let filled = ensure_contrast_ratio(role, self.body, BUTTON_SURFACE_RATIO);
        match (button.outline, button.state) {
            (false, ButtonState::Default | ButtonState::Disabled) => filled,
            (false, ButtonState::Hover | ButtonState::Active) => self.deepen(filled, 15.0),
            (true, ButtonState::Default | ButtonState::Disabled) => self.body,
            (true, ButtonState::Hover | ButtonState::Active) => role,
        }
    }

    fn button(&self, button: Button) -> Color {
        match button.part {
            ButtonPart::Color => self.roles[button.role],
            ButtonPart::Bg => self.button_bg(button),
            ButtonPart::BorderColor if button.outline => self.roles[button.role],
            ButtonPart::BorderColor => self.button_bg(button),
        }
    }

    fn global(&self, global: Global) -> Color {
        match global {
            Global::BodyBg | Global::CardBg => self.body,
            Global::BodyColor | Global::EmphasisColor | Global::CardColor => black_or_white(self.body),
            Global::LinkColor => self.roles[Role::Primary],
            Global::LinkHoverColor => self.deepen(self.roles[Role::Primary], 10.0),
            Global::BorderColor | Global::BorderColorTranslucent => {
                if self.mode.is_dark() {
                    self.roles[Role::Dark].lighten(15.0)
                } else {
                    self.roles[Role::Light].darken(15.0)
                }
            }
            Global::GrayDark => self.roles[Role::Dark],
            Global::White => Color::WHITE,
            Global::Black => Color::BLACK,
        }
    }

    /// `Gray500` is the gray itself; each 100 away moves lightness by 10.
    fn gray_weight(&self, weight: u16) -> Color {
        let gray = self.roles[NamedColor::Gray];
        let steps = f64::from(weight) / 100.0 - 5.0;
        if steps > 0.0 {
            gray.darken(steps * 10.0)
        } else if steps < 0.0 {
            gray.lighten(-steps * 10.0)
        } else {
            gray
        }
    }

    /// What a component context starts from before any state shading.
    fn context_base(&self, context: Context) -> Color {
        let kind = context.kind();
        if let Some(role) = context.role() {
            return self.roles[role];
        }
        if context.has(Word::Body) {
            let global = if kind == Kind::Background { Global::BodyBg } else { Global::BodyColor };
            return self.global(global);
        }
        if context.has(Word::Border) {
            return self.global(Global::BorderColor);
        }
        if context.has(Word::Emphasis) {
            return self.global(Global::EmphasisColor);
        }
        if context.has(Word::Link) {
            return self.roles[Role::Primary];
        }
        if context.has(Word::Valid) {
            return self.roles[Role::Success];
        }
        if context.has(Word::Invalid) {
            return self.roles[Role::Danger];
        }
        match kind {
            Kind::Background => self.body,
            Kind::Text if context.component().is_some() => self.roles[Role::Secondary],
            Kind::Text => black_or_white(self.body),
            Kind::Decoration if context.has(Word::White) => Color::WHITE,
            Kind::Decoration if context.has(Word::Black) => Color::BLACK,
            Kind::Decoration => CUSTOM_GRAY,
        }
    }

    fn context(&self, context: Context) -> Color {
        let base = self.context_base(context);
        if context.is_subtle_surface() {
            return self.subtle_of(base);
        }
        if context.has(Word::Hover) || context.has(Word::Active) {
            let amount = if context.kind() == Kind::Background { 15.0 } else { 10.0 };
            return self.deepen(base, amount);
        }
        if context.has(Word::Striped) {
            return self.deepen(base, 5.0);
        }
        base
    }

    fn value(&self, slot: Slot) -> Color {
        match slot {
            Slot::Role(role) | Slot::Surface(role) | Slot::TextEmphasis(role) => self.roles[role],
            Slot::BgSubtle(role) => self.bg_subtle(role),
            Slot::BorderSubtle(role) => self.recede(self.roles[role], 30.0),
            Slot::Button(button) => self.button(button),
            Slot::Global(global) => self.global(global),
            Slot::Named(named) => self.roles[named],
            Slot::GrayWeight(weight) => self.gray_weight(weight),
            Slot::Alpha(alpha) => match alpha.tint {
                Tint::White => Color::WHITE,
                Tint::Black => Color::BLACK,
            },
            Slot::Custom(_) => CUSTOM_GRAY,
            Slot::Context(context) => self.context(context),
        }
    }
}

/// The seed color of one variable.
#[must_use]
pub fn initial_value(var: Variable, roles: &ThemeRoles) -> Color {
    Seeder::new(roles, var.mode()).value(var.slot)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::{AAA_RATIO, contrast_ratio};
    use crate::extract::Palette;
    use crate::postprocess::{DEAD_ZONE_HIGH, DEAD_ZONE_LOW};
    use crate::roles::MapperConfig;
    use pretty_assertions::assert_eq;

    /// A registry shaped like the rewritten Bootstrap stylesheet.
    fn bootstrap_registry() -> Registry {
        let mut registry = Registry::default();
        for prefix in ["", "DarkTheme"] {
            for role in Role::ALL {
                for body in [
                    "{R}",
                    "{R}Rgb",
                    "{R}Bg",
                    "{R}BgSubtle",
                    "{R}BorderSubtle",
                    "{R}TextEmphasis",
                    "{R}BtnColor",
                    "{R}BtnBg",
                    "{R}BtnBorderColor",
                    "{R}BtnHoverColor",
                    "{R}BtnHoverBg",
                    "{R}BtnHoverBorderColor",
                    "{R}BtnActiveColor",
                    "{R}BtnActiveBg",
                    "{R}BtnDisabledColor",
                    "{R}BtnDisabledBg",
                    "Outline{R}BtnColor",
                    "Outline{R}BtnHoverColor",
                    "Outline{R}BtnHoverBg",
                    "Outline{R}BtnActiveColor",
                    "Outline{R}BtnActiveBg",
                    "Outline{R}BtnBorderColor",
                ] {
                    let body = body.replace("{R}", role.name());
                    registry.insert(format!("--CTBS-{prefix}{body}"));
                }
            }
            for global in Global::ALL {
                registry.insert(format!("--CTBS-{prefix}{}", global.name()));
                registry.insert(format!("--CTBS-{prefix}{}Rgb", global.name()));
            }
        }
        registry
    }

    fn roles_from(colors: &[Color]) -> ThemeRoles {
        assign_roles(&Palette::from_colors(colors), None, &MapperConfig::default())
    }

    fn sample_roles() -> ThemeRoles {
        roles_from(&[
            Color::rgb(196, 92, 38),
            Color::rgb(38, 84, 124),
            Color::rgb(233, 196, 106),
            Color::rgb(42, 157, 143),
            Color::rgb(244, 240, 232),
            Color::rgb(24, 22, 30),
        ])
    }

    fn generate_from(registry: &Registry, roles: &ThemeRoles) -> (Vec<Variable>, VariableSet, Theme) {
        let variables = registry.variables().unwrap();
        let seeded = seed(&variables, roles).unwrap();
        let finished = make_text_aaa_compatible(&seeded).unwrap();
        let theme = render(&variables, &finished).unwrap();
        (variables, finished, theme)
    }

    #[test]
    fn every_registry_name_and_nothing_else() {
        let registry = bootstrap_registry();
        let (_, _, theme) = generate_from(&registry, &sample_roles());
        assert_eq!(theme.len(), registry.len());
        for name in registry.names() {
            assert!(theme.get(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn every_text_pair_reaches_aaa() {
        for roles in [
            sample_roles(),
            roles_from(&[]),
            roles_from(&[Color::rgb(120, 120, 120)]),
            roles_from(&[Color::rgb(255, 210, 0), Color::rgb(0, 200, 255)]),
        ] {
            let (_, finished, _) = generate_from(&bootstrap_registry(), &roles);
            for (text, background) in finished.text_pairs().unwrap() {
                let ratio = contrast_ratio(finished.get(&text).unwrap(), finished.get(&background).unwrap());
                assert!(ratio >= AAA_RATIO, "{text} on {background}: {ratio:.3}");
            }
        }
    }

    #[test]
    fn no_background_left_in_dead_zone() {
        let (_, finished, _) = generate_from(&bootstrap_registry(), &sample_roles());
        for (var, color) in finished.of_kind(Kind::Background) {
            let lum = relative_luminance(color);
            assert!(
                lum <= DEAD_ZONE_LOW || lum >= DEAD_ZONE_HIGH,
                "{var} = {color} has luminance {lum:.3}"
            );
        }
    }

    #[test]
    fn companions_follow_their_base() {
        let (_, _, theme) = generate_from(&bootstrap_registry(), &sample_roles());
        for (name, value) in theme.iter() {
            let Some(base) = name.strip_suffix("Rgb") else { continue };
            let base = Color::hex(theme.get(base).unwrap()).unwrap();
            assert_eq!(value, base.to_channels(), "{name}");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let registry = bootstrap_registry();
        let (_, _, a) = generate_from(&registry, &sample_roles());
        let (_, _, b) = generate_from(&registry, &sample_roles());
        assert_eq!(a, b);
    }

    #[test]
    fn companion_without_base_is_still_rendered() {
        let registry: Registry = ["--CTBS-InfoRgb"].into_iter().collect();
        let (_, _, theme) = generate_from(&registry, &sample_roles());
        assert_eq!(theme.len(), 1);
        let channels = theme.get("--CTBS-InfoRgb").unwrap();
        assert_eq!(channels.split(", ").count(), 3);
    }

    #[test]
    fn undeclared_backgrounds_are_seeded_but_not_emitted() {
        let registry: Registry = ["--CTBS-BodyColor", "--CTBS-DangerBtnColor"].into_iter().collect();
        let variables = registry.variables().unwrap();
        let set = seed(&variables, &sample_roles()).unwrap();
        assert!(set.contains(&Variable::light(Slot::Global(Global::BodyBg))));
        assert!(set.contains(&Variable::light(Slot::Role(Role::Danger))));

        let (_, _, theme) = generate_from(&registry, &sample_roles());
        assert_eq!(theme.iter().map(|(k, _)| k).collect::<Vec<_>>(), [
            "--CTBS-BodyColor",
            "--CTBS-DangerBtnColor"
        ]);
    }

    #[test]
    fn implied_role_color_gets_its_own_background() {
        let registry: Registry = ["--CTBS-DarkThemeDangerBtnColor"].into_iter().collect();
        let variables = registry.variables().unwrap();
        let set = seed(&variables, &sample_roles()).unwrap();
        let danger = Variable::parse("--CTBS-DarkThemeDanger").unwrap();
        assert!(set.contains(&danger));
        assert!(set.contains(&danger.sibling(Slot::Global(Global::BodyBg))));

        let finished = make_text_aaa_compatible(&set).unwrap();
        assert_eq!(finished.text_pairs().unwrap().len(), 2);
    }

    #[test]
    fn seeds_follow_the_mode() {
        let roles = sample_roles();
        let light_body = roles.light.get(Role::Light);
        let dark_body = roles.dark.get(Role::Dark);
        let parse = |n: &str| Variable::parse(n).unwrap();

        assert_eq!(initial_value(parse("--CTBS-BodyBg"), &roles), light_body);
        assert_eq!(initial_value(parse("--CTBS-DarkThemeBodyBg"), &roles), dark_body);
        assert_eq!(initial_value(parse("--CTBS-BodyColor"), &roles), Color::BLACK);
        assert_eq!(initial_value(parse("--CTBS-DarkThemeBodyColor"), &roles), Color::WHITE);
        assert_eq!(initial_value(parse("--CTBS-OutlinePrimaryBtnBg"), &roles), light_body);

        let subtle = initial_value(parse("--CTBS-PrimaryBgSubtle"), &roles);
        assert!(subtle.to_hsl().l > roles.light.get(Role::Primary).to_hsl().l);
        let dark_subtle = initial_value(parse("--CTBS-DarkThemePrimaryBgSubtle"), &roles);
        assert!(dark_subtle.to_hsl().l < roles.dark.get(Role::Primary).to_hsl().l);
    }

    #[test]
    fn button_background_contrasts_with_page() {
        let roles = sample_roles();
        let bg = initial_value(Variable::parse("--CTBS-WarningBtnBg").unwrap(), &roles);
        assert!(contrast_ratio(bg, roles.light.get(Role::Light)) >= BUTTON_SURFACE_RATIO);
    }

    #[test]
    fn json_roundtrip() {
        let (_, _, theme) = generate_from(&bootstrap_registry(), &sample_roles());
        let json = theme.to_json().unwrap();
        assert!(json.starts_with('{'));
        assert_eq!(Theme::from_json(&json).unwrap(), theme);
    }

    /// Names the stylesheet rewriter writes for a stock Bootstrap build:
    /// root palette, component contexts, uniqueness suffixes and the
    /// translucent and unclassified literals.
    const REWRITER_NAMES: &[&str] = &[
        "--CTBS-Blue",
        "--CTBS-Indigo",
        "--CTBS-Purple",
        "--CTBS-Pink",
        "--CTBS-Red",
        "--CTBS-Orange",
        "--CTBS-Yellow",
        "--CTBS-Green",
        "--CTBS-Teal",
        "--CTBS-Cyan",
        "--CTBS-Gray",
        "--CTBS-GrayDark",
        "--CTBS-Gray100",
        "--CTBS-Gray500",
        "--CTBS-Gray900",
        "--CTBS-Primary",
        "--CTBS-PrimaryRgb",
        "--CTBS-Light",
        "--CTBS-BodyBg",
        "--CTBS-BodyColor",
        "--CTBS-SecondaryColor",
        "--CTBS-SecondaryColorRgb",
        "--CTBS-TertiaryColor",
        "--CTBS-TertiaryBg",
        "--CTBS-CodeColor",
        "--CTBS-HighlightColor",
        "--CTBS-HighlightBg",
        "--CTBS-FocusRingColor",
        "--CTBS-FormValidColor",
        "--CTBS-FormInvalidBorderColor",
        "--CTBS-BorderColor",
        "--CTBS-BorderColor-1",
        "--CTBS-BorderColorTranslucent",
        "--CTBS-BoxShadowSm",
        "--CTBS-PrimaryBtnColor",
        "--CTBS-PrimaryBtnBg",
        "--CTBS-PrimaryBtnFocusShadowRgb",
        "--CTBS-LinkBtnFocusShadowRgb",
        "--CTBS-CloseBtnCloseColor",
        "--CTBS-PrimaryTableColor",
        "--CTBS-PrimaryTableBg",
        "--CTBS-PrimaryTableStripedBg",
        "--CTBS-PrimaryTableStripedColor",
        "--CTBS-PrimaryTableHoverBg",
        "--CTBS-DarkTableColor",
        "--CTBS-DarkTableBg",
        "--CTBS-SuccessAlertColor",
        "--CTBS-SuccessAlertBg",
        "--CTBS-InfoBadgeBg",
        "--CTBS-WarningListGroupItemColor",
        "--CTBS-DarkNavbarColor",
        "--CTBS-DarkNavbarBrandColor",
        "--CTBS-DarkNavbarBrandHoverColor",
        "--CTBS-DarkNavbarTogglerBorderColor",
        "--CTBS-LinkNavBoxShadow",
        "--CTBS-FormControlBorderColor",
        "--CTBS-FormControlBoxShadow",
        "--CTBS-FormCheckInputBackgroundColor",
        "--CTBS-DropdownItemColor",
        "--CTBS-DropdownLinkHoverBg",
        "--CTBS-DropdownLinkActiveColor",
        "--CTBS-BackdropBg",
        "--CTBS-Color",
        "--CTBS-Color-2",
        "--CTBS-Color-2Rgb",
        "--CTBS-BackgroundColor-1",
        "--CTBS-WhiteAlpha15",
        "--CTBS-WhiteAlpha15Rgb",
        "--CTBS-BlackAlpha175",
        "--CTBS-Custom-3",
        "--CTBS-DarkThemeBodyBg",
        "--CTBS-DarkThemeBodyColor",
        "--CTBS-DarkThemeSecondaryColor",
        "--CTBS-DarkThemeTertiaryBg",
        "--CTBS-DarkThemeBackgroundColor",
        "--CTBS-DarkThemeColor",
    ];

    #[test]
    fn rewriter_registry_generates_a_clean_theme() {
        let registry: Registry = REWRITER_NAMES.iter().copied().collect();
        for roles in [sample_roles(), roles_from(&[]), roles_from(&[Color::rgb(255, 210, 0)])] {
            let (_, finished, theme) = generate_from(&registry, &roles);
            assert_eq!(theme.len(), registry.len());

            let report = crate::audit::audit_against(&theme, Some(&registry)).unwrap();
            assert!(report.is_clean(), "{report:#?}");
            assert!(report.pairs.len() >= 30, "{} pairs", report.pairs.len());

            for (text, background) in finished.text_pairs().unwrap() {
                let ratio = contrast_ratio(finished.get(&text).unwrap(), finished.get(&background).unwrap());
                assert!(ratio >= AAA_RATIO, "{text} on {background}: {ratio:.3}");
            }
        }
    }

    #[test]
    fn translucent_literals_render_as_rgba() {
        let registry: Registry = REWRITER_NAMES.iter().copied().collect();
        let (_, _, theme) = generate_from(&registry, &sample_roles());
        assert_eq!(theme.get("--CTBS-WhiteAlpha15"), Some("rgba(255, 255, 255, 0.15)"));
        assert_eq!(theme.get("--CTBS-WhiteAlpha15Rgb"), Some("255, 255, 255"));
        assert_eq!(theme.get("--CTBS-BlackAlpha175"), Some("rgba(0, 0, 0, 0.175)"));
        assert_eq!(theme.get("--CTBS-Custom-3"), Some("#808080"));
    }

    #[test]
    fn component_seeds() {
        let roles = sample_roles();
        let seed_of = |n: &str| initial_value(Variable::parse(n).unwrap(), &roles);
        let primary = roles.light.get(Role::Primary);

        // Role-colored table and alert backgrounds are subtle tints, even
        // in a hover state.
        let subtle = seed_of("--CTBS-PrimaryBgSubtle");
        assert_eq!(seed_of("--CTBS-PrimaryTableBg"), subtle);
        assert_eq!(seed_of("--CTBS-PrimaryTableHoverBg"), subtle);

        // States deepen the base color: 15 for backgrounds, 10 otherwise.
        assert_eq!(seed_of("--CTBS-DarkNavbarBrandHoverColor"), roles.light.get(Role::Dark).darken(10.0));
        assert_eq!(seed_of("--CTBS-DropdownLinkHoverBg"), primary.darken(15.0));
        assert_eq!(seed_of("--CTBS-PrimaryTableStripedColor"), primary.darken(5.0));

        // No role: components fall back to Secondary text on the body.
        assert_eq!(seed_of("--CTBS-DropdownItemColor"), roles.light.get(Role::Secondary));
        assert_eq!(seed_of("--CTBS-BackdropBg"), roles.light.get(Role::Light));
        assert_eq!(seed_of("--CTBS-Color-2"), Color::BLACK);
        assert_eq!(seed_of("--CTBS-FormValidColor"), roles.light.get(Role::Success));
        assert_eq!(seed_of("--CTBS-LinkBtnFocusShadow"), primary);
    }

    #[test]
    fn gray_scale_steps_around_gray() {
        let roles = sample_roles();
        let seed_of = |n: &str| initial_value(Variable::parse(n).unwrap(), &roles);
        let gray = roles.light[NamedColor::Gray];
        assert_eq!(seed_of("--CTBS-Gray500"), gray);
        assert_eq!(seed_of("--CTBS-Gray100"), gray.lighten(40.0));
        assert_eq!(seed_of("--CTBS-Gray700"), gray.darken(20.0));
        assert_eq!(seed_of("--CTBS-DarkThemeGray"), roles.dark[NamedColor::Gray]);
        assert_eq!(seed_of("--CTBS-GrayDark"), roles.light.get(Role::Dark));
    }

    #[test]
    fn drifted_registry_fails_loudly() {
        let registry: Registry = ["--CTBS-Primary", "--CTBS-PrimaryGlowColor"].into_iter().collect();
        let err = registry.variables().unwrap_err();
        assert!(err.to_string().contains("--CTBS-PrimaryGlowColor"));
    }
}
