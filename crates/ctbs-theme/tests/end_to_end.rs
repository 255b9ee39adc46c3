use std::fs;
use std::path::{Path, PathBuf};

use ctbs_color::Color;
use ctbs_theme::{GeneratorConfig, Registry, ThemeError, audit_against, generate};
use image::{Rgb, RgbImage};
use pretty_assertions::assert_eq;

const VARS_CSS: &str = r"
:root {
  --bs-body-bg: var(--CTBS-BodyBg);
  --bs-body-bg-rgb: var(--CTBS-BodyBgRgb);
  --bs-body-color: var(--CTBS-BodyColor);
  --bs-primary: var(--CTBS-Primary);
  --bs-primary-rgb: var(--CTBS-PrimaryRgb);
  --bs-primary-bg-subtle: var(--CTBS-PrimaryBgSubtle);
  --bs-primary-text-emphasis: var(--CTBS-PrimaryTextEmphasis);
  --bs-link-color: var(--CTBS-LinkColor);
  --bs-card-bg: var(--CTBS-CardBg);
}
.btn-success {
  --bs-btn-color: var(--CTBS-SuccessBtnColor);
  --bs-btn-bg: var(--CTBS-SuccessBtnBg);
  --bs-btn-hover-color: var(--CTBS-SuccessBtnHoverColor);
  --bs-btn-hover-bg: var(--CTBS-SuccessBtnHoverBg);
}
.btn-outline-danger {
  --bs-btn-color: var(--CTBS-OutlineDangerBtnColor);
  --bs-btn-hover-color: var(--CTBS-OutlineDangerBtnHoverColor);
}
[data-bs-theme=dark] {
  --bs-body-bg: var(--CTBS-DarkThemeBodyBg);
  --bs-body-color: var(--CTBS-DarkThemeBodyColor);
  --bs-primary-text-emphasis: var(--CTBS-DarkThemePrimaryTextEmphasis);
  --bs-btn-color: var(--CTBS-DarkThemeSuccessBtnColor);
}
";

const OVERRIDES_CSS: &str = r"
.glass { backdrop-filter: blur(var(--CTBS-GlassBlur)); }
.badge { color: var(--CTBS-WarningTextEmphasis); }
";

/// The shape of the rewriter's variables file for a stock Bootstrap build.
const REWRITTEN_VARS_CSS: &str = r"
:root {
  --CTBS-Blue: #0d6efd;
  --CTBS-BlueRgb: 13, 110, 253;
  --CTBS-Indigo: #6610f2;
  --CTBS-Teal: #20c997;
  --CTBS-Gray: #6c757d;
  --CTBS-GrayDark: #343a40;
  --CTBS-Gray100: #f8f9fa;
  --CTBS-Gray600: #6c757d;
  --CTBS-Light: #f8f9fa;
  --CTBS-BodyBg: #fff;
  --CTBS-BodyColor: #212529;
  --CTBS-SecondaryColor: rgba(33, 37, 41, 0.75);
  --CTBS-SecondaryColorRgb: 33, 37, 41;
  --CTBS-TertiaryBg: #f8f9fa;
  --CTBS-BorderColorTranslucent: rgba(0, 0, 0, 0.175);
  --CTBS-FocusRingColor: rgba(13, 110, 253, 0.25);
  --CTBS-PrimaryBtnFocusShadowRgb: 49, 132, 253;
  --CTBS-PrimaryTableColor: #000;
  --CTBS-PrimaryTableBg: #cfe2ff;
  --CTBS-PrimaryTableStripedBg: #c5d7f2;
  --CTBS-PrimaryTableHoverColor: #000;
  --CTBS-DarkNavbarBrandColor: #fff;
  --CTBS-DarkNavbarColor: rgba(255, 255, 255, 0.55);
  --CTBS-FormControlBoxShadow: 0 0 0 0.25rem rgba(13, 110, 253, 0.25);
  --CTBS-DropdownLinkActiveColor: #fff;
  --CTBS-Color: #fff;
  --CTBS-Color-1: #000;
  --CTBS-Color-1Rgb: 0, 0, 0;
  --CTBS-WhiteAlpha15: rgba(255, 255, 255, 0.15);
  --CTBS-BlackAlpha175: rgba(0, 0, 0, 0.175);
  --CTBS-Custom-2: #e9ecef;
  --CTBS-DarkThemeBodyBg: #212529;
  --CTBS-DarkThemeSecondaryColor: rgba(222, 226, 230, 0.75);
}
";

/// Horizontal bands of flat color, wide enough to survive sampling.
fn write_bands(path: &Path, bands: &[[u8; 3]]) {
    let height = 40 * u32::try_from(bands.len()).unwrap();
    let img = RgbImage::from_fn(120, height, |_, y| Rgb(bands[(y / 40) as usize]));
    img.save(path).unwrap();
}

struct Fixture {
    _dir: tempfile::TempDir,
    image: PathBuf,
    dark_image: PathBuf,
    sources: [PathBuf; 2],
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("day.png");
    let dark_image = dir.path().join("night.png");
    write_bands(
        &image,
        &[[196, 92, 38], [38, 84, 124], [233, 196, 106], [42, 157, 143], [244, 240, 232], [24, 22, 30]],
    );
    write_bands(&dark_image, &[[20, 24, 60], [90, 40, 120], [200, 180, 60], [10, 10, 14]]);

    let vars = dir.path().join("vars.css");
    let overrides = dir.path().join("overrides.css");
    fs::write(&vars, VARS_CSS).unwrap();
    fs::write(&overrides, OVERRIDES_CSS).unwrap();

    Fixture {
        _dir: dir,
        image,
        dark_image,
        sources: [vars, overrides],
    }
}

#[test]
fn generated_theme_passes_its_own_audit() {
    let fx = fixture();
    let config = GeneratorConfig::new(&fx.image).with_registry_sources(&fx.sources);
    let theme = generate(&config).unwrap();

    let registry = Registry::load(&fx.sources).unwrap();
    let report = audit_against(&theme, Some(&registry)).unwrap();
    assert!(report.is_clean(), "{report:#?}");
    assert!(report.pairs.len() >= 5, "{report:#?}");
    assert!(report.worst().unwrap().ratio >= 7.0);
}

#[test]
fn theme_defines_exactly_the_declared_names() {
    let fx = fixture();
    let config = GeneratorConfig::new(&fx.image).with_registry_sources(&fx.sources);
    let theme = generate(&config).unwrap();

    let registry = Registry::load(&fx.sources).unwrap();
    let names: Vec<&str> = theme.iter().map(|(name, _)| name).collect();
    let declared: Vec<&str> = registry.names().collect();
    assert_eq!(names, declared);
    assert!(theme.get("--CTBS-GlassBlur").is_none());
    assert!(theme.get("--CTBS-WarningTextEmphasis").is_some());
}

#[test]
fn companions_mirror_their_base() {
    let fx = fixture();
    let config = GeneratorConfig::new(&fx.image).with_registry_sources(&fx.sources);
    let theme = generate(&config).unwrap();

    for (base, companion) in [
        ("--CTBS-BodyBg", "--CTBS-BodyBgRgb"),
        ("--CTBS-Primary", "--CTBS-PrimaryRgb"),
    ] {
        let color = Color::hex(theme.get(base).unwrap()).unwrap();
        let expected = format!("{}, {}, {}", color.r, color.g, color.b);
        assert_eq!(theme.get(companion).unwrap(), expected);
    }
}

#[test]
fn dark_image_changes_only_the_dark_side() {
    let fx = fixture();
    let single = GeneratorConfig::new(&fx.image).with_registry_sources(&fx.sources);
    let paired = single.clone().with_dark_image(&fx.dark_image);

    let a = generate(&single).unwrap();
    let b = generate(&paired).unwrap();
    assert_eq!(a.get("--CTBS-Primary"), b.get("--CTBS-Primary"));
    assert_eq!(a.get("--CTBS-BodyBg"), b.get("--CTBS-BodyBg"));
    assert_ne!(a.get("--CTBS-DarkThemeBodyBg"), b.get("--CTBS-DarkThemeBodyBg"));

    let registry = Registry::load(&fx.sources).unwrap();
    assert!(audit_against(&b, Some(&registry)).unwrap().is_clean());
}

#[test]
fn generation_is_deterministic() {
    let fx = fixture();
    let config = GeneratorConfig::new(&fx.image).with_registry_sources(&fx.sources);
    assert_eq!(generate(&config).unwrap(), generate(&config).unwrap());
}

#[test]
fn rewritten_stylesheet_generates_a_clean_theme() {
    let fx = fixture();
    let vars = fx.image.with_file_name("rewritten.css");
    fs::write(&vars, REWRITTEN_VARS_CSS).unwrap();

    let config = GeneratorConfig::new(&fx.image).with_registry_sources(std::slice::from_ref(&vars));
    let theme = generate(&config).unwrap();

    let registry = Registry::load(&[&vars]).unwrap();
    assert_eq!(theme.len(), registry.len());
    let report = audit_against(&theme, Some(&registry)).unwrap();
    assert!(report.is_clean(), "{report:#?}");
    assert!(report.worst().unwrap().ratio >= 7.0);

    assert_eq!(theme.get("--CTBS-WhiteAlpha15"), Some("rgba(255, 255, 255, 0.15)"));
    assert!(theme.get("--CTBS-SecondaryColor").unwrap().starts_with('#'));
}

#[test]
fn missing_image_is_reported_before_anything_else() {
    let fx = fixture();
    let config = GeneratorConfig::new(fx.image.with_file_name("absent.png")).with_registry_sources(&fx.sources);
    assert!(matches!(generate(&config), Err(ThemeError::MissingImage { .. })));
}
