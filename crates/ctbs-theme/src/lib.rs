//! # ctbs-theme — image-derived UI themes with AAA contrast
//!
//! Turns a photograph into a complete set of `--CTBS-…` color variables
//! for a Bootstrap 5 stylesheet, light and dark, where every piece of text
//! reaches WCAG AAA (7:1) against the surface it sits on.
//!
//! # Architecture
//!
//! ```text
//! image ──→ extract.rs:    blur, sample, quantize (quantize.rs) → Palette
//!              │
//!              ▼
//!           roles.rs:      Palette → 8 roles + named colors, checked against body bg
//!              │
//! CSS ────→ registry.rs:   declared --CTBS- names
//!              │           variable.rs: name → typed Variable
//!              ▼
//!           theme.rs:      seed every variable from its role
//!              │
//!              ▼
//!           postprocess.rs: dead zone → text correction → black/white fallback
//!              │           (pairing.rs picks each text's background,
//!              │            contrast.rs does the search)
//!              ▼
//!           Theme: name → "#rrggbb" / "rgba(…)" / "r, g, b"
//! ```
//!
//! `audit.rs` re-runs the pairing model over a finished theme.
//!
//! # Color space
//!
//! Contrast is measured in WCAG relative luminance and adjusted in HSL,
//! rounding to 8-bit at every step. No sub-integer precision survives
//! between a measurement and the value that is written out.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Small integer-to-float casts in pixel and weight math.
#![allow(clippy::cast_precision_loss)]
// Hue/lightness/luminance names are inherently similar.
#![allow(clippy::similar_names)]

pub mod audit;
pub mod config;
pub mod contrast;
pub mod error;
pub mod extract;
pub mod pairing;
pub mod postprocess;
pub mod quantize;
pub mod registry;
pub mod roles;
pub mod theme;
pub mod variable;

pub use audit::{AuditReport, PairCheck, audit, audit_against};
pub use config::GeneratorConfig;
pub use error::{Result, ThemeError};
pub use extract::{ExtractOptions, Palette, Swatch};
pub use pairing::{background_pair_for, background_pair_for_name};
pub use postprocess::{VariableSet, make_text_aaa_compatible};
pub use registry::Registry;
pub use roles::{MapperConfig, Mode, NamedColor, Role, RoleMap, ThemeRoles};
pub use theme::{Theme, generate};
pub use variable::{Kind, Variable};
