//! Audit — re-check a finished theme without regenerating it.
//!
//! The audit rebuilds the pairing model from the theme's own names and
//! values, measures every text/background pair, and checks that each
//! `…Rgb` companion still mirrors its base. A theme edited by hand (or by
//! another tool) can be verified the same way as a generated one.

use std::collections::BTreeSet;

use ctbs_color::Color;
use serde::Serialize;
use tracing::{debug, warn};

use crate::contrast::{AAA_RATIO, contrast_ratio};
use crate::error::{Result, ThemeError};
use crate::pairing::background_pair_for;
use crate::postprocess::VariableSet;
use crate::registry::Registry;
use crate::theme::Theme;
use crate::variable::{Kind, Slot, Variable};

/// One measured text/background pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairCheck {
    pub text: String,
    pub background: String,
    pub text_color: String,
    pub background_color: String,
    pub ratio: f64,
}

impl PairCheck {
    #[must_use]
    pub fn passes(&self) -> bool {
        self.ratio >= AAA_RATIO
    }
}

/// Everything the audit found.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditReport {
    /// Every measured pair, in processing order.
    pub pairs: Vec<PairCheck>,
    /// Text whose background has no value in the theme: `(text, background)`.
    pub unpaired: Vec<(String, String)>,
    /// Companions whose channels differ from their base's color.
    pub stale_companions: Vec<String>,
    /// Registry names the theme does not define.
    pub missing: Vec<String>,
    /// Theme names the registry does not declare.
    pub extra: Vec<String>,
}

impl AuditReport {
    /// Pairs below AAA.
    pub fn failures(&self) -> impl Iterator<Item = &PairCheck> {
        self.pairs.iter().filter(|p| !p.passes())
    }

    /// No failing pair, stale companion, or registry mismatch.
    ///
    /// Unpaired text is reported but does not fail the audit: the stylesheet
    /// may define that background outside the theme.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
            && self.stale_companions.is_empty()
            && self.missing.is_empty()
            && self.extra.is_empty()
    }

    /// The lowest measured ratio, if any pair was measured.
    #[must_use]
    pub fn worst(&self) -> Option<&PairCheck> {
        self.pairs.iter().min_by(|a, b| a.ratio.total_cmp(&b.ratio))
    }
}

/// Audit a theme against the pairing model.
pub fn audit(theme: &Theme) -> Result<AuditReport> {
    audit_against(theme, None)
}

/// Audit a theme, also checking that it defines exactly `registry`'s names.
pub fn audit_against(theme: &Theme, registry: Option<&Registry>) -> Result<AuditReport> {
    let mut report = AuditReport::default();

    if let Some(registry) = registry {
        let names: BTreeSet<&str> = theme.iter().map(|(name, _)| name).collect();
        report.missing = registry.names().filter(|n| !names.contains(n)).map(str::to_owned).collect();
        report.extra = names
            .iter()
            .filter(|n| !registry.contains(n))
            .map(|n| (*n).to_owned())
            .collect();
    }

    let mut set = VariableSet::new();
    let mut companions = Vec::new();
    for (name, value) in theme.iter() {
        let var = Variable::parse(name)?;
        if var.is_companion() {
            companions.push((var, value));
        } else if let Slot::Alpha(_) = var.slot {
            set.declare(var, parse_rgba(name, value)?);
        } else {
            set.declare(var, parse_hex(name, value)?);
        }
    }

    for (var, value) in companions {
        let Some(base) = set.get(&var.base()) else {
            debug!(variable = %var, "companion without base, skipping");
            continue;
        };
        if parse_channels(&var.name(), value)? != base {
            report.stale_companions.push(var.name());
        }
    }

    let mut last = Vec::new();
    for (text, color) in set.of_kind(Kind::Text) {
        let background = background_pair_for(&text, &set)?;
        let Some(bg) = set.get(&background) else {
            report.unpaired.push((text.name(), background.name()));
            continue;
        };
        let check = PairCheck {
            text: text.name(),
            background: background.name(),
            text_color: color.to_hex(),
            background_color: bg.to_hex(),
            ratio: contrast_ratio(color, bg),
        };
        if background.kind() == Kind::Text {
            last.push(check);
        } else {
            report.pairs.push(check);
        }
    }
    report.pairs.append(&mut last);

    for failure in report.failures() {
        warn!(
            text = %failure.text,
            background = %failure.background,
            ratio = failure.ratio,
            "pair below AAA"
        );
    }
    Ok(report)
}

fn parse_hex(name: &str, value: &str) -> Result<Color> {
    Color::hex(value).ok_or_else(|| ThemeError::InvalidValue {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

/// The color of an `rgba(r, g, b, a)` value; the opacity is not checked.
fn parse_rgba(name: &str, value: &str) -> Result<Color> {
    let inner = value
        .trim()
        .strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
        .and_then(|inner| inner.rsplit_once(','));
    match inner {
        Some((channels, alpha)) if alpha.trim().parse::<f64>().is_ok() => parse_channels(name, channels),
        _ => Err(ThemeError::InvalidValue {
            name: name.to_owned(),
            value: value.to_owned(),
        }),
    }
}

/// Parse an `r, g, b` companion value.
fn parse_channels(name: &str, value: &str) -> Result<Color> {
    let invalid = || ThemeError::InvalidValue {
        name: name.to_owned(),
        value: value.to_owned(),
    };
    let channels: Vec<u8> = value
        .split(',')
        .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
        .collect::<Result<_>>()?;
    match channels.as_slice() {
        &[r, g, b] => Ok(Color::rgb(r, g, b)),
        _ => Err(invalid()),
    }
}
