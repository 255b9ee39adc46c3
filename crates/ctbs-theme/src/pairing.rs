//! Pairing — which background each text variable is rendered on.
//!
//! Rules, first match wins (`R` is the variable's role):
//!
//! ```text
//! RTextEmphasis               → RBgSubtle
//! RBtnColor                   → RBtnBg ▸ RBg ▸ R
//! RBtn{Hover,Active}Color     → RBtnActiveBg ▸ RBtnHoverBg ▸ (RBtnColor chain)
//! RBtnDisabledColor           → RBtnDisabledBg ▸ (RBtnColor chain)
//! OutlineRBtnColor            → BodyBg
//! OutlineRBtn{Hover,Active}…  → OutlineRBtnActiveBg ▸ OutlineRBtnHoverBg ▸ (RBtnColor chain)
//! OutlineRBtnDisabledColor    → OutlineRBtnDisabledBg ▸ BodyBg
//! anything else               → CardBg ▸ BodyBg
//! ```
//!
//! "Anything else" includes component text (`PrimaryTableColor`,
//! `DarkNavbarBrandColor`, `SecondaryColor`, `Color-2`) and the named
//! palette colors. A `-N` suffix never changes the pairing.
//!
//! `▸` means "if declared, else". `BodyBg` and the base role colors always
//! resolve. Dark variables follow the same rules on their dark names.

use std::collections::BTreeSet;

use crate::error::{Result, ThemeError};
use crate::variable::{Button, ButtonPart, ButtonState, Global, Kind, Slot, Variable};

/// Which variables a theme declares.
pub trait Declarations {
    fn is_declared(&self, var: &Variable) -> bool;
}

impl Declarations for BTreeSet<Variable> {
    fn is_declared(&self, var: &Variable) -> bool {
        self.contains(var)
    }
}

/// The background `var` is rendered on.
///
/// `var` must be a text variable.
pub fn background_pair_for(var: &Variable, declared: &dyn Declarations) -> Result<Variable> {
    if var.kind() != Kind::Text || var.is_companion() {
        return Err(ThemeError::NotText { name: var.name() });
    }

    let exists = |slot: Slot| declared.is_declared(&var.sibling(slot));
    let slot = match var.slot {
        Slot::TextEmphasis(role) => Slot::BgSubtle(role),
        Slot::Button(button) => button_background(button, &exists),
        _ => surface_or_body(Global::CardBg, &exists),
    };
    Ok(var.sibling(slot))
}

/// Parse `name` and resolve its background.
pub fn background_pair_for_name(name: &str, declared: &dyn Declarations) -> Result<Variable> {
    background_pair_for(&Variable::parse(name)?, declared)
}

fn button_background(button: Button, exists: &dyn Fn(Slot) -> bool) -> Slot {
    let own = |state: ButtonState| Slot::Button(button.with(state, ButtonPart::Bg));
    let first_declared = |states: &[ButtonState]| states.iter().map(|&s| own(s)).find(|&s| exists(s));

    match (button.outline, button.state) {
        (false, ButtonState::Default) => filled_chain(button, exists),
        (true, ButtonState::Default) => Slot::Global(Global::BodyBg),
        (_, ButtonState::Hover | ButtonState::Active) => {
            first_declared(&[ButtonState::Active, ButtonState::Hover])
                .unwrap_or_else(|| filled_chain(button, exists))
        }
        (false, ButtonState::Disabled) => {
            first_declared(&[ButtonState::Disabled]).unwrap_or_else(|| filled_chain(button, exists))
        }
        (true, ButtonState::Disabled) => {
            first_declared(&[ButtonState::Disabled]).unwrap_or(Slot::Global(Global::BodyBg))
        }
    }
}

/// `RBtnBg ▸ RBg ▸ R` for the filled button of `button`'s role.
fn filled_chain(button: Button, exists: &dyn Fn(Slot) -> bool) -> Slot {
    let role = button.role;
    [
        Slot::Button(Button::new(role, ButtonState::Default, ButtonPart::Bg)),
        Slot::Surface(role),
    ]
    .into_iter()
    .find(|&slot| exists(slot))
    .unwrap_or(Slot::Role(role))
}

fn surface_or_body(global: Global, exists: &dyn Fn(Slot) -> bool) -> Slot {
    let slot = Slot::Global(global);
    if exists(slot) { slot } else { Slot::Global(Global::BodyBg) }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
