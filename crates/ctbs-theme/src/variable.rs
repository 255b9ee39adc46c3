//! Theme variables — typed views of the `--CTBS-…` names the stylesheet
//! declares.
//!
//! ```text
//! --CTBS- [DarkTheme] <body> [-N] [Rgb]
//!            │          │      │    └── companion: "r, g, b" of the base value
//!            │          │      └─────── uniqueness suffix from the rewriter
//!            │          └────────────── what the slot is (table below)
//!            └───────────────────────── dark-mode counterpart
//! ```
//!
//! | body                                | slot                |
//! |-------------------------------------|---------------------|
//! | `R`                                 | base role color     |
//! | `RBg`, `RBgSubtle`, `RBorderSubtle` | role surfaces       |
//! | `RTextEmphasis`                     | emphasized text     |
//! | `[Outline]RBtn[State]{Color,Bg,BorderColor}` | button parts |
//! | `BodyBg`, `LinkColor`, `GrayDark`, ...       | globals      |
//! | `Blue`, `Teal`, `Gray`, ...         | named palette colors |
//! | `Gray100` … `Gray900`               | gray scale          |
//! | `WhiteAlpha15`, `BlackAlpha175`     | translucent white/black |
//! | `Custom-N`                          | unclassified literal |
//! | `PrimaryTableStripedBg`, `FormControlBoxShadow`, `Color`, ... | component context |
//!
//! `R` is one of the eight [`Role`] names. A component context is a run of
//! known words (see [`Word`]); its last words say whether it is text, a
//! background or a decoration. A name that fits none of these is an error:
//! the stylesheet and the engine have drifted apart.

use std::fmt;
use std::sync::LazyLock;

use bitflags::bitflags;
use regex::Regex;

use crate::error::{Result, ThemeError};
use crate::roles::{Mode, NamedColor, Role};

/// Every theme variable starts with this.
pub const PREFIX: &str = "--CTBS-";
/// Infix marking a dark-mode variable.
pub const DARK_INFIX: &str = "DarkTheme";
/// Suffix marking an RGB-tuple companion.
pub const COMPANION_SUFFIX: &str = "Rgb";
/// Body of an unclassified literal, followed by `-N`.
const CUSTOM: &str = "Custom";
/// Most words a component context may have.
const MAX_WORDS: usize = 10;

static ROLE_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<outline>Outline)?(?P<role>Primary|Secondary|Success|Info|Warning|Danger|Light|Dark)(?:Btn(?P<state>Hover|Active|Disabled)?(?P<part>Color|Bg|BorderColor)|(?P<surface>Bg|BgSubtle|BorderSubtle|TextEmphasis))?$",
    )
    .expect("role variable pattern is valid")
});

static GRAY_WEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Gray(?P<weight>[1-9])00$").expect("gray scale pattern is valid"));

static ALPHA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<tint>White|Black)Alpha(?P<digits>[0-9]{1,4})$").expect("alpha pattern is valid")
});

static CUSTOM_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Custom-(?P<n>[1-9][0-9]{0,3})$").expect("custom pattern is valid"));

bitflags! {
    /// Traits of a variable name that do not change which slot it is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct VarFlags: u8 {
        /// Declared with the `DarkTheme` infix.
        const DARK      = 1 << 0;
        /// `…Rgb` companion of another variable.
        const COMPANION = 1 << 1;
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// How a variable takes part in contrast checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Rendered on a background; must reach AAA against it.
    Text,
    /// A surface text is rendered on.
    Background,
    /// Borders and constants; never judged.
    Decoration,
}

/// Button interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ButtonState {
    Default,
    Hover,
    Active,
    Disabled,
}

impl ButtonState {
    const fn infix(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Hover => "Hover",
            Self::Active => "Active",
            Self::Disabled => "Disabled",
        }
    }
}

/// Which part of a button a variable colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ButtonPart {
    Color,
    Bg,
    BorderColor,
}

impl ButtonPart {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Bg => "Bg",
            Self::BorderColor => "BorderColor",
        }
    }
}

/// A button variable: `[Outline]{Role}Btn[State]{Part}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Button {
    pub role: Role,
    pub outline: bool,
    pub state: ButtonState,
    pub part: ButtonPart,
}

impl Button {
    #[must_use]
    pub const fn new(role: Role, state: ButtonState, part: ButtonPart) -> Self {
        Self { role, outline: false, state, part }
    }

    #[must_use]
    pub const fn outline(role: Role, state: ButtonState, part: ButtonPart) -> Self {
        Self { role, outline: true, state, part }
    }

    /// The same button in another state/part.
    #[must_use]
    pub const fn with(self, state: ButtonState, part: ButtonPart) -> Self {
        Self { state, part, ..self }
    }
}

/// Variables that do not belong to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Global {
    BodyBg,
    CardBg,
    BodyColor,
    EmphasisColor,
    CardColor,
    LinkColor,
    LinkHoverColor,
    BorderColor,
    BorderColorTranslucent,
    GrayDark,
    White,
    Black,
}

impl Global {
    pub const ALL: [Self; 12] = [
        Self::BodyBg,
        Self::CardBg,
        Self::BodyColor,
        Self::EmphasisColor,
        Self::CardColor,
        Self::LinkColor,
        Self::LinkHoverColor,
        Self::BorderColor,
        Self::BorderColorTranslucent,
        Self::GrayDark,
        Self::White,
        Self::Black,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BodyBg => "BodyBg",
            Self::CardBg => "CardBg",
            Self::BodyColor => "BodyColor",
            Self::EmphasisColor => "EmphasisColor",
            Self::CardColor => "CardColor",
            Self::LinkColor => "LinkColor",
            Self::LinkHoverColor => "LinkHoverColor",
            Self::BorderColor => "BorderColor",
            Self::BorderColorTranslucent => "BorderColorTranslucent",
            Self::GrayDark => "GrayDark",
            Self::White => "White",
            Self::Black => "Black",
        }
    }

    const fn kind(self) -> Kind {
        match self {
            Self::BodyBg | Self::CardBg => Kind::Background,
            Self::BodyColor
            | Self::EmphasisColor
            | Self::CardColor
            | Self::LinkColor
            | Self::LinkHoverColor => Kind::Text,
            Self::BorderColor
            | Self::BorderColorTranslucent
            | Self::GrayDark
            | Self::White
            | Self::Black => Kind::Decoration,
        }
    }
}

/// Which base color a translucent variable tints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tint {
    White,
    Black,
}

/// `{White,Black}Alpha{digits}`: the tint at opacity `0.{digits}`.
///
/// `width` keeps leading zeros, so `Alpha05` is 0.05 and not 0.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Alpha {
    pub tint: Tint,
    pub digits: u16,
    pub width: u8,
}

impl Alpha {
    fn digit_string(self) -> String {
        format!("{:0width$}", self.digits, width = usize::from(self.width))
    }

    /// The CSS opacity, `0.{digits}` (a bare `0` stays `0`).
    #[must_use]
    pub fn opacity(self) -> String {
        let digits = self.digit_string();
        if digits == "0" { digits } else { format!("0.{digits}") }
    }
}

macro_rules! words {
    ($($word:ident),+ $(,)?) => {
        /// A word of a component context name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Word {
            $($word),+
        }

        impl Word {
            pub const ALL: &'static [Self] = &[$(Self::$word),+];

            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$word => stringify!($word)),+
                }
            }
        }
    };
}

words! {
    Accordion, Action, Active, Alert, Backdrop, Background, Badge, Bar, Bg, Black,
    Body, Border, Bottom, Box, Brand, Btn, Cap, Caption, Card, Carousel, Check,
    Checked, Close, Code, Color, Columns, Control, Decoration, Disabled, Divider,
    Dropdown, Emphasis, End, Expand, Feedback, Floating, Focus, Footer, Form,
    Gradient, Group, Header, Heading, Highlight, Hover, Icon, Image, Indicators,
    Input, Inset, Invalid, Item, Label, Lg, Link, List, Mask, Md, Menu, Modal, Nav,
    Navbar, Offcanvas, Outline, Pagination, Pills, Placeholder, Popover, Progress,
    Range, Ring, Select, Selected, Shadow, Sm, Start, Striped, Switch, Table, Tabs,
    Tertiary, Text, Thumb, Toast, Toggler, Tooltip, Top, Translucent, Underline,
    Valid, White, Xl, Xxl,
}

impl Word {
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|w| w.name() == name)
    }

    /// Names a Bootstrap component (the first word of a multi-word one).
    #[must_use]
    pub const fn is_component(self) -> bool {
        matches!(
            self,
            Self::Accordion
                | Self::Alert
                | Self::Badge
                | Self::Btn
                | Self::Card
                | Self::Carousel
                | Self::Dropdown
                | Self::Form
                | Self::List
                | Self::Modal
                | Self::Nav
                | Self::Navbar
                | Self::Offcanvas
                | Self::Pagination
                | Self::Popover
                | Self::Progress
                | Self::Table
                | Self::Toast
                | Self::Tooltip
        )
    }

    /// Components whose role-colored backgrounds are subtle tints.
    const fn has_subtle_surface(self) -> bool {
        matches!(self, Self::Table | Self::Alert | Self::Badge)
    }

    /// Words that turn a trailing `Color` into a line or ring color.
    const fn colors_a_line(self) -> bool {
        matches!(
            self,
            Self::Border | Self::Top | Self::Bottom | Self::Start | Self::End | Self::Outline | Self::Decoration | Self::Ring
        )
    }
}

/// One word of a context: a role or a vocabulary word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    Role(Role),
    Word(Word),
}

impl Token {
    fn parse(name: &str) -> Option<Self> {
        Role::from_name(name)
            .map(Self::Role)
            .or_else(|| Word::from_name(name).map(Self::Word))
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Role(role) => role.name(),
            Self::Word(word) => word.name(),
        }
    }
}

/// A component context name: `PrimaryTableStripedBg`, `DropdownLinkHoverBg`,
/// `FormControlBoxShadow`, or just `Color`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Context {
    tokens: [Option<Token>; MAX_WORDS],
}

impl Context {
    /// Split a CamelCase body into known words.
    fn parse(body: &str) -> Option<Self> {
        let mut tokens = [None; MAX_WORDS];
        let mut count = 0;
        let mut start = 0;
        let bytes = body.as_bytes();
        if !bytes.first()?.is_ascii_uppercase() {
            return None;
        }
        for end in 1..=bytes.len() {
            let at_boundary = end == bytes.len() || bytes[end].is_ascii_uppercase();
            if !at_boundary {
                if !bytes[end].is_ascii_lowercase() {
                    return None;
                }
                continue;
            }
            let entry = tokens.get_mut(count)?;
            *entry = Some(Token::parse(&body[start..end])?);
            count += 1;
            start = end;
        }
        Some(Self { tokens })
    }

    pub fn tokens(&self) -> impl Iterator<Item = Token> + '_ {
        self.tokens.iter().map_while(|t| *t)
    }

    fn words(&self) -> impl Iterator<Item = Word> + '_ {
        self.tokens().filter_map(|t| match t {
            Token::Word(word) => Some(word),
            Token::Role(_) => None,
        })
    }

    #[must_use]
    pub fn has(&self, word: Word) -> bool {
        self.words().any(|w| w == word)
    }

    /// The first role named anywhere in the context.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.tokens().find_map(|t| match t {
            Token::Role(role) => Some(role),
            Token::Word(_) => None,
        })
    }

    /// The first component word.
    #[must_use]
    pub fn component(&self) -> Option<Word> {
        self.words().find(|w| w.is_component())
    }

    /// A role-colored background of a table, alert or badge.
    #[must_use]
    pub fn is_subtle_surface(&self) -> bool {
        self.kind() == Kind::Background
            && self.role().is_some()
            && self.component().is_some_and(Word::has_subtle_surface)
    }

    /// Decided by the trailing words: `…Bg`, `…Background[Color]` are
    /// backgrounds, `…Color` is text unless it colors a line, everything
    /// else decorates.
    #[must_use]
    pub fn kind(&self) -> Kind {
        let words: Vec<Word> = self.words().collect();
        match words.as_slice() {
            [.., Word::Bg | Word::Background] | [.., Word::Background, Word::Color] => Kind::Background,
            [.., before, Word::Color] if before.colors_a_line() => Kind::Decoration,
            [.., Word::Color | Word::Text] => Kind::Text,
            _ => Kind::Decoration,
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens().try_for_each(|t| f.write_str(t.name()))
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Context({self})")
    }
}

/// What a variable is, independent of mode and companion-ness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// `{Role}`
    Role(Role),
    /// `{Role}Bg`
    Surface(Role),
    /// `{Role}BgSubtle`
    BgSubtle(Role),
    /// `{Role}BorderSubtle`
    BorderSubtle(Role),
    /// `{Role}TextEmphasis`
    TextEmphasis(Role),
    Button(Button),
    Global(Global),
    /// `Blue`, `Indigo`, ..., `Gray`
    Named(NamedColor),
    /// `Gray100` … `Gray900`
    GrayWeight(u16),
    Alpha(Alpha),
    /// `Custom-N`
    Custom(u16),
    Context(Context),
}

impl Slot {
    #[must_use]
    pub fn kind(self) -> Kind {
        match self {
            Self::Role(_) | Self::TextEmphasis(_) => Kind::Text,
            Self::Surface(_) | Self::BgSubtle(_) => Kind::Background,
            Self::BorderSubtle(_) => Kind::Decoration,
            Self::Button(button) => match button.part {
                ButtonPart::Color => Kind::Text,
                ButtonPart::Bg => Kind::Background,
                ButtonPart::BorderColor => Kind::Decoration,
            },
            Self::Global(global) => global.kind(),
            Self::Named(_) => Kind::Text,
            Self::GrayWeight(_) | Self::Alpha(_) | Self::Custom(_) => Kind::Decoration,
            Self::Context(context) => context.kind(),
        }
    }

    fn parse(body: &str) -> Option<Self> {
        if let Some(global) = Global::ALL.into_iter().find(|g| g.name() == body) {
            return Some(Self::Global(global));
        }
        if let Some(slot) = Self::parse_role(body) {
            return Some(slot);
        }
        if let Some(named) = NamedColor::from_name(body) {
            return Some(Self::Named(named));
        }
        if let Some(caps) = GRAY_WEIGHT.captures(body) {
            let weight: u16 = caps["weight"].parse().ok()?;
            return Some(Self::GrayWeight(weight * 100));
        }
        if let Some(caps) = ALPHA.captures(body) {
            let tint = if &caps["tint"] == "White" { Tint::White } else { Tint::Black };
            let digits = &caps["digits"];
            return Some(Self::Alpha(Alpha {
                tint,
                digits: digits.parse().ok()?,
                width: u8::try_from(digits.len()).ok()?,
            }));
        }
        if let Some(caps) = CUSTOM_NUMBER.captures(body) {
            return Some(Self::Custom(caps["n"].parse().ok()?));
        }
        Context::parse(body).map(Self::Context)
    }

    fn parse_role(body: &str) -> Option<Self> {
        let caps = ROLE_BODY.captures(body)?;
        let role = Role::from_name(caps.name("role")?.as_str())?;
        let outline = caps.name("outline").is_some();

        if let Some(part) = caps.name("part") {
            let state = match caps.name("state").map(|m| m.as_str()) {
                None => ButtonState::Default,
                Some("Hover") => ButtonState::Hover,
                Some("Active") => ButtonState::Active,
                Some("Disabled") => ButtonState::Disabled,
                Some(_) => return None,
            };
            let part = match part.as_str() {
                "Color" => ButtonPart::Color,
                "Bg" => ButtonPart::Bg,
                "BorderColor" => ButtonPart::BorderColor,
                _ => return None,
            };
            return Some(Self::Button(Button { role, outline, state, part }));
        }

        // `Outline` only prefixes button variables.
        if outline {
            return None;
        }
        match caps.name("surface").map(|m| m.as_str()) {
            None => Some(Self::Role(role)),
            Some("Bg") => Some(Self::Surface(role)),
            Some("BgSubtle") => Some(Self::BgSubtle(role)),
            Some("BorderSubtle") => Some(Self::BorderSubtle(role)),
            Some("TextEmphasis") => Some(Self::TextEmphasis(role)),
            Some(_) => None,
        }
    }

    fn write_body(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Role(role) => f.write_str(role.name()),
            Self::Surface(role) => write!(f, "{role}Bg"),
            Self::BgSubtle(role) => write!(f, "{role}BgSubtle"),
            Self::BorderSubtle(role) => write!(f, "{role}BorderSubtle"),
            Self::TextEmphasis(role) => write!(f, "{role}TextEmphasis"),
            Self::Button(b) => write!(
                f,
                "{}{}Btn{}{}",
                if b.outline { "Outline" } else { "" },
                b.role,
                b.state.infix(),
                b.part.suffix()
            ),
            Self::Global(global) => f.write_str(global.name()),
            Self::Named(named) => f.write_str(named.name()),
            Self::GrayWeight(weight) => write!(f, "Gray{weight}"),
            Self::Alpha(alpha) => {
                let tint = match alpha.tint {
                    Tint::White => "White",
                    Tint::Black => "Black",
                };
                write!(f, "{tint}Alpha{}", alpha.digit_string())
            }
            Self::Custom(n) => write!(f, "{CUSTOM}-{n}"),
            Self::Context(context) => write!(f, "{context}"),
        }
    }
}

/// Split a trailing `-N` uniqueness suffix. `Custom-N` keeps its own number.
fn split_instance(body: &str) -> (&str, Option<u16>) {
    let Some((head, tail)) = body.rsplit_once('-') else {
        return (body, None);
    };
    let canonical = tail.bytes().all(|b| b.is_ascii_digit()) && !tail.starts_with('0');
    match tail.parse::<u16>() {
        Ok(n) if canonical && head != CUSTOM => (head, Some(n)),
        _ => (body, None),
    }
}

// ---------------------------------------------------------------------------
// Variable
// ---------------------------------------------------------------------------

/// A parsed theme variable name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub slot: Slot,
    pub flags: VarFlags,
    /// The rewriter's `-N` suffix for a name it had to repeat.
    pub instance: Option<u16>,
}

impl Variable {
    /// A light-mode, non-companion variable.
    #[must_use]
    pub const fn light(slot: Slot) -> Self {
        Self {
            slot,
            flags: VarFlags::empty(),
            instance: None,
        }
    }

    /// The variable for `slot` in `mode`.
    #[must_use]
    pub const fn in_mode(slot: Slot, mode: Mode) -> Self {
        let flags = if mode.is_dark() { VarFlags::DARK } else { VarFlags::empty() };
        Self { slot, flags, instance: None }
    }

    /// Parse a full `--CTBS-…` name.
    pub fn parse(name: &str) -> Result<Self> {
        let unknown = || ThemeError::unknown(name);

        let mut rest = name.strip_prefix(PREFIX).ok_or_else(unknown)?;
        let mut flags = VarFlags::empty();
        if let Some(stripped) = rest.strip_prefix(DARK_INFIX) {
            flags |= VarFlags::DARK;
            rest = stripped;
        }
        if let Some(stripped) = rest.strip_suffix(COMPANION_SUFFIX) {
            flags |= VarFlags::COMPANION;
            rest = stripped;
        }

        let (rest, instance) = split_instance(rest);
        let slot = Slot::parse(rest).ok_or_else(unknown)?;
        Ok(Self { slot, flags, instance })
    }

    /// The slot's kind, except that the role doubling as this mode's page
    /// background is a background rather than text.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self.slot {
            Slot::Role(role) if role == self.mode().body_role() => Kind::Background,
            slot => slot.kind(),
        }
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.flags.contains(VarFlags::DARK)
    }

    #[must_use]
    pub const fn is_companion(&self) -> bool {
        self.flags.contains(VarFlags::COMPANION)
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.is_dark() { Mode::Dark } else { Mode::Light }
    }

    /// The variable a companion mirrors (itself if not a companion).
    #[must_use]
    pub const fn base(self) -> Self {
        Self {
            flags: self.flags.difference(VarFlags::COMPANION),
            ..self
        }
    }

    /// The `…Rgb` companion of this variable.
    #[must_use]
    pub const fn companion(self) -> Self {
        Self {
            flags: self.flags.union(VarFlags::COMPANION),
            ..self
        }
    }

    /// Another slot in the same mode (never a companion).
    #[must_use]
    pub const fn sibling(self, slot: Slot) -> Self {
        Self::in_mode(slot, self.mode())
    }

    /// The full `--CTBS-…` name.
    #[must_use]
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PREFIX)?;
        if self.is_dark() {
            f.write_str(DARK_INFIX)?;
        }
        self.slot.write_body(f)?;
        if let Some(n) = self.instance {
            write!(f, "-{n}")?;
        }
        if self.is_companion() {
            f.write_str(COMPANION_SUFFIX)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({self})")
    }
}

impl std::str::FromStr for Variable {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
