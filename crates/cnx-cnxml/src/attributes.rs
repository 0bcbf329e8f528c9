//! CNXML attribute names and their enumerated values.
//!
//! Each value set parses with [`parse`](EmphasisEffect::parse), which returns
//! None for values outside the set, and [`of`](EmphasisEffect::of), which falls
//! back to a caller-chosen default when the attribute is absent or invalid.

pub const ID: &str = "id";
pub const TYPE: &str = "type";
pub const DISPLAY: &str = "display";
pub const EFFECT: &str = "effect";

pub const URL: &str = "url";
pub const TARGET_ID: &str = "target-id";
pub const DOCUMENT: &str = "document";
pub const VERSION: &str = "version";
pub const RESOURCE: &str = "resource";
pub const WINDOW: &str = "window";

pub const LIST_TYPE: &str = "list-type";
pub const ITEM_SEP: &str = "item-sep";
pub const NUMBER_STYLE: &str = "number-style";
pub const START_VALUE: &str = "start-value";
pub const BULLET_STYLE: &str = "bullet-style";

pub const COUNT: &str = "count";

pub const ALT: &str = "alt";
pub const SRC: &str = "src";
pub const FOR: &str = "for";
pub const MIME_TYPE: &str = "mime-type";
pub const WIDTH: &str = "width";
pub const HEIGHT: &str = "height";
pub const THUMBNAIL: &str = "thumbnail";

pub const ORIENT: &str = "orient";

pub const SUMMARY: &str = "summary";
pub const FRAME: &str = "frame";
pub const ALIGN: &str = "align";
pub const VALIGN: &str = "valign";
pub const COLSEP: &str = "colsep";
pub const ROWSEP: &str = "rowsep";
pub const COLNAME: &str = "colname";
pub const NAMEST: &str = "namest";
pub const NAMEEND: &str = "nameend";
pub const MOREROWS: &str = "morerows";

/// `MathML` attribute superseded by `display`.
pub const MATHML_MODE: &str = "mode";

/// `colsep`/`rowsep` value that disables the separator.
pub const CALS_NO_SEP: &str = "0";

/// Emphasis `effect` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisEffect {
    Bold,
    Italics,
    Underline,
    Smallcaps,
    Normal,
}

impl EmphasisEffect {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bold" => Some(Self::Bold),
            "italics" => Some(Self::Italics),
            "underline" => Some(Self::Underline),
            "smallcaps" => Some(Self::Smallcaps),
            "normal" => Some(Self::Normal),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(value: Option<&str>, default: Self) -> Self {
        value.and_then(Self::parse).unwrap_or(default)
    }
}

/// `display` values shared by code, note and list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    None,
}

impl Display {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "block" => Some(Self::Block),
            "inline" => Some(Self::Inline),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(value: Option<&str>, default: Self) -> Self {
        value.and_then(Self::parse).unwrap_or(default)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Inline => "inline",
            Self::None => "none",
        }
    }
}

/// Note `type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteType {
    Note,
    Aside,
    Warning,
    Tip,
    Important,
}

impl NoteType {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "note" => Some(Self::Note),
            "aside" => Some(Self::Aside),
            "warning" => Some(Self::Warning),
            "tip" => Some(Self::Tip),
            "important" => Some(Self::Important),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(value: Option<&str>, default: Self) -> Self {
        value.and_then(Self::parse).unwrap_or(default)
    }

    /// Title label shown before the note body.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Aside => "Aside",
            Self::Warning => "Warning",
            Self::Tip => "Tip",
            Self::Important => "Important",
        }
    }
}

/// Rule `type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    Rule,
    Theorem,
    Lemma,
    Corollary,
    Law,
    Proposition,
}

impl RuleType {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rule" => Some(Self::Rule),
            "theorem" => Some(Self::Theorem),
            "lemma" => Some(Self::Lemma),
            "corollary" => Some(Self::Corollary),
            "law" => Some(Self::Law),
            "proposition" => Some(Self::Proposition),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(value: Option<&str>, default: Self) -> Self {
        value.and_then(Self::parse).unwrap_or(default)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rule => "Rule",
            Self::Theorem => "Theorem",
            Self::Lemma => "Lemma",
            Self::Corollary => "Corollary",
            Self::Law => "Law",
            Self::Proposition => "Proposition",
        }
    }
}

/// List `list-type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    Bulleted,
    Enumerated,
    LabeledItem,
}

impl ListType {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bulleted" => Some(Self::Bulleted),
            "enumerated" => Some(Self::Enumerated),
            "labeled-item" => Some(Self::LabeledItem),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(value: Option<&str>, default: Self) -> Self {
        value.and_then(Self::parse).unwrap_or(default)
    }
}

/// List `bullet-style` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletStyle {
    Bullet,
    OpenCircle,
    Pilcrow,
    RightArrow,
    Section,
    Asterisk,
    Dash,
    None,
}

impl BulletStyle {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bullet" => Some(Self::Bullet),
            "open-circle" => Some(Self::OpenCircle),
            "pilcrow" => Some(Self::Pilcrow),
            "rArrow" => Some(Self::RightArrow),
            "section" => Some(Self::Section),
            "asterisk" => Some(Self::Asterisk),
            "dash" => Some(Self::Dash),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(value: Option<&str>, default: Self) -> Self {
        value.and_then(Self::parse).unwrap_or(default)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bullet => "bullet",
            Self::OpenCircle => "open-circle",
            Self::Pilcrow => "pilcrow",
            Self::RightArrow => "rArrow",
            Self::Section => "section",
            Self::Asterisk => "asterisk",
            Self::Dash => "dash",
            Self::None => "none",
        }
    }
}

/// Newline `effect` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlineEffect {
    Normal,
    Underline,
}

impl NewlineEffect {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "underline" => Some(Self::Underline),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(value: Option<&str>, default: Self) -> Self {
        value.and_then(Self::parse).unwrap_or(default)
    }
}

/// Media child `for` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaChildFor {
    Default,
    Online,
    Pdf,
    /// `webview2.0`: always selected, ending the scan.
    Override,
}

impl MediaChildFor {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Default),
            "online" => Some(Self::Online),
            "pdf" => Some(Self::Pdf),
            "webview2.0" => Some(Self::Override),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(value: Option<&str>, default: Self) -> Self {
        value.and_then(Self::parse).unwrap_or(default)
    }
}

/// Figure `orient` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureOrientation {
    Horizontal,
    Vertical,
}

impl FigureOrientation {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(value: Option<&str>, default: Self) -> Self {
        value.and_then(Self::parse).unwrap_or(default)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// CALS `align` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalsAlign {
    Left,
    Right,
    Center,
    Justify,
}

impl CalsAlign {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "center" => Some(Self::Center),
            "justify" => Some(Self::Justify),
            _ => None,
        }
    }
}

/// CALS `valign` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalsVerticalAlign {
    Top,
    Middle,
    Bottom,
}

impl CalsVerticalAlign {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Self::Top),
            "middle" => Some(Self::Middle),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

/// CALS table `frame` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalsFrame {
    All,
    Sides,
    Top,
    Bottom,
    TopBottom,
}

impl CalsFrame {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "sides" => Some(Self::Sides),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "topbot" => Some(Self::TopBottom),
            _ => None,
        }
    }

    #[must_use]
    pub fn of(value: Option<&str>, default: Self) -> Self {
        value.and_then(Self::parse).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_uses_default_when_absent() {
        assert_eq!(
            EmphasisEffect::of(None, EmphasisEffect::Bold),
            EmphasisEffect::Bold
        );
        assert_eq!(Display::of(None, Display::Inline), Display::Inline);
        assert_eq!(CalsFrame::of(None, CalsFrame::All), CalsFrame::All);
    }

    #[test]
    fn test_of_uses_default_when_invalid() {
        assert_eq!(NoteType::of(Some("rant"), NoteType::Note), NoteType::Note);
        assert_eq!(
            ListType::of(Some("stacked"), ListType::Bulleted),
            ListType::Bulleted
        );
        assert_eq!(
            MediaChildFor::of(Some("print"), MediaChildFor::Default),
            MediaChildFor::Default
        );
    }

    #[test]
    fn test_of_parses_present_value() {
        assert_eq!(
            EmphasisEffect::of(Some("smallcaps"), EmphasisEffect::Bold),
            EmphasisEffect::Smallcaps
        );
        assert_eq!(
            MediaChildFor::of(Some("webview2.0"), MediaChildFor::Default),
            MediaChildFor::Override
        );
        assert_eq!(
            CalsFrame::of(Some("topbot"), CalsFrame::All),
            CalsFrame::TopBottom
        );
        assert_eq!(
            ListType::of(Some("labeled-item"), ListType::Bulleted),
            ListType::LabeledItem
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(NoteType::Important.label(), "Important");
        assert_eq!(RuleType::of(Some("law"), RuleType::Rule).label(), "Law");
        assert_eq!(RuleType::of(None, RuleType::Rule).label(), "Rule");
    }

    #[test]
    fn test_cals_align_has_no_default() {
        assert_eq!(CalsAlign::parse("center"), Some(CalsAlign::Center));
        assert_eq!(CalsAlign::parse("char"), None);
        assert_eq!(CalsVerticalAlign::parse("middle"), Some(CalsVerticalAlign::Middle));
    }

    #[test]
    fn test_bullet_style_as_str() {
        assert_eq!(
            BulletStyle::of(Some("rArrow"), BulletStyle::Bullet).as_str(),
            "rArrow"
        );
    }
}
