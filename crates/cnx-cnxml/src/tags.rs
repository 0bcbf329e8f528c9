//! CNXML element names and namespaces.

/// Default CNXML namespace URI.
pub const CNXML_NAMESPACE: &str = "http://cnx.rice.edu/cnxml";

/// `MathML` namespace URI.
pub const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";

/// MDML metadata namespace URI.
pub const MDML_NAMESPACE: &str = "http://cnx.rice.edu/mdml";

/// Recognized CNXML elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CnxmlTag {
    Document,
    Metadata,
    Content,
    Title,
    Label,
    Para,
    Section,
    Emphasis,
    Link,
    Foreign,
    Term,
    Sup,
    Sub,
    Preformat,
    Code,
    Note,
    Definition,
    Meaning,
    Exercise,
    Commentary,
    Problem,
    Solution,
    Equation,
    Rule,
    Statement,
    Proof,
    Example,
    List,
    Item,
    Newline,
    Media,
    Image,
    Object,
    Flash,
    Labview,
    Download,
    Audio,
    Video,
    JavaApplet,
    Figure,
    Subfigure,
    Caption,
    Table,
    Tgroup,
    Colspec,
    Thead,
    Tbody,
    Tfoot,
    Row,
    Entry,
}

impl CnxmlTag {
    /// Every recognized tag.
    pub const ALL: &'static [Self] = &[
        Self::Document,
        Self::Metadata,
        Self::Content,
        Self::Title,
        Self::Label,
        Self::Para,
        Self::Section,
        Self::Emphasis,
        Self::Link,
        Self::Foreign,
        Self::Term,
        Self::Sup,
        Self::Sub,
        Self::Preformat,
        Self::Code,
        Self::Note,
        Self::Definition,
        Self::Meaning,
        Self::Exercise,
        Self::Commentary,
        Self::Problem,
        Self::Solution,
        Self::Equation,
        Self::Rule,
        Self::Statement,
        Self::Proof,
        Self::Example,
        Self::List,
        Self::Item,
        Self::Newline,
        Self::Media,
        Self::Image,
        Self::Object,
        Self::Flash,
        Self::Labview,
        Self::Download,
        Self::Audio,
        Self::Video,
        Self::JavaApplet,
        Self::Figure,
        Self::Subfigure,
        Self::Caption,
        Self::Table,
        Self::Tgroup,
        Self::Colspec,
        Self::Thead,
        Self::Tbody,
        Self::Tfoot,
        Self::Row,
        Self::Entry,
    ];

    /// Tags that receive a sequence number.
    ///
    /// Both the numbering pass and the generator's numbered dispatch read this
    /// table, so an element rendered as numbered always has a number.
    pub const NUMBERED: &'static [Self] = &[
        Self::Definition,
        Self::Equation,
        Self::Example,
        Self::Exercise,
        Self::Figure,
        Self::Rule,
        Self::Table,
    ];

    /// Children of `media` that can be selected for display.
    pub const MEDIA_CHILDREN: &'static [Self] = &[
        Self::JavaApplet,
        Self::Audio,
        Self::Download,
        Self::Flash,
        Self::Image,
        Self::Labview,
        Self::Object,
        Self::Video,
    ];

    /// Parse a local element name.
    ///
    /// Returns None for names outside the recognized set.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tag| tag.as_str() == name)
    }

    /// Local element name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Metadata => "metadata",
            Self::Content => "content",
            Self::Title => "title",
            Self::Label => "label",
            Self::Para => "para",
            Self::Section => "section",
            Self::Emphasis => "emphasis",
            Self::Link => "link",
            Self::Foreign => "foreign",
            Self::Term => "term",
            Self::Sup => "sup",
            Self::Sub => "sub",
            Self::Preformat => "preformat",
            Self::Code => "code",
            Self::Note => "note",
            Self::Definition => "definition",
            Self::Meaning => "meaning",
            Self::Exercise => "exercise",
            Self::Commentary => "commentary",
            Self::Problem => "problem",
            Self::Solution => "solution",
            Self::Equation => "equation",
            Self::Rule => "rule",
            Self::Statement => "statement",
            Self::Proof => "proof",
            Self::Example => "example",
            Self::List => "list",
            Self::Item => "item",
            Self::Newline => "newline",
            Self::Media => "media",
            Self::Image => "image",
            Self::Object => "object",
            Self::Flash => "flash",
            Self::Labview => "labview",
            Self::Download => "download",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::JavaApplet => "java-applet",
            Self::Figure => "figure",
            Self::Subfigure => "subfigure",
            Self::Caption => "caption",
            Self::Table => "table",
            Self::Tgroup => "tgroup",
            Self::Colspec => "colspec",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Tfoot => "tfoot",
            Self::Row => "row",
            Self::Entry => "entry",
        }
    }

    /// Whether elements with this tag are numbered.
    #[must_use]
    pub fn is_numbered(self) -> bool {
        Self::NUMBERED.contains(&self)
    }

    /// Whether this tag is a selectable `media` child.
    #[must_use]
    pub fn is_media_child(self) -> bool {
        Self::MEDIA_CHILDREN.contains(&self)
    }
}
