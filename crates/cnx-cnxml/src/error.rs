//! Error types for CNXML parsing and rendering.

/// Error while parsing CNXML text into a [`Document`](crate::Document).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// XML syntax error.
    #[error("XML parse error")]
    XmlParse(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Element or attribute uses a prefix with no namespace declaration in scope.
    #[error("unbound namespace prefix: {0}")]
    UnboundPrefix(String),

    /// Input contains no root element.
    #[error("document has no root element")]
    MissingRoot,

    /// Input contains more than one top-level element.
    #[error("document has more than one root element")]
    MultipleRoots,
}

/// Error returned by a [`LinkResolver`](crate::LinkResolver).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// Resource name is not in the module's resource map.
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// Reference cannot be turned into a URI.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Resolver backend failure.
    #[error("resolver failure: {0}")]
    Backend(String),
}

/// Error from a [`Processor`](crate::Processor).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ProcessError {
    /// Link or media reference could not be resolved.
    #[error("link resolution failed")]
    Resolve(#[from] ResolveError),

    /// Configured processor name has no implementation.
    #[error("unknown processor: {0}")]
    UnknownProcessor(String),

    /// Processor-specific failure.
    #[error("{processor} failed: {message}")]
    Failed {
        /// Processor name.
        processor: String,
        /// Failure description.
        message: String,
    },
}

/// Error from the HTML generator.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// A numbered element has no entry in the numbering map.
    #[error("numbered element <{tag}> has no number")]
    Unnumbered {
        /// Local name of the element.
        tag: &'static str,
    },
}

/// Error from [`Renderer::render`](crate::Renderer::render).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A processor in the chain failed.
    #[error("processor error")]
    Process(#[from] ProcessError),

    /// HTML generation failed.
    #[error("generation error")]
    Generate(#[from] GenerateError),
}
