use thiserror::Error;

/// Errors raised while building an [`XmlTree`](super::XmlTree).
///
/// These never cross the document facade: an input that fails here simply
/// produces an invalid document.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Error reported by the underlying reader (bad syntax, mismatched tags).
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// Malformed or duplicated attribute.
    #[error("invalid attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Unknown entity or invalid character reference.
    #[error("invalid escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("document is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("closing tag </{0}> has no matching start tag")]
    UnexpectedEnd(String),

    #[error("document has no root element")]
    NoRootElement,

    #[error("document has more than one root element")]
    MultipleRootElements,

    #[error("text found outside the root element")]
    TextOutsideRoot,
}
