use thiserror::Error;

/// Errors raised while turning an API document into typed records.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The payload is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The XML is well-formed but does not match the expected schema.
    #[error("Malformed API document: {0}")]
    Malformed(String),

    /// The API answered with an `<error>` element instead of a result.
    #[error("API error {code}: {message}")]
    Remote { code: i32, message: String },

    /// Reading a document from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
