use thiserror::Error;

/// Errors that can occur while extracting text from a document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The DOCX container is not a readable ZIP archive.
    #[error("Invalid DOCX archive: {0}")]
    Archive(String),

    /// The DOCX archive has no main document part.
    #[error("DOCX archive has no word/document.xml")]
    MissingDocumentPart,

    /// The DOCX document part is not well-formed XML.
    #[error("Malformed DOCX XML: {0}")]
    Xml(String),

    /// The PDF could not be parsed.
    #[error("Failed to read PDF: {0}")]
    Pdf(String),
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::FileNotFound => Self::MissingDocumentPart,
            other => Self::Archive(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for ExtractError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}
