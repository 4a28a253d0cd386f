//! Text extraction from uploaded documents.
//!
//! The format is chosen from the file extension. Unknown extensions yield
//! empty text rather than an error, so a mislabelled upload still produces
//! a (single, empty) scene.

mod docx;
mod error;
mod pdf;
mod plain;
mod rtf;

pub use error::ExtractError;

use tracing::warn;

/// Document formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Docx,
    Pdf,
    Rtf,
}

impl DocumentFormat {
    /// Detect the format from the text after the last `.` of a file name.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            "rtf" => Some(Self::Rtf),
            _ => None,
        }
    }

    /// Extract text from a document known to be in this format.
    pub fn extract(self, content: &[u8]) -> Result<String, ExtractError> {
        match self {
            Self::PlainText => Ok(plain::decode(content)),
            Self::Docx => docx::extract(content),
            Self::Pdf => pdf::extract(content),
            Self::Rtf => Ok(rtf::extract(content)),
        }
    }
}

/// Extract plain text from an uploaded file.
pub fn extract_text(filename: &str, content: &[u8]) -> Result<String, ExtractError> {
    let Some(format) = DocumentFormat::from_filename(filename) else {
        warn!(filename, "Unsupported document type, treating as empty");
        return Ok(String::new());
    };

    format.extract(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(
            DocumentFormat::from_filename("Сценарий.DOCX"),
            Some(DocumentFormat::Docx)
        );
        assert_eq!(
            DocumentFormat::from_filename("a.b.rtf"),
            Some(DocumentFormat::Rtf)
        );
        assert_eq!(DocumentFormat::from_filename("script.odt"), None);
    }

    #[test]
    fn name_without_dot_is_treated_as_extension() {
        assert_eq!(
            DocumentFormat::from_filename("txt"),
            Some(DocumentFormat::PlainText)
        );
    }

    #[test]
    fn unknown_extension_yields_empty_text() {
        assert_eq!(extract_text("script.odt", b"whatever").unwrap(), "");
    }

    #[test]
    fn plain_text_is_passed_through() {
        let text = extract_text("script.txt", "1. ИНТ.".as_bytes()).unwrap();
        assert_eq!(text, "1. ИНТ.");
    }
}
