use std::fmt;

use super::IntakeError;

/// Minimum number of characters an extracted contract must contain.
pub const MIN_CONTRACT_CHARS: usize = 50;
/// Upper bound on the characters forwarded to the analyzer.
pub const MAX_ANALYSIS_CHARS: usize = 20_000;

/// Upload formats accepted by the intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    /// Sniff the format from the text after the final `.` of the filename.
    /// A filename without a dot is treated as its own extension.
    pub fn from_filename(filename: &str) -> Result<Self, IntakeError> {
        let extension = filename
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            _ => Err(IntakeError::UnsupportedType { extension }),
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::Txt => "txt",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

/// Turns uploaded bytes into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, kind: DocumentKind, content: &[u8]) -> Result<String, IntakeError>;
}

/// Extractor for plain-text uploads. Binary formats need a dedicated adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, kind: DocumentKind, content: &[u8]) -> Result<String, IntakeError> {
        match kind {
            DocumentKind::Txt => Ok(String::from_utf8_lossy(content).into_owned()),
            DocumentKind::Pdf | DocumentKind::Docx => Err(IntakeError::Extraction {
                kind,
                reason: "no extractor configured for this format".to_string(),
            }),
        }
    }
}

/// Reject near-empty text and cap what is sent for analysis.
pub fn prepare_text(text: String) -> Result<String, IntakeError> {
    if text.chars().count() < MIN_CONTRACT_CHARS {
        return Err(IntakeError::TooShort);
    }

    match text.char_indices().nth(MAX_ANALYSIS_CHARS) {
        Some((cut, _)) => Ok(text[..cut].to_string()),
        None => Ok(text),
    }
}
