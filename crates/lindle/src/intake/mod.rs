//! Contract upload intake: format sniffing, text extraction, model reply
//! parsing and attribution of the analysis to the reputation ledger.
//!
//! Binary extraction and the language-model call sit behind [`TextExtractor`]
//! and [`ContractAnalyzer`] so deployments can plug in their own adapters.

pub mod document;
pub mod pipeline;
pub mod reply;
pub mod router;

pub use document::{DocumentKind, PlainTextExtractor, TextExtractor};
pub use pipeline::{
    AnalysisIntake, AnalysisRequest, ContractAnalyzer, DocumentUpload, IntakeOutcome,
};
pub use reply::{parse_analysis_reply, ContractAnalysis};
pub use router::intake_router;

/// Error raised while turning an upload into an analysis.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Unsupported file type: .{extension}. Use PDF, DOCX, or TXT.")]
    UnsupportedType { extension: String },
    #[error("Failed to read {kind} file: {reason}")]
    Extraction { kind: DocumentKind, reason: String },
    #[error("Contract appears empty or too short.")]
    TooShort,
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
    #[error("analysis provider failed: {0}")]
    Analyzer(String),
    #[error("analysis provider not configured: {0}")]
    NotConfigured(String),
}

impl IntakeError {
    /// Whether the upload itself was at fault rather than a collaborator.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            IntakeError::Analyzer(_) | IntakeError::NotConfigured(_)
        )
    }
}
