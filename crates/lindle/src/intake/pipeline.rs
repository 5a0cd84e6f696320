use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::document::{prepare_text, DocumentKind, TextExtractor};
use super::reply::ContractAnalysis;
use super::IntakeError;
use crate::reputation::{
    ContractOutcome, EntityKind, NewContract, RecordContract, ReputationService, ReputationStore,
};

/// Inputs forwarded to the model for one contract.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub text: &'a str,
    pub role: &'a str,
    pub risk_tolerance: &'a str,
}

/// Language-model adapter producing a structured analysis.
pub trait ContractAnalyzer: Send + Sync {
    fn analyze(&self, request: AnalysisRequest<'_>) -> Result<ContractAnalysis, IntakeError>;
}

/// A document as received from the client.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub filename: String,
    pub content: Vec<u8>,
    pub role: String,
    pub risk_tolerance: String,
}

impl DocumentUpload {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            role: crate::reputation::domain::default_role(),
            risk_tolerance: crate::reputation::domain::default_risk_tolerance(),
        }
    }
}

/// Analysis returned to the caller, with the ledger entry when the
/// counterparty could be attributed.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeOutcome {
    #[serde(flatten)]
    pub analysis: ContractAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<ContractOutcome>,
}

/// Pipeline from uploaded bytes to analysis and ledger attribution.
pub struct AnalysisIntake<S, X, A> {
    reputation: ReputationService<S>,
    extractor: Arc<X>,
    analyzer: Arc<A>,
}

impl<S, X, A> AnalysisIntake<S, X, A>
where
    S: ReputationStore + 'static,
    X: TextExtractor,
    A: ContractAnalyzer,
{
    pub fn new(reputation: ReputationService<S>, extractor: Arc<X>, analyzer: Arc<A>) -> Self {
        Self {
            reputation,
            extractor,
            analyzer,
        }
    }

    /// Sniff, extract and analyse an upload, then attribute it to the
    /// counterparty named by the analysis.
    ///
    /// Attribution is best effort: a ledger failure is logged and the analysis
    /// is still returned.
    pub fn process(&self, upload: DocumentUpload) -> Result<IntakeOutcome, IntakeError> {
        let DocumentUpload {
            filename,
            content,
            role,
            risk_tolerance,
        } = upload;

        let kind = DocumentKind::from_filename(&filename)?;
        let text = prepare_text(self.extractor.extract(kind, &content)?)?;

        let analysis = self.analyzer.analyze(AnalysisRequest {
            text: &text,
            role: &role,
            risk_tolerance: &risk_tolerance,
        })?;

        info!(
            filename = %filename,
            red_flags = analysis.red_flags.len(),
            tokens_used = ?analysis.tokens_used,
            "contract analysed"
        );

        let contract = match attribution(&analysis, filename, role, risk_tolerance) {
            Some(request) => match self.reputation.resolve_and_record(request) {
                Ok(contract) => Some(contract),
                Err(err) => {
                    warn!(error = %err, "failed to store reputation data");
                    None
                }
            },
            None => None,
        };

        Ok(IntakeOutcome { analysis, contract })
    }
}

fn attribution(
    analysis: &ContractAnalysis,
    filename: String,
    role: String,
    risk_tolerance: String,
) -> Option<RecordContract> {
    let counterparty = analysis.counterparty.clone()?;
    let counterparty_type = analysis.counterparty_type.clone()?;

    let filename = if filename.is_empty() {
        "unknown".to_string()
    } else {
        filename
    };

    Some(RecordContract {
        counterparty,
        counterparty_type: EntityKind::from(counterparty_type),
        industry: analysis.industry.clone(),
        contract: NewContract {
            filename,
            summary: analysis.summary.clone(),
            red_flags_count: analysis.red_flags.len() as u32,
            pushbacks_count: analysis.pushbacks.len() as u32,
            role,
            risk_tolerance,
        },
    })
}
