use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};

use super::document::TextExtractor;
use super::pipeline::{AnalysisIntake, ContractAnalyzer, DocumentUpload, IntakeOutcome};
use super::IntakeError;
use crate::error::AppError;
use crate::reputation::ReputationStore;

/// Router exposing `POST /analyze` for multipart contract uploads.
pub fn intake_router<S, X, A>(intake: Arc<AnalysisIntake<S, X, A>>) -> Router
where
    S: ReputationStore + 'static,
    X: TextExtractor + 'static,
    A: ContractAnalyzer + 'static,
{
    Router::new()
        .route("/analyze", post(analyze_handler::<S, X, A>))
        .with_state(intake)
}

/// Accepts a `file` part plus optional `role` and `risk_tolerance` fields.
pub(crate) async fn analyze_handler<S, X, A>(
    State(intake): State<Arc<AnalysisIntake<S, X, A>>>,
    mut multipart: Multipart,
) -> Result<Json<IntakeOutcome>, AppError>
where
    S: ReputationStore + 'static,
    X: TextExtractor + 'static,
    A: ContractAnalyzer + 'static,
{
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut role = None;
    let mut risk_tolerance = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_upload)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await.map_err(invalid_upload)?;
                file = Some((filename, content.to_vec()));
            }
            "role" => role = Some(field.text().await.map_err(invalid_upload)?),
            "risk_tolerance" => {
                risk_tolerance = Some(field.text().await.map_err(invalid_upload)?)
            }
            _ => {}
        }
    }

    let (filename, content) =
        file.ok_or_else(|| IntakeError::InvalidUpload("missing `file` field".to_string()))?;
    let mut upload = DocumentUpload::new(filename, content);
    if let Some(role) = role.filter(|role| !role.is_empty()) {
        upload.role = role;
    }
    if let Some(risk_tolerance) = risk_tolerance.filter(|risk| !risk.is_empty()) {
        upload.risk_tolerance = risk_tolerance;
    }

    Ok(Json(intake.process(upload)?))
}

fn invalid_upload(err: MultipartError) -> IntakeError {
    IntakeError::InvalidUpload(err.body_text())
}
