use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ContractId, EntityId, RecordContract};
use super::error::ReputationError;
use super::query::SearchFilters;
use super::service::ReputationService;
use super::store::ReputationStore;

/// Form body accepted when a user reports how a contract ended.
#[derive(Debug, Clone, Deserialize)]
pub struct OutcomeUpdate {
    pub outcome: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Router builder exposing the reputation ledger over HTTP.
pub fn reputation_router<S>(service: Arc<ReputationService<S>>) -> Router
where
    S: ReputationStore + 'static,
{
    Router::new()
        .route("/entities", get(list_handler::<S>))
        .route("/entities/search", get(search_handler::<S>))
        .route("/entity/:entity_id", get(detail_handler::<S>))
        .route("/contracts", post(record_handler::<S>))
        .route("/contract/:contract_id/outcome", put(outcome_handler::<S>))
        .route("/reputation/report/:entity_id", get(report_handler::<S>))
        .with_state(service)
}

pub(crate) async fn list_handler<S>(State(service): State<Arc<ReputationService<S>>>) -> Response
where
    S: ReputationStore + 'static,
{
    Json(json!({ "entities": service.entities() })).into_response()
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<ReputationService<S>>>,
    Query(filters): Query<SearchFilters>,
) -> Response
where
    S: ReputationStore + 'static,
{
    Json(json!({ "results": service.search(&filters) })).into_response()
}

pub(crate) async fn detail_handler<S>(
    State(service): State<Arc<ReputationService<S>>>,
    Path(entity_id): Path<String>,
) -> Result<Response, ReputationError>
where
    S: ReputationStore + 'static,
{
    let detail = service.entity_detail(&EntityId(entity_id))?;
    Ok(Json(detail).into_response())
}

pub(crate) async fn record_handler<S>(
    State(service): State<Arc<ReputationService<S>>>,
    Json(request): Json<RecordContract>,
) -> Result<Response, ReputationError>
where
    S: ReputationStore + 'static,
{
    let contract = service.resolve_and_record(request)?;
    Ok((StatusCode::CREATED, Json(contract)).into_response())
}

pub(crate) async fn outcome_handler<S>(
    State(service): State<Arc<ReputationService<S>>>,
    Path(contract_id): Path<String>,
    Form(update): Form<OutcomeUpdate>,
) -> Result<Response, ReputationError>
where
    S: ReputationStore + 'static,
{
    let contract = service.set_outcome(&ContractId(contract_id), &update.outcome, update.notes)?;
    let payload = json!({
        "message": "Contract outcome updated successfully",
        "contract": contract,
    });
    Ok(Json(payload).into_response())
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<ReputationService<S>>>,
    Path(entity_id): Path<String>,
) -> Result<Response, ReputationError>
where
    S: ReputationStore + 'static,
{
    let report = service.report(&EntityId(entity_id))?;
    Ok(Json(report).into_response())
}

impl IntoResponse for ReputationError {
    fn into_response(self) -> Response {
        let status = match &self {
            ReputationError::NotFound { .. } => StatusCode::NOT_FOUND,
            ReputationError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            ReputationError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
