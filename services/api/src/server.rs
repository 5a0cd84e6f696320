use crate::cli::ServeArgs;
use crate::infra::{AppState, UnconfiguredAnalyzer};
use crate::routes::with_reputation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lindle::config::AppConfig;
use lindle::error::AppError;
use lindle::intake::{AnalysisIntake, PlainTextExtractor};
use lindle::reputation::{JsonFileStore, ReputationService};
use lindle::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(data_dir) = args.store.data_dir.take() {
        config.storage.data_dir = data_dir;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(JsonFileStore::new(config.storage.data_dir.clone()));
    let reputation_service = ReputationService::new(store);
    let intake = Arc::new(AnalysisIntake::new(
        reputation_service.clone(),
        Arc::new(PlainTextExtractor),
        Arc::new(UnconfiguredAnalyzer),
    ));

    let app = with_reputation_routes(Arc::new(reputation_service), intake)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        data_dir = %config.storage.data_dir.display(),
        "reputation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
