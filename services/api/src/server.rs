use crate::cli::ServeArgs;
use crate::infra::{load_table, AppState, InMemoryCutoffRepository};
use crate::routes::with_preference_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use josaa_predictor::config::AppConfig;
use josaa_predictor::counselling::PreferenceService;
use josaa_predictor::error::AppError;
use josaa_predictor::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    if let Some(path) = args.cutoffs.take() {
        config.data.cutoffs_path = Some(path);
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let table = load_table(config.data.cutoffs_path.as_deref())?;
    let seat_count = table.len();
    let repository = Arc::new(InMemoryCutoffRepository::new(table));
    let preference_service = Arc::new(PreferenceService::new(repository));

    let app = with_preference_routes(preference_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, seat_count, "preference predictor ready");

    axum::serve(listener, app).await?;
    Ok(())
}
