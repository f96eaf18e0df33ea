use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use medisync::config::AppConfig;
use medisync::error::AppError;
use medisync::interactions::{ApiKey, ReferenceData};
use medisync::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(data_dir) = args.data_dir.take() {
        config.data.dir = data_dir;
    }

    telemetry::init(&config.telemetry)?;

    if config.auth.uses_demo_key() {
        warn!("MEDISYNC_API_KEY is not set; the public demo key is accepted");
    }

    let reference = Arc::new(ReferenceData::load_from_dir(&config.data.dir)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_service_routes(reference.clone(), ApiKey::new(config.auth.api_key()))
        .layer(Extension(app_state))
        .layer(CorsLayer::permissive())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        drugs = reference.drug_count(),
        "medisync interaction service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
