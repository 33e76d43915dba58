use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use process_matcher::config::AppConfig;
use process_matcher::error::AppError;
use process_matcher::telemetry;
use process_matcher::workflows::staffing::{shared_desk, StaffingDesk};
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let desk = match config.staffing.process_table.as_deref() {
        Some(path) => {
            let catalog = load_catalog(Some(path))?;
            info!(path = %path.display(), processes = catalog.len(), "process table loaded");
            StaffingDesk::with_catalog(catalog)
        }
        None => {
            info!("no process table configured; starting with an empty catalog");
            StaffingDesk::new()
        }
    };

    let app = with_service_routes(shared_desk(desk))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "process matcher ready");

    axum::serve(listener, app).await?;
    Ok(())
}
