use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRequestRepository, InMemoryUserDirectory};
use crate::routes::with_request_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

use leave_desk::config::AppConfig;
use leave_desk::error::AppError;
use leave_desk::telemetry;
use leave_desk::workflows::leave::VacationRequestService;

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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if config.environment.is_production() {
        warn!("running with in-memory storage; data is lost on restart");
    }

    let directory = Arc::new(InMemoryUserDirectory::seeded());
    let repository = Arc::new(InMemoryRequestRepository::default());
    let request_service = Arc::new(VacationRequestService::new(directory, repository));

    let app = with_request_routes(request_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "vacation request service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
