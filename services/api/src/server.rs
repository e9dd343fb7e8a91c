use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLoanLedger};
use crate::routes::with_advance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use salary_advance::advance::AdvanceService;
use salary_advance::config::AppConfig;
use salary_advance::error::AppError;
use salary_advance::telemetry;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let ledger = Arc::new(InMemoryLoanLedger::default());
    let advance_service = Arc::new(AdvanceService::new(ledger));

    let app = with_advance_routes(advance_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "salary advance service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
