use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAlertPublisher, ALERT_BACKLOG};
use crate::routes::with_triage_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use care_triage::config::AppConfig;
use care_triage::error::AppError;
use care_triage::telemetry;
use care_triage::triage::TriageService;
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

    let alerts = Arc::new(InMemoryAlertPublisher::with_backlog(ALERT_BACKLOG));
    let triage_service = Arc::new(TriageService::new(&config.policy, alerts));

    let app = with_triage_routes(triage_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        moderate = config.policy.thresholds.moderate,
        high = config.policy.thresholds.high,
        critical = config.policy.thresholds.critical,
        crisis_keywords = config.policy.crisis_keywords.len(),
        "care triage service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
