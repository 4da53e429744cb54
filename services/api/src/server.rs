use crate::cli::ServeArgs;
use crate::infra::{
    build_certificate_service, run_integrity_checks, AppState, TracingDownloadLogger,
};
use crate::routes::portal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use municipal_eservices::config::AppConfig;
use municipal_eservices::error::AppError;
use municipal_eservices::telemetry;
use municipal_eservices::workflows::eligibility::EligibilityEngine;
use std::net::SocketAddr;
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

    let engine = EligibilityEngine::new();
    let certificates = build_certificate_service(&config, Arc::new(TracingDownloadLogger))?;
    run_integrity_checks(&engine, &certificates)?;

    let app = portal_routes(engine, config.default_language, Arc::new(certificates))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "municipal e-services portal ready");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
