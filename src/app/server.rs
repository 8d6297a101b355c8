use crate::app::cli::ServeArgs;
use crate::app::roster::{load_rosters, open_representative_accounts};
use crate::app::routes::{app_router, AppState};
use crate::config::AppConfig;
use crate::directory::UserRegistry;
use crate::error::AppError;
use crate::placements::{InMemoryPlacementRepository, PlacementService};
use crate::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let registry = Arc::new(UserRegistry::new());
    let summaries = load_rosters(&registry, &args.roster)?;
    let repository = Arc::new(InMemoryPlacementRepository::default());
    let service = Arc::new(PlacementService::new(
        registry.clone(),
        repository,
        config.placement,
    ));
    open_representative_accounts(&service);

    info!(
        users = registry.len(),
        rosters = summaries.len(),
        "user registry seeded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Some(Arc::new(prometheus_handle)),
    };

    let app = app_router(registry, service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "internship hub ready");

    axum::serve(listener, app).await?;
    Ok(())
}
