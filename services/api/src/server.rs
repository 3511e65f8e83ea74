use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use accesshire::config::AppConfig;
use accesshire::error::AppError;
use accesshire::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tokio::net::TcpListener;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{build_marketplace, seed_sample_catalog, AppState};
use crate::routes::with_marketplace_routes;

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let marketplace = build_marketplace();
    if config.marketplace.seed_demo_data {
        let (employer, jobs) = seed_sample_catalog(&marketplace)?;
        info!(employer = %employer, jobs = jobs.len(), "demo catalog seeded");
    }

    let (metrics_layer, metrics_handle) = PrometheusMetricLayer::pair();
    let readiness = Arc::new(AtomicBool::new(false));
    let app = with_marketplace_routes(marketplace)
        .layer(Extension(AppState {
            readiness: Arc::clone(&readiness),
            metrics: Arc::new(metrics_handle),
        }))
        .layer(metrics_layer);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);
    info!(?config.environment, %addr, "accesshire marketplace service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
