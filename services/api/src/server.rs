use crate::cli::ServeArgs;
use crate::infra::{mail_settings, AppState, NotificationRuntime};
use crate::routes::with_travel_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};
use travel_listings::bookings::{
    seed_sample_data, LinkBuilder, LogMailer, MemoryStore, TravelService,
};
use travel_listings::config::AppConfig;
use travel_listings::error::AppError;
use travel_listings::telemetry;

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

    let store = Arc::new(MemoryStore::new());
    if args.seed {
        let summary = seed_sample_data(store.as_ref())?;
        info!(
            listings = summary.listings.len(),
            bookings = summary.bookings.len(),
            reviews = summary.reviews.len(),
            "sample data loaded"
        );
    }

    let notifications = NotificationRuntime::start(
        store.clone(),
        Arc::new(LogMailer),
        mail_settings(&config.notifications),
        config.notifications.workers,
    );
    let service = Arc::new(TravelService::new(
        store,
        notifications.queue(),
        LinkBuilder::new(config.server.public_url()),
    ));

    let app = with_travel_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, public_url = %config.server.public_url(), "travel listings api ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    readiness_flag.store(false, Ordering::Release);
    notifications.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
