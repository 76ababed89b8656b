use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySavedListingStore, JsonFileSavedListingStore};
use crate::routes::with_listing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rehab_scout::config::AppConfig;
use rehab_scout::error::AppError;
use rehab_scout::listings::{ListingService, SavedListingStore};
use rehab_scout::telemetry;
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
    if let Some(rate) = args.market_rate {
        config.valuation.area_avg_price_per_sqft = rate;
    }
    if let Some(year) = args.as_of_year {
        config.valuation.as_of_year = Some(year);
    }

    telemetry::init(&config.telemetry)?;

    match config.saved_listings_path.clone() {
        Some(path) => {
            let store = JsonFileSavedListingStore::new(path);
            info!(path = %store.path().display(), "saved listings persisted to file");
            serve_with(config, Arc::new(store)).await
        }
        None => serve_with(config, Arc::new(InMemorySavedListingStore::default())).await,
    }
}

async fn serve_with<S>(config: AppConfig, store: Arc<S>) -> Result<(), AppError>
where
    S: SavedListingStore + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = config.valuation.engine();
    let as_of_year = engine.as_of_year();
    let listing_service = Arc::new(ListingService::new(engine, store));

    let app = with_listing_routes(listing_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        market_rate = config.valuation.area_avg_price_per_sqft,
        as_of_year,
        "rehab scout listing service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
