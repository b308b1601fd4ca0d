use fuel_planner::config::ServerConfig;
use fuel_planner::geocode::{GeoResolver, NominatimClient};
use fuel_planner::planner::PlannerConfig;
use fuel_planner::prices::PriceStore;
use fuel_planner::routing::OsrmClient;
use fuel_planner::service::RoutePlanningService;
use fuel_planner::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    if config.uses_placeholder_email() {
        warn!(
            email = %config.contact_email,
            "NOMINATIM_EMAIL not set; the public geocoder may reject requests"
        );
    }

    let geocoder = NominatimClient::new(config.nominatim())?;
    let router = OsrmClient::new(config.osrm())?;

    // Load fuel prices up front (fail fast if unreadable)
    let prices = PriceStore::new(&config.prices_path);
    prices.get().await?;

    let resolver = GeoResolver::new(geocoder, &config.geocode_cache());
    let service = RoutePlanningService::new(resolver, router, prices, PlannerConfig::default());
    let app = create_router(AppState::new(service), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Fuel Stop Planner listening on http://{}", config.bind_addr);
    info!("  GET /route/?start=...&finish=...  - Plan fuel stops");
    info!("  GET /health                       - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}
