use std::process::ExitCode;

use tracing::{error, info, warn};

use fuel_route_server::cache::{GeocodeCache, RouteCache};
use fuel_route_server::catalog::InMemoryCatalog;
use fuel_route_server::config::ServerConfig;
use fuel_route_server::geocoding::{ArcGisClient, ArcGisConfig, GeocodingResolver};
use fuel_route_server::planner::Optimizer;
use fuel_route_server::routing::{OrsClient, OrsConfig, RouteProvider};
use fuel_route_server::telemetry::{LoggingConfig, init_logging};
use fuel_route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging(&LoggingConfig::from_env());

    let config = ServerConfig::from_env();

    let ors_key = config.ors_api_key.clone().unwrap_or_else(|| {
        warn!("OPENROUTE_API_KEY not set. Routing calls will fail.");
        String::new()
    });

    let mut arcgis_config = ArcGisConfig::default();
    if let Some(token) = &config.arcgis_token {
        arcgis_config = arcgis_config.with_token(token);
    }
    let geocoder = match ArcGisClient::new(arcgis_config) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create geocoding client");
            return ExitCode::FAILURE;
        }
    };
    let directions = match OrsClient::new(OrsConfig::new(ors_key)) {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "failed to create routing client");
            return ExitCode::FAILURE;
        }
    };

    // Fail fast if the station catalog is unusable
    let catalog = match InMemoryCatalog::load(&config.stations_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "failed to load fuel stations");
            return ExitCode::FAILURE;
        }
    };
    if catalog.is_empty() {
        warn!(
            path = %config.stations_path.display(),
            "station catalog is empty, no fuel stops will be planned"
        );
    }

    let optimizer = Optimizer::new(
        GeocodingResolver::new(geocoder, GeocodeCache::new(&config.cache)),
        RouteProvider::new(directions, RouteCache::new(&config.cache)),
        catalog,
        config.vehicle.clone(),
    );

    let app = create_router(AppState::new(optimizer));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(
        addr = %config.bind_addr,
        range_miles = config.vehicle.range_miles,
        mpg = config.vehicle.mpg,
        "Fuel route optimizer listening"
    );
    info!("  POST /optimize - Plan fuel stops between two locations");
    info!("  GET  /health   - Health check");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
