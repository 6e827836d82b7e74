//! Server configuration from environment variables.
//!
//! Values that are missing or fail to parse fall back to their defaults,
//! with a warning for the latter.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::planner::VehicleConfig;

/// Default location of the station catalog file.
pub const DEFAULT_STATIONS_PATH: &str = "data/fuel_stations.json";

/// Default listen address.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 8000);

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub vehicle: VehicleConfig,
    pub cache: CacheConfig,

    /// OpenRouteService API key
    pub ors_api_key: Option<String>,

    /// Optional ArcGIS token
    pub arcgis_token: Option<String>,

    pub stations_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            vehicle: VehicleConfig::default(),
            cache: CacheConfig::default(),
            ors_api_key: None,
            arcgis_token: None,
            stations_path: PathBuf::from(DEFAULT_STATIONS_PATH),
            bind_addr: DEFAULT_BIND_ADDR,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let range = parse_or(&lookup, "VEHICLE_RANGE_MILES", defaults.vehicle.range_miles);
        let mpg = parse_or(&lookup, "VEHICLE_MPG", defaults.vehicle.mpg);
        let vehicle = VehicleConfig::new(range, mpg).unwrap_or_else(|e| {
            warn!(error = %e, "invalid vehicle configuration, using defaults");
            VehicleConfig::default()
        });

        let geocode_ttl = parse_or(
            &lookup,
            "GEOCODING_CACHE_TTL",
            defaults.cache.geocode_ttl.as_secs(),
        );
        let route_ttl = parse_or(&lookup, "ROUTE_CACHE_TTL", defaults.cache.route_ttl.as_secs());
        let cache = CacheConfig::default()
            .with_geocode_ttl(Duration::from_secs(geocode_ttl))
            .with_route_ttl(Duration::from_secs(route_ttl));

        Self {
            vehicle,
            cache,
            ors_api_key: non_empty(lookup("OPENROUTE_API_KEY")),
            arcgis_token: non_empty(lookup("ARCGIS_API_KEY")),
            stations_path: non_empty(lookup("FUEL_STATIONS_PATH"))
                .map(PathBuf::from)
                .unwrap_or(defaults.stations_path),
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    let Some(raw) = non_empty(lookup(key)) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, ?default, "invalid value, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> ServerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let c = config(&[]);

        assert_eq!(c.vehicle, VehicleConfig::default());
        assert_eq!(c.cache.geocode_ttl, Duration::from_secs(86_400));
        assert_eq!(c.cache.route_ttl, Duration::from_secs(3_600));
        assert_eq!(c.stations_path, PathBuf::from("data/fuel_stations.json"));
        assert_eq!(c.bind_addr.to_string(), "127.0.0.1:8000");
        assert!(c.ors_api_key.is_none());
    }

    #[test]
    fn reads_overrides() {
        let c = config(&[
            ("VEHICLE_RANGE_MILES", "350"),
            ("VEHICLE_MPG", "7.5"),
            ("ROUTE_CACHE_TTL", "60"),
            ("OPENROUTE_API_KEY", "secret"),
            ("FUEL_STATIONS_PATH", "/srv/stations.json"),
            ("BIND_ADDR", "0.0.0.0:9000"),
        ]);

        assert_eq!(c.vehicle.range_miles, 350.0);
        assert_eq!(c.vehicle.mpg, 7.5);
        assert_eq!(c.cache.route_ttl, Duration::from_secs(60));
        assert_eq!(c.ors_api_key.as_deref(), Some("secret"));
        assert_eq!(c.stations_path, PathBuf::from("/srv/stations.json"));
        assert_eq!(c.bind_addr.port(), 9000);
    }

    #[test]
    fn invalid_values_fall_back() {
        let c = config(&[
            ("VEHICLE_MPG", "lots"),
            ("GEOCODING_CACHE_TTL", "-1"),
            ("BIND_ADDR", "nowhere"),
            ("OPENROUTE_API_KEY", "  "),
        ]);

        assert_eq!(c.vehicle.mpg, 10.0);
        assert_eq!(c.cache.geocode_ttl, Duration::from_secs(86_400));
        assert_eq!(c.bind_addr, DEFAULT_BIND_ADDR);
        assert!(c.ors_api_key.is_none());
    }

    #[test]
    fn non_positive_vehicle_values_fall_back() {
        let c = config(&[("VEHICLE_RANGE_MILES", "0"), ("VEHICLE_MPG", "12")]);
        assert_eq!(c.vehicle, VehicleConfig::default());

        let c = config(&[("VEHICLE_RANGE_MILES", "0.0001")]);
        assert_eq!(c.vehicle.range_miles, 500.0);
    }
}
