//! `EcoRoute` - carbon-aware route selection
//!
//! This library estimates CO2 emissions for candidate routes between
//! origins and a destination, combining great-circle distance with
//! traffic and weather conditions fetched from external services, and
//! selects the origin with the lowest estimate.

pub mod api;
pub mod config;
pub mod distance;
pub mod error;
pub mod models;
pub mod planner;
pub mod scoring;

// Re-export core types for public API
pub use api::{TrafficApiClient, TrafficProvider, WeatherApiClient, WeatherProvider};
pub use config::EcoRouteConfig;
pub use distance::distance_km;
pub use error::EcoRouteError;
pub use models::{GeoPoint, RouteCandidate, TrafficConditions, WeatherConditions};
pub use planner::RoutePlanner;
pub use scoring::EmissionsModel;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
