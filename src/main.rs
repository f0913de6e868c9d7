use anyhow::{Context, Result};
use ecoroute::api::{TrafficApiClient, WeatherApiClient};
use ecoroute::config::EcoRouteConfig;
use ecoroute::models::GeoPoint;
use ecoroute::planner::RoutePlanner;
use ecoroute::scoring::EmissionsModel;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = EcoRouteConfig::load().with_context(|| "Failed to load configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Example coordinates, intended for replacement by a caller
    let origins = ["40.7128,-74.0060", "34.0522,-118.2437"]
        .into_iter()
        .map(GeoPoint::parse)
        .collect::<Result<Vec<_>>>()
        .with_context(|| "Failed to parse origin coordinates")?;
    let destination =
        GeoPoint::parse("37.7749,-122.4194").with_context(|| "Failed to parse destination")?;

    let traffic = TrafficApiClient::new(config.traffic.clone())?;
    let weather = WeatherApiClient::new(config.weather.clone())?;
    let model = EmissionsModel::from_config(&config.scoring);

    let planner = RoutePlanner::new(traffic, weather, model);

    match planner.find_optimal_route(&origins, &destination) {
        Some(route) => println!(
            "The optimal route is from {} with estimated emissions of {:.2} kg CO2.",
            route.origin, route.emissions_kg
        ),
        None => println!("Could not determine an optimal route."),
    }

    Ok(())
}
