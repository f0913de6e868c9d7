//! Emissions estimation for a route
//!
//! A simple multiplicative model: a per-km baseline scaled up by traffic
//! congestion and precipitation. The baseline comes from configuration;
//! the condition weights are fixed model constants.

use crate::config::ScoringConfig;
use crate::models::{TrafficConditions, WeatherConditions};

/// Emissions increase per unit of congestion level
pub const CONGESTION_WEIGHT: f64 = 0.1;
/// Emissions increase per unit of rain intensity
pub const RAIN_WEIGHT: f64 = 0.05;
/// Emissions increase per unit of snow intensity
pub const SNOW_WEIGHT: f64 = 0.1;

/// Emissions model with a configurable per-km baseline
#[derive(Debug, Clone)]
pub struct EmissionsModel {
    /// Baseline emissions in kg CO2 per km
    base_factor: f64,
}

impl EmissionsModel {
    /// Create a model with an explicit baseline in kg CO2 per km
    #[must_use]
    pub fn new(base_factor: f64) -> Self {
        Self { base_factor }
    }

    /// Create a model from the scoring configuration section
    #[must_use]
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.base_emission_factor)
    }

    /// Baseline emissions in kg CO2 per km
    #[must_use]
    pub fn base_factor(&self) -> f64 {
        self.base_factor
    }

    /// Estimate emissions in kg CO2 for a route
    ///
    /// `emissions = distance * base_factor * traffic_factor * weather_factor`
    /// where `traffic_factor = 1 + congestion_level * 0.1` and
    /// `weather_factor = 1 + rain * 0.05 + snow * 0.1`. Non-negative for
    /// non-negative inputs.
    #[must_use]
    pub fn estimate(
        &self,
        distance_km: f64,
        traffic: &TrafficConditions,
        weather: &WeatherConditions,
    ) -> f64 {
        let traffic_factor = 1.0 + traffic.congestion_level * CONGESTION_WEIGHT;
        let weather_factor = 1.0 + weather.rain * RAIN_WEIGHT + weather.snow * SNOW_WEIGHT;

        distance_km * self.base_factor * traffic_factor * weather_factor
    }
}
