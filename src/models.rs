//! Data models for route evaluation
//!
//! This module contains the data structures shared across the crate:
//! geographic points, the condition records returned by the external
//! services, and the per-route evaluation result.

use crate::EcoRouteError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic point in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a point from a string like `"40.7128,-74.0060"` or `"40.7128 -74.0060"`
    ///
    /// Malformed input is rejected with a validation error rather than
    /// silently producing a bogus point.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(
                EcoRouteError::validation("Coordinates must be in format 'lat,lon'").into(),
            );
        }

        let latitude = parts[0]
            .parse::<f64>()
            .with_context(|| format!("Invalid latitude: {}", parts[0]))?;
        let longitude = parts[1]
            .parse::<f64>()
            .with_context(|| format!("Invalid longitude: {}", parts[1]))?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(EcoRouteError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            ))
            .into());
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(EcoRouteError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            ))
            .into());
        }

        Ok(Self::new(latitude, longitude))
    }

    /// Format the point as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_coordinates())
    }
}

/// Traffic conditions along a route, as reported by the traffic service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct TrafficConditions {
    /// Unitless congestion level (0 = free flow); fields absent from the
    /// wire payload default to 0 so missing data adds no penalty
    #[serde(default)]
    pub congestion_level: f64,
}

impl TrafficConditions {
    /// Create traffic conditions with the given congestion level
    #[must_use]
    pub fn new(congestion_level: f64) -> Self {
        Self { congestion_level }
    }
}

/// Weather conditions at a location, as reported by the weather service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct WeatherConditions {
    /// Unitless rain intensity (0 = dry); absent wire fields default to 0
    #[serde(default)]
    pub rain: f64,
    /// Unitless snow intensity (0 = none); absent wire fields default to 0
    #[serde(default)]
    pub snow: f64,
}

impl WeatherConditions {
    /// Create weather conditions with the given rain and snow intensities
    #[must_use]
    pub fn new(rain: f64, snow: f64) -> Self {
        Self { rain, snow }
    }
}

/// A fully evaluated route candidate
///
/// Built transiently during selection; only the winning candidate survives.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    /// Candidate origin point
    pub origin: GeoPoint,
    /// Great-circle distance to the destination in kilometers
    pub distance_km: f64,
    /// Traffic conditions fetched for this route
    pub traffic: TrafficConditions,
    /// Weather conditions fetched for the destination
    pub weather: WeatherConditions,
    /// Estimated emissions in kg CO2
    pub emissions_kg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("40.7128,-74.0060", 40.7128, -74.0060)]
    #[case("40.7128 -74.0060", 40.7128, -74.0060)]
    #[case("-33.8688, 151.2093", -33.8688, 151.2093)]
    #[case("0,0", 0.0, 0.0)]
    fn test_parse_valid_coordinates(#[case] input: &str, #[case] lat: f64, #[case] lon: f64) {
        let point = GeoPoint::parse(input).unwrap();
        assert_eq!(point.latitude, lat);
        assert_eq!(point.longitude, lon);
    }

    #[rstest]
    #[case("")]
    #[case("40.7128")]
    #[case("40.7128,-74.0060,12.0")]
    #[case("north,west")]
    #[case("91.0,0.0")]
    #[case("-91.0,0.0")]
    #[case("0.0,181.0")]
    #[case("0.0,-181.0")]
    fn test_parse_rejects_malformed_coordinates(#[case] input: &str) {
        assert!(GeoPoint::parse(input).is_err());
    }

    #[test]
    fn test_format_coordinates() {
        let point = GeoPoint::new(40.7128, -74.006);
        assert_eq!(point.format_coordinates(), "40.7128, -74.0060");
        assert_eq!(point.to_string(), "40.7128, -74.0060");
    }

    #[test]
    fn test_conditions_default_to_zero() {
        assert_eq!(TrafficConditions::default().congestion_level, 0.0);
        let weather = WeatherConditions::default();
        assert_eq!(weather.rain, 0.0);
        assert_eq!(weather.snow, 0.0);
    }

    #[test]
    fn test_missing_wire_fields_default_to_zero() {
        let traffic: TrafficConditions = serde_json::from_str("{}").unwrap();
        assert_eq!(traffic.congestion_level, 0.0);

        let weather: WeatherConditions = serde_json::from_str(r#"{"rain": 1.5}"#).unwrap();
        assert_eq!(weather.rain, 1.5);
        assert_eq!(weather.snow, 0.0);
    }
}
