//! Great-circle distance between geographic points
//!
//! Uses the haversine formula with an Earth radius of 6371 km. This is a
//! straight-line estimate, not road distance; a known limitation of the
//! emissions model.

use crate::models::GeoPoint;
use haversine::{distance, Location as HaversineLocation, Units};

/// Great-circle distance between two points in kilometers
#[must_use]
pub fn distance_km(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let from_haversine = HaversineLocation {
        latitude: from.latitude,
        longitude: from.longitude,
    };
    let to_haversine = HaversineLocation {
        latitude: to.latitude,
        longitude: to.longitude,
    };
    distance(from_haversine, to_haversine, Units::Kilometers)
}
