//! Route selection
//!
//! A single sequential pass over the candidate origins: estimate the
//! distance, fetch conditions, score, and keep the lowest-emissions
//! candidate. A candidate whose data cannot be fetched is skipped; it
//! never aborts the run.

use crate::api::{TrafficProvider, WeatherProvider};
use crate::distance::distance_km;
use crate::models::{GeoPoint, RouteCandidate};
use crate::scoring::EmissionsModel;
use tracing::{info, warn};

/// Evaluates candidate origins against a destination and picks the one
/// with the lowest estimated emissions
pub struct RoutePlanner<T, W> {
    traffic: T,
    weather: W,
    model: EmissionsModel,
}

impl<T: TrafficProvider, W: WeatherProvider> RoutePlanner<T, W> {
    /// Create a planner from condition providers and an emissions model
    pub fn new(traffic: T, weather: W, model: EmissionsModel) -> Self {
        Self {
            traffic,
            weather,
            model,
        }
    }

    /// Find the origin with the lowest estimated emissions to `destination`
    ///
    /// Candidates are evaluated in order; ties keep the earliest-seen
    /// candidate. Returns `None` when no candidate could be evaluated.
    pub fn find_optimal_route(
        &self,
        origins: &[GeoPoint],
        destination: &GeoPoint,
    ) -> Option<RouteCandidate> {
        let mut best: Option<RouteCandidate> = None;

        for origin in origins {
            info!("Analyzing route from {origin} to {destination}");

            match self.evaluate_candidate(origin, destination) {
                Ok(candidate) => {
                    info!(
                        "Route from {origin}: {:.1} km, estimated {:.2} kg CO2",
                        candidate.distance_km, candidate.emissions_kg
                    );

                    // Strict improvement only, so ties keep the earliest candidate
                    let improved = best
                        .as_ref()
                        .map_or(true, |b| candidate.emissions_kg < b.emissions_kg);
                    if improved {
                        best = Some(candidate);
                    }
                }
                Err(e) => {
                    warn!("Skipping route from {origin} due to data fetch error: {e}");
                }
            }
        }

        best
    }

    /// Evaluate one origin: distance, conditions, emissions
    fn evaluate_candidate(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> anyhow::Result<RouteCandidate> {
        let distance_km = distance_km(origin, destination);

        let traffic = self.traffic.fetch_traffic(origin, destination)?;
        let weather = self.weather.fetch_weather(destination)?;

        let emissions_kg = self.model.estimate(distance_km, &traffic, &weather);

        Ok(RouteCandidate {
            origin: *origin,
            distance_km,
            traffic,
            weather,
            emissions_kg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TrafficConditions, WeatherConditions};
    use crate::EcoRouteError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Traffic stub keyed by origin coordinates; unknown origins fail
    struct StubTraffic {
        by_origin: HashMap<String, f64>,
    }

    impl StubTraffic {
        fn new(entries: &[(GeoPoint, f64)]) -> Self {
            Self {
                by_origin: entries
                    .iter()
                    .map(|(p, c)| (p.format_coordinates(), *c))
                    .collect(),
            }
        }

        fn failing() -> Self {
            Self {
                by_origin: HashMap::new(),
            }
        }
    }

    impl TrafficProvider for StubTraffic {
        fn fetch_traffic(
            &self,
            origin: &GeoPoint,
            _destination: &GeoPoint,
        ) -> anyhow::Result<TrafficConditions> {
            self.by_origin
                .get(&origin.format_coordinates())
                .map(|&congestion_level| TrafficConditions::new(congestion_level))
                .ok_or_else(|| EcoRouteError::fetch("traffic", "no data for origin").into())
        }
    }

    /// Weather stub returning fixed conditions, counting calls
    struct StubWeather {
        conditions: WeatherConditions,
        calls: RefCell<usize>,
    }

    impl StubWeather {
        fn clear() -> Self {
            Self {
                conditions: WeatherConditions::default(),
                calls: RefCell::new(0),
            }
        }
    }

    impl WeatherProvider for StubWeather {
        fn fetch_weather(&self, _location: &GeoPoint) -> anyhow::Result<WeatherConditions> {
            *self.calls.borrow_mut() += 1;
            Ok(self.conditions)
        }
    }

    fn planner_with(
        traffic: StubTraffic,
        weather: StubWeather,
    ) -> RoutePlanner<StubTraffic, StubWeather> {
        RoutePlanner::new(traffic, weather, EmissionsModel::new(0.21))
    }

    #[test]
    fn test_nearer_origin_wins_with_zero_conditions() {
        let near = GeoPoint::new(0.0, 1.0);
        let far = GeoPoint::new(0.0, 0.0);
        let destination = GeoPoint::new(0.0, 2.0);

        let planner = planner_with(
            StubTraffic::new(&[(far, 0.0), (near, 0.0)]),
            StubWeather::clear(),
        );

        let winner = planner
            .find_optimal_route(&[far, near], &destination)
            .expect("expected a winning candidate");
        assert_eq!(winner.origin, near);
    }

    #[test]
    fn test_all_fetches_fail_returns_none() {
        let origins = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)];
        let destination = GeoPoint::new(0.0, 2.0);

        let planner = planner_with(StubTraffic::failing(), StubWeather::clear());
        assert!(planner.find_optimal_route(&origins, &destination).is_none());
    }

    #[test]
    fn test_single_surviving_candidate_wins() {
        // The surviving candidate is the worse route by distance, but the
        // only one with data.
        let near = GeoPoint::new(0.0, 1.0);
        let far = GeoPoint::new(0.0, 0.0);
        let destination = GeoPoint::new(0.0, 2.0);

        let planner = planner_with(StubTraffic::new(&[(far, 9.0)]), StubWeather::clear());

        let winner = planner
            .find_optimal_route(&[near, far], &destination)
            .expect("expected a winning candidate");
        assert_eq!(winner.origin, far);
    }

    #[test]
    fn test_tie_keeps_first_seen_candidate() {
        // Same latitude offset on either side of the destination gives
        // identical distances, hence identical emissions.
        let first = GeoPoint::new(1.0, 2.0);
        let second = GeoPoint::new(-1.0, 2.0);
        let destination = GeoPoint::new(0.0, 2.0);

        let planner = planner_with(
            StubTraffic::new(&[(first, 0.0), (second, 0.0)]),
            StubWeather::clear(),
        );

        let winner = planner
            .find_optimal_route(&[first, second], &destination)
            .expect("expected a winning candidate");
        assert_eq!(winner.origin, first);
    }

    #[test]
    fn test_congestion_outweighs_shorter_distance() {
        let near = GeoPoint::new(0.0, 1.0);
        let far = GeoPoint::new(0.0, 0.0);
        let destination = GeoPoint::new(0.0, 2.0);

        // Near origin is half the distance but heavily congested:
        // 1 * (1 + 25 * 0.1) = 3.5 > 2, so the far origin wins.
        let planner = planner_with(
            StubTraffic::new(&[(near, 25.0), (far, 0.0)]),
            StubWeather::clear(),
        );

        let winner = planner
            .find_optimal_route(&[near, far], &destination)
            .expect("expected a winning candidate");
        assert_eq!(winner.origin, far);
    }

    #[test]
    fn test_weather_is_fetched_per_candidate() {
        let origins = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)];
        let destination = GeoPoint::new(0.0, 2.0);

        let weather = StubWeather::clear();
        let planner = planner_with(
            StubTraffic::new(&[(origins[0], 0.0), (origins[1], 0.0)]),
            weather,
        );

        planner.find_optimal_route(&origins, &destination);
        assert_eq!(*planner.weather.calls.borrow(), 2);
    }

    #[test]
    fn test_empty_origin_list_returns_none() {
        let planner = planner_with(StubTraffic::failing(), StubWeather::clear());
        assert!(planner
            .find_optimal_route(&[], &GeoPoint::new(0.0, 0.0))
            .is_none());
    }
}
