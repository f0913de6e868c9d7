//! HTTP clients for the external traffic and weather services
//!
//! The route planner consumes the two provider traits defined here; the
//! concrete clients talk to placeholder third-party HTTP APIs configured
//! via [`ServiceConfig`]. Failed requests are retried with exponential
//! backoff before the candidate is given up on.

use crate::config::ServiceConfig;
use crate::models::{GeoPoint, TrafficConditions, WeatherConditions};
use crate::EcoRouteError;
use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Source of traffic conditions for a route
pub trait TrafficProvider {
    /// Fetch traffic conditions for the route from `origin` to `destination`
    fn fetch_traffic(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<TrafficConditions>;
}

/// Source of weather conditions at a location
pub trait WeatherProvider {
    /// Fetch weather conditions at `location`
    fn fetch_weather(&self, location: &GeoPoint) -> Result<WeatherConditions>;
}

/// HTTP client for the traffic data service
pub struct TrafficApiClient {
    client: Client,
    config: ServiceConfig,
}

impl TrafficApiClient {
    /// Create a new traffic API client
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }
}

impl TrafficProvider for TrafficApiClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    fn fetch_traffic(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<TrafficConditions> {
        let mut url = format!(
            "{}?origin={},{}&destination={},{}",
            self.config.endpoint,
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude
        );
        if let Some(key) = &self.config.api_key {
            url.push_str(&format!("&key={key}"));
        }

        let response = request_with_retry("traffic", &self.client, &url, self.config.max_retries)?;

        let conditions: TrafficConditions = response
            .json()
            .with_context(|| "Failed to parse traffic service response")
            .map_err(|e| {
                error!("Failed to parse traffic response: {e}");
                EcoRouteError::fetch("traffic", "Invalid data received from traffic service")
            })?;

        debug!(
            "Traffic conditions for {origin} -> {destination}: congestion level {}",
            conditions.congestion_level
        );

        Ok(conditions)
    }
}

/// HTTP client for the weather data service
pub struct WeatherApiClient {
    client: Client,
    config: ServiceConfig,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }
}

impl WeatherProvider for WeatherApiClient {
    #[instrument(skip(self), fields(location = %location))]
    fn fetch_weather(&self, location: &GeoPoint) -> Result<WeatherConditions> {
        let mut url = format!(
            "{}?location={},{}",
            self.config.endpoint, location.latitude, location.longitude
        );
        if let Some(key) = &self.config.api_key {
            url.push_str(&format!("&key={key}"));
        }

        let response = request_with_retry("weather", &self.client, &url, self.config.max_retries)?;

        let conditions: WeatherConditions = response
            .json()
            .with_context(|| "Failed to parse weather service response")
            .map_err(|e| {
                error!("Failed to parse weather response: {e}");
                EcoRouteError::fetch("weather", "Invalid data received from weather service")
            })?;

        debug!(
            "Weather conditions at {location}: rain {} snow {}",
            conditions.rain, conditions.snow
        );

        Ok(conditions)
    }
}

/// Build a blocking HTTP client with the configured timeout
fn build_http_client(config: &ServiceConfig) -> Result<Client> {
    let timeout = Duration::from_secs(config.timeout_seconds.into());

    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("EcoRoute/", env!("CARGO_PKG_VERSION")))
        .build()
        .with_context(|| "Failed to create HTTP client")
}

/// Make a GET request, retrying network errors and retryable HTTP statuses
/// with exponential backoff
fn request_with_retry(
    service: &str,
    client: &Client,
    url: &str,
    max_retries: u32,
) -> Result<Response> {
    let max_attempts = max_retries + 1;
    let request_start = Instant::now();

    for attempt in 0..max_attempts {
        debug!(
            "Making {service} request (attempt {}/{max_attempts})",
            attempt + 1
        );

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();

                if status.is_success() {
                    info!(
                        "Successful {service} request in {:.3}s (attempt {})",
                        request_start.elapsed().as_secs_f64(),
                        attempt + 1
                    );
                    return Ok(response);
                }

                if status.as_u16() == 401 {
                    error!("{service} authentication failed (HTTP 401)");
                    return Err(EcoRouteError::fetch(
                        service,
                        "Authentication failed. Please check your API key.",
                    )
                    .into());
                }

                if status.as_u16() == 404 {
                    warn!("{service} resource not found (HTTP 404)");
                    return Err(EcoRouteError::fetch(
                        service,
                        "Requested location not covered by the service.",
                    )
                    .into());
                }

                if status.as_u16() == 429 {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|h| h.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);

                    warn!("{service} rate limit exceeded (HTTP 429), retry after {retry_after}s");

                    if attempt < max_attempts - 1 {
                        thread::sleep(Duration::from_secs(retry_after));
                        continue;
                    }
                    return Err(EcoRouteError::fetch(
                        service,
                        "Rate limit exceeded and retry attempts exhausted.",
                    )
                    .into());
                }

                let error_msg = format!(
                    "Request failed with status: {} - {}",
                    status,
                    status.canonical_reason().unwrap_or("Unknown error")
                );
                warn!("{service} HTTP error on attempt {}: {error_msg}", attempt + 1);

                // Server errors are retried, other client errors are not
                if status.is_server_error() && attempt < max_attempts - 1 {
                    let backoff = Duration::from_millis(1000 * (2_u64.pow(attempt)));
                    debug!("Backing off {:.1}s before retry", backoff.as_secs_f64());
                    thread::sleep(backoff);
                    continue;
                }
                return Err(EcoRouteError::fetch(service, error_msg).into());
            }
            Err(e) => {
                warn!("{service} network error on attempt {}: {e}", attempt + 1);

                if attempt < max_attempts - 1 {
                    let backoff = Duration::from_millis(1000 * (2_u64.pow(attempt)));
                    debug!("Backing off {:.1}s before retry", backoff.as_secs_f64());
                    thread::sleep(backoff);
                    continue;
                }
                return Err(EcoRouteError::fetch(
                    service,
                    format!("Network error after {max_attempts} attempts: {e}"),
                )
                .into());
            }
        }
    }

    Err(EcoRouteError::fetch(service, "Request failed after all retry attempts").into())
}
