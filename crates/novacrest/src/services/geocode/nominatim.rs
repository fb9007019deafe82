//! Nominatim (OpenStreetMap) geocoding client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::{GeocodeError, Geocoder};
use crate::config::GeocoderSettings;
use crate::geo::Coordinate;

/// Base delay between attempts; attempt `n` waits `n` times this.
const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// One search hit. Nominatim encodes degrees as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: serde_json::Value,
    lon: serde_json::Value,
    #[serde(default)]
    display_name: Option<String>,
}

fn parse_degrees(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::String(s) => s.trim().parse().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Geocoder backed by a Nominatim `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    search_url: Url,
    max_retries: u32,
    backoff: Duration,
}

impl NominatimGeocoder {
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, GeocodeError> {
        let search_url = Url::parse(&format!("{}/search", base_url.trim_end_matches('/')))
            .map_err(|e| {
                GeocodeError::Config(format!("invalid geocoder URL '{}': {}", base_url, e))
            })?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            search_url,
            max_retries,
            backoff: DEFAULT_BACKOFF,
        })
    }

    pub fn from_settings(settings: &GeocoderSettings) -> Result<Self, GeocodeError> {
        Self::new(
            &settings.base_url,
            &settings.user_agent,
            Duration::from_secs(settings.timeout_secs),
            settings.max_retries,
        )
    }

    /// Override the base retry delay.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn request_url(&self, address: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        url
    }

    /// Single lookup attempt.
    async fn search(&self, url: &Url, address: &str) -> Result<Coordinate, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let places: Vec<Place> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Parse(e.to_string()))?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(address.to_string()))?;

        let (Some(latitude), Some(longitude)) = (parse_degrees(&place.lat), parse_degrees(&place.lon))
        else {
            return Err(GeocodeError::Parse(format!(
                "unreadable coordinates lat={} lon={}",
                place.lat, place.lon
            )));
        };

        let coord = Coordinate::new(latitude, longitude);
        coord.validate()?;

        debug!(
            "Geocoded '{}' to ({}, {}) {}",
            address,
            latitude,
            longitude,
            place.display_name.as_deref().unwrap_or("")
        );
        Ok(coord)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    fn name(&self) -> &str {
        "nominatim"
    }

    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        let url = self.request_url(address);
        let mut attempt = 0u32;

        loop {
            match self.search(&url, address).await {
                Ok(coord) => return Ok(coord),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = self.backoff * attempt;
                    warn!(
                        "Geocoding '{}' failed: {} (retry {}/{} in {:?})",
                        address, e, attempt, self.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
