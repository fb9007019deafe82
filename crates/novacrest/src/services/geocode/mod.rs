//! Address geocoding.
//!
//! A [`Geocoder`] turns free-form address text into a [`Coordinate`]. The
//! network-backed [`NominatimGeocoder`] is the default; [`StaticGeocoder`]
//! answers from an in-memory table and can sit in front of another geocoder
//! as an override layer.

mod nominatim;
mod table;

pub use nominatim::NominatimGeocoder;
pub use table::StaticGeocoder;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::GeocoderSettings;
use crate::geo::{Coordinate, CoordinateError};

/// `base_url` value that disables network geocoding.
pub const OFFLINE: &str = "offline";

/// Errors from resolving an address.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoder returned status {0}")]
    Status(u16),

    #[error("Rate limited by geocoder")]
    RateLimited,

    #[error("No location found for address: {0}")]
    NotFound(String),

    #[error("Failed to parse geocoder response: {0}")]
    Parse(String),

    #[error("Geocoder returned an invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeocodeError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_builder() && !e.is_decode(),
            Self::RateLimited => true,
            Self::Status(code) => *code >= 500,
            _ => false,
        }
    }
}

/// Resolves address text to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Resolve an address. The returned coordinate is finite and in range.
    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

/// Build the geocoder described by the settings.
pub fn geocoder_from_settings(
    settings: &GeocoderSettings,
) -> Result<Arc<dyn Geocoder>, GeocodeError> {
    let offline = settings.base_url.eq_ignore_ascii_case(OFFLINE);

    if offline {
        tracing::debug!(
            "Network geocoding disabled, {} static addresses",
            settings.static_addresses.len()
        );
        return Ok(Arc::new(StaticGeocoder::new(
            settings.static_addresses.clone(),
        )));
    }

    let nominatim = NominatimGeocoder::from_settings(settings)?;
    if settings.static_addresses.is_empty() {
        return Ok(Arc::new(nominatim));
    }

    Ok(Arc::new(
        StaticGeocoder::new(settings.static_addresses.clone()).with_fallback(Arc::new(nominatim)),
    ))
}
