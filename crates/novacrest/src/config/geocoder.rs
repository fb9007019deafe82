//! Geocoder section of the config file.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

use super::GeocoderSettings;

/// Address geocoding configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, prefer::FromValue)]
pub struct GeocoderConfig {
    /// Base URL of a Nominatim-compatible search API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// User agent sent with lookups (Nominatim requires one).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Retries after a transient failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
    /// Fixed address table; when non-empty no network lookups are made.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    #[prefer(skip)]
    pub static_addresses: HashMap<String, Coordinate>,
}

impl GeocoderConfig {
    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }

    pub(super) fn apply_to(&self, settings: &mut GeocoderSettings) {
        if let Some(ref url) = self.base_url {
            settings.base_url = url.clone();
        }
        if let Some(ref ua) = self.user_agent {
            settings.user_agent = ua.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            settings.timeout_secs = timeout;
        }
        if let Some(retries) = self.max_retries {
            settings.max_retries = retries;
        }
        if !self.static_addresses.is_empty() {
            settings.static_addresses = self.static_addresses.clone();
        }
    }
}
