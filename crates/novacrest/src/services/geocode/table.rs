//! In-memory address table.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{GeocodeError, Geocoder};
use crate::geo::Coordinate;

/// Normalize address text for lookup: lowercase, single spaces.
fn normalize(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Geocoder answering from a fixed, case-insensitive address table.
///
/// Addresses not in the table go to the fallback geocoder when one is set,
/// otherwise they fail with [`GeocodeError::NotFound`].
#[derive(Clone, Default)]
pub struct StaticGeocoder {
    entries: Arc<HashMap<String, Coordinate>>,
    fallback: Option<Arc<dyn Geocoder>>,
}

impl StaticGeocoder {
    pub fn new(entries: HashMap<String, Coordinate>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(address, coord)| (normalize(&address), coord))
            .collect();
        Self {
            entries: Arc::new(entries),
            fallback: None,
        }
    }

    /// Send addresses missing from the table to `fallback`.
    pub fn with_fallback(mut self, fallback: Arc<dyn Geocoder>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an address in the table only.
    pub fn lookup(&self, address: &str) -> Option<Coordinate> {
        self.entries.get(&normalize(address)).copied()
    }
}

impl FromIterator<(String, Coordinate)> for StaticGeocoder {
    fn from_iter<I: IntoIterator<Item = (String, Coordinate)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    fn name(&self) -> &str {
        "static"
    }

    async fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        if let Some(coord) = self.lookup(address) {
            coord.validate()?;
            return Ok(coord);
        }

        match self.fallback {
            Some(ref fallback) => {
                tracing::debug!("'{}' not in static table, asking {}", address, fallback.name());
                fallback.geocode(address).await
            }
            None => Err(GeocodeError::NotFound(address.to_string())),
        }
    }
}
