//! Haversine great-circle distance on a spherical Earth.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reasons a coordinate is unusable as a query point.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinate is not finite: ({0}, {1})")]
    NotFinite(f64, f64),
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check the WGS84 range invariant.
    ///
    /// The distance math never calls this; it is for callers that accept
    /// coordinates from outside (geocoder responses, CLI flags).
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(CoordinateError::NotFinite(self.latitude, self.longitude));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Non-finite input propagates to a non-finite result.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Round a distance to two decimal places for presentation.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const IKEJA: Coordinate = Coordinate::new(6.6020, 3.3515);
    const LEKKI: Coordinate = Coordinate::new(6.4654, 3.4765);

    #[test]
    fn test_distance_to_self_is_zero() {
        for p in [
            IKEJA,
            LEKKI,
            Coordinate::new(0.0, 0.0),
            Coordinate::new(-89.9, 179.9),
        ] {
            assert_eq!(haversine_km(&p, &p), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [
            (IKEJA, LEKKI),
            (Coordinate::new(51.5074, -0.1278), Coordinate::new(48.8566, 2.3522)),
            (Coordinate::new(-33.86, 151.21), Coordinate::new(40.71, -74.00)),
        ];
        for (p, q) in pairs {
            let forward = haversine_km(&p, &q);
            let backward = haversine_km(&q, &p);
            assert!((forward - backward).abs() < 1e-9, "{forward} != {backward}");
        }
    }

    #[test]
    fn test_distance_never_negative() {
        let points = [
            IKEJA,
            LEKKI,
            Coordinate::new(90.0, 0.0),
            Coordinate::new(-90.0, 0.0),
            Coordinate::new(0.0, 180.0),
            Coordinate::new(0.0, -180.0),
        ];
        for p in &points {
            for q in &points {
                assert!(haversine_km(p, q) >= 0.0);
            }
        }
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = haversine_km(&Coordinate::new(0.0, 0.0), &Coordinate::new(0.0, 1.0));
        assert!((d - 111.1949).abs() < 0.001, "got {d}");
    }

    #[test]
    fn test_london_paris() {
        let london = Coordinate::new(51.5074, -0.1278);
        let paris = Coordinate::new(48.8566, 2.3522);
        let d = haversine_km(&london, &paris);
        assert!((d - 343.556).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_nan_propagates() {
        let d = haversine_km(&Coordinate::new(f64::NAN, 3.0), &IKEJA);
        assert!(d.is_nan());
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(0.0399), 0.04);
        assert_eq!(round_km(20.8299), 20.83);
        assert_eq!(round_km(0.0), 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(IKEJA.validate().is_ok());
        assert_eq!(
            Coordinate::new(91.0, 0.0).validate(),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Coordinate::new(0.0, -181.0).validate(),
            Err(CoordinateError::LongitudeOutOfRange(-181.0))
        );
        assert!(matches!(
            Coordinate::new(f64::INFINITY, 0.0).validate(),
            Err(CoordinateError::NotFinite(_, _))
        ));
    }
}
