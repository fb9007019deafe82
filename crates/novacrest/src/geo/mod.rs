//! Great-circle geometry and nearest-branch selection.
//!
//! Everything here is pure and synchronous. The branch registry is
//! immutable once built and is shared across requests behind an `Arc`.

mod distance;
mod locator;
mod registry;

pub use distance::{haversine_km, round_km, Coordinate, CoordinateError, EARTH_RADIUS_KM};
pub use locator::{BranchLocator, DistanceResult, LocateError};
pub use registry::{Branch, BranchRegistry};
