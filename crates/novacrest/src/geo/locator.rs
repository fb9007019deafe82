//! Nearest-branch lookup over a fixed registry.

use serde::Serialize;
use thiserror::Error;

use super::distance::{haversine_km, round_km, Coordinate};
use super::registry::{Branch, BranchRegistry};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("branch registry is empty")]
    EmptyRegistry,
}

/// Outcome of a nearest-branch query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResult {
    pub branch: Branch,
    /// Distance in kilometers, rounded to two decimals.
    pub distance_km: f64,
}

/// Finds the closest branch to a query point.
#[derive(Debug, Clone)]
pub struct BranchLocator {
    registry: BranchRegistry,
}

impl BranchLocator {
    pub fn new(registry: BranchRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &BranchRegistry {
        &self.registry
    }

    /// Closest branch and its exact (unrounded) distance.
    ///
    /// Seeds with the first branch and only replaces the best on a strictly
    /// smaller distance, so ties resolve to the earliest registry entry.
    pub fn nearest_exact(&self, query: &Coordinate) -> Result<(&Branch, f64), LocateError> {
        let (first, rest) = self
            .registry
            .branches()
            .split_first()
            .ok_or(LocateError::EmptyRegistry)?;

        let seed = (first, haversine_km(query, &first.location));
        Ok(rest.iter().fold(seed, |best, branch| {
            let distance = haversine_km(query, &branch.location);
            if distance < best.1 {
                (branch, distance)
            } else {
                best
            }
        }))
    }

    /// Closest branch with the distance rounded for presentation.
    pub fn nearest(&self, query: &Coordinate) -> Result<DistanceResult, LocateError> {
        let (branch, distance) = self.nearest_exact(query)?;
        tracing::debug!(
            branch_id = branch.id,
            distance_km = distance,
            "resolved nearest branch for ({}, {})",
            query.latitude,
            query.longitude
        );
        Ok(DistanceResult {
            branch: branch.clone(),
            distance_km: round_km(distance),
        })
    }
}
