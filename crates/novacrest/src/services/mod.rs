//! Services backed by external systems.

pub mod geocode;
