//! novacrest - pharmacy storefront backend.
//!
//! Core library exposing domain modules for workspace crates: the
//! nearest-branch locator, address geocoding, catalog persistence and
//! configuration.

pub mod config;
pub mod geo;
pub mod migrations;
pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod services;
