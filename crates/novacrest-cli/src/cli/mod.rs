//! Command-line interface for novacrest.

mod commands;

pub use commands::{is_verbose, run};
