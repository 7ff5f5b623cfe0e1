//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Shared domain models (resolved location, forecast snapshot, display model)
//! - The error taxonomy surfaced to the user
//! - Open-Meteo service clients behind provider traits
//! - The query controller sequencing geocoding and forecast lookup
//!
//! It is used by `meteo-cli`, but can also be reused by other front ends.

pub mod error;
pub mod model;
pub mod provider;
pub mod query;

pub use error::LookupError;
pub use model::{DisplayModel, ForecastSnapshot, HourlyEntry, QueryState, ResolvedLocation};
pub use provider::{ForecastProvider, LocationResolver, default_http_client};
pub use query::QueryController;
