use crate::{
    error::LookupError,
    model::{ForecastSnapshot, ResolvedLocation},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub mod open_meteo;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("meteo/", env!("CARGO_PKG_VERSION"));

/// Resolves a free-text place name to coordinates and a display name.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Returns the single best match for `name`. `language` is a hint for
    /// localized place names, passed through to the service.
    async fn resolve(&self, name: &str, language: &str)
    -> Result<ResolvedLocation, LookupError>;
}

/// Fetches current conditions plus the short-term hourly series.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn fetch(&self, latitude: f64, longitude: f64)
    -> Result<ForecastSnapshot, LookupError>;
}

/// Shared HTTP client for the service clients. Requests are bounded so an
/// unresponsive service fails the attempt instead of hanging it.
pub fn default_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
}
