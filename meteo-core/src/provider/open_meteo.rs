//! Open-Meteo service clients: forward geocoding and the forecast endpoint.
//! Both are free, API-key-less services.

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LookupError,
    model::{ForecastSnapshot, HourlyEntry, NEXT_HOURS_LIMIT, ResolvedLocation},
};

use super::{ForecastProvider, LocationResolver};
use async_trait::async_trait;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Client for the Open-Meteo geocoding search endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    base_url: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: GEOCODING_URL.to_string(),
        }
    }

    /// Points the client at a different endpoint (used by tests).
    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LocationResolver for OpenMeteoGeocoder {
    async fn resolve(
        &self,
        name: &str,
        language: &str,
    ) -> Result<ResolvedLocation, LookupError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("name", name),
                ("count", "1"),
                ("language", language),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("geocoding request failed: {e}");
                LookupError::GeocodeTransport
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            tracing::debug!("failed to read geocoding response body: {e}");
            LookupError::GeocodeTransport
        })?;

        if !status.is_success() {
            tracing::debug!(
                "geocoding request returned {status}: {}",
                truncate_body(&body)
            );
            return Err(LookupError::GeocodeTransport);
        }

        let parsed: GeoResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("failed to parse geocoding JSON: {e}");
            LookupError::Unexpected
        })?;

        // A missing or empty candidate list is a valid "not found" response,
        // distinct from transport failure.
        let candidate = parsed
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or(LookupError::CityNotFound)?;

        let resolved = ResolvedLocation::from_candidate(
            &candidate.name,
            candidate.admin1.as_deref(),
            candidate.country.as_deref(),
            candidate.latitude,
            candidate.longitude,
        );
        tracing::info!("resolved {name:?} to {}", resolved.display_name);
        Ok(resolved)
    }
}

/// Client for the Open-Meteo forecast endpoint.
#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    http: Client,
    base_url: String,
}

impl OpenMeteoForecast {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: FORECAST_URL.to_string(),
        }
    }

    /// Points the client at a different endpoint (used by tests).
    pub fn with_base_url(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ForecastProvider for OpenMeteoForecast {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastSnapshot, LookupError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", "temperature_2m,apparent_temperature".to_string()),
                ("hourly", "temperature_2m".to_string()),
                // Timestamps come back already localized; no timezone math here.
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("forecast request failed: {e}");
                LookupError::ForecastTransport
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            tracing::debug!("failed to read forecast response body: {e}");
            LookupError::ForecastTransport
        })?;

        if !status.is_success() {
            tracing::debug!(
                "forecast request returned {status}: {}",
                truncate_body(&body)
            );
            return Err(LookupError::ForecastTransport);
        }

        let parsed: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("failed to parse forecast JSON: {e}");
            LookupError::Unexpected
        })?;

        // Pair the parallel arrays index-for-index; a length mismatch
        // truncates to the shorter side rather than assuming shape.
        let hourly = parsed
            .hourly
            .time
            .iter()
            .zip(parsed.hourly.temperature_2m.iter())
            .take(NEXT_HOURS_LIMIT)
            .map(|(time, &temp)| {
                Ok(HourlyEntry {
                    time: parse_local_time(time)?,
                    temp,
                })
            })
            .collect::<Result<Vec<_>, LookupError>>()?;

        Ok(ForecastSnapshot {
            current_time: parse_local_time(&parsed.current.time)?,
            current_temp: parsed.current.temperature_2m,
            apparent_temp: parsed.current.apparent_temperature,
            hourly,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoCandidate>>,
}

#[derive(Debug, Deserialize)]
struct GeoCandidate {
    name: String,
    admin1: Option<String>,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: String,
    temperature_2m: f64,
    apparent_temperature: f64,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
}

/// Open-Meteo local timestamps come at minute resolution; seconds are
/// tolerated when present.
fn parse_local_time(raw: &str) -> Result<NaiveDateTime, LookupError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|e| {
            tracing::debug!("unparseable service timestamp {raw:?}: {e}");
            LookupError::Unexpected
        })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
