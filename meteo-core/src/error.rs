use thiserror::Error;

/// Failure classes for one lookup attempt, one per user-facing message.
///
/// The `Display` text is surfaced to the user verbatim; underlying causes
/// (HTTP errors, response bodies, decode failures) are logged at the point
/// of failure instead of being carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The geocoding call failed at the transport/HTTP level.
    #[error("location lookup failed")]
    GeocodeTransport,

    /// The geocoding call succeeded but returned no candidates.
    #[error("city not found, try another name")]
    CityNotFound,

    /// The forecast call failed at the transport/HTTP level.
    #[error("forecast lookup failed")]
    ForecastTransport,

    /// Fallback for anything outside the classes above, so the error slot
    /// always holds a renderable message.
    #[error("an error occurred")]
    Unexpected,
}
