//! Caller-facing response bodies.

use hourcast_weather::{HourlyRecord, Source};
use serde::Serialize;

/// Successful weather lookup.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherResponse {
    pub location: String,
    pub weather: HourlyRecord,
    pub source: Source,
}

/// Any pipeline failure, rendered as data rather than a transport fault.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness body for the root route.
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub message: String,
}
