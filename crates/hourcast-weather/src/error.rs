//! Error taxonomy for time resolution, caching and the weather pipeline.
//!
//! Hard failures live here; the soft outcomes (missing hour, unrecognizable
//! payload) are marker records on [`crate::types::HourlyRecord`] instead.

use thiserror::Error;

/// Failures while resolving a location to its current local hour.
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Could not determine timezone for '{0}'")]
    TimezoneUnresolved(String),

    #[error("Could not retrieve time for '{0}'")]
    Unavailable(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl TimeError {
    /// User-friendly error message for the response body.
    pub fn user_message(&self) -> String {
        match self {
            Self::LocationNotFound(location)
            | Self::TimezoneUnresolved(location)
            | Self::Unavailable(location) => {
                format!("Could not fetch city time for {location}")
            }
            Self::Network(_) => "Could not fetch city time".to_string(),
        }
    }
}

/// Failures talking to the cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    Connection(String),

    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cache serialization error: {0}")]
    Serialize(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

/// Top-level pipeline error, converted to a structured `{error}` response
/// at the serving boundary; never allowed to propagate as a fault.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Time resolution failed: {0}")]
    Time(#[from] TimeError),

    #[error("Upstream weather failure: {0}")]
    Upstream(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WeatherError {
    /// User-friendly error message for the response body.
    pub fn user_message(&self) -> String {
        match self {
            Self::Time(e) => e.user_message(),
            Self::Upstream(_) => "Failed to fetch weather data".to_string(),
            Self::Cache(_) => "Weather cache is unavailable. Please try again.".to_string(),
            Self::Network(_) => "An error occurred. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_upstream_failure_message_is_fixed() {
        let err = WeatherError::Upstream("status 500".to_string());
        assert_eq!(err.user_message(), "Failed to fetch weather data");
    }

    #[test]
    fn test_time_errors_name_the_location() {
        let err = WeatherError::Time(TimeError::Unavailable("Atlantis".to_string()));
        assert!(err.user_message().contains("Atlantis"));
    }

    #[test]
    fn test_time_error_conversion() {
        let err: WeatherError = TimeError::LocationNotFound("x".to_string()).into();
        assert!(matches!(err, WeatherError::Time(TimeError::LocationNotFound(_))));
    }
}
