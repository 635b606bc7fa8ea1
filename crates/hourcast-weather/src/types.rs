use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Full multi-day weather document as returned by the upstream provider.
///
/// Kept deliberately loose: the pipeline only assumes the
/// `days[0].hours[*].datetime` structure, and only inside the normalizer.
pub type WeatherPayload = Value;

/// A location name resolved to its current local hour.
///
/// Produced fresh on every request and never cached; the hour is
/// time-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTime {
    pub location: String,
    /// Local hour of day, 0..=23.
    pub hour: u8,
}

/// Where a weather answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    Api,
}

/// The single-hour slice of a payload handed back to callers.
///
/// Soft outcomes are part of the data, not the error channel: a day with no
/// matching hour or an unrecognizable payload serialize as `{"error": ...}`
/// marker documents inside an otherwise successful response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HourlyRecord {
    Observed(Map<String, Value>),
    Marker { error: String },
}

impl HourlyRecord {
    pub fn no_data(hour: u8) -> Self {
        Self::Marker {
            error: format!("No data available for hour {hour}"),
        }
    }

    pub fn malformed() -> Self {
        Self::Marker {
            error: "Invalid weather data format".to_string(),
        }
    }

    /// True for the soft marker outcomes.
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker { .. })
    }
}

/// Outcome of a pipeline fetch: the hour record plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub weather: HourlyRecord,
    pub source: Source,
}
