//! Forward geocoding and timezone-by-coordinate lookups.
//!
//! Both speak small free JSON APIs (Nominatim-style search, a
//! timezone-by-coordinate service); neither needs an API key.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::TimeError;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "hourcast/0.1.0";

/// Latitude/longitude pair produced by the geocoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

// Nominatim reports coordinates as strings.
#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

/// Resolves a free-text place name to coordinates.
#[derive(Debug, Clone)]
pub struct GeoClient {
    client: Client,
    base_url: String,
}

impl GeoClient {
    pub fn new(base_url: &str) -> Result<Self, TimeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a place name; an empty result set is `LocationNotFound`.
    pub async fn geocode(&self, location: &str) -> Result<Coordinates, TimeError> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(location)
        );

        let hits: Vec<GeocodeHit> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| TimeError::LocationNotFound(location.to_string()))?;

        let (latitude, longitude) = match (hit.lat.parse::<f64>(), hit.lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => (lat, lon),
            _ => return Err(TimeError::LocationNotFound(location.to_string())),
        };

        tracing::debug!(%location, latitude, longitude, "geocoded location");
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TimezoneByCoordinate {
    #[serde(rename = "timeZone")]
    time_zone: Option<String>,
}

/// Maps coordinates to an IANA timezone identifier.
#[derive(Debug, Clone)]
pub struct TzClient {
    client: Client,
    base_url: String,
}

impl TzClient {
    pub fn new(base_url: &str) -> Result<Self, TimeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up the zone covering `coords`; no covering zone is
    /// `TimezoneUnresolved`.
    pub async fn timezone_at(
        &self,
        location: &str,
        coords: Coordinates,
    ) -> Result<String, TimeError> {
        let url = format!(
            "{}/api/TimeZone/coordinate?latitude={}&longitude={}",
            self.base_url, coords.latitude, coords.longitude
        );

        let body: TimezoneByCoordinate = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match body.time_zone {
            Some(zone) if !zone.is_empty() => {
                tracing::debug!(%location, %zone, "resolved timezone from coordinates");
                Ok(zone)
            }
            _ => Err(TimeError::TimezoneUnresolved(location.to_string())),
        }
    }
}
