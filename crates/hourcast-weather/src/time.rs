//! Location-to-local-hour resolution with a fallback provider chain.
//!
//! Each provider attempt is an explicit `Result`; the chain tries them in
//! order and stops at the first success. The resolved hour is never cached.

use std::time::Duration;

use chrono::{Timelike, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;

use crate::error::TimeError;
use crate::geocode::{GeoClient, TzClient};
use crate::types::ResolvedTime;

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "hourcast/0.1.0";

#[derive(Debug, Deserialize)]
struct WorldTimeResponse {
    datetime: Option<String>,
}

/// Resolves a location name to its current local hour.
#[derive(Debug, Clone)]
pub struct TimeResolver {
    geocoder: GeoClient,
    timezones: TzClient,
    client: Client,
    worldtime_url: String,
}

impl TimeResolver {
    pub fn new(
        geocode_url: &str,
        timezone_url: &str,
        worldtime_url: &str,
    ) -> Result<Self, TimeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            geocoder: GeoClient::new(geocode_url)?,
            timezones: TzClient::new(timezone_url)?,
            client,
            worldtime_url: worldtime_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve `location`; `Unavailable` when both providers fail.
    pub async fn resolve(&self, location: &str) -> Result<ResolvedTime, TimeError> {
        match self.via_coordinates(location).await {
            Ok(resolved) => Ok(resolved),
            Err(err) => {
                tracing::debug!(
                    %location,
                    error = %err,
                    "primary time path failed, trying world time service"
                );
                self.via_zone_name(location).await.map_err(|fallback_err| {
                    tracing::debug!(%location, error = %fallback_err, "world time fallback failed");
                    TimeError::Unavailable(location.to_string())
                })
            }
        }
    }

    /// Primary path: geocode, map coordinates to a zone, read the wall
    /// clock there.
    async fn via_coordinates(&self, location: &str) -> Result<ResolvedTime, TimeError> {
        let coords = self.geocoder.geocode(location).await?;
        let zone_name = self.timezones.timezone_at(location, coords).await?;
        let zone: Tz = zone_name
            .parse()
            .map_err(|_| TimeError::TimezoneUnresolved(location.to_string()))?;

        let hour = Utc::now().with_timezone(&zone).hour() as u8;
        Ok(ResolvedTime {
            location: location.to_string(),
            hour,
        })
    }

    /// Fallback path: query the world time service with the raw location
    /// string as a zone identifier. This only succeeds when the location
    /// already is one (e.g. "America/New_York") — preserved behavior, see
    /// DESIGN.md.
    async fn via_zone_name(&self, location: &str) -> Result<ResolvedTime, TimeError> {
        let url = format!("{}/api/timezone/{}", self.worldtime_url, location);

        let body: WorldTimeResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let datetime = body
            .datetime
            .ok_or_else(|| TimeError::Unavailable(location.to_string()))?;
        let hour = parse_hour_at_fixed_offset(&datetime)
            .ok_or_else(|| TimeError::Unavailable(location.to_string()))?;

        Ok(ResolvedTime {
            location: location.to_string(),
            hour,
        })
    }
}

/// The hour digits live at byte offsets 11..13 of the ISO-8601-like
/// `datetime` field ("2026-08-06T14:02:33.123+02:00" -> 14).
fn parse_hour_at_fixed_offset(datetime: &str) -> Option<u8> {
    let digits = datetime.get(11..13)?;
    let hour: u8 = digits.parse().ok()?;
    (hour <= 23).then_some(hour)
}
