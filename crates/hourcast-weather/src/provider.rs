//! Upstream weather provider client (timeline-style day forecast API).

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use crate::error::WeatherError;
use crate::types::WeatherPayload;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// HTTP client for the day-forecast endpoint.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetch the full payload for `location`'s current day.
    ///
    /// Any non-success status is an upstream failure; a success body is
    /// returned as an opaque document.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_today(&self, location: &str) -> Result<WeatherPayload, WeatherError> {
        let url = format!("{}{}/today", self.base_url, urlencoding::encode(location));

        let response = self
            .client
            .get(&url)
            .query(&[
                ("unitGroup", "metric"),
                ("key", self.api_key.as_str()),
                ("contentType", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%location, %status, "upstream weather provider returned an error");
            return Err(WeatherError::Upstream(format!("status {status}")));
        }

        Ok(response.json().await?)
    }
}
