//! The cache-aside read-through pipeline: resolve the local hour, consult
//! the cache, fall through to the upstream provider, store, extract.

use std::time::Duration;

use tracing::instrument;

use crate::cache::CacheStore;
use crate::error::{CacheError, WeatherError};
use crate::normalize;
use crate::provider::WeatherProvider;
use crate::time::TimeResolver;
use crate::types::{Source, WeatherPayload, WeatherReport};

/// Default entry lifetime: one day, matching the validity of a "today"
/// forecast payload.
pub const DEFAULT_TTL: Duration = Duration::from_secs(86_400);

/// Orchestrates one weather lookup per call; stateless apart from the
/// injected collaborators. Concurrent fetches for the same location may
/// each hit the upstream once and both write the cache; writes are
/// idempotent whole-document replacements, so last-write-wins is fine.
pub struct WeatherPipeline {
    resolver: TimeResolver,
    cache: CacheStore,
    provider: WeatherProvider,
    ttl: Duration,
}

impl WeatherPipeline {
    pub fn new(
        resolver: TimeResolver,
        cache: CacheStore,
        provider: WeatherProvider,
        ttl: Duration,
    ) -> Self {
        Self {
            resolver,
            cache,
            provider,
            ttl,
        }
    }

    /// Answer the current-hour weather for `location`.
    ///
    /// Time resolution failures short-circuit before any cache or upstream
    /// traffic. The cache write happens on every successful upstream
    /// response, even when the requested hour turns out to be absent from
    /// the payload.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let resolved = self.resolver.resolve(location).await?;
        tracing::debug!(%location, hour = resolved.hour, "resolved local hour");

        if let Some(raw) = self.cache.get(location).await? {
            match serde_json::from_str::<WeatherPayload>(&raw) {
                Ok(payload) => {
                    tracing::info!(%location, "cache hit");
                    return Ok(WeatherReport {
                        weather: normalize::extract(&payload, resolved.hour),
                        source: Source::Cache,
                    });
                }
                Err(err) => {
                    // An unreadable entry is refetched, not surfaced.
                    tracing::warn!(
                        %location,
                        error = %err,
                        "cached payload did not deserialize, treating as miss"
                    );
                }
            }
        }

        let payload = self.provider.fetch_today(location).await?;
        let raw = serde_json::to_string(&payload)
            .map_err(|err| CacheError::Serialize(err.to_string()))?;
        self.cache.put(location, &raw, self.ttl).await?;
        tracing::info!(
            %location,
            ttl_secs = self.ttl.as_secs(),
            "cache miss, stored fresh payload"
        );

        Ok(WeatherReport {
            weather: normalize::extract(&payload, resolved.hour),
            source: Source::Api,
        })
    }
}
