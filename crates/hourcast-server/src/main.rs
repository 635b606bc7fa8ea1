use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use hourcast_core::Config;
use hourcast_weather::{CacheStore, TimeResolver, WeatherPipeline, WeatherProvider};

#[tokio::main]
async fn main() -> Result<()> {
    hourcast_core::init()?;

    let (config, _validation) =
        Config::load_validated().context("configuration is invalid")?;

    // No cache backend, no service: refuse to start rather than serve
    // uncached traffic.
    let cache = CacheStore::connect(&config.cache.url)
        .await
        .context("cache backend is unreachable")?;

    let resolver = TimeResolver::new(
        &config.time.geocode_url,
        &config.time.timezone_url,
        &config.time.worldtime_url,
    )?;
    let provider = WeatherProvider::new(&config.weather.base_url, &config.weather.api_key)?;
    let pipeline = Arc::new(WeatherPipeline::new(
        resolver,
        cache,
        provider,
        Duration::from_secs(config.cache.ttl_secs),
    ));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;

    tracing::info!(%addr, "hourcast server listening");
    warp::serve(hourcast_server::routes(pipeline)).run(addr).await;

    Ok(())
}
