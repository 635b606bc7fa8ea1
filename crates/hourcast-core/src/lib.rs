//! Core bootstrap for hourcast: configuration loading and process init.

pub mod config;

pub use config::{
    CacheConfig, Config, ServerConfig, TimeConfig, ValidationResult, WeatherConfig, API_KEY_ENV,
};

use anyhow::Result;

/// Initialize process-wide logging.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("hourcast core initialized");
    Ok(())
}
