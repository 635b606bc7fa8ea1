//! Weather pipeline for hourcast
//!
//! Resolves a location name to its current local hour and serves that
//! hour's weather from a TTL cache in front of the upstream forecast
//! provider.

pub mod cache;
pub mod error;
pub mod geocode;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod time;
pub mod types;

pub use cache::CacheStore;
pub use error::{CacheError, TimeError, WeatherError};
pub use pipeline::{WeatherPipeline, DEFAULT_TTL};
pub use provider::WeatherProvider;
pub use time::TimeResolver;
pub use types::{HourlyRecord, ResolvedTime, Source, WeatherPayload, WeatherReport};
