//! Route wiring: health check plus the weather lookup.

use std::convert::Infallible;
use std::sync::Arc;

use hourcast_weather::WeatherPipeline;
use warp::Filter;

use crate::response::{ErrorResponse, HealthCheckResponse, WeatherResponse};

/// All routes of the service.
pub fn routes(
    pipeline: Arc<WeatherPipeline>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    health().or(weather(pipeline))
}

fn health() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::get().and(warp::path::end()).map(|| {
        warp::reply::json(&HealthCheckResponse {
            status: "ok".to_string(),
            message: "Welcome to the Weather API".to_string(),
        })
    })
}

fn weather(
    pipeline: Arc<WeatherPipeline>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::get()
        .and(warp::path("weather"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::any().map(move || pipeline.clone()))
        .and_then(handle_weather)
}

/// Every pipeline failure resolves to a structured `{error}` body; the
/// transport status stays 200 either way.
async fn handle_weather(
    location: String,
    pipeline: Arc<WeatherPipeline>,
) -> Result<warp::reply::Json, Infallible> {
    match pipeline.fetch(&location).await {
        Ok(report) => Ok(warp::reply::json(&WeatherResponse {
            location,
            weather: report.weather,
            source: report.source,
        })),
        Err(err) => {
            tracing::warn!(%location, error = %err, "weather lookup failed");
            Ok(warp::reply::json(&ErrorResponse {
                error: err.user_message(),
            }))
        }
    }
}
