use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;

use crate::aqi::aggregate_forecast;
use crate::{Config, HourlySeries};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/aqi/forecast", post(handler))
}

/// Forecast request; `hourly` may be missing when the provider returned
/// nothing, which yields an empty forecast.
#[derive(Debug, Deserialize)]
struct ForecastRequest {
    today: Option<NaiveDate>,
    hourly: Option<HourlySeries>,
}

async fn handler(Json(request): Json<ForecastRequest>) -> impl IntoResponse {
    // ---
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    info!("POST /aqi/forecast - today {}", today);

    let points = aggregate_forecast(request.hourly.as_ref(), today);
    info!("POST /aqi/forecast - {} forecast days", points.len());
    (StatusCode::OK, Json(points))
}
