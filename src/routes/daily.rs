use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use tracing::info;

use crate::aqi::aggregate_by_day;
use crate::{Config, HourlySeries};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/aqi/daily", post(handler))
}

async fn handler(Json(hourly): Json<HourlySeries>) -> impl IntoResponse {
    // ---
    info!("POST /aqi/daily - {} hourly slots", hourly.len());

    let series = aggregate_by_day(&hourly.readings());
    info!(
        "POST /aqi/daily - {} days, {} dropped points",
        series.days.len(),
        series.dropped_points
    );
    (StatusCode::OK, Json(series))
}
