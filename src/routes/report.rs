use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use tracing::info;

use super::LocationsRequest;
use crate::aqi::report::build_report;
use crate::Config;

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/aqi/report", post(handler))
}

async fn handler(
    State(config): State<Config>,
    Json(request): Json<LocationsRequest>,
) -> impl IntoResponse {
    // ---
    info!("POST /aqi/report - {} locations", request.locations.len());

    if let Err(rejection) = request.check_limit(&config) {
        return rejection;
    }

    let (week_starting, week_ending) = request.window();
    let report = build_report(&request.locations, week_starting, week_ending, &config.region);

    info!("POST /aqi/report - report {} ready", report.id);
    (StatusCode::OK, Json(report)).into_response()
}
