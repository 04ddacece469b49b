use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::LocationsRequest;
use crate::aqi::{weekly_series, DailyAggregate};
use crate::Config;

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/aqi/weekly", post(handler))
}

/// Per-location daily series and rolling averages over one window.
#[derive(Debug, Serialize)]
struct WeeklyResponse {
    start_date: NaiveDate,
    end_date: NaiveDate,
    locations: BTreeMap<String, Vec<DailyAggregate>>,
    /// `null` for locations without any valid day.
    averages: BTreeMap<String, Option<u32>>,
    dropped_points: BTreeMap<String, usize>,
}

async fn handler(
    State(config): State<Config>,
    Json(request): Json<LocationsRequest>,
) -> impl IntoResponse {
    // ---
    info!("POST /aqi/weekly - {} locations", request.locations.len());

    if let Err(rejection) = request.check_limit(&config) {
        return rejection;
    }

    let (start_date, end_date) = request.window();
    let mut response = WeeklyResponse {
        start_date,
        end_date,
        locations: BTreeMap::new(),
        averages: BTreeMap::new(),
        dropped_points: BTreeMap::new(),
    };

    for (location, hourly) in &request.locations {
        debug!("POST /aqi/weekly - aggregating {}", location);
        let weekly = weekly_series(location, &hourly.readings());

        response.averages.insert(location.clone(), weekly.average_aqi);
        response
            .dropped_points
            .insert(location.clone(), weekly.dropped_points);
        response.locations.insert(location.clone(), weekly.days);
    }

    (StatusCode::OK, Json(response)).into_response()
}
