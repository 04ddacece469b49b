use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::Serialize;
use tracing::{debug, info};

use crate::aqi::{resolve, CompositeResult, PollutantSubIndex, SubIndices};
use crate::{Concentrations, Config};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new().route("/aqi/current", post(handler))
}

/// Composite AQI for one instantaneous reading, with every sub-index.
#[derive(Debug, Serialize)]
struct CurrentResponse {
    #[serde(flatten)]
    composite: CompositeResult,
    sub_indices: Vec<PollutantSubIndex>,
    calibration: String,
}

async fn handler(
    State(config): State<Config>,
    Json(concentrations): Json<Concentrations>,
) -> impl IntoResponse {
    // ---
    info!("POST /aqi/current");

    let sub_indices = SubIndices::from_concentrations(&concentrations);
    let composite = resolve(&sub_indices);
    debug!("POST /aqi/current - {:?} -> {:?}", sub_indices, composite);

    let response = CurrentResponse {
        composite,
        sub_indices: (&sub_indices).into(),
        calibration: config.calibration,
    };
    (StatusCode::OK, Json(response))
}
