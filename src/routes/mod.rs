//! Route gateway for the AQI service (EMBP).
//!
//! Each sibling file owns one endpoint and exports a subrouter; this module
//! merges them and attaches the shared state so `main.rs` only sees
//! [`router`]. Request types shared by several endpoints live here too.

use std::collections::BTreeMap;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json, Router};
use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;

use crate::{Config, HourlySeries};

mod current;
mod daily;
mod forecast;
mod health;
mod report;
mod weekly;

// ---

pub fn router(config: Config) -> Router {
    // ---
    Router::new()
        .merge(current::router())
        .merge(daily::router())
        .merge(weekly::router())
        .merge(forecast::router())
        .merge(report::router())
        .merge(health::router())
        .with_state(config)
}

/// Body for endpoints that work on several locations at once.
#[derive(Debug, Deserialize)]
struct LocationsRequest {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    #[serde(default)]
    locations: BTreeMap<String, HourlySeries>,
}

impl LocationsRequest {
    /// Reporting window; defaults to the seven days ending today.
    fn window(&self) -> (NaiveDate, NaiveDate) {
        let end = self.end_date.unwrap_or_else(|| Local::now().date_naive());
        let start = self.start_date.unwrap_or(end - Duration::days(6));
        (start, end)
    }

    /// Reject requests over the configured location limit.
    fn check_limit(&self, config: &Config) -> Result<(), Response> {
        // ---
        if self.locations.len() > config.max_locations as usize {
            tracing::warn!(
                "Rejecting request with {} locations (limit {})",
                self.locations.len(),
                config.max_locations
            );
            return Err((
                StatusCode::BAD_REQUEST,
                Json(format!(
                    "Too many locations: {} (limit {})",
                    self.locations.len(),
                    config.max_locations
                )),
            )
                .into_response());
        }
        Ok(())
    }
}
