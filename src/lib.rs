//! AQI conversion and aggregation service.
//!
//! The `aqi` module is the engine: pure functions that turn hourly pollutant
//! concentrations into sub-indices, composite AQI values, daily aggregates,
//! forecasts, trends and report text. The remaining modules wrap it in an
//! Axum HTTP service.
//!
//! This crate follows the Explicit Module Boundary Pattern (EMBP): shared
//! types are re-exported here so `routes/*.rs` depend only on the crate root,
//! not on where `config.rs` or `models.rs` keep them.

pub mod aqi;
pub mod config;
pub mod models;
pub mod routes;

pub use config::Config;
pub use models::{Concentrations, HourlySeries, Reading};
pub use routes::router;
