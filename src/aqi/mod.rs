//! AQI conversion and aggregation engine.
//!
//! Pure, synchronous transformations from raw pollutant concentrations to
//! sub-indices, composite AQI values, daily aggregates, forecast points,
//! trend labels and report text. Nothing here holds state between calls
//! beyond the constant breakpoint tables, so every function is safe to call
//! concurrently.
//!
//! Gateway for the engine submodules (EMBP): callers import from
//! `crate::aqi`, not from the individual files.

pub mod breakpoints;
pub mod category;
pub mod composite;
pub mod confidence;
pub mod report;
pub mod trend;

mod aggregate;
mod pollutant;
mod sub_index;

pub use aggregate::{
    aggregate_by_day, aggregate_forecast, rolling_average, weekly_series, DailyAggregate,
    DailySeries, ForecastPoint, WeeklySeries,
};
pub use breakpoints::{Breakpoint, CALIBRATION_VERSION};
pub use category::{classify, AqiCategory};
pub use composite::{resolve, resolve_over, CompositeResult};
pub use confidence::forecast_confidence;
pub use pollutant::{Pollutant, PRIORITY};
pub use sub_index::{compute_sub_index, pollutant_sub_index, PollutantSubIndex, SubIndices};
pub use trend::{analyze_location_trend, determine_trend, dominant_trend, DominantTrend, Trend};
