//! Heuristic forecast confidence.

use chrono::NaiveDate;

// ---

pub const BASE_CONFIDENCE: f64 = 85.0;
pub const DECAY_PER_DAY: f64 = 5.0;
pub const MAX_SAMPLE_BONUS: f64 = 10.0;
pub const MIN_CONFIDENCE: f64 = 50.0;
pub const MAX_CONFIDENCE: f64 = 95.0;

/// Confidence in `[50, 95]` for a forecast day built from `sample_count`
/// hourly samples.
///
/// Loses 5 points per day ahead of `today` and gains half a point per
/// sample, up to 10. Dates in the past are not special-cased; they raise the
/// base and end up at the ceiling.
pub fn forecast_confidence(sample_count: usize, forecast_date: NaiveDate, today: NaiveDate) -> f64 {
    // ---
    let days_ahead = (forecast_date - today).num_days() as f64;
    let base = BASE_CONFIDENCE - DECAY_PER_DAY * days_ahead;
    let bonus = MAX_SAMPLE_BONUS.min(sample_count as f64 / 2.0);

    (base + bonus).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}
