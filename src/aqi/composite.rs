//! Combine per-pollutant sub-indices into one AQI.

use serde::Serialize;

use super::category::{classify, AqiCategory};
use super::sub_index::SubIndices;
use super::{Pollutant, PRIORITY};
use crate::models::Concentrations;

// ---

/// Pollutants that feed the per-reading AQI on the daily, weekly, forecast
/// and summary paths. PM10 is left out there but still takes part in
/// [`resolve`] for a single reading and in the daily dominant pollutant.
pub const AGGREGATE_POLLUTANTS: [Pollutant; 5] = [
    Pollutant::Pm25,
    Pollutant::O3,
    Pollutant::No2,
    Pollutant::So2,
    Pollutant::Co,
];

/// Overall AQI for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompositeResult {
    /// `0` when no pollutant was computable.
    pub aqi: u32,
    pub category: AqiCategory,
    pub dominant_pollutant: Option<Pollutant>,
}

impl CompositeResult {
    /// Whether the reading may contribute to an aggregate.
    pub fn is_valid(&self) -> bool {
        self.aqi > 0
    }
}

/// Resolve over all six pollutants.
pub fn resolve(sub: &SubIndices) -> CompositeResult {
    resolve_over(sub, &PRIORITY)
}

/// Resolve over the listed pollutants only.
///
/// Zero sub-indices mean "not computable" and are ignored. The first
/// pollutant in [`PRIORITY`] order holding the maximum is dominant.
pub fn resolve_over(sub: &SubIndices, pollutants: &[Pollutant]) -> CompositeResult {
    // ---
    let mut best: Option<(Pollutant, u32)> = None;

    for (pollutant, value) in sub.iter() {
        if value == 0 || !pollutants.contains(&pollutant) {
            continue;
        }
        if best.map_or(true, |(_, max)| value > max) {
            best = Some((pollutant, value));
        }
    }

    let aqi = best.map_or(0, |(_, v)| v);
    CompositeResult {
        aqi,
        category: classify(aqi),
        dominant_pollutant: best.map(|(p, _)| p),
    }
}

/// Instantaneous composite for a single reading (all six pollutants).
pub fn current(c: &Concentrations) -> CompositeResult {
    resolve(&SubIndices::from_concentrations(c))
}

/// Per-reading AQI used by the aggregation paths, or `None` when nothing
/// was computable.
pub fn aggregate_aqi(c: &Concentrations) -> Option<u32> {
    let composite = resolve_over(&SubIndices::from_concentrations(c), &AGGREGATE_POLLUTANTS);
    composite.is_valid().then_some(composite.aqi)
}
