//! Concentration → per-pollutant AQI sub-index.

use serde::Serialize;

use super::breakpoints::{self, Breakpoint};
use super::{Pollutant, PRIORITY};
use crate::models::Concentrations;

// ---

/// Interpolate `concentration` against `table`.
///
/// Returns `0` ("not computable") for absent or non-finite input, for values
/// below the first breakpoint, and for values that fall in the gap between
/// two breakpoints. Values above the last breakpoint are extrapolated with
/// its slope; there is no upper cap.
pub fn compute_sub_index(concentration: Option<f64>, table: &[Breakpoint]) -> u32 {
    // ---
    let Some(c) = concentration.filter(|c| c.is_finite()) else {
        return 0;
    };
    let (Some(first), Some(last)) = (table.first(), table.last()) else {
        return 0;
    };

    if c < first.min {
        return 0;
    }

    let bp = match table.iter().find(|bp| bp.contains(c)) {
        Some(bp) => bp,
        None if c > last.max => last,
        None => return 0,
    };

    interpolate(bp, c)
}

fn interpolate(bp: &Breakpoint, c: f64) -> u32 {
    // f64::round is half-away-from-zero; the result is never negative here.
    (bp.slope() * (c - bp.min) + f64::from(bp.aqi_min)).round() as u32
}

/// Sub-index for a raw (unconverted) concentration of `pollutant`.
pub fn pollutant_sub_index(pollutant: Pollutant, raw: Option<f64>) -> u32 {
    let converted = raw.map(|v| v * pollutant.conversion_factor());
    compute_sub_index(converted, breakpoints::table(pollutant))
}

/// The six sub-indices of one reading, stored in [`PRIORITY`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubIndices([u32; 6]);

impl SubIndices {
    /// Build directly from values in [`PRIORITY`] order.
    pub fn new(values: [u32; 6]) -> Self {
        Self(values)
    }

    pub fn from_concentrations(c: &Concentrations) -> Self {
        Self(PRIORITY.map(|p| pollutant_sub_index(p, c.get(p))))
    }

    pub fn get(&self, pollutant: Pollutant) -> u32 {
        self.0[pollutant as usize]
    }

    /// `(pollutant, sub_index)` pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Pollutant, u32)> + '_ {
        PRIORITY.into_iter().zip(self.0.iter().copied())
    }
}

/// Serializable view of one pollutant's sub-index.
#[derive(Debug, Clone, Serialize)]
pub struct PollutantSubIndex {
    pub pollutant: Pollutant,
    pub sub_index: u32,
}

impl From<&SubIndices> for Vec<PollutantSubIndex> {
    fn from(s: &SubIndices) -> Self {
        s.iter()
            .map(|(pollutant, sub_index)| PollutantSubIndex {
                pollutant,
                sub_index,
            })
            .collect()
    }
}
