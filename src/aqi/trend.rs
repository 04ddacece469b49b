//! Rule-based trend labels.
//!
//! Three independent rules: a pollutant average against fixed thresholds,
//! a location's daily AQI series split into halves, and a plurality vote
//! across locations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Pollutant;

// ---

/// Change in the first half → second half mean that counts as a trend.
pub const SPLIT_WINDOW_THRESHOLD: f64 = 15.0;

/// Shorter daily series are always `Stable`.
pub const MIN_TREND_POINTS: usize = 3;

/// Generic `(high, low)` pair used when no pollutant is named.
pub const GENERIC_THRESHOLDS: (f64, f64) = (100.0, 50.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
    /// No data behind the value.
    Unknown,
}

/// Vote order; also the tie-break order.
pub const VOTE_ORDER: [Trend; 3] = [Trend::Increasing, Trend::Decreasing, Trend::Stable];

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
            Trend::Unknown => "unknown",
        }
    }

    /// What the trend means for air quality, for report text.
    pub fn air_quality_description(self) -> &'static str {
        match self {
            Trend::Increasing => "worsening air quality",
            Trend::Decreasing => "improving air quality",
            Trend::Stable => "consistent air quality",
            Trend::Unknown => "no discernible pattern in air quality",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(high, low)` average concentration thresholds, in µg/m³ as measured.
pub fn thresholds(pollutant: Pollutant) -> (f64, f64) {
    match pollutant {
        Pollutant::Pm25 => (35.0, 12.0),
        Pollutant::Pm10 => (150.0, 54.0),
        Pollutant::O3 => (70.0, 50.0),
        Pollutant::No2 => (100.0, 53.0),
        Pollutant::So2 => (75.0, 35.0),
        Pollutant::Co => (9.0, 4.0),
    }
}

/// Label an average pollutant value against its thresholds.
///
/// Exactly `0` means no samples and yields `Unknown`.
pub fn determine_trend(value: f64, pollutant: Option<Pollutant>) -> Trend {
    // ---
    if value == 0.0 || !value.is_finite() {
        return Trend::Unknown;
    }

    let (high, low) = pollutant.map_or(GENERIC_THRESHOLDS, thresholds);
    if value > high {
        Trend::Increasing
    } else if value < low {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

fn mean(values: &[u32]) -> f64 {
    values.iter().map(|v| f64::from(*v)).sum::<f64>() / values.len() as f64
}

/// Compare the mean of the second half of a daily series with the first.
///
/// The halves are `[0, ceil(n/2))` and `[floor(n/2), n)`, so for odd `n` the
/// middle day belongs to both.
pub fn analyze_location_trend(daily: &[u32]) -> Trend {
    // ---
    let n = daily.len();
    if n < MIN_TREND_POINTS {
        return Trend::Stable;
    }

    let first_half = &daily[..n.div_ceil(2)];
    let second_half = &daily[n / 2..];
    let difference = mean(second_half) - mean(first_half);

    if difference > SPLIT_WINDOW_THRESHOLD {
        Trend::Increasing
    } else if difference < -SPLIT_WINDOW_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Outcome of the cross-location vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DominantTrend {
    pub trend: Trend,
    /// Share of voting locations holding `trend`, rounded to a whole percent.
    pub percentage: u32,
    pub locations: usize,
}

/// Plurality vote over per-location trends.
///
/// `Unknown` labels do not vote. Ties go to the earlier entry in
/// [`VOTE_ORDER`]. With no voters the result is `Stable` at 0%.
pub fn dominant_trend<I>(labels: I) -> DominantTrend
where
    I: IntoIterator<Item = Trend>,
{
    // ---
    let mut counts = [0usize; 3];
    for label in labels {
        if let Some(slot) = VOTE_ORDER.iter().position(|t| *t == label) {
            counts[slot] += 1;
        }
    }

    let locations: usize = counts.iter().sum();
    let mut trend = Trend::Stable;
    let mut max_count = 0;
    for (candidate, count) in VOTE_ORDER.into_iter().zip(counts) {
        if count > max_count {
            trend = candidate;
            max_count = count;
        }
    }

    let percentage = if locations == 0 {
        0
    } else {
        (100.0 * max_count as f64 / locations as f64).round() as u32
    };

    DominantTrend {
        trend,
        percentage,
        locations,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_pollutant_thresholds() {
        // ---
        assert_eq!(determine_trend(36.0, Some(Pollutant::Pm25)), Trend::Increasing);
        assert_eq!(determine_trend(11.9, Some(Pollutant::Pm25)), Trend::Decreasing);
        assert_eq!(determine_trend(20.0, Some(Pollutant::Pm25)), Trend::Stable);
        assert_eq!(determine_trend(35.0, Some(Pollutant::Pm25)), Trend::Stable);
        assert_eq!(determine_trend(12.0, Some(Pollutant::Pm25)), Trend::Stable);

        assert_eq!(determine_trend(151.0, Some(Pollutant::Pm10)), Trend::Increasing);
        assert_eq!(determine_trend(9.5, Some(Pollutant::Co)), Trend::Increasing);
        assert_eq!(determine_trend(3.0, Some(Pollutant::Co)), Trend::Decreasing);
        assert_eq!(determine_trend(60.0, Some(Pollutant::So2)), Trend::Stable);
    }

    #[test]
    fn test_generic_thresholds_without_pollutant() {
        // ---
        assert_eq!(determine_trend(101.0, None), Trend::Increasing);
        assert_eq!(determine_trend(49.0, None), Trend::Decreasing);
        assert_eq!(determine_trend(75.0, None), Trend::Stable);
    }

    #[test]
    fn test_zero_is_unknown_not_clean() {
        // ---
        assert_eq!(determine_trend(0.0, Some(Pollutant::Pm25)), Trend::Unknown);
        assert_eq!(determine_trend(0.0, None), Trend::Unknown);
        assert_eq!(determine_trend(f64::NAN, None), Trend::Unknown);
    }

    #[test]
    fn test_location_trend_even_split() {
        // ---
        // halves [40,45,50] and [90,95,100]: 95 - 45 = 50
        assert_eq!(analyze_location_trend(&[40, 45, 50, 90, 95, 100]), Trend::Increasing);
        assert_eq!(analyze_location_trend(&[100, 95, 90, 50, 45, 40]), Trend::Decreasing);
    }

    #[test]
    fn test_location_trend_odd_split_shares_middle_day() {
        // ---
        // n = 5: first [60,60,90] = 70, second [90,80,80] = 83.3 → +13.3
        assert_eq!(analyze_location_trend(&[60, 60, 90, 80, 80]), Trend::Stable);
        // n = 3: first [50,80] = 65, second [80,90] = 85 → +20
        assert_eq!(analyze_location_trend(&[50, 80, 90]), Trend::Increasing);
    }

    #[test]
    fn test_location_trend_threshold_is_exclusive() {
        // ---
        // 65 - 50 = 15 is not > 15
        assert_eq!(analyze_location_trend(&[50, 50, 65, 65]), Trend::Stable);
        assert_eq!(analyze_location_trend(&[50, 50, 66, 66]), Trend::Increasing);
    }

    #[test]
    fn test_short_series_is_stable() {
        // ---
        assert_eq!(analyze_location_trend(&[]), Trend::Stable);
        assert_eq!(analyze_location_trend(&[10, 300]), Trend::Stable);
    }

    #[test]
    fn test_dominant_vote() {
        // ---
        let labels = [
            Trend::Increasing,
            Trend::Stable,
            Trend::Increasing,
            Trend::Decreasing,
            Trend::Increasing,
        ];
        let dominant = dominant_trend(labels);
        assert_eq!(dominant.trend, Trend::Increasing);
        assert_eq!(dominant.percentage, 60);
        assert_eq!(dominant.locations, 5);
    }

    #[test]
    fn test_dominant_vote_ties_follow_declared_order() {
        // ---
        let dominant = dominant_trend([Trend::Stable, Trend::Decreasing]);
        assert_eq!(dominant.trend, Trend::Decreasing);
        assert_eq!(dominant.percentage, 50);

        let dominant = dominant_trend([Trend::Stable, Trend::Decreasing, Trend::Increasing]);
        assert_eq!(dominant.trend, Trend::Increasing);
        assert_eq!(dominant.percentage, 33);
    }

    #[test]
    fn test_dominant_vote_without_voters() {
        // ---
        let dominant = dominant_trend([Trend::Unknown]);
        assert_eq!(dominant.trend, Trend::Stable);
        assert_eq!(dominant.percentage, 0);
        assert_eq!(dominant.locations, 0);
    }
}
