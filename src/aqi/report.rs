//! Weekly report synthesis.
//!
//! Every number in the report is computed by the engine modules; this file
//! only collects them and renders sentences around them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::aggregate::weekly_series;
use super::breakpoints::CALIBRATION_VERSION;
use super::category::classify;
use super::composite::aggregate_aqi;
use super::sub_index::pollutant_sub_index;
use super::trend::{analyze_location_trend, determine_trend, dominant_trend, DominantTrend, Trend};
use super::{Pollutant, PRIORITY};
use crate::models::HourlySeries;

// ---

/// Hourly input per location, ordered by location name.
pub type LocationInputs = BTreeMap<String, HourlySeries>;

/// AQI statistics over every valid hourly reading of every location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Overview {
    pub average_aqi: u32,
    pub highest_aqi: u32,
    pub lowest_aqi: u32,
    pub reading_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PollutantBreakdown {
    /// Mean raw concentration, rounded to two decimals.
    pub average: f64,
    pub max: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationTrend {
    pub location: String,
    pub daily: Vec<u32>,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize)]
pub struct AqiReport {
    pub id: Uuid,
    pub calibration: &'static str,
    pub week_starting: NaiveDate,
    pub week_ending: NaiveDate,
    pub summary: String,
    pub overview: Option<Overview>,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub trend_analysis: String,
    pub dominant_trend: DominantTrend,
    pub location_trends: Vec<LocationTrend>,
    pub pollutant_breakdown: BTreeMap<Pollutant, PollutantBreakdown>,
}

const RECOMMENDATIONS: [&str; 7] = [
    "Use air purifiers with HEPA filters in homes and offices",
    "Wear N95 masks when air quality is poor",
    "Keep windows closed during peak pollution hours (early morning and evening)",
    "Use air quality monitors indoors to track pollution levels",
    "Avoid strenuous outdoor activities when AQI exceeds 150",
    "Limit outdoor exposure for children and elderly during poor air quality days",
    "Avoid areas with active construction",
];

const COMMON_FACTORS: [&str; 3] = [
    "Vehicle emissions from major roads",
    "Construction activities in developing sectors",
    "Industrial emissions from nearby areas",
];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregate-path AQI statistics across all locations, `None` when no
/// reading was computable.
pub fn overview(locations: &LocationInputs) -> Option<Overview> {
    // ---
    let aqis: Vec<u32> = locations
        .values()
        .flat_map(|hourly| hourly.readings())
        .filter_map(|r| aggregate_aqi(&r.concentrations))
        .collect();

    let highest_aqi = *aqis.iter().max()?;
    let lowest_aqi = *aqis.iter().min()?;
    let total: u64 = aqis.iter().map(|v| u64::from(*v)).sum();

    Some(Overview {
        average_aqi: (total as f64 / aqis.len() as f64).round() as u32,
        highest_aqi,
        lowest_aqi,
        reading_count: aqis.len(),
    })
}

/// Narrative paragraph for the week.
pub fn summary_text(overview: Option<&Overview>, region: &str) -> String {
    // ---
    let Some(o) = overview else {
        return format!(
            "No valid air quality data was available for {} this week. \
             Please check back later for updated information.",
            region
        );
    };

    let spread = o.highest_aqi - o.lowest_aqi;
    let variation = if spread > 100 {
        "significant fluctuations"
    } else if spread > 50 {
        "moderate variations"
    } else {
        "relatively stable conditions"
    };

    let outlook = if o.average_aqi > 150 {
        "significant air quality challenges"
    } else if o.average_aqi > 100 {
        "moderate air quality concerns"
    } else {
        "generally acceptable air quality"
    };

    format!(
        "The average Air Quality Index (AQI) across {} this week was {}, categorized as {}. \
         The highest recorded AQI was {} and the lowest was {}, indicating {}. \
         The data suggests {} in the region.",
        region,
        o.average_aqi,
        classify(o.average_aqi),
        o.highest_aqi,
        o.lowest_aqi,
        variation,
        outlook
    )
}

/// Mean and max raw concentration per pollutant across all locations.
pub fn pollutant_breakdown(locations: &LocationInputs) -> BTreeMap<Pollutant, PollutantBreakdown> {
    // ---
    PRIORITY
        .into_iter()
        .map(|pollutant| {
            let mut total = 0.0;
            let mut max = 0.0_f64;
            let mut count = 0usize;

            for value in locations.values().flat_map(|h| h.values(pollutant)) {
                total += value;
                max = max.max(value);
                count += 1;
            }

            let breakdown = if count == 0 {
                PollutantBreakdown {
                    average: 0.0,
                    max: 0.0,
                    trend: Trend::Unknown,
                }
            } else {
                let average = total / count as f64;
                PollutantBreakdown {
                    average: round2(average),
                    max: round2(max),
                    trend: determine_trend(average, Some(pollutant)),
                }
            };
            (pollutant, breakdown)
        })
        .collect()
}

/// Contributing factors. Data-driven entries come first, followed by the
/// common factors that always apply.
pub fn determine_factors(locations: &LocationInputs) -> Vec<String> {
    // ---
    let mut high_pollution = false;
    let mut persistent_moderate = false;

    for hourly in locations.values() {
        let sub_indices: Vec<u32> = hourly
            .values(Pollutant::Pm25)
            .map(|v| pollutant_sub_index(Pollutant::Pm25, Some(v)))
            .collect();

        if sub_indices.iter().any(|aqi| *aqi > 150) {
            high_pollution = true;
        }

        let moderate = sub_indices.iter().filter(|aqi| (51..=100).contains(*aqi)).count();
        if (moderate as f64) > (sub_indices.len() as f64) * 0.5 {
            persistent_moderate = true;
        }
    }

    let mut factors = Vec::new();
    if high_pollution {
        factors.push("High pollution levels detected in multiple areas".to_string());
    }
    if persistent_moderate {
        factors.push("Persistent moderate pollution levels throughout the week".to_string());
    }
    factors.extend(COMMON_FACTORS.iter().map(|f| f.to_string()));
    factors
}

pub fn recommendations() -> Vec<String> {
    RECOMMENDATIONS.iter().map(|r| r.to_string()).collect()
}

/// Daily average series and split-window trend for each location.
///
/// Locations without a single valid day get `Unknown` and stay out of the
/// dominant-trend vote.
pub fn location_trends(locations: &LocationInputs) -> Vec<LocationTrend> {
    // ---
    locations
        .iter()
        .map(|(name, hourly)| {
            let weekly = weekly_series(name, &hourly.readings());
            let daily: Vec<u32> = weekly.days.iter().map(|d| d.average_aqi).collect();
            let trend = if daily.is_empty() {
                Trend::Unknown
            } else {
                analyze_location_trend(&daily)
            };
            LocationTrend {
                location: name.clone(),
                daily,
                trend,
            }
        })
        .collect()
}

pub fn trend_analysis_text(dominant: &DominantTrend, region: &str) -> String {
    format!(
        "Air quality trends show a {} pattern ({}% of locations) indicating {} across most of {}. \
         This is likely due to a combination of seasonal weather patterns, local emission sources, \
         and regional pollution factors.",
        dominant.trend,
        dominant.percentage,
        dominant.trend.air_quality_description(),
        region
    )
}

/// Build the full weekly report.
///
/// Per-location trends are all computed before the cross-location vote.
pub fn build_report(
    locations: &LocationInputs,
    week_starting: NaiveDate,
    week_ending: NaiveDate,
    region: &str,
) -> AqiReport {
    // ---
    let overview = overview(locations);
    let location_trends = location_trends(locations);
    let dominant = dominant_trend(location_trends.iter().map(|t| t.trend));

    tracing::info!(
        "Report for {} locations: dominant trend {} ({}%)",
        locations.len(),
        dominant.trend,
        dominant.percentage
    );

    AqiReport {
        id: Uuid::new_v4(),
        calibration: CALIBRATION_VERSION,
        week_starting,
        week_ending,
        summary: summary_text(overview.as_ref(), region),
        overview,
        factors: determine_factors(locations),
        recommendations: recommendations(),
        trend_analysis: trend_analysis_text(&dominant, region),
        dominant_trend: dominant,
        location_trends,
        pollutant_breakdown: pollutant_breakdown(locations),
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn hourly(times: &[&str], pm25: &[Option<f64>]) -> HourlySeries {
        // ---
        HourlySeries {
            time: Some(times.iter().map(|t| Some(t.to_string())).collect()),
            pm2_5: Some(pm25.to_vec()),
            ..Default::default()
        }
    }

    fn week() -> Vec<&'static str> {
        vec![
            "2024-05-01T12:00",
            "2024-05-02T12:00",
            "2024-05-03T12:00",
            "2024-05-04T12:00",
            "2024-05-05T12:00",
            "2024-05-06T12:00",
        ]
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_overview_excludes_invalid_readings() {
        // ---
        let mut locations = LocationInputs::new();
        locations.insert(
            "A".to_string(),
            hourly(&["2024-05-01T00:00", "2024-05-01T01:00"], &[Some(12.0), None]),
        );
        locations.insert("B".to_string(), hourly(&["2024-05-01T00:00"], &[Some(35.4)]));

        let o = overview(&locations).unwrap();
        assert_eq!(o.reading_count, 2);
        assert_eq!(o.average_aqi, 75);
        assert_eq!(o.highest_aqi, 100);
        assert_eq!(o.lowest_aqi, 50);
    }

    #[test]
    fn test_summary_text() {
        // ---
        let o = Overview {
            average_aqi: 120,
            highest_aqi: 260,
            lowest_aqi: 40,
            reading_count: 10,
        };
        let text = summary_text(Some(&o), "Dwarka");
        assert!(text.contains("across Dwarka this week was 120, categorized as sensitive"));
        assert!(text.contains("significant fluctuations"));
        assert!(text.contains("moderate air quality concerns"));

        let empty = summary_text(None, "Dwarka");
        assert!(empty.starts_with("No valid air quality data was available for Dwarka"));
    }

    #[test]
    fn test_pollutant_breakdown() {
        // ---
        let mut locations = LocationInputs::new();
        locations.insert(
            "A".to_string(),
            hourly(&["2024-05-01T00:00", "2024-05-01T01:00", "2024-05-01T02:00"], &[
                Some(40.0),
                Some(41.0),
                None,
            ]),
        );

        let breakdown = pollutant_breakdown(&locations);
        assert_eq!(breakdown.len(), 6);

        let pm25 = breakdown[&Pollutant::Pm25];
        assert_eq!(pm25.average, 40.5);
        assert_eq!(pm25.max, 41.0);
        assert_eq!(pm25.trend, Trend::Increasing);

        let co = breakdown[&Pollutant::Co];
        assert_eq!(co.average, 0.0);
        assert_eq!(co.trend, Trend::Unknown);
    }

    #[test]
    fn test_factors() {
        // ---
        let mut locations = LocationInputs::new();
        // 20.0 → moderate, 200.0 → 250 (very unhealthy)
        locations.insert(
            "A".to_string(),
            hourly(&["2024-05-01T00:00", "2024-05-01T01:00", "2024-05-01T02:00"], &[
                Some(20.0),
                Some(20.0),
                Some(200.0),
            ]),
        );

        let factors = determine_factors(&locations);
        assert_eq!(factors.len(), 5);
        assert_eq!(factors[0], "High pollution levels detected in multiple areas");
        assert_eq!(factors[1], "Persistent moderate pollution levels throughout the week");
        assert_eq!(factors[4], "Industrial emissions from nearby areas");

        assert_eq!(determine_factors(&LocationInputs::new()).len(), 3);
    }

    #[test]
    fn test_location_trends_and_vote() {
        // ---
        // PM2.5 → AQI: 6.0 → 25, 12.0 → 50, 35.4 → 100
        let rising = hourly(&week(), &[
            Some(6.0),
            Some(6.0),
            Some(6.0),
            Some(35.4),
            Some(35.4),
            Some(35.4),
        ]);
        let flat = hourly(&week(), &[Some(12.0); 6]);

        let mut locations = LocationInputs::new();
        locations.insert("Rohini".to_string(), rising.clone());
        locations.insert("Saket".to_string(), rising);
        locations.insert("Tilak Nagar".to_string(), flat);
        locations.insert("Moti Nagar".to_string(), HourlySeries::default());

        let trends = location_trends(&locations);
        assert_eq!(trends.len(), 4);

        let rohini = trends.iter().find(|t| t.location == "Rohini").unwrap();
        assert_eq!(rohini.daily, vec![25, 25, 25, 100, 100, 100]);
        assert_eq!(rohini.trend, Trend::Increasing);

        let moti = trends.iter().find(|t| t.location == "Moti Nagar").unwrap();
        assert_eq!(moti.trend, Trend::Unknown);

        let dominant = dominant_trend(trends.iter().map(|t| t.trend));
        assert_eq!(dominant.trend, Trend::Increasing);
        assert_eq!(dominant.percentage, 67);
        assert_eq!(dominant.locations, 3);

        let text = trend_analysis_text(&dominant, "Dwarka");
        assert!(text.starts_with("Air quality trends show a increasing pattern (67% of locations)"));
        assert!(text.contains("worsening air quality across most of Dwarka"));
    }

    #[test]
    fn test_build_report() {
        // ---
        let mut locations = LocationInputs::new();
        locations.insert("Saket".to_string(), hourly(&week(), &[Some(12.0); 6]));

        let report = build_report(&locations, date(1), date(7), "Dwarka");
        assert_eq!(report.calibration, "epa-2012");
        assert_eq!(report.week_starting, date(1));
        assert_eq!(report.week_ending, date(7));
        assert_eq!(report.overview.map(|o| o.average_aqi), Some(50));
        assert_eq!(report.recommendations.len(), 7);
        assert_eq!(report.dominant_trend.trend, Trend::Stable);
        assert_eq!(report.dominant_trend.percentage, 100);
        assert_eq!(report.location_trends.len(), 1);
    }
}
