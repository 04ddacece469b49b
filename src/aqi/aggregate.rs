//! Temporal aggregation of hourly readings into calendar-day statistics.
//!
//! Every call builds its own day buckets and drops them on return; nothing
//! is shared between calls or between locations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::category::{classify, AqiCategory};
use super::composite::{aggregate_aqi, resolve};
use super::confidence::forecast_confidence;
use super::sub_index::SubIndices;
use super::Pollutant;
use crate::models::{HourlySeries, Reading};

// ---

/// Statistics for one calendar day of one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub average_aqi: u32,
    pub max_aqi: u32,
    pub min_aqi: u32,
    pub dominant_pollutant: Option<Pollutant>,
    pub category: AqiCategory,
}

/// Result of [`aggregate_by_day`]: sorted days plus the number of readings
/// that were dropped for lacking a usable timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySeries {
    pub days: Vec<DailyAggregate>,
    pub dropped_points: usize,
}

/// Daily series for one location plus its rolling average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySeries {
    pub location: String,
    pub days: Vec<DailyAggregate>,
    /// `None` when the location produced no valid day.
    pub average_aqi: Option<u32>,
    pub dropped_points: usize,
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub aqi: u32,
    pub category: AqiCategory,
    pub confidence: f64,
}

/// Day buckets, keyed and therefore iterated in date order.
struct DayBuckets<'a> {
    days: BTreeMap<NaiveDate, Vec<&'a Reading>>,
    dropped_points: usize,
}

impl<'a> DayBuckets<'a> {
    fn group(readings: &'a [Reading]) -> Self {
        // ---
        let mut days: BTreeMap<NaiveDate, Vec<&'a Reading>> = BTreeMap::new();
        let mut dropped_points = 0;

        for reading in readings {
            match reading.local_date() {
                Some(date) => days.entry(date).or_default().push(reading),
                None => dropped_points += 1,
            }
        }

        if dropped_points > 0 {
            tracing::warn!(
                "Dropped {} of {} readings with missing or unparseable timestamps",
                dropped_points,
                readings.len()
            );
        }

        Self {
            days,
            dropped_points,
        }
    }
}

fn rounded_mean(values: &[u32]) -> u32 {
    let sum: u64 = values.iter().map(|v| u64::from(*v)).sum();
    (sum as f64 / values.len() as f64).round() as u32
}

/// Dominant pollutant of the reading with the most non-null pollutant
/// fields. The earliest reading wins among equally complete ones.
fn most_complete_dominant(readings: &[&Reading]) -> Option<Pollutant> {
    // ---
    let mut best: Option<&Reading> = None;
    for reading in readings.iter().copied() {
        let count = reading.concentrations.present_count();
        if best.map_or(true, |b| count > b.concentrations.present_count()) {
            best = Some(reading);
        }
    }

    best.and_then(|r| resolve(&SubIndices::from_concentrations(&r.concentrations)).dominant_pollutant)
}

/// Collapse readings into per-day aggregates sorted by date.
///
/// Readings without a computable AQI are ignored; days left with none are
/// omitted rather than reported as zero.
pub fn aggregate_by_day(readings: &[Reading]) -> DailySeries {
    // ---
    let buckets = DayBuckets::group(readings);
    let mut days = Vec::with_capacity(buckets.days.len());

    for (date, bucket) in &buckets.days {
        let aqis: Vec<u32> = bucket
            .iter()
            .filter_map(|r| aggregate_aqi(&r.concentrations))
            .collect();

        let (Some(max_aqi), Some(min_aqi)) = (aqis.iter().max(), aqis.iter().min()) else {
            tracing::debug!("No valid AQI on {}, skipping day", date);
            continue;
        };

        let average_aqi = rounded_mean(&aqis);
        days.push(DailyAggregate {
            date: *date,
            average_aqi,
            max_aqi: *max_aqi,
            min_aqi: *min_aqi,
            dominant_pollutant: most_complete_dominant(bucket),
            category: classify(average_aqi),
        });
    }

    DailySeries {
        days,
        dropped_points: buckets.dropped_points,
    }
}

/// Rounded mean of the daily averages, `None` for an empty series.
pub fn rolling_average(days: &[DailyAggregate]) -> Option<u32> {
    if days.is_empty() {
        return None;
    }
    let averages: Vec<u32> = days.iter().map(|d| d.average_aqi).collect();
    Some(rounded_mean(&averages))
}

/// Daily series and rolling average for one location.
pub fn weekly_series(location: &str, readings: &[Reading]) -> WeeklySeries {
    // ---
    let DailySeries {
        days,
        dropped_points,
    } = aggregate_by_day(readings);
    let average_aqi = rolling_average(&days);

    tracing::debug!(
        "Location {}: {} days, average {:?}",
        location,
        days.len(),
        average_aqi
    );

    WeeklySeries {
        location: location.to_string(),
        days,
        average_aqi,
        dropped_points,
    }
}

/// Per-day forecast with confidence attached.
///
/// Uses the same grouping and exclusion rules as [`aggregate_by_day`]. The
/// sample count behind each day's confidence is every reading on that date,
/// valid or not. Missing input yields an empty forecast.
pub fn aggregate_forecast(hourly: Option<&HourlySeries>, today: NaiveDate) -> Vec<ForecastPoint> {
    // ---
    let Some(hourly) = hourly.filter(|h| h.time.is_some()) else {
        tracing::debug!("Forecast input has no time axis, returning empty forecast");
        return Vec::new();
    };

    let readings = hourly.readings();
    let buckets = DayBuckets::group(&readings);

    buckets
        .days
        .iter()
        .filter_map(|(date, bucket)| {
            let aqis: Vec<u32> = bucket
                .iter()
                .filter_map(|r| aggregate_aqi(&r.concentrations))
                .collect();
            if aqis.is_empty() {
                return None;
            }

            let aqi = rounded_mean(&aqis);
            Some(ForecastPoint {
                date: *date,
                aqi,
                category: classify(aqi),
                confidence: forecast_confidence(bucket.len(), *date, today),
            })
        })
        .collect()
}
