//! Input data models for the AQI pipeline.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::aqi::Pollutant;

// ---

/// Raw concentrations for one instant, in µg/m³ as reported by the provider.
///
/// `None` means the sensor had no value for that pollutant, which is not the
/// same as a measured zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Concentrations {
    // ---
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub ozone: Option<f64>,
    pub nitrogen_dioxide: Option<f64>,
    pub sulphur_dioxide: Option<f64>,
    pub carbon_monoxide: Option<f64>,
}

impl Concentrations {
    // ---
    pub fn get(&self, pollutant: Pollutant) -> Option<f64> {
        match pollutant {
            Pollutant::Pm25 => self.pm2_5,
            Pollutant::Pm10 => self.pm10,
            Pollutant::O3 => self.ozone,
            Pollutant::No2 => self.nitrogen_dioxide,
            Pollutant::So2 => self.sulphur_dioxide,
            Pollutant::Co => self.carbon_monoxide,
        }
    }

    /// Number of pollutants with a value, used to pick the most complete
    /// reading of a day.
    pub fn present_count(&self) -> usize {
        crate::aqi::PRIORITY
            .iter()
            .filter(|p| self.get(**p).is_some())
            .count()
    }
}

/// One timestamped reading for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    // ---
    pub timestamp: Option<String>,
    pub concentrations: Concentrations,
}

impl Reading {
    /// Calendar date of the reading, or `None` if the timestamp is missing
    /// or unparseable.
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.timestamp.as_deref().and_then(parse_local_date)
    }
}

/// Extract the location-local calendar date from an ISO-8601 timestamp.
///
/// Timestamps with an offset keep the date in that offset. Offset-less
/// timestamps (`2024-05-01T13:00`) are already local and used as-is.
pub fn parse_local_date(ts: &str) -> Option<NaiveDate> {
    // ---
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.date_naive());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(ts, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok())
}

/// Hourly pollutant series in the provider's columnar layout.
///
/// Every array is optional; a pollutant array shorter than `time` leaves
/// the remaining readings without that pollutant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlySeries {
    // ---
    pub time: Option<Vec<Option<String>>>,
    pub pm2_5: Option<Vec<Option<f64>>>,
    pub pm10: Option<Vec<Option<f64>>>,
    pub ozone: Option<Vec<Option<f64>>>,
    pub nitrogen_dioxide: Option<Vec<Option<f64>>>,
    pub sulphur_dioxide: Option<Vec<Option<f64>>>,
    pub carbon_monoxide: Option<Vec<Option<f64>>>,
}

impl HourlySeries {
    // ---
    pub fn column(&self, pollutant: Pollutant) -> Option<&[Option<f64>]> {
        let column = match pollutant {
            Pollutant::Pm25 => &self.pm2_5,
            Pollutant::Pm10 => &self.pm10,
            Pollutant::O3 => &self.ozone,
            Pollutant::No2 => &self.nitrogen_dioxide,
            Pollutant::So2 => &self.sulphur_dioxide,
            Pollutant::Co => &self.carbon_monoxide,
        };
        column.as_deref()
    }

    /// Number of time slots, `0` when the time array is missing.
    pub fn len(&self) -> usize {
        self.time.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn value_at(&self, pollutant: Pollutant, index: usize) -> Option<f64> {
        self.column(pollutant)
            .and_then(|col| col.get(index).copied().flatten())
    }

    /// Row-oriented view: one [`Reading`] per time slot.
    pub fn readings(&self) -> Vec<Reading> {
        // ---
        let Some(time) = self.time.as_ref() else {
            return Vec::new();
        };

        time.iter()
            .enumerate()
            .map(|(i, ts)| Reading {
                timestamp: ts.clone(),
                concentrations: Concentrations {
                    pm2_5: self.value_at(Pollutant::Pm25, i),
                    pm10: self.value_at(Pollutant::Pm10, i),
                    ozone: self.value_at(Pollutant::O3, i),
                    nitrogen_dioxide: self.value_at(Pollutant::No2, i),
                    sulphur_dioxide: self.value_at(Pollutant::So2, i),
                    carbon_monoxide: self.value_at(Pollutant::Co, i),
                },
            })
            .collect()
    }

    /// Non-null values of `pollutant` within the time window.
    pub fn values(&self, pollutant: Pollutant) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).filter_map(move |i| self.value_at(pollutant, i))
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn create_test_series() -> HourlySeries {
        // ---
        HourlySeries {
            time: Some(vec![
                Some("2024-05-01T00:00".to_string()),
                Some("2024-05-01T01:00".to_string()),
                None,
            ]),
            pm2_5: Some(vec![Some(10.0), None, Some(30.0)]),
            ozone: Some(vec![Some(80.0)]),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_local_date_formats() {
        // ---
        let may_1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_local_date("2024-05-01T13:00"), Some(may_1));
        assert_eq!(parse_local_date("2024-05-01T13:00:00"), Some(may_1));
        assert_eq!(parse_local_date("2024-05-01T13:00:00.000"), Some(may_1));
        assert_eq!(parse_local_date("2024-05-01"), Some(may_1));
        assert_eq!(parse_local_date("  2024-05-01T23:00 "), Some(may_1));
    }

    #[test]
    fn test_parse_local_date_keeps_offset_date() {
        // ---
        // 23:30 at +05:30 is still May 1st locally, even though it is
        // 18:00 UTC; 01:00 at +05:30 is May 1st locally but April 30th UTC.
        let may_1 = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_local_date("2024-05-01T23:30:00+05:30"), Some(may_1));
        assert_eq!(parse_local_date("2024-05-01T01:00:00+05:30"), Some(may_1));
        assert_eq!(parse_local_date("2024-05-01T12:00:00Z"), Some(may_1));
    }

    #[test]
    fn test_parse_local_date_rejects_garbage() {
        // ---
        assert_eq!(parse_local_date(""), None);
        assert_eq!(parse_local_date("not-a-date"), None);
        assert_eq!(parse_local_date("2024-13-01T00:00"), None);
    }

    #[test]
    fn test_readings_pad_short_columns_with_none() {
        // ---
        let readings = create_test_series().readings();
        assert_eq!(readings.len(), 3);

        assert_eq!(readings[0].concentrations.pm2_5, Some(10.0));
        assert_eq!(readings[0].concentrations.ozone, Some(80.0));
        assert_eq!(readings[1].concentrations.pm2_5, None);
        assert_eq!(readings[1].concentrations.ozone, None);
        assert_eq!(readings[2].timestamp, None);
        assert_eq!(readings[2].local_date(), None);
        assert_eq!(readings[0].concentrations.present_count(), 2);
    }

    #[test]
    fn test_missing_time_array_yields_no_readings() {
        // ---
        let series = HourlySeries {
            pm2_5: Some(vec![Some(10.0)]),
            ..Default::default()
        };
        assert!(series.is_empty());
        assert!(series.readings().is_empty());
        assert_eq!(series.values(Pollutant::Pm25).count(), 0);
    }

    #[test]
    fn test_values_skip_nulls() {
        // ---
        let series = create_test_series();
        let pm25: Vec<f64> = series.values(Pollutant::Pm25).collect();
        assert_eq!(pm25, vec![10.0, 30.0]);
    }

    #[test]
    fn test_deserialize_provider_payload() {
        // ---
        let json = r#"{
            "time": ["2024-05-01T00:00", "2024-05-01T01:00"],
            "pm2_5": [12.5, null],
            "carbon_monoxide": [300.0, 310.0]
        }"#;
        let series: HourlySeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.pm10, None);
        assert_eq!(series.readings()[1].concentrations.carbon_monoxide, Some(310.0));
    }
}
