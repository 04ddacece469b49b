//! Closed set of tracked pollutants.
//!
//! Every lookup that used to be keyed by a free-form name goes through
//! [`Pollutant`]. [`PRIORITY`] is the single ordering used for dominant
//! pollutant tie-breaks and for report output.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pollutant {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "CO")]
    Co,
}

/// Tie-break order: the earlier entry wins when two sub-indices are equal.
pub const PRIORITY: [Pollutant; 6] = [
    Pollutant::Pm25,
    Pollutant::Pm10,
    Pollutant::O3,
    Pollutant::No2,
    Pollutant::So2,
    Pollutant::Co,
];

impl Pollutant {
    /// Short label used in reports and JSON output.
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::O3 => "O3",
            Pollutant::No2 => "NO2",
            Pollutant::So2 => "SO2",
            Pollutant::Co => "CO",
        }
    }

    /// Field name of this pollutant in the provider's hourly payload.
    pub fn field_name(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm2_5",
            Pollutant::Pm10 => "pm10",
            Pollutant::O3 => "ozone",
            Pollutant::No2 => "nitrogen_dioxide",
            Pollutant::So2 => "sulphur_dioxide",
            Pollutant::Co => "carbon_monoxide",
        }
    }

    /// Multiplier applied to the raw µg/m³ value before breakpoint lookup.
    ///
    /// Gases are converted to ppb (ppm for CO); particulates are used as
    /// measured.
    pub fn conversion_factor(self) -> f64 {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => 1.0,
            Pollutant::O3 => 0.5,
            Pollutant::No2 => 0.53,
            Pollutant::So2 => 0.38,
            Pollutant::Co => 0.000873,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
