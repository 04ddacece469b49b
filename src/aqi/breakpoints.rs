//! Static breakpoint tables, one per pollutant.
//!
//! Each table maps closed concentration intervals onto closed AQI intervals
//! (EPA-style scale). Gas concentrations are looked up after unit
//! conversion, so the gas tables are in ppb (ppm for CO).

use serde::Serialize;

use super::Pollutant;

// ---

/// Identifier for the tables and constants in this module and in the trend
/// and confidence models. Any change to a value must ship under a new id.
pub const CALIBRATION_VERSION: &str = "epa-2012";

/// All calibration ids this build knows about.
pub const KNOWN_CALIBRATIONS: &[&str] = &[CALIBRATION_VERSION];

/// A concentration interval `[min, max]` mapped onto `[aqi_min, aqi_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakpoint {
    pub min: f64,
    pub max: f64,
    pub aqi_min: u32,
    pub aqi_max: u32,
}

impl Breakpoint {
    const fn new(min: f64, max: f64, aqi_min: u32, aqi_max: u32) -> Self {
        Self {
            min,
            max,
            aqi_min,
            aqi_max,
        }
    }

    /// Inclusive at both ends.
    pub fn contains(&self, concentration: f64) -> bool {
        concentration >= self.min && concentration <= self.max
    }

    /// AQI points per concentration unit.
    pub fn slope(&self) -> f64 {
        f64::from(self.aqi_max - self.aqi_min) / (self.max - self.min)
    }
}

pub const PM25: [Breakpoint; 6] = [
    Breakpoint::new(0.0, 12.0, 0, 50),
    Breakpoint::new(12.1, 35.4, 51, 100),
    Breakpoint::new(35.5, 55.4, 101, 150),
    Breakpoint::new(55.5, 150.4, 151, 200),
    Breakpoint::new(150.5, 250.4, 201, 300),
    Breakpoint::new(250.5, 500.4, 301, 500),
];

pub const PM10: [Breakpoint; 6] = [
    Breakpoint::new(0.0, 54.0, 0, 50),
    Breakpoint::new(55.0, 154.0, 51, 100),
    Breakpoint::new(155.0, 254.0, 101, 150),
    Breakpoint::new(255.0, 354.0, 151, 200),
    Breakpoint::new(355.0, 424.0, 201, 300),
    Breakpoint::new(425.0, 604.0, 301, 500),
];

pub const O3: [Breakpoint; 5] = [
    Breakpoint::new(0.0, 54.0, 0, 50),
    Breakpoint::new(55.0, 70.0, 51, 100),
    Breakpoint::new(71.0, 85.0, 101, 150),
    Breakpoint::new(86.0, 105.0, 151, 200),
    Breakpoint::new(106.0, 200.0, 201, 300),
];

pub const NO2: [Breakpoint; 6] = [
    Breakpoint::new(0.0, 53.0, 0, 50),
    Breakpoint::new(54.0, 100.0, 51, 100),
    Breakpoint::new(101.0, 360.0, 101, 150),
    Breakpoint::new(361.0, 649.0, 151, 200),
    Breakpoint::new(650.0, 1249.0, 201, 300),
    Breakpoint::new(1250.0, 2049.0, 301, 500),
];

pub const SO2: [Breakpoint; 5] = [
    Breakpoint::new(0.0, 35.0, 0, 50),
    Breakpoint::new(36.0, 75.0, 51, 100),
    Breakpoint::new(76.0, 185.0, 101, 150),
    Breakpoint::new(186.0, 304.0, 151, 200),
    Breakpoint::new(305.0, 604.0, 201, 300),
];

pub const CO: [Breakpoint; 5] = [
    Breakpoint::new(0.0, 4.4, 0, 50),
    Breakpoint::new(4.5, 9.4, 51, 100),
    Breakpoint::new(9.5, 12.4, 101, 150),
    Breakpoint::new(12.5, 15.4, 151, 200),
    Breakpoint::new(15.5, 30.4, 201, 300),
];

/// Breakpoint table for `pollutant`.
pub fn table(pollutant: Pollutant) -> &'static [Breakpoint] {
    match pollutant {
        Pollutant::Pm25 => &PM25,
        Pollutant::Pm10 => &PM10,
        Pollutant::O3 => &O3,
        Pollutant::No2 => &NO2,
        Pollutant::So2 => &SO2,
        Pollutant::Co => &CO,
    }
}

/// Whether `version` names a calibration this build can serve.
pub fn is_known_calibration(version: &str) -> bool {
    KNOWN_CALIBRATIONS.contains(&version)
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::aqi::PRIORITY;

    #[test]
    fn test_tables_are_ordered_and_non_overlapping() {
        // ---
        for pollutant in PRIORITY {
            let bps = table(pollutant);
            assert!(!bps.is_empty(), "{} has no breakpoints", pollutant);
            assert_eq!(bps[0].min, 0.0, "{} should start at zero", pollutant);

            for bp in bps {
                assert!(bp.min <= bp.max, "{}: min > max in {:?}", pollutant, bp);
                assert!(bp.aqi_min < bp.aqi_max, "{}: empty AQI range {:?}", pollutant, bp);
            }

            for pair in bps.windows(2) {
                assert!(
                    pair[0].max < pair[1].min,
                    "{}: {:?} overlaps {:?}",
                    pollutant,
                    pair[0],
                    pair[1]
                );
                assert_eq!(
                    pair[0].aqi_max + 1,
                    pair[1].aqi_min,
                    "{}: AQI ranges not contiguous",
                    pollutant
                );
            }
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        // ---
        let bp = PM25[1];
        assert!(bp.contains(12.1));
        assert!(bp.contains(35.4));
        assert!(!bp.contains(12.05));
        assert!(!bp.contains(35.45));
    }

    #[test]
    fn test_calibration_lookup() {
        // ---
        assert!(is_known_calibration("epa-2012"));
        assert!(!is_known_calibration("epa-2024"));
    }
}
