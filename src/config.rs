//! Configuration loader for the `aqi-pipeline` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller), so `env::var` calls are not scattered through the
//! handlers.
use std::{env, net::SocketAddr};

use anyhow::{anyhow, Result};

use crate::aqi::breakpoints::{is_known_calibration, CALIBRATION_VERSION, KNOWN_CALIBRATIONS};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u32 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable with a default value.
macro_rules! env_or {
    ($var_name:expr, $default:expr) => {
        env::var($var_name).unwrap_or_else(|_| $default.to_string())
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Maximum number of locations accepted in one weekly/report request.
    pub max_locations: u32,

    /// Calibration id selected for the breakpoint tables and heuristics.
    pub calibration: String,

    /// Region name used in report text.
    pub region: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_locations: 50,
            calibration: CALIBRATION_VERSION.to_string(),
            region: "the monitored region".to_string(),
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `AQI_BIND_ADDR` – socket address to listen on (default: `0.0.0.0:8080`)
/// - `AQI_MAX_LOCATIONS` – locations per request (default: 50)
/// - `AQI_CALIBRATION` – calibration id (default: `epa-2012`)
/// - `AQI_REGION` – region name for report text
///
/// Returns an error if any variable is invalid or the calibration is not one
/// this build ships.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let bind_addr = env::var("AQI_BIND_ADDR")
        .ok()
        .map(|v| v.parse::<SocketAddr>())
        .transpose()
        .map_err(|e| anyhow!("Invalid AQI_BIND_ADDR: {}", e))?
        .unwrap_or(defaults.bind_addr);
    let max_locations = parse_env_u32!("AQI_MAX_LOCATIONS", defaults.max_locations);
    let calibration = env_or!("AQI_CALIBRATION", defaults.calibration);
    let region = env_or!("AQI_REGION", defaults.region);

    if !is_known_calibration(&calibration) {
        return Err(anyhow!(
            "Unknown AQI_CALIBRATION '{}', expected one of {:?}",
            calibration,
            KNOWN_CALIBRATIONS
        ));
    }

    if max_locations == 0 {
        return Err(anyhow!("AQI_MAX_LOCATIONS must be at least 1"));
    }

    Ok(Config {
        bind_addr,
        max_locations,
        calibration,
        region,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  AQI_BIND_ADDR     : {}", self.bind_addr);
        tracing::info!("  AQI_MAX_LOCATIONS : {}", self.max_locations);
        tracing::info!("  AQI_CALIBRATION   : {}", self.calibration);
        tracing::info!("  AQI_REGION        : {}", self.region);
    }
}
