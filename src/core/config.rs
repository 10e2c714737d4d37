//! Configuration for the schematic accident map
//!
//! Every knob has a default matching the behaviour of the accident page, so an
//! empty JSON object deserializes to the stock configuration. Options are
//! grouped by the component that consumes them.

use crate::core::constants::{
    DEFAULT_SCALE, FALLBACK_DISTANCE_MILES, FALLBACK_OFFSET_DEGREES, FALLBACK_TOLERANCE_DEGREES,
    GEOLOCATION_MAXIMUM_AGE_MS, GEOLOCATION_TIMEOUT_MS, MINUTES_PER_MILE, PIXELS_PER_MILE,
};
use crate::rendering::style::MapStyle;
use crate::{MapError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Process-wide stock configuration.
pub static DEFAULT_OPTIONS: Lazy<AlertMapOptions> = Lazy::new(AlertMapOptions::default);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertMapOptions {
    pub projection: ProjectionConfig,
    pub estimator: EstimatorConfig,
    pub fallback: FallbackConfig,
    pub geolocation: GeolocationConfig,
    pub style: MapStyle,
}

impl AlertMapOptions {
    /// Parses options from JSON and validates them
    pub fn from_json(json: &str) -> Result<Self> {
        let options: AlertMapOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.projection.validate()?;
        self.estimator.validate()?;
        self.fallback.validate()?;
        self.geolocation.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Surface units per degree
    pub scale: f64,
}

impl ProjectionConfig {
    fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(MapError::Config(format!(
                "projection scale must be positive, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub pixels_per_mile: f64,
    pub minutes_per_mile: f64,
    pub fallback_distance_miles: f64,
}

impl EstimatorConfig {
    fn validate(&self) -> Result<()> {
        if !(self.pixels_per_mile.is_finite() && self.pixels_per_mile > 0.0) {
            return Err(MapError::Config(format!(
                "pixels_per_mile must be positive, got {}",
                self.pixels_per_mile
            )));
        }
        if !(self.minutes_per_mile.is_finite() && self.minutes_per_mile >= 0.0) {
            return Err(MapError::Config(format!(
                "minutes_per_mile must not be negative, got {}",
                self.minutes_per_mile
            )));
        }
        if !(self.fallback_distance_miles.is_finite() && self.fallback_distance_miles >= 0.0) {
            return Err(MapError::Config(format!(
                "fallback_distance_miles must not be negative, got {}",
                self.fallback_distance_miles
            )));
        }
        Ok(())
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            pixels_per_mile: PIXELS_PER_MILE,
            minutes_per_mile: MINUTES_PER_MILE,
            fallback_distance_miles: FALLBACK_DISTANCE_MILES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Degrees subtracted from the accident location on both axes
    pub offset_degrees: f64,
    /// Maximum per-axis difference still recognised as the fallback point
    pub tolerance_degrees: f64,
}

impl FallbackConfig {
    fn validate(&self) -> Result<()> {
        if !(self.tolerance_degrees.is_finite() && self.tolerance_degrees >= 0.0) {
            return Err(MapError::Config(format!(
                "fallback tolerance must not be negative, got {}",
                self.tolerance_degrees
            )));
        }
        if !self.offset_degrees.is_finite() {
            return Err(MapError::Config("fallback offset must be finite".to_string()));
        }
        Ok(())
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            offset_degrees: FALLBACK_OFFSET_DEGREES,
            tolerance_degrees: FALLBACK_TOLERANCE_DEGREES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl GeolocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn maximum_age(&self) -> Duration {
        Duration::from_millis(self.maximum_age_ms)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(MapError::Config(
                "geolocation timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: GEOLOCATION_TIMEOUT_MS,
            maximum_age_ms: GEOLOCATION_MAXIMUM_AGE_MS,
        }
    }
}
