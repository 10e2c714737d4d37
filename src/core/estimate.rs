//! Rough distance and ETA between the user and the accident.
//!
//! The distance is derived from the surface positions with a fixed divisor and
//! has no geodesic meaning; the ETA assumes a constant minutes-per-mile pace.

use crate::core::config::EstimatorConfig;
use crate::core::geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub distance_miles: f64,
    pub eta_minutes: i64,
}

impl fmt::Display for EstimateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Distance: {} miles | ETA: {} minutes",
            tenths(self.distance_miles),
            self.eta_minutes
        )
    }
}

/// One decimal place, exact halves rounded away from zero
fn tenths(value: f64) -> String {
    // x.25 and x.75 are the only exact ties between two tenths
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.rem_euclid(2.0) == 1.0 {
        format!("{:.1}", value + 0.05f64.copysign(value))
    } else {
        format!("{:.1}", value)
    }
}

/// Estimator bound to a set of constants
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimates distance and ETA between two projected positions.
    ///
    /// With `fallback` set the user position is synthetic, so the fixed
    /// fallback distance is reported instead of the surface delta.
    pub fn estimate(&self, accident_px: &Point, user_px: &Point, fallback: bool) -> EstimateResult {
        let distance_miles = if fallback {
            self.config.fallback_distance_miles
        } else {
            accident_px.distance_to(user_px) / self.config.pixels_per_mile
        };

        EstimateResult {
            distance_miles,
            eta_minutes: (distance_miles * self.config.minutes_per_mile).round() as i64,
        }
    }
}

/// Estimates with the stock constants
pub fn estimate(accident_px: &Point, user_px: &Point, fallback: bool) -> EstimateResult {
    Estimator::default().estimate(accident_px, user_px, fallback)
}
