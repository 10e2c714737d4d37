use crate::core::config::GeolocationConfig;
use crate::core::geo::LatLng;
use async_trait::async_trait;
use instant::Instant;
use std::time::Duration;

/// Why a position could not be obtained
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("location request timed out after {0:?}")]
    Timeout(Duration),
}

/// A fix reported by a provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub coords: LatLng,
    /// Accuracy radius in meters, when the provider reports one
    pub accuracy_m: Option<f64>,
    pub timestamp: Instant,
}

impl Position {
    pub fn new(coords: LatLng) -> Self {
        Self {
            coords,
            accuracy_m: None,
            timestamp: Instant::now(),
        }
    }

    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }

    pub fn age(&self) -> Duration {
        self.timestamp.elapsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Deadline for a single request
    pub timeout: Duration,
    /// Oldest cached fix that may still be returned
    pub maximum_age: Duration,
}

impl From<&GeolocationConfig> for PositionOptions {
    fn from(config: &GeolocationConfig) -> Self {
        Self {
            timeout: config.timeout(),
            maximum_age: config.maximum_age(),
        }
    }
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self::from(&GeolocationConfig::default())
    }
}

/// Source of real-world positions (platform location service, GPS, test double)
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> std::result::Result<Position, LocationError>;
}

/// Always reports the same coordinate
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    coords: LatLng,
}

impl FixedLocationProvider {
    pub fn new(coords: LatLng) -> Self {
        Self { coords }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> std::result::Result<Position, LocationError> {
        Ok(Position::new(self.coords))
    }
}

/// Stands in for an environment without location access
#[derive(Debug, Clone, Default)]
pub struct UnavailableLocationProvider;

#[async_trait]
impl LocationProvider for UnavailableLocationProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> std::result::Result<Position, LocationError> {
        Err(LocationError::PermissionDenied)
    }
}
