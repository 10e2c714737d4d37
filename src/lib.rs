//! # alertmap
//!
//! Core of an accident alert verification workflow: review a detected
//! accident, open driving directions to it, and show a schematic map placing
//! the accident and an approximate user location on a drawing surface with a
//! rough distance and ETA.
//!
//! The map is deliberately simple. Coordinates are projected linearly around
//! the accident, distances come from surface units, and a synthetic user
//! location stands in whenever no real position is available.

pub mod alert;
pub mod core;
pub mod location;
pub mod navigation;
pub mod page;
pub mod prelude;
pub mod rendering;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::AlertMapOptions,
    estimate::{estimate, EstimateResult, Estimator},
    geo::{LatLng, Point},
    map::AccidentMap,
    projection::{project, unproject, ProjectionContext},
};

pub use location::{is_fallback, LocationError, LocationProvider, UserLocation};

pub use alert::{AccidentAlert, AlertAction, Decision};

pub use navigation::{directions_url, DirectionsRequest, TravelMode};

pub use page::MapQuery;

pub use rendering::{context::RenderContext, scene::MapScene, style::MapStyle};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),
}

/// Error type alias for convenience
pub type Error = MapError;
