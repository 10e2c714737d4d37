//! Prelude module for common alertmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use alertmap::prelude::*;`

pub use crate::core::{
    config::{
        AlertMapOptions, EstimatorConfig, FallbackConfig, GeolocationConfig, ProjectionConfig,
        DEFAULT_OPTIONS,
    },
    estimate::{estimate, EstimateResult, Estimator},
    geo::{LatLng, Point},
    map::AccidentMap,
    projection::{project, unproject, ProjectionContext},
};

pub use crate::location::{
    is_fallback, CachedLocationProvider, FixedLocationProvider, LocationError, LocationProvider,
    Position, PositionOptions, UnavailableLocationProvider, UserLocation,
};

#[cfg(feature = "tokio-runtime")]
pub use crate::location::{resolve_user_location, LocationResolver, LocationSession};

pub use crate::alert::{
    AccidentAlert, AccidentDetails, AlertAction, AlertReview, Decision, EmergencyService, Severity,
};

pub use crate::navigation::{directions_url, DirectionsRequest, TravelMode};

pub use crate::page::MapQuery;

pub use crate::rendering::{
    context::{DrawCommand, NoticeAnchor, RenderContext},
    scene::MapScene,
    style::{Color, MapStyle},
    svg::{save_svg, to_svg},
};

pub use crate::{Error as MapError, Result};

pub use std::{sync::Arc, time::Duration};
