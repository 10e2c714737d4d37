//! Where the user is, relative to the accident.
//!
//! When no real position is available the user is placed at a synthetic point
//! offset south-west of the accident. The location carries that fact as a tag
//! from the moment it is built; [`is_fallback`] recognises the synthetic point
//! from raw coordinates for callers that only have untagged input.

pub mod cache;
pub mod provider;
#[cfg(feature = "tokio-runtime")]
pub mod resolver;

pub use cache::CachedLocationProvider;
pub use provider::{
    FixedLocationProvider, LocationError, LocationProvider, Position, PositionOptions,
    UnavailableLocationProvider,
};
#[cfg(feature = "tokio-runtime")]
pub use resolver::{request_position, resolve_user_location, LocationResolver, LocationSession};

use crate::core::config::FallbackConfig;
use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// User position tagged with how it was obtained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "position", rename_all = "snake_case")]
pub enum UserLocation {
    /// A fix reported by a location provider
    Located(LatLng),
    /// Synthetic point derived from the accident location
    Fallback(LatLng),
}

impl UserLocation {
    /// Builds the synthetic location for `accident`
    pub fn fallback_for(accident: &LatLng, config: &FallbackConfig) -> Self {
        UserLocation::Fallback(fallback_position(accident, config.offset_degrees))
    }

    /// Tags an untagged point, treating anything close to the synthetic
    /// offset as a fallback
    pub fn classify(accident: &LatLng, point: LatLng, config: &FallbackConfig) -> Self {
        if is_fallback_with(accident, &point, config) {
            UserLocation::Fallback(point)
        } else {
            UserLocation::Located(point)
        }
    }

    pub fn position(&self) -> LatLng {
        match self {
            UserLocation::Located(p) | UserLocation::Fallback(p) => *p,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, UserLocation::Fallback(_))
    }
}

/// The synthetic user position: accident minus `offset` degrees on both axes
pub fn fallback_position(accident: &LatLng, offset: f64) -> LatLng {
    accident.offset(-offset, -offset)
}

/// Checks whether `user` sits on the stock fallback offset of `accident`
pub fn is_fallback(accident: &LatLng, user: &LatLng) -> bool {
    is_fallback_with(accident, user, &FallbackConfig::default())
}

/// Tolerance-based check; the fallback point may carry floating-point drift
pub fn is_fallback_with(accident: &LatLng, user: &LatLng, config: &FallbackConfig) -> bool {
    let expected = fallback_position(accident, config.offset_degrees);
    user.approx_eq(&expected, config.tolerance_degrees)
}
