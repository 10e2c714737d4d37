//! Core constants for the schematic accident map.
//! Keeping them in a single place makes it easier to tweak the illustrative magic numbers.

/// Surface pixels per degree of latitude/longitude before centering.
pub const DEFAULT_SCALE: f64 = 10_000.0;

/// Pixel-to-mile divisor used by the distance estimate (no geodesic basis).
pub const PIXELS_PER_MILE: f64 = 30.0;

/// Fixed travel-speed assumption behind the ETA.
pub const MINUTES_PER_MILE: f64 = 3.0;

/// Distance reported when the user location is synthetic.
pub const FALLBACK_DISTANCE_MILES: f64 = 2.7;

/// Degrees subtracted from the accident lat/lng to build the fallback user location.
pub const FALLBACK_OFFSET_DEGREES: f64 = 0.01;

/// Tolerance when recognising a fallback location from raw coordinates.
pub const FALLBACK_TOLERANCE_DEGREES: f64 = 0.001;

/// How long a location request may take before the fallback is kept.
pub const GEOLOCATION_TIMEOUT_MS: u64 = 5_000;

/// How old a cached fix may be and still be reused.
pub const GEOLOCATION_MAXIMUM_AGE_MS: u64 = 60_000;

/// Spacing between painted roads on the background grid.
pub const ROAD_SPACING: f64 = 100.0;

/// Position of the first road on each axis.
pub const ROAD_FIRST_OFFSET: f64 = 50.0;

/// Default drawing surface (matches the map card on the accident page).
pub const DEFAULT_SURFACE_SIZE: (f64, f64) = (896.0, 500.0);
