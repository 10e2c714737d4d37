use crate::core::{
    config::AlertMapOptions,
    estimate::{EstimateResult, Estimator},
    geo::{LatLng, Point},
    projection::ProjectionContext,
};
use crate::location::UserLocation;

/// One render session of the accident map.
///
/// Projects both locations onto the surface and estimates the trip once, on
/// construction. The projection is always anchored on the accident, and a
/// located point sitting on the synthetic offset is shown as a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct AccidentMap {
    accident: LatLng,
    user: UserLocation,
    projection: ProjectionContext,
    accident_px: Point,
    user_px: Point,
    estimate: EstimateResult,
}

impl AccidentMap {
    pub fn new(accident: LatLng, user: UserLocation, size: Point, options: &AlertMapOptions) -> Self {
        let user = match user {
            UserLocation::Located(point) => UserLocation::classify(&accident, point, &options.fallback),
            fallback => fallback,
        };
        let projection = ProjectionContext::from_config(accident, size, &options.projection);
        let accident_px = projection.project(&accident);
        let user_px = projection.project(&user.position());
        let estimate = Estimator::new(options.estimator.clone()).estimate(
            &accident_px,
            &user_px,
            user.is_fallback(),
        );

        log::debug!(
            "accident map {}x{}: accident {:?} user {:?} ({})",
            size.x,
            size.y,
            accident_px,
            user_px,
            estimate
        );

        Self {
            accident,
            user,
            projection,
            accident_px,
            user_px,
            estimate,
        }
    }

    /// Builds a session from an untagged user point, recognising the
    /// synthetic fallback offset by proximity
    pub fn from_points(accident: LatLng, user: LatLng, size: Point, options: &AlertMapOptions) -> Self {
        let user = UserLocation::classify(&accident, user, &options.fallback);
        Self::new(accident, user, size, options)
    }

    pub fn accident(&self) -> LatLng {
        self.accident
    }

    pub fn user(&self) -> UserLocation {
        self.user
    }

    pub fn projection(&self) -> &ProjectionContext {
        &self.projection
    }

    pub fn size(&self) -> Point {
        self.projection.size
    }

    pub fn accident_px(&self) -> Point {
        self.accident_px
    }

    pub fn user_px(&self) -> Point {
        self.user_px
    }

    pub fn estimate(&self) -> EstimateResult {
        self.estimate
    }

    /// Whether the simulated-location advisory should be shown
    pub fn show_fallback_notice(&self) -> bool {
        self.user.is_fallback()
    }

    /// Coordinate under a surface position
    pub fn coordinate_at(&self, point: &Point) -> LatLng {
        self.projection.unproject(point)
    }
}
