//! Linear projection from geographic coordinates onto a fixed-size drawing surface.
//!
//! This is a schematic mapping, not a geodesic one: one degree of either axis is
//! `scale` surface units, the origin lands on the surface centre and latitude is
//! inverted so that north is up.

use crate::core::config::ProjectionConfig;
use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Everything needed to place coordinates on one drawing surface.
///
/// The origin is the accident location for a given render session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionContext {
    pub origin: LatLng,
    /// Surface width and height
    pub size: Point,
    pub scale: f64,
}

impl ProjectionContext {
    pub fn new(origin: LatLng, size: Point, scale: f64) -> Self {
        Self {
            origin,
            size,
            scale,
        }
    }

    pub fn from_config(origin: LatLng, size: Point, config: &ProjectionConfig) -> Self {
        Self::new(origin, size, config.scale)
    }

    /// Surface position the origin maps to
    pub fn center(&self) -> Point {
        Point::new(self.size.x / 2.0, self.size.y / 2.0)
    }

    pub fn project(&self, point: &LatLng) -> Point {
        project(point, self)
    }

    pub fn unproject(&self, point: &Point) -> LatLng {
        unproject(point, self)
    }

    /// Whether a surface point falls inside the drawing surface
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= 0.0 && point.x <= self.size.x && point.y >= 0.0 && point.y <= self.size.y
    }
}

/// Projects a coordinate onto the surface described by `ctx`
pub fn project(point: &LatLng, ctx: &ProjectionContext) -> Point {
    let x = (point.lng - ctx.origin.lng) * ctx.scale + ctx.size.x / 2.0;
    let y = (ctx.origin.lat - point.lat) * ctx.scale + ctx.size.y / 2.0;
    Point::new(x, y)
}

/// Maps a surface point back to the coordinate that projects onto it
pub fn unproject(point: &Point, ctx: &ProjectionContext) -> LatLng {
    let lng = (point.x - ctx.size.x / 2.0) / ctx.scale + ctx.origin.lng;
    let lat = ctx.origin.lat - (point.y - ctx.size.y / 2.0) / ctx.scale;
    LatLng::new(lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accident_context() -> ProjectionContext {
        ProjectionContext::new(
            LatLng::new(30.275224, 77.989081),
            Point::new(800.0, 500.0),
            10_000.0,
        )
    }

    #[test]
    fn test_origin_maps_to_center() {
        let ctx = accident_context();
        assert_eq!(ctx.project(&ctx.origin), Point::new(400.0, 250.0));
        assert_eq!(ctx.project(&ctx.origin), ctx.center());
    }

    #[test]
    fn test_north_is_up_and_east_is_right() {
        let ctx = accident_context();
        let center = ctx.center();

        let north = ctx.project(&ctx.origin.offset(0.001, 0.0));
        assert!(north.y < center.y);
        assert!((north.x - center.x).abs() < 1e-9);

        let east = ctx.project(&ctx.origin.offset(0.0, 0.001));
        assert!(east.x > center.x);
        assert!((east.y - center.y).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_offset_projects_up_left_by_hundred_units() {
        let ctx = accident_context();
        let user = ctx.project(&LatLng::new(30.265224, 77.979081));

        assert!((user.x - 300.0).abs() < 1e-6);
        assert!((user.y - 350.0).abs() < 1e-6);
    }

    #[test]
    fn test_translation_invariance() {
        let ctx = accident_context();
        let point = LatLng::new(30.27, 77.995);
        let delta = (12.5, -40.25);

        let moved_ctx = ProjectionContext {
            origin: ctx.origin.offset(delta.0, delta.1),
            ..ctx
        };
        let moved_point = point.offset(delta.0, delta.1);

        let a = ctx.project(&point);
        let b = moved_ctx.project(&moved_point);
        assert!((a.x - b.x).abs() < 1e-6);
        assert!((a.y - b.y).abs() < 1e-6);
    }

    #[test]
    fn test_unproject_inverts_project() {
        let ctx = accident_context();
        let point = LatLng::new(30.2801, 77.9712);
        let back = ctx.unproject(&ctx.project(&point));

        assert!(back.approx_eq(&point, 1e-9));
    }

    #[test]
    fn test_project_is_deterministic() {
        let ctx = accident_context();
        let point = LatLng::new(30.123456, 77.654321);
        let first = project(&point, &ctx);
        let second = project(&point, &ctx);

        assert_eq!(first.x.to_bits(), second.x.to_bits());
        assert_eq!(first.y.to_bits(), second.y.to_bits());
    }

    #[test]
    fn test_non_finite_input_propagates() {
        let ctx = accident_context();
        let projected = ctx.project(&LatLng::new(f64::NAN, 77.0));
        assert!(projected.y.is_nan());
        assert!(projected.x.is_finite());
    }

    #[test]
    fn test_contains() {
        let ctx = accident_context();
        assert!(ctx.contains(&ctx.center()));
        assert!(!ctx.contains(&Point::new(-1.0, 10.0)));
        assert!(!ctx.contains(&Point::new(10.0, 501.0)));
    }
}
