use alertmap::prelude::*;

/// End-to-end checks of the accident map through the public API
#[cfg(test)]
mod accident_map_tests {
    use super::*;

    const ACCIDENT: LatLng = LatLng {
        lat: 30.275224,
        lng: 77.989081,
    };

    fn surface() -> Point {
        Point::new(896.0, 500.0)
    }

    #[test]
    fn test_origin_maps_to_surface_center() {
        for origin in [ACCIDENT, LatLng::new(-45.0, 170.0), LatLng::new(0.0, 0.0)] {
            let ctx = ProjectionContext::new(origin, surface(), 10_000.0);
            assert_eq!(project(&origin, &ctx), Point::new(448.0, 250.0));
        }
    }

    #[test]
    fn test_projection_depends_only_on_displacement() {
        let base = ProjectionContext::new(ACCIDENT, surface(), 10_000.0);
        let point = LatLng::new(30.2801, 77.9799);

        for (d_lat, d_lng) in [(1.0, -1.0), (-10.5, 20.25), (0.0001, 0.0)] {
            let moved = ProjectionContext::new(ACCIDENT.offset(d_lat, d_lng), surface(), 10_000.0);
            let a = project(&point, &base);
            let b = project(&point.offset(d_lat, d_lng), &moved);
            assert!((a.x - b.x).abs() < 1e-6, "x drifted for ({d_lat}, {d_lng})");
            assert!((a.y - b.y).abs() < 1e-6, "y drifted for ({d_lat}, {d_lng})");
        }
    }

    #[test]
    fn test_fallback_detection_examples() {
        assert!(is_fallback(&ACCIDENT, &LatLng::new(30.265224, 77.979081)));
        assert!(!is_fallback(&ACCIDENT, &LatLng::new(30.275224, 77.999081)));
    }

    #[test]
    fn test_estimate_examples() {
        let fallback = estimate(&Point::new(1.0, 2.0), &Point::new(300.0, 400.0), true);
        assert_eq!(fallback.distance_miles, 2.7);
        assert_eq!(fallback.eta_minutes, 8);

        let measured = estimate(&Point::new(100.0, 100.0), &Point::new(100.0, 190.0), false);
        assert_eq!(measured.distance_miles, 3.0);
        assert_eq!(measured.eta_minutes, 9);
    }

    #[test]
    fn test_map_page_flow_with_fallback() {
        let options = AlertMapOptions::default();
        let query = MapQuery::parse(&AccidentAlert::sample().map_query().to_query_string()).unwrap();
        let accident = query.location();
        assert_eq!(accident, ACCIDENT);

        let user = UserLocation::fallback_for(&accident, &options.fallback);
        let map = AccidentMap::new(accident, user, surface(), &options);
        let mut ctx = RenderContext::new(surface().x, surface().y).unwrap();
        MapScene::new(&map, &options.style).render(&mut ctx).unwrap();

        let svg = to_svg(&ctx);
        assert!(svg.contains("Distance: 2.7 miles | ETA: 8 minutes"));
        assert!(svg.contains("Using simulated location."));
        assert!(svg.contains("Your Location"));
    }

    #[test]
    fn test_map_page_flow_with_real_location() {
        let options = AlertMapOptions::default();
        let map = AccidentMap::from_points(ACCIDENT, LatLng::new(30.275224, 77.999081), surface(), &options);

        let mut ctx = RenderContext::new(surface().x, surface().y).unwrap();
        MapScene::new(&map, &options.style).render(&mut ctx).unwrap();

        let svg = to_svg(&ctx);
        assert!(svg.contains("Distance: 3.3 miles | ETA: 10 minutes"));
        assert!(!svg.contains("Using simulated location."));
    }

    #[test]
    fn test_custom_configuration_flows_through() {
        let options = AlertMapOptions::from_json(
            r#"{"projection": {"scale": 5000.0}, "estimator": {"pixels_per_mile": 10.0}}"#,
        )
        .unwrap();

        let user = UserLocation::Located(ACCIDENT.offset(-0.01, 0.0));
        let map = AccidentMap::new(ACCIDENT, user, surface(), &options);

        // 0.01 deg * 5000 = 50 units, / 10 = 5 mi, * 3 = 15 min
        assert!((map.estimate().distance_miles - 5.0).abs() < 1e-9);
        assert_eq!(map.estimate().eta_minutes, 15);
    }

    #[test]
    fn test_proceed_and_deny() {
        let review = AlertReview::new(AccidentAlert::sample());

        match review.decide(Decision::Proceed) {
            AlertAction::OpenDirections(url) => {
                assert!(url.ends_with("destination=30.275224,77.989081&travelmode=driving"))
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(
            review.decide(Decision::Deny),
            AlertAction::Notify("Accident alert has been denied.".to_string())
        );
    }
}
