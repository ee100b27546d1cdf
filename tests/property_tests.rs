//! Property tests for the route sequencing helpers.

use proptest::prelude::*;
use tienda_api::services::route::{haversine_km, sequence_nearest_neighbor, GeoPoint};

fn arb_point() -> impl Strategy<Value = GeoPoint> {
    // Keep points within a city-sized box so distances stay well conditioned.
    (-34.75f64..-34.45f64, -58.55f64..-58.30f64)
        .prop_map(|(lat, lng)| GeoPoint::new(lat, lng))
}

proptest! {
    #[test]
    fn sequencing_preserves_the_stop_set(
        start in arb_point(),
        points in proptest::collection::vec(arb_point(), 0..12),
    ) {
        let labelled: Vec<(usize, GeoPoint)> =
            points.iter().copied().enumerate().collect();
        let ordered = sequence_nearest_neighbor(start, labelled, |(_, p)| *p);

        prop_assert_eq!(ordered.len(), points.len());
        let mut seen: Vec<usize> = ordered.iter().map(|(i, _)| *i).collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (0..points.len()).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn first_stop_is_the_closest_to_the_start(
        start in arb_point(),
        points in proptest::collection::vec(arb_point(), 1..12),
    ) {
        let ordered = sequence_nearest_neighbor(start, points.clone(), |p| *p);
        let first_distance = haversine_km(start, ordered[0]);
        for p in &points {
            prop_assert!(first_distance <= haversine_km(start, *p) + 1e-9);
        }
    }

    #[test]
    fn distance_is_symmetric_and_non_negative(a in arb_point(), b in arb_point()) {
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-9);
    }
}
