//! Great-circle distance on a spherical Earth.
//!
//! Scores are only reproducible when every caller measures distance the same
//! way, so the radius is fixed at 6371 km rather than borrowed from `geo`'s
//! mean-radius constant.

use geo::Coord;

/// Earth radius in kilometres used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two WGS84 coordinates.
///
/// Coordinates follow the `geo` convention: `x = longitude`, `y = latitude`,
/// both in degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use safar_core::haversine_km;
///
/// let delhi = Coord { x: 77.2090, y: 28.6139 };
/// assert_eq!(haversine_km(delhi, delhi), 0.0);
///
/// let one_degree = haversine_km(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.0, y: 1.0 });
/// assert!((one_degree - 111.19).abs() < 0.01);
/// ```
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let d_lat = (to.y - from.y).to_radians();
    let d_lon = (to.x - from.x).to_radians();
    let half_chord = (d_lat / 2.0).sin().powi(2)
        + from.y.to_radians().cos() * to.y.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push antipodal inputs a hair past 1.0.
    let half_chord = half_chord.clamp(0.0, 1.0);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    EARTH_RADIUS_KM * angle
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn coord(lat: f64, lng: f64) -> Coord<f64> {
        Coord { x: lng, y: lat }
    }

    #[rstest]
    #[case(coord(0.0, 0.0), coord(0.0, 1.0), 111.194_926_6)]
    #[case(coord(28.6139, 77.2090), coord(19.0760, 72.8777), 1_148.095)]
    #[case(coord(90.0, 0.0), coord(-90.0, 0.0), 20_015.086_8)]
    fn matches_known_distances(#[case] a: Coord<f64>, #[case] b: Coord<f64>, #[case] km: f64) {
        let distance = haversine_km(a, b);
        assert!(
            (distance - km).abs() < 0.01,
            "expected ~{km} km, got {distance}"
        );
    }

    #[rstest]
    fn antipodal_points_do_not_produce_nan() {
        let distance = haversine_km(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!(distance.is_finite());
    }

    proptest! {
        #[test]
        fn distance_to_self_is_zero(lat in -90.0_f64..=90.0, lng in -180.0_f64..=180.0) {
            prop_assert_eq!(haversine_km(coord(lat, lng), coord(lat, lng)), 0.0);
        }

        #[test]
        fn distance_is_symmetric(
            lat_a in -90.0_f64..=90.0,
            lng_a in -180.0_f64..=180.0,
            lat_b in -90.0_f64..=90.0,
            lng_b in -180.0_f64..=180.0,
        ) {
            let forward = haversine_km(coord(lat_a, lng_a), coord(lat_b, lng_b));
            let backward = haversine_km(coord(lat_b, lng_b), coord(lat_a, lng_a));
            prop_assert!((forward - backward).abs() < 1e-9);
            prop_assert!(forward >= 0.0);
        }
    }
}
