//! Heuristic test for whether two candidate routes are materially different.
//!
//! The comparison is approximate: it never checks exact geometric equality.
//! Two routes are treated as the same path when they have the same number of
//! points, similar reported lengths, and most of a handful of evenly spaced
//! sample points lie close together.
//!
//! Two distance thresholds exist and are used at different call sites:
//! [`DifferenceThresholds::general`] (0.5 km) when collapsing provider
//! variants, and [`DifferenceThresholds::uniqueness`] (0.3 km) when deciding
//! whether a candidate joins the set of already-accepted routes. They are kept
//! apart because merging them changes which routes survive deduplication.

use crate::RouteCandidate;

/// Tunable limits for [`routes_differ`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifferenceThresholds {
    /// Reported lengths further apart than this mark the routes as different.
    pub distance_km: f64,
    /// Maximum number of evenly spaced points compared between the routes.
    pub sample_count: usize,
    /// Sample pairs further apart than this count as divergent.
    pub separation_km: f64,
    /// Routes differ when more than this share of sample pairs diverge.
    pub divergent_fraction: f64,
}

impl DifferenceThresholds {
    /// Length threshold for collapsing provider variants.
    pub const GENERAL_DISTANCE_KM: f64 = 0.5;
    /// Length threshold for the accepted-set uniqueness check.
    pub const UNIQUENESS_DISTANCE_KM: f64 = 0.3;

    const DEFAULT_SAMPLES: usize = 10;
    const DEFAULT_SEPARATION_KM: f64 = 0.1;
    const DEFAULT_DIVERGENT_FRACTION: f64 = 0.3;

    /// Thresholds used when deduplicating provider variants.
    #[must_use]
    pub const fn general() -> Self {
        Self::with_distance(Self::GENERAL_DISTANCE_KM)
    }

    /// Thresholds used when filtering candidates against accepted routes.
    #[must_use]
    pub const fn uniqueness() -> Self {
        Self::with_distance(Self::UNIQUENESS_DISTANCE_KM)
    }

    const fn with_distance(distance_km: f64) -> Self {
        Self {
            distance_km,
            sample_count: Self::DEFAULT_SAMPLES,
            separation_km: Self::DEFAULT_SEPARATION_KM,
            divergent_fraction: Self::DEFAULT_DIVERGENT_FRACTION,
        }
    }
}

impl Default for DifferenceThresholds {
    fn default() -> Self {
        Self::general()
    }
}

/// Return `true` when `a` and `b` should be treated as distinct routes.
///
/// # Examples
/// ```
/// use safar_core::{DifferenceThresholds, RouteCandidate, RoutePoint, routes_differ};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let points = vec![RoutePoint::new(28.61, 77.20)?, RoutePoint::new(28.62, 77.21)?];
/// let a = RouteCandidate::new(points.clone(), 2.0, 5.0)?;
/// let b = RouteCandidate::new(points, 2.6, 5.0)?;
/// assert!(!routes_differ(&a, &a, &DifferenceThresholds::general()));
/// assert!(routes_differ(&a, &b, &DifferenceThresholds::general()));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn routes_differ(a: &RouteCandidate, b: &RouteCandidate, thresholds: &DifferenceThresholds) -> bool {
    let (lhs, rhs) = (a.points(), b.points());
    if lhs.len() != rhs.len() {
        return true;
    }
    if (a.distance_km() - b.distance_km()).abs() > thresholds.distance_km {
        return true;
    }

    let samples = sample_indices(lhs.len(), thresholds.sample_count);
    let divergent = samples
        .iter()
        .filter_map(|&index| lhs.get(index).zip(rhs.get(index)))
        .filter(|(p, q)| p.distance_km(q) > thresholds.separation_km)
        .count();
    divergent as f64 > thresholds.divergent_fraction * samples.len() as f64
}

/// Evenly spaced indices covering `0..len`, first and last included.
fn sample_indices(len: usize, max_samples: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let count = max_samples.clamp(1, len);
    if count == 1 {
        return vec![0];
    }
    let last = len - 1;
    let gaps = count - 1;
    (0..count).map(|i| i * last / gaps).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoutePoint;
    use rstest::{fixture, rstest};

    fn line(count: usize, lat_offset: f64, distance_km: f64) -> RouteCandidate {
        let points = (0..count)
            .map(|i| {
                let step = i as f64 * 0.001;
                RoutePoint::new(28.6 + lat_offset + step, 77.2 + step).expect("valid point")
            })
            .collect();
        RouteCandidate::new(points, distance_km, 10.0).expect("valid candidate")
    }

    #[fixture]
    fn base() -> RouteCandidate {
        line(40, 0.0, 5.0)
    }

    #[rstest]
    fn identical_routes_are_not_different(base: RouteCandidate) {
        assert!(!routes_differ(&base, &base.clone(), &DifferenceThresholds::general()));
        assert!(!routes_differ(&base, &base.clone(), &DifferenceThresholds::uniqueness()));
    }

    #[rstest]
    fn point_count_mismatch_is_different(base: RouteCandidate) {
        let shorter = line(39, 0.0, 5.0);
        assert!(routes_differ(&base, &shorter, &DifferenceThresholds::general()));
    }

    #[rstest]
    fn distance_gap_above_general_threshold_is_different(base: RouteCandidate) {
        let longer = line(40, 0.0, 5.6);
        assert!(routes_differ(&base, &longer, &DifferenceThresholds::general()));
    }

    #[rstest]
    fn thresholds_disagree_between_point_three_and_point_five(base: RouteCandidate) {
        let longer = line(40, 0.0, 5.4);
        assert!(!routes_differ(&base, &longer, &DifferenceThresholds::general()));
        assert!(routes_differ(&base, &longer, &DifferenceThresholds::uniqueness()));
    }

    #[rstest]
    fn shifted_geometry_is_different(base: RouteCandidate) {
        // 0.01 degrees of latitude is roughly 1.1 km.
        let shifted = line(40, 0.01, 5.0);
        assert!(routes_differ(&base, &shifted, &DifferenceThresholds::general()));
    }

    #[rstest]
    fn small_shift_within_separation_is_not_different(base: RouteCandidate) {
        // 0.0005 degrees of latitude is roughly 55 m.
        let nudged = line(40, 0.0005, 5.0);
        assert!(!routes_differ(&base, &nudged, &DifferenceThresholds::general()));
    }

    #[rstest]
    fn minority_divergence_is_tolerated(base: RouteCandidate) {
        let mut points = base.points().to_vec();
        let last = points.len() - 1;
        points[last] = RoutePoint::new(29.0, 77.9).expect("valid point");
        let detour = RouteCandidate::new(points, 5.0, 10.0).expect("valid candidate");
        // One of ten samples diverges: 10% is below the 30% limit.
        assert!(!routes_differ(&base, &detour, &DifferenceThresholds::general()));
    }

    #[rstest]
    #[case(0, 10, vec![])]
    #[case(1, 10, vec![0])]
    #[case(3, 10, vec![0, 1, 2])]
    #[case(19, 10, vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18])]
    #[case(100, 10, vec![0, 11, 22, 33, 44, 55, 66, 77, 88, 99])]
    fn samples_are_evenly_spaced(#[case] len: usize, #[case] max: usize, #[case] expected: Vec<usize>) {
        assert_eq!(sample_indices(len, max), expected);
    }

    /// Ten-point route whose first `moved` points are pushed roughly 11 km
    /// north, so every point is sampled and exactly `moved` samples diverge.
    fn partly_moved(moved: usize) -> RouteCandidate {
        let mut points = line(10, 0.0, 5.0).into_points();
        for point in points.iter_mut().take(moved) {
            *point = RoutePoint::new(point.lat() + 0.1, point.lng()).expect("valid point");
        }
        RouteCandidate::new(points, 5.0, 10.0).expect("valid candidate")
    }

    #[rstest]
    #[case(3, false)]
    #[case(4, true)]
    fn divergent_share_must_exceed_limit(#[case] moved: usize, #[case] expected: bool) {
        let original = line(10, 0.0, 5.0);
        let variant = partly_moved(moved);
        assert_eq!(
            routes_differ(&original, &variant, &DifferenceThresholds::general()),
            expected
        );
    }

    #[rstest]
    #[case(DifferenceThresholds::general(), 0.5)]
    #[case(DifferenceThresholds::uniqueness(), 0.3)]
    fn distance_gap_at_threshold_is_not_different(
        #[case] thresholds: DifferenceThresholds,
        #[case] gap: f64,
    ) {
        let short = line(40, 0.0, 0.0);
        let long = line(40, 0.0, gap);
        assert!(!routes_differ(&short, &long, &thresholds));
        let longer = line(40, 0.0, gap + 0.01);
        assert!(routes_differ(&short, &longer, &thresholds));
    }
}
