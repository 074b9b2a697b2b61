//! Route points and candidate routes supplied by a routing provider.

use geo::Coord;
use thiserror::Error;

use crate::geodesy::haversine_km;
use crate::incident::is_wgs84;

/// A latitude/longitude pair on a route polyline.
///
/// Serialised as a `[lat, lng]` array, the order routing clients already use.
///
/// # Examples
/// ```
/// use safar_core::RoutePoint;
///
/// # fn main() -> Result<(), safar_core::RoutePointError> {
/// let point = RoutePoint::new(28.6139, 77.2090)?;
/// assert_eq!(point.lat(), 28.6139);
/// assert!(RoutePoint::new(95.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct RoutePoint {
    lat: f64,
    lng: f64,
}

/// Errors returned by [`RoutePoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RoutePointError {
    /// The coordinate is NaN, infinite, or outside WGS84 bounds.
    #[error("route point ({lat}, {lng}) is not a valid WGS84 coordinate")]
    InvalidCoordinate {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lng: f64,
    },
}

impl RoutePoint {
    /// Validate and construct a point from degrees.
    ///
    /// # Errors
    /// Returns [`RoutePointError::InvalidCoordinate`] when either component
    /// is not finite or lies outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Result<Self, RoutePointError> {
        if !is_wgs84(Coord { x: lng, y: lat }) {
            return Err(RoutePointError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        haversine_km(Coord::from(*self), Coord::from(*other))
    }
}

impl From<RoutePoint> for Coord<f64> {
    fn from(point: RoutePoint) -> Self {
        Self {
            x: point.lng,
            y: point.lat,
        }
    }
}

impl From<RoutePoint> for [f64; 2] {
    fn from(point: RoutePoint) -> Self {
        [point.lat, point.lng]
    }
}

impl TryFrom<[f64; 2]> for RoutePoint {
    type Error = RoutePointError;

    fn try_from([lat, lng]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lat, lng)
    }
}

/// One possible path between two places, as returned by a routing provider.
///
/// Candidates are created per request and discarded afterwards.
///
/// # Examples
/// ```
/// use safar_core::{RouteCandidate, RoutePoint};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let points = vec![RoutePoint::new(28.61, 77.20)?, RoutePoint::new(28.62, 77.21)?];
/// let candidate = RouteCandidate::new(points, 1.5, 6.0)?;
/// assert_eq!(candidate.points().len(), 2);
/// assert!(RouteCandidate::new(Vec::new(), 1.0, 1.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRouteCandidate"))]
pub struct RouteCandidate {
    points: Vec<RoutePoint>,
    distance_km: f64,
    duration_min: f64,
}

/// Errors returned by [`RouteCandidate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RouteCandidateError {
    /// The route had no points.
    #[error("route candidate must contain at least one point")]
    Empty,
    /// The distance was negative or not finite.
    #[error("route distance {0} km must be a non-negative finite number")]
    InvalidDistance(f64),
    /// The duration was negative or not finite.
    #[error("route duration {0} min must be a non-negative finite number")]
    InvalidDuration(f64),
}

impl RouteCandidate {
    /// Validate and construct a candidate.
    ///
    /// # Errors
    /// Returns [`RouteCandidateError`] when `points` is empty or either
    /// measurement is negative or not finite.
    pub fn new(
        points: Vec<RoutePoint>,
        distance_km: f64,
        duration_min: f64,
    ) -> Result<Self, RouteCandidateError> {
        if points.is_empty() {
            return Err(RouteCandidateError::Empty);
        }
        if !is_non_negative(distance_km) {
            return Err(RouteCandidateError::InvalidDistance(distance_km));
        }
        if !is_non_negative(duration_min) {
            return Err(RouteCandidateError::InvalidDuration(duration_min));
        }
        Ok(Self {
            points,
            distance_km,
            duration_min,
        })
    }

    /// Ordered polyline points.
    #[must_use]
    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    /// Route length reported by the provider.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Travel time reported by the provider.
    #[must_use]
    pub const fn duration_min(&self) -> f64 {
        self.duration_min
    }

    /// Consume the candidate and return its points.
    #[must_use]
    pub fn into_points(self) -> Vec<RoutePoint> {
        self.points
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRouteCandidate {
    points: Vec<RoutePoint>,
    distance_km: f64,
    duration_min: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRouteCandidate> for RouteCandidate {
    type Error = RouteCandidateError;

    fn try_from(raw: RawRouteCandidate) -> Result<Self, Self::Error> {
        Self::new(raw.points, raw.distance_km, raw.duration_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn point(lat: f64, lng: f64) -> RoutePoint {
        RoutePoint::new(lat, lng).expect("valid point")
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    #[case(-90.5, 0.0)]
    #[case(0.0, 180.5)]
    fn rejects_invalid_points(#[case] lat: f64, #[case] lng: f64) {
        assert!(matches!(
            RoutePoint::new(lat, lng),
            Err(RoutePointError::InvalidCoordinate { .. })
        ));
    }

    #[rstest]
    #[case(-0.1, 1.0, RouteCandidateError::InvalidDistance(-0.1))]
    #[case(1.0, -2.0, RouteCandidateError::InvalidDuration(-2.0))]
    fn rejects_negative_measurements(
        #[case] distance: f64,
        #[case] duration: f64,
        #[case] expected: RouteCandidateError,
    ) {
        let err = RouteCandidate::new(vec![point(0.0, 0.0)], distance, duration)
            .expect_err("negative measurement should fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn accepts_zero_length_single_point_route() {
        let candidate = RouteCandidate::new(vec![point(1.0, 2.0)], 0.0, 0.0).expect("valid");
        assert_eq!(candidate.into_points(), vec![point(1.0, 2.0)]);
    }

    #[rstest]
    fn point_converts_to_lon_lat_coord() {
        let coord = Coord::from(point(28.6, 77.2));
        assert_eq!(coord, Coord { x: 77.2, y: 28.6 });
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_points_as_lat_lng_arrays() {
        let json = r#"{"points": [[28.6, 77.2], [28.7, 77.3]], "distance_km": 12.5, "duration_min": 20.0}"#;
        let candidate: RouteCandidate = serde_json::from_str(json).expect("decode candidate");
        assert_eq!(candidate.points(), &[point(28.6, 77.2), point(28.7, 77.3)]);
        assert_eq!(candidate.distance_km(), 12.5);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(r#"{"points": [], "distance_km": 1.0, "duration_min": 1.0}"#)]
    #[case(r#"{"points": [[128.6, 77.2]], "distance_km": 1.0, "duration_min": 1.0}"#)]
    #[case(r#"{"points": [[28.6, 77.2]], "distance_km": -1.0, "duration_min": 1.0}"#)]
    fn deserialisation_validates_candidates(#[case] json: &str) {
        let result: Result<RouteCandidate, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
