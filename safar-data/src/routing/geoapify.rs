//! Geoapify Routing API response types.
//!
//! The API answers with a GeoJSON `FeatureCollection`. Only the first feature
//! is used. Its geometry is a `LineString` or a `MultiLineString` of
//! `[lng, lat]` positions; the legs of a multi-line are concatenated.
//! Distance (metres) and travel time (seconds) may sit on the feature
//! properties, a `summary` object, or the first leg, and are taken from the
//! first of those that is present and non-zero.
//!
//! See: <https://apidocs.geoapify.com/docs/routing/>

use safar_core::{RouteCandidate, RouteFetchError, RoutePoint};
use serde::Deserialize;

/// Routing API response.
#[derive(Debug, Deserialize)]
pub struct RoutingResponse {
    /// Route features; empty when no route exists.
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

/// A single route.
#[derive(Debug, Deserialize)]
pub struct RouteFeature {
    /// Route polyline.
    pub geometry: Option<Geometry>,
    /// Route measurements.
    #[serde(default)]
    pub properties: Properties,
}

/// Route polyline as GeoJSON.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// One continuous line.
    LineString {
        /// `[lng, lat]` positions, optionally followed by elevation.
        coordinates: Vec<Vec<f64>>,
    },
    /// One line per leg.
    MultiLineString {
        /// Per-leg `[lng, lat]` positions.
        coordinates: Vec<Vec<Vec<f64>>>,
    },
}

/// Measurements attached to a route feature.
#[derive(Debug, Default, Deserialize)]
pub struct Properties {
    /// Route length in metres.
    pub distance: Option<f64>,
    /// Travel time in seconds.
    pub time: Option<f64>,
    /// Alternative location of the measurements.
    pub summary: Option<Summary>,
    /// Per-leg measurements.
    #[serde(default)]
    pub legs: Vec<Summary>,
}

/// Distance and duration pair used by summaries and legs.
#[derive(Debug, Default, Deserialize)]
pub struct Summary {
    /// Length in metres.
    pub distance: Option<f64>,
    /// Duration in seconds.
    pub duration: Option<f64>,
}

impl RoutingResponse {
    /// Turn the first route feature into a [`RouteCandidate`].
    ///
    /// `target` names the request in errors and must not contain credentials.
    ///
    /// # Errors
    /// Returns [`RouteFetchError::NoRoute`] when there is no feature or the
    /// geometry is empty, and [`RouteFetchError::Parse`] when a position or
    /// measurement is invalid.
    pub fn into_candidate(self, target: &str) -> Result<RouteCandidate, RouteFetchError> {
        let no_route = || RouteFetchError::NoRoute {
            url: target.to_owned(),
        };
        let feature = self.features.into_iter().next().ok_or_else(no_route)?;
        let positions = feature.geometry.map(Geometry::into_positions).unwrap_or_default();
        if positions.is_empty() {
            return Err(no_route());
        }

        let points = positions
            .iter()
            .map(|position| to_route_point(position))
            .collect::<Result<Vec<_>, _>>()?;
        let distance_km = feature.properties.distance_m() / 1000.0;
        let duration_min = feature.properties.time_s() / 60.0;
        RouteCandidate::new(points, distance_km, duration_min).map_err(|err| RouteFetchError::Parse {
            message: err.to_string(),
        })
    }
}

impl Geometry {
    fn into_positions(self) -> Vec<Vec<f64>> {
        match self {
            Self::LineString { coordinates } => coordinates,
            Self::MultiLineString { coordinates } => coordinates.into_iter().flatten().collect(),
        }
    }
}

impl Properties {
    fn distance_m(&self) -> f64 {
        first_non_zero([
            self.distance,
            self.summary.as_ref().and_then(|s| s.distance),
            self.legs.first().and_then(|leg| leg.distance),
        ])
    }

    fn time_s(&self) -> f64 {
        first_non_zero([
            self.time,
            self.summary.as_ref().and_then(|s| s.duration),
            self.legs.first().and_then(|leg| leg.duration),
        ])
    }
}

fn first_non_zero<const N: usize>(values: [Option<f64>; N]) -> f64 {
    values
        .into_iter()
        .flatten()
        .find(|value| *value != 0.0)
        .unwrap_or(0.0)
}

fn to_route_point(position: &[f64]) -> Result<RoutePoint, RouteFetchError> {
    let [lng, lat, ..] = position else {
        return Err(RouteFetchError::Parse {
            message: format!("position {position:?} needs longitude and latitude"),
        });
    };
    RoutePoint::new(*lat, *lng).map_err(|err| RouteFetchError::Parse {
        message: err.to_string(),
    })
}
