//! Builders for incidents and routes used by unit and behaviour tests.

use geo::Coord;

use crate::{CrimeIncident, FEATURE_COUNT, Feature, FeatureVector, RiskWeights, RoutePoint};

/// Build an incident whose risk weight equals `risk` under default weights.
///
/// The value is stored as a theft count, which carries a unit weight.
///
/// # Panics
/// Panics when the coordinate or risk is invalid; callers pass literals.
#[must_use]
pub fn incident_with_risk(lat: f64, lng: f64, risk: f64) -> CrimeIncident {
    let mut values = [0.0; FEATURE_COUNT];
    values[Feature::Theft.index()] = risk;
    incident_with_features(lat, lng, values)
}

/// Build an incident from raw feature values under default weights.
///
/// # Panics
/// Panics when the coordinate or features are invalid.
#[must_use]
pub fn incident_with_features(lat: f64, lng: f64, values: [f64; FEATURE_COUNT]) -> CrimeIncident {
    CrimeIncident::new(
        Coord { x: lng, y: lat },
        FeatureVector::new(values),
        &RiskWeights::default(),
    )
    .unwrap_or_else(|err| panic!("test incident at ({lat}, {lng}) is invalid: {err}"))
}

/// Build a validated route point.
///
/// # Panics
/// Panics when the coordinate is invalid.
#[must_use]
pub fn point(lat: f64, lng: f64) -> RoutePoint {
    RoutePoint::new(lat, lng).unwrap_or_else(|err| panic!("test point is invalid: {err}"))
}

/// Evenly interpolate `count` points from `start` to `end` inclusive.
///
/// # Panics
/// Panics when an interpolated coordinate is invalid.
#[must_use]
pub fn straight_route(start: (f64, f64), end: (f64, f64), count: usize) -> Vec<RoutePoint> {
    match count {
        0 => Vec::new(),
        1 => vec![point(start.0, start.1)],
        _ => {
            let steps = (count - 1) as f64;
            (0..count)
                .map(|i| {
                    let t = i as f64 / steps;
                    point(
                        start.0 + (end.0 - start.0) * t,
                        start.1 + (end.1 - start.1) * t,
                    )
                })
                .collect()
        }
    }
}
