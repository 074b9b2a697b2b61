//! Core domain types for the Safar route safety engine.
//!
//! The crate holds the vocabulary shared by every other crate in the
//! workspace: crime incidents and their risk weights, the in-memory incident
//! store, route points and candidates, great-circle distance, the heuristic
//! route difference test, and the trait describing an external routing
//! provider. Constructors return `Result` so invalid coordinates or negative
//! measurements are rejected before they reach the scoring path.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod geodesy;
mod incident;
pub mod provider;
mod route;
pub mod similarity;
mod store;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use geodesy::{EARTH_RADIUS_KM, haversine_km};
pub use incident::{CrimeIncident, FEATURE_COUNT, Feature, FeatureVector, IncidentError, RiskWeights};
pub use provider::{RouteFetchError, RoutePreference, RouteProvider, RouteRequest};
pub use route::{RouteCandidate, RouteCandidateError, RoutePoint, RoutePointError};
pub use similarity::{DifferenceThresholds, routes_differ};
pub use store::IncidentStore;
