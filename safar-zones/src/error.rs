//! Error types raised while fitting the risk zone model.
#![forbid(unsafe_code)]

use safar_core::Feature;
use thiserror::Error;

/// Errors raised while fitting a [`crate::RiskZoneModel`].
///
/// Every variant is fatal at startup: an engine without a fitted model must
/// not serve requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModelFitError {
    /// No incidents were supplied.
    #[error("cannot fit risk zones without incidents")]
    Empty,
    /// Fewer incidents than zones were supplied.
    #[error("cannot fit {zones} risk zones from {incidents} incidents")]
    TooFewIncidents {
        /// Number of incidents supplied.
        incidents: usize,
        /// Number of zones requested.
        zones: usize,
    },
    /// The configuration asked for zero zones.
    #[error("risk zone count must be positive")]
    NoZones,
    /// The configuration asked for zero clustering restarts.
    #[error("risk zone fitting needs at least one restart")]
    NoRestarts,
    /// A feature value was NaN or infinite.
    #[error("incident {row} has a non-finite {feature:?} value")]
    NonFiniteFeature {
        /// Zero-based position of the offending incident.
        row: usize,
        /// Offending feature.
        feature: Feature,
    },
}
