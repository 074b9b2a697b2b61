//! Error types for scoring and selection.
#![forbid(unsafe_code)]

use safar_core::RoutePointError;
use thiserror::Error;

/// A raw coordinate list could not be turned into a scorable route.
///
/// Raised instead of a default score so a malformed route is never reported
/// as safe.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScoreError {
    /// A coordinate pair was out of range or not finite.
    #[error("route point {index} is invalid: {source}")]
    InvalidPoint {
        /// Zero-based position of the pair in the input.
        index: usize,
        /// Validation failure for the pair.
        #[source]
        source: RoutePointError,
    },
}

/// No candidate route was available to select from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no route candidates were available to score")]
pub struct NoRouteFoundError;

/// Score calibration settings were unusable.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CalibrationError {
    /// Bounds were not finite or `min` was not below `max`.
    #[error("calibration bounds [{min}, {max}] must be finite with min < max")]
    InvalidBounds {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// The empty-route score was outside `[0, 100]` or not finite.
    #[error("neutral score {0} must lie within [0, 100]")]
    InvalidNeutralScore(f64),
}
