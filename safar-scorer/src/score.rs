//! Route-level risk aggregation and the 0–100 safety score.

use safar_core::RoutePoint;
use serde::Serialize;

use crate::{CalibrationError, SpatialRiskIndex};

/// Risk range mapped onto the safety score.
///
/// Average risks at or below `min_observed_risk` score 100, at or above
/// `max_observed_risk` score 0, and linearly in between.
///
/// # Examples
/// ```
/// use safar_scorer::ScoreCalibration;
///
/// let calibration = ScoreCalibration::default();
/// assert_eq!(calibration.safety_score(0.0), 100.0);
/// assert_eq!(calibration.safety_score(210.0), 50.0);
/// assert_eq!(calibration.safety_score(1_000.0), 0.0);
/// assert!(ScoreCalibration::new(400.0, 20.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreCalibration {
    min_observed_risk: f64,
    max_observed_risk: f64,
}

impl ScoreCalibration {
    /// Lower bound observed on the reference dataset.
    pub const DEFAULT_MIN_OBSERVED_RISK: f64 = 20.0;
    /// Upper bound observed on the reference dataset.
    pub const DEFAULT_MAX_OBSERVED_RISK: f64 = 400.0;

    /// Validate and build a calibration.
    ///
    /// # Errors
    /// Returns [`CalibrationError::InvalidBounds`] when either bound is not
    /// finite or `min_observed_risk >= max_observed_risk`.
    pub fn new(min_observed_risk: f64, max_observed_risk: f64) -> Result<Self, CalibrationError> {
        let valid = min_observed_risk.is_finite()
            && max_observed_risk.is_finite()
            && min_observed_risk < max_observed_risk;
        if !valid {
            return Err(CalibrationError::InvalidBounds {
                min: min_observed_risk,
                max: max_observed_risk,
            });
        }
        Ok(Self {
            min_observed_risk,
            max_observed_risk,
        })
    }

    /// Lower calibration bound.
    #[must_use]
    pub const fn min_observed_risk(&self) -> f64 {
        self.min_observed_risk
    }

    /// Upper calibration bound.
    #[must_use]
    pub const fn max_observed_risk(&self) -> f64 {
        self.max_observed_risk
    }

    /// Map an average risk onto `[0, 100]`, rounded to two decimals.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "linear normalisation of risk onto the score range"
    )]
    pub fn safety_score(&self, avg_risk: f64) -> f64 {
        let (min, max) = (self.min_observed_risk, self.max_observed_risk);
        let normalised = (avg_risk.clamp(min, max) - min) / (max - min);
        round_to_cents((1.0 - normalised) * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for ScoreCalibration {
    fn default() -> Self {
        Self {
            min_observed_risk: Self::DEFAULT_MIN_OBSERVED_RISK,
            max_observed_risk: Self::DEFAULT_MAX_OBSERVED_RISK,
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "rounding to two decimal places"
)]
fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sampling and fallback policy for [`RouteScorer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteScorerConfig {
    /// Target number of sampled points; the stride is `max(1, n / max_samples)`.
    pub max_samples: usize,
    neutral_score: f64,
}

impl RouteScorerConfig {
    /// Default sampling target.
    pub const DEFAULT_MAX_SAMPLES: usize = 50;
    /// Default score for an empty route.
    pub const DEFAULT_NEUTRAL_SCORE: f64 = 50.0;

    /// Override the sampling target.
    #[must_use]
    pub const fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// Override the score reported for a route with no points.
    ///
    /// # Errors
    /// Returns [`CalibrationError::InvalidNeutralScore`] unless `score` is a
    /// finite value within `[0, 100]`.
    pub fn with_neutral_score(mut self, score: f64) -> Result<Self, CalibrationError> {
        if !(0.0..=100.0).contains(&score) {
            return Err(CalibrationError::InvalidNeutralScore(score));
        }
        self.neutral_score = score;
        Ok(self)
    }

    /// Score reported for a route with no points.
    #[must_use]
    pub const fn neutral_score(&self) -> f64 {
        self.neutral_score
    }
}

impl Default for RouteScorerConfig {
    fn default() -> Self {
        Self {
            max_samples: Self::DEFAULT_MAX_SAMPLES,
            neutral_score: Self::DEFAULT_NEUTRAL_SCORE,
        }
    }
}

/// Breakdown of a scored route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteAssessment {
    /// Mean point risk across the sampled points.
    pub avg_risk: f64,
    /// Number of points that were scored.
    pub sampled_points: usize,
    /// Final score in `[0, 100]`; higher is safer.
    pub safety_score: f64,
}

/// Scores polylines against a [`SpatialRiskIndex`].
///
/// Scoring is pure: the same points against the same index always give the
/// same score, and a scorer can be shared across threads.
#[derive(Debug, Clone)]
pub struct RouteScorer {
    index: SpatialRiskIndex,
    calibration: ScoreCalibration,
    config: RouteScorerConfig,
}

impl RouteScorer {
    /// Combine an index with a calibration and sampling policy.
    #[must_use]
    pub const fn new(
        index: SpatialRiskIndex,
        calibration: ScoreCalibration,
        config: RouteScorerConfig,
    ) -> Self {
        Self {
            index,
            calibration,
            config,
        }
    }

    /// Safety score for `points`. An empty route gets the neutral score.
    #[must_use]
    pub fn score(&self, points: &[RoutePoint]) -> f64 {
        self.assess(points).safety_score
    }

    /// Score `points` and report the intermediate average risk.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "route risk is the mean of sampled point risks"
    )]
    pub fn assess(&self, points: &[RoutePoint]) -> RouteAssessment {
        if points.is_empty() {
            return RouteAssessment {
                avg_risk: 0.0,
                sampled_points: 0,
                safety_score: self.config.neutral_score,
            };
        }
        let stride = sample_stride(points.len(), self.config.max_samples);
        let (total, sampled) = points
            .iter()
            .step_by(stride)
            .fold((0.0, 0_usize), |(total, sampled), point| {
                (total + self.index.point_risk(point), sampled + 1)
            });
        let avg_risk = total / sampled as f64;
        RouteAssessment {
            avg_risk,
            sampled_points: sampled,
            safety_score: self.calibration.safety_score(avg_risk),
        }
    }

    /// Underlying spatial index.
    #[must_use]
    pub const fn index(&self) -> &SpatialRiskIndex {
        &self.index
    }

    /// Active calibration.
    #[must_use]
    pub const fn calibration(&self) -> &ScoreCalibration {
        &self.calibration
    }
}

/// Every `floor(len / max_samples)`-th point, never less than every point.
#[expect(
    clippy::integer_division,
    reason = "the sampling stride is a floored quotient"
)]
fn sample_stride(len: usize, max_samples: usize) -> usize {
    (len / max_samples.max(1)).max(1)
}
