//! The immutable scoring handle built once at startup.

use safar_core::{DifferenceThresholds, IncidentStore, RouteCandidate, RoutePoint};
use safar_zones::{ModelFitError, RiskZoneModel, ZoneModelConfig};

use crate::{
    NoRouteFoundError, RiskIndexConfig, RouteAssessment, RouteScorer, RouteScorerConfig,
    ScoreCalibration, ScoreError, ScoredRoute, Selection, SpatialRiskIndex, select_best,
    unique_candidates,
};

/// Parameters for [`Engine::build`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Zone clustering parameters.
    pub zones: ZoneModelConfig,
    /// Point-risk search radius.
    pub index: RiskIndexConfig,
    /// Risk range mapped onto the safety score.
    pub calibration: ScoreCalibration,
    /// Route sampling policy.
    pub scorer: RouteScorerConfig,
    /// Thresholds for the accepted-set uniqueness check.
    pub uniqueness: DifferenceThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zones: ZoneModelConfig::default(),
            index: RiskIndexConfig::default(),
            calibration: ScoreCalibration::default(),
            scorer: RouteScorerConfig::default(),
            uniqueness: DifferenceThresholds::uniqueness(),
        }
    }
}

impl EngineConfig {
    /// Replace the zone clustering parameters.
    #[must_use]
    pub const fn with_zones(mut self, zones: ZoneModelConfig) -> Self {
        self.zones = zones;
        self
    }

    /// Replace the score calibration.
    #[must_use]
    pub const fn with_calibration(mut self, calibration: ScoreCalibration) -> Self {
        self.calibration = calibration;
        self
    }
}

/// Fitted zone model plus route scorer, shared read-only across requests.
///
/// An engine is constructed explicitly and passed to callers; several engines
/// with different configurations can coexist.
///
/// # Examples
/// ```
/// use safar_core::test_support::incident_with_risk;
/// use safar_core::IncidentStore;
/// use safar_scorer::{Engine, EngineConfig};
/// use safar_zones::ZoneModelConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store: IncidentStore = (0..6)
///     .map(|i| incident_with_risk(28.6, 77.2, f64::from(i) * 40.0))
///     .collect();
/// let config = EngineConfig::default().with_zones(ZoneModelConfig::default().with_zones(2));
/// let engine = Engine::build(&store, &config)?;
///
/// assert_eq!(engine.score_route(&[])?, 50.0);
/// assert!(engine.score_route(&[(28.6, 77.2), (28.61, 77.21)])? < 100.0);
/// assert!(engine.score_route(&[(128.6, 77.2)]).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    zones: RiskZoneModel,
    scorer: RouteScorer,
    uniqueness: DifferenceThresholds,
    incident_count: usize,
}

impl Engine {
    /// Fit the zone model and index the incidents.
    ///
    /// # Errors
    /// Returns [`ModelFitError`] when the zone model cannot be fitted.
    pub fn build(store: &IncidentStore, config: &EngineConfig) -> Result<Self, ModelFitError> {
        let zones = RiskZoneModel::fit(store, &config.zones)?;
        let index = SpatialRiskIndex::new(store, &config.index);
        log::info!(
            "indexed {} incidents for route scoring within {} km",
            index.len(),
            index.radius_km()
        );
        Ok(Self {
            zones,
            scorer: RouteScorer::new(index, config.calibration, config.scorer),
            uniqueness: config.uniqueness,
            incident_count: store.len(),
        })
    }

    /// Score raw `(lat, lng)` pairs.
    ///
    /// # Errors
    /// Returns [`ScoreError::InvalidPoint`] for the first pair outside WGS84
    /// bounds or not finite.
    pub fn score_route(&self, coords: &[(f64, f64)]) -> Result<f64, ScoreError> {
        let points = coords
            .iter()
            .enumerate()
            .map(|(index, &(lat, lng))| {
                RoutePoint::new(lat, lng).map_err(|source| ScoreError::InvalidPoint { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.scorer.score(&points))
    }

    /// Score already validated points.
    #[must_use]
    pub fn score_points(&self, points: &[RoutePoint]) -> f64 {
        self.scorer.score(points)
    }

    /// Score already validated points with the intermediate average risk.
    #[must_use]
    pub fn assess(&self, points: &[RoutePoint]) -> RouteAssessment {
        self.scorer.assess(points)
    }

    /// Drop near-duplicate candidates, score the rest, and pick the safest.
    ///
    /// # Errors
    /// Returns [`NoRouteFoundError`] when no candidates were supplied.
    pub fn select_safest<I>(&self, candidates: I) -> Result<Selection, NoRouteFoundError>
    where
        I: IntoIterator<Item = RouteCandidate>,
    {
        let scored = unique_candidates(candidates, &self.uniqueness)
            .into_iter()
            .map(|candidate| {
                let assessment = self.scorer.assess(candidate.points());
                ScoredRoute {
                    candidate,
                    assessment,
                }
            })
            .collect();
        select_best(scored)
    }

    /// Fitted zone model, for diagnostics.
    #[must_use]
    pub const fn zone_model(&self) -> &RiskZoneModel {
        &self.zones
    }

    /// Route scorer backing this engine.
    #[must_use]
    pub const fn scorer(&self) -> &RouteScorer {
        &self.scorer
    }

    /// Number of incidents the engine was built from.
    #[must_use]
    pub const fn incident_count(&self) -> usize {
        self.incident_count
    }
}
