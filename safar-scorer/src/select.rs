//! Uniqueness filtering and best-route selection.

use safar_core::{DifferenceThresholds, RouteCandidate, routes_differ};
use serde::Serialize;

use crate::{NoRouteFoundError, RouteAssessment};

/// A candidate route together with its score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRoute {
    /// Route as supplied by the provider.
    pub candidate: RouteCandidate,
    /// Score breakdown for the candidate's points.
    pub assessment: RouteAssessment,
}

impl ScoredRoute {
    /// Safety score of the route.
    #[must_use]
    pub const fn safety_score(&self) -> f64 {
        self.assessment.safety_score
    }
}

/// Outcome of choosing among candidate routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Highest-scoring route.
    pub best: ScoredRoute,
    /// Every accepted route, in input order.
    pub all: Vec<ScoredRoute>,
}

/// Keep each candidate only if it differs from every candidate kept so far.
///
/// Input order is preserved, so the first of a group of near-identical routes
/// survives.
///
/// # Examples
/// ```
/// use safar_core::test_support::straight_route;
/// use safar_core::{DifferenceThresholds, RouteCandidate};
/// use safar_scorer::unique_candidates;
///
/// # fn main() -> Result<(), safar_core::RouteCandidateError> {
/// let points = straight_route((28.60, 77.20), (28.62, 77.22), 12);
/// let first = RouteCandidate::new(points.clone(), 3.0, 9.0)?;
/// let twin = RouteCandidate::new(points, 3.1, 9.5)?;
/// let kept = unique_candidates(vec![first.clone(), twin], &DifferenceThresholds::uniqueness());
/// assert_eq!(kept, vec![first]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn unique_candidates<I>(candidates: I, thresholds: &DifferenceThresholds) -> Vec<RouteCandidate>
where
    I: IntoIterator<Item = RouteCandidate>,
{
    let mut accepted: Vec<RouteCandidate> = Vec::new();
    for candidate in candidates {
        if accepted
            .iter()
            .all(|kept| routes_differ(kept, &candidate, thresholds))
        {
            accepted.push(candidate);
        } else {
            log::debug!(
                "dropping candidate of {:.2} km as a near-duplicate",
                candidate.distance_km()
            );
        }
    }
    accepted
}

/// Pick the highest-scoring route. Ties keep the earliest route.
///
/// # Errors
/// Returns [`NoRouteFoundError`] when `scored` is empty.
pub fn select_best(scored: Vec<ScoredRoute>) -> Result<Selection, NoRouteFoundError> {
    let mut best: Option<&ScoredRoute> = None;
    for route in &scored {
        if best.is_none_or(|current| route.safety_score() > current.safety_score()) {
            best = Some(route);
        }
    }
    let winner = best.cloned().ok_or(NoRouteFoundError)?;
    Ok(Selection {
        best: winner,
        all: scored,
    })
}
