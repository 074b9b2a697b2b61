//! Concurrent retrieval of route variants for one request.

use std::time::Duration;

use futures_util::future::join_all;
use log::{debug, warn};
use safar_core::{
    DifferenceThresholds, RouteCandidate, RouteFetchError, RoutePreference, RouteProvider,
    RouteRequest, routes_differ,
};

/// Candidates and per-variant failures from [`fetch_candidates`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    /// Materially different routes, in preference order.
    pub candidates: Vec<RouteCandidate>,
    /// Variants that produced no route, with the reason.
    pub failures: Vec<(RoutePreference, RouteFetchError)>,
}

impl FetchOutcome {
    /// Whether no variant produced a route.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Request every preference concurrently and keep the distinct routes.
///
/// Each variant is bounded by `timeout`. A variant that fails or times out is
/// logged and recorded in [`FetchOutcome::failures`]; the others still count.
/// Successful variants are collapsed with [`DifferenceThresholds::general`]:
/// a route joins the output only when it differs from every route kept
/// before it, so the first of a group of near-duplicates survives.
pub async fn fetch_candidates<P>(
    provider: &P,
    request: &RouteRequest,
    preferences: &[RoutePreference],
    timeout: Duration,
) -> FetchOutcome
where
    P: RouteProvider + ?Sized,
{
    let fetches = preferences.iter().map(|&preference| async move {
        let result = match tokio::time::timeout(timeout, provider.fetch_route(request, preference)).await {
            Ok(result) => result,
            Err(_) => Err(RouteFetchError::DeadlineExceeded {
                preference,
                timeout_ms: millis(timeout),
            }),
        };
        (preference, result)
    });

    let thresholds = DifferenceThresholds::general();
    let mut outcome = FetchOutcome::default();
    for (preference, result) in join_all(fetches).await {
        match result {
            Ok(candidate) => {
                if outcome
                    .candidates
                    .iter()
                    .all(|kept| routes_differ(kept, &candidate, &thresholds))
                {
                    outcome.candidates.push(candidate);
                } else {
                    debug!("dropping {preference} variant: duplicates an earlier route");
                }
            }
            Err(err) => {
                warn!("{preference} variant unavailable: {err}");
                outcome.failures.push((preference, err));
            }
        }
    }
    outcome
}
