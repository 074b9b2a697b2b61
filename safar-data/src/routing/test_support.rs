//! Test utilities for routing providers.
//!
//! [`StubRouteProvider`] is a deterministic [`RouteProvider`] that answers
//! from pre-configured responses instead of making HTTP requests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use safar_core::{RouteCandidate, RouteFetchError, RoutePreference, RouteProvider, RouteRequest};

/// Stub `RouteProvider` for testing.
///
/// Each preference can be given a route, an error, or a route delivered after
/// a delay. Preferences with nothing configured answer with
/// [`RouteFetchError::NoRoute`].
///
/// # Example
///
/// ```
/// use safar_core::{RouteCandidate, RoutePoint, RoutePreference, RouteProvider, RouteRequest};
/// use safar_data::routing::test_support::StubRouteProvider;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let start = RoutePoint::new(28.60, 77.20)?;
/// let end = RoutePoint::new(28.70, 77.30)?;
/// let route = RouteCandidate::new(vec![start, end], 15.0, 25.0)?;
/// let provider = StubRouteProvider::new().with_route(RoutePreference::Short, route);
///
/// let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
/// let request = RouteRequest::new(start, end);
/// let fetched = runtime.block_on(provider.fetch_route(&request, RoutePreference::Short))?;
/// assert_eq!(fetched.distance_km(), 15.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubRouteProvider {
    responses: HashMap<RoutePreference, StubResponse>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Route(RouteCandidate),
    Error(RouteFetchError),
    Delayed(Duration, RouteCandidate),
}

impl StubRouteProvider {
    /// Create a provider with no configured responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `preference` with `route`.
    #[must_use]
    pub fn with_route(mut self, preference: RoutePreference, route: RouteCandidate) -> Self {
        self.responses.insert(preference, StubResponse::Route(route));
        self
    }

    /// Answer `preference` with `error`.
    #[must_use]
    pub fn with_error(mut self, preference: RoutePreference, error: RouteFetchError) -> Self {
        self.responses.insert(preference, StubResponse::Error(error));
        self
    }

    /// Answer `preference` with `route` after sleeping for `delay`.
    #[must_use]
    pub fn with_delayed_route(
        mut self,
        preference: RoutePreference,
        delay: Duration,
        route: RouteCandidate,
    ) -> Self {
        self.responses
            .insert(preference, StubResponse::Delayed(delay, route));
        self
    }
}

#[async_trait]
impl RouteProvider for StubRouteProvider {
    async fn fetch_route(
        &self,
        _request: &RouteRequest,
        preference: RoutePreference,
    ) -> Result<RouteCandidate, RouteFetchError> {
        match self.responses.get(&preference) {
            Some(StubResponse::Route(route)) => Ok(route.clone()),
            Some(StubResponse::Error(error)) => Err(error.clone()),
            Some(StubResponse::Delayed(delay, route)) => {
                tokio::time::sleep(*delay).await;
                Ok(route.clone())
            }
            None => Err(RouteFetchError::NoRoute {
                url: format!("stub {preference} variant"),
            }),
        }
    }
}
