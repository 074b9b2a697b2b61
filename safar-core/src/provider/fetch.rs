//! Routing provider trait and request types.

use async_trait::async_trait;

use crate::{RouteCandidate, RoutePoint};

use super::error::RouteFetchError;

/// Start and end of a journey to be routed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// Where the journey begins.
    pub start: RoutePoint,
    /// Where the journey ends.
    pub end: RoutePoint,
}

impl RouteRequest {
    /// Bundle a start and end point.
    #[must_use]
    pub const fn new(start: RoutePoint, end: RoutePoint) -> Self {
        Self { start, end }
    }
}

/// Route-shaping preference passed to the provider.
///
/// Each preference yields at most one candidate. Requesting several gives the
/// scorer alternatives to choose between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoutePreference {
    /// The provider's default trade-off between time and distance.
    Balanced,
    /// Prefer the shortest distance.
    Short,
    /// Prefer fewer turns.
    LessManeuvers,
}

impl RoutePreference {
    /// Every preference in the order they are requested by default.
    pub const ALL: [Self; 3] = [Self::Balanced, Self::Short, Self::LessManeuvers];

    /// Identifier used in provider query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Short => "short",
            Self::LessManeuvers => "less_maneuvers",
        }
    }
}

impl std::fmt::Display for RoutePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetch a candidate route for a journey.
///
/// Fetching is I/O bound, so the method is asynchronous and implementations
/// must be `Send + Sync` to allow several preferences to be requested
/// concurrently. The engine does not inspect provider-specific payloads;
/// implementations translate them into a [`RouteCandidate`].
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use safar_core::{
///     RouteCandidate, RouteFetchError, RoutePreference, RouteProvider, RouteRequest,
/// };
///
/// struct StraightLine;
///
/// #[async_trait]
/// impl RouteProvider for StraightLine {
///     async fn fetch_route(
///         &self,
///         request: &RouteRequest,
///         _preference: RoutePreference,
///     ) -> Result<RouteCandidate, RouteFetchError> {
///         let distance = request.start.distance_km(&request.end);
///         RouteCandidate::new(vec![request.start, request.end], distance, distance * 2.0)
///             .map_err(|err| RouteFetchError::Parse { message: err.to_string() })
///     }
/// }
/// ```
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Return one candidate route for `request` shaped by `preference`.
    async fn fetch_route(
        &self,
        request: &RouteRequest,
        preference: RoutePreference,
    ) -> Result<RouteCandidate, RouteFetchError>;
}
