use thiserror::Error;

use super::RoutePreference;

/// Errors from [`crate::provider::RouteProvider::fetch_route`].
///
/// Every variant is recoverable: a failed fetch drops one candidate but never
/// aborts the request it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteFetchError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout {
        /// Request target with credentials removed.
        url: String,
        /// Timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },
    /// The caller's per-variant deadline passed before the provider answered.
    #[error("{preference} variant exceeded its {timeout_ms} ms deadline")]
    DeadlineExceeded {
        /// Variant that was abandoned.
        preference: RoutePreference,
        /// Deadline that elapsed, in milliseconds.
        timeout_ms: u64,
    },
    /// The provider answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Request URL with credentials removed.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Request URL with credentials removed.
        url: String,
        /// Error description.
        message: String,
    },
    /// The response body could not be turned into a route.
    #[error("failed to parse routing response: {message}")]
    Parse {
        /// Error description.
        message: String,
    },
    /// The provider answered successfully but returned no route.
    #[error("routing provider returned no route for {url}")]
    NoRoute {
        /// Request URL with credentials removed.
        url: String,
    },
    /// The provider could not be used, for example because its endpoint is
    /// not a valid URL.
    #[error("routing provider unavailable: {message}")]
    Service {
        /// Error description.
        message: String,
    },
}
