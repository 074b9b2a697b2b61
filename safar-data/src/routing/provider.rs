//! HTTP [`RouteProvider`] backed by the Geoapify Routing API.
//!
//! Each call issues one `GET` request for a single route preference. The API
//! key travels as a query parameter, so every URL that reaches an error or a
//! log line is redacted first.
//!
//! # Example
//!
//! ```no_run
//! use safar_core::{RoutePoint, RoutePreference, RouteProvider, RouteRequest};
//! use safar_data::routing::HttpRouteProvider;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = HttpRouteProvider::new("my-api-key")?;
//! let request = RouteRequest::new(RoutePoint::new(28.61, 77.20)?, RoutePoint::new(28.70, 77.10)?);
//! let route = provider.fetch_route(&request, RoutePreference::Balanced).await?;
//! println!("{} points over {:.1} km", route.points().len(), route.distance_km());
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use safar_core::{RouteCandidate, RouteFetchError, RoutePreference, RouteProvider, RouteRequest};
use thiserror::Error;
use url::Url;

use super::fetch::millis;
use super::geoapify::RoutingResponse;

/// Default Geoapify routing endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.geoapify.com/v1/routing";

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = "safar-routing/0.1";

/// Default travel mode.
pub const DEFAULT_MODE: &str = "drive";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_PARAM: &str = "apiKey";

/// Error type for [`HttpRouteProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured endpoint is not a valid URL.
    #[error("invalid routing endpoint {url}: {source}")]
    InvalidBaseUrl {
        /// Rejected endpoint.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
}

/// Configuration for [`HttpRouteProvider`].
#[derive(Clone)]
pub struct HttpRouteProviderConfig {
    /// Routing endpoint, e.g. [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// Geoapify API key.
    pub api_key: String,
    /// Travel mode such as `drive` or `walk`.
    pub mode: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl fmt::Debug for HttpRouteProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRouteProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("mode", &self.mode)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            mode: DEFAULT_MODE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRouteProviderConfig {
    /// Create a configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the routing endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the travel mode.
    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Route provider calling the Geoapify Routing API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRouteProvider {
    client: Client,
    config: HttpRouteProviderConfig,
    endpoint: Url,
}

impl HttpRouteProvider {
    /// Create a provider with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(api_key))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the endpoint is not a valid URL or the HTTP client
    /// fails to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let endpoint =
            Url::parse(&config.base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpRouteProviderConfig {
        &self.config
    }

    /// Build the request URL: `waypoints=lat,lng|lat,lng&mode=..&type=..&apiKey=..`.
    fn build_url(&self, request: &RouteRequest, preference: RoutePreference) -> Url {
        let waypoints = format!(
            "{},{}|{},{}",
            request.start.lat(),
            request.start.lng(),
            request.end.lat(),
            request.end.lng()
        );
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("waypoints", &waypoints)
            .append_pair("mode", &self.config.mode)
            .append_pair("type", preference.as_str())
            .append_pair(API_KEY_PARAM, &self.config.api_key);
        url
    }

    /// Copy of `url` with the API key removed, safe for errors and logs.
    fn redact(url: &Url) -> String {
        let mut redacted = url.clone();
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != API_KEY_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        redacted.query_pairs_mut().clear().extend_pairs(kept);
        redacted.into()
    }

    /// Convert a reqwest error to a `RouteFetchError`.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> RouteFetchError {
        if error.is_timeout() {
            return RouteFetchError::Timeout {
                url: url.to_owned(),
                timeout_ms: millis(self.config.timeout),
            };
        }

        let status = error.status();
        let message = error.without_url().to_string();
        if let Some(status) = status {
            return RouteFetchError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message,
            };
        }

        RouteFetchError::Network {
            url: url.to_owned(),
            message,
        }
    }
}

#[async_trait]
impl RouteProvider for HttpRouteProvider {
    async fn fetch_route(
        &self,
        request: &RouteRequest,
        preference: RoutePreference,
    ) -> Result<RouteCandidate, RouteFetchError> {
        if self.config.api_key.is_empty() {
            return Err(RouteFetchError::Service {
                message: "no routing API key configured".to_owned(),
            });
        }
        let url = self.build_url(request, preference);
        let target = Self::redact(&url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &target))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &target))?;

        let body: RoutingResponse = response.json().await.map_err(|err| RouteFetchError::Parse {
            message: err.without_url().to_string(),
        })?;
        body.into_candidate(&target)
    }
}
