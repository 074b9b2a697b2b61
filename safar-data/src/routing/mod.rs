//! Route retrieval from external routing services.
//!
//! [`HttpRouteProvider`] implements [`safar_core::RouteProvider`] against the
//! Geoapify Routing API, one request per [`safar_core::RoutePreference`].
//! [`fetch_candidates`] runs every preference concurrently under a per-variant
//! timeout and collapses near-duplicate variants, so a slow or failing variant
//! only removes itself from the result.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use safar_core::{RoutePoint, RoutePreference, RouteRequest};
//! use safar_data::routing::{HttpRouteProvider, HttpRouteProviderConfig, fetch_candidates};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpRouteProviderConfig::new("my-api-key")
//!     .with_mode("walk")
//!     .with_timeout(Duration::from_secs(10));
//! let provider = HttpRouteProvider::with_config(config)?;
//! let request = RouteRequest::new(RoutePoint::new(28.61, 77.20)?, RoutePoint::new(28.70, 77.10)?);
//!
//! let outcome = fetch_candidates(&provider, &request, &RoutePreference::ALL, Duration::from_secs(10)).await;
//! println!("{} distinct routes", outcome.candidates.len());
//! # Ok(())
//! # }
//! ```

mod fetch;
mod geoapify;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use fetch::{FetchOutcome, fetch_candidates};
pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_MODE, DEFAULT_USER_AGENT, HttpRouteProvider, HttpRouteProviderConfig,
    ProviderBuildError,
};
