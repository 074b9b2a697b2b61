//! Fetch candidate routes from an external routing provider.
//!
//! The [`RouteProvider`] trait abstracts the service that turns a start and
//! end point into a route polyline with distance and duration metadata. The
//! engine never generates geometry itself; it only scores what a provider
//! returns.
//!
//! Fetch failures are reported per preference so callers can keep whatever
//! candidates did arrive.

mod error;
mod fetch;

pub use error::RouteFetchError;
pub use fetch::{RoutePreference, RouteProvider, RouteRequest};
