//! Route safety scoring for the Safar engine.
//!
//! The crate turns a route polyline into a safety score in `[0, 100]`:
//! - [`SpatialRiskIndex`] answers "how risky is it here?" for a single point
//!   by averaging inverse-distance-weighted incident risk within a fixed
//!   radius.
//! - [`RouteScorer`] samples a polyline, averages the point risks, and maps
//!   the average through a [`ScoreCalibration`] onto the score range.
//! - [`unique_candidates`] and [`select_best`] drop near-duplicate candidate
//!   routes and pick the safest survivor.
//! - [`Engine`] bundles a fitted [`RiskZoneModel`](safar_zones::RiskZoneModel)
//!   with the scorer as one immutable handle.
//!
//! # Examples
//!
//! ```
//! use safar_core::test_support::{incident_with_risk, straight_route};
//! use safar_core::{IncidentStore, RouteCandidate};
//! use safar_scorer::{Engine, EngineConfig};
//! use safar_zones::ZoneModelConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store: IncidentStore = (0..6)
//!     .map(|i| incident_with_risk(28.60, 77.20, 100.0 + f64::from(i)))
//!     .collect();
//! let config = EngineConfig::default().with_zones(ZoneModelConfig::default().with_zones(2));
//! let engine = Engine::build(&store, &config)?;
//!
//! let busy = RouteCandidate::new(straight_route((28.59, 77.19), (28.61, 77.21), 10), 3.0, 9.0)?;
//! let quiet = RouteCandidate::new(straight_route((28.90, 77.50), (28.92, 77.52), 10), 3.0, 9.0)?;
//! let selection = engine.select_safest(vec![busy, quiet.clone()])?;
//! assert_eq!(selection.best.candidate, quiet);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod engine;
mod error;
mod index;
mod score;
mod select;

pub use engine::{Engine, EngineConfig};
pub use error::{CalibrationError, NoRouteFoundError, ScoreError};
pub use index::{RiskIndexConfig, SpatialRiskIndex};
pub use score::{RouteAssessment, RouteScorer, RouteScorerConfig, ScoreCalibration};
pub use select::{ScoredRoute, Selection, select_best, unique_candidates};
