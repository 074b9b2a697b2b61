//! Risk zones learnt from the incident dataset.
//!
//! Incidents are grouped by their crime profile rather than by location: the
//! eight feature columns are standardised to zero mean and unit variance and
//! clustered with a seeded k-means++. Each resulting zone carries the mean
//! risk weight of the incidents assigned to it. The zones are diagnostic; the
//! route score itself is driven by the spatial index in `safar-scorer`.
//!
//! Fitting is deterministic for a given dataset and [`ZoneModelConfig::seed`].
//!
//! # Examples
//!
//! ```
//! use safar_core::test_support::incident_with_features;
//! use safar_core::IncidentStore;
//! use safar_zones::{RiskZoneModel, ZoneModelConfig};
//!
//! # fn main() -> Result<(), safar_zones::ModelFitError> {
//! let store: IncidentStore = [
//!     incident_with_features(28.60, 77.20, [5.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.1]),
//!     incident_with_features(28.61, 77.21, [5.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.1]),
//!     incident_with_features(28.70, 77.30, [0.0, 0.0, 0.0, 4.0, 9.0, 0.0, 0.0, 0.2]),
//!     incident_with_features(28.71, 77.31, [0.0, 0.0, 0.0, 4.0, 9.0, 0.0, 0.0, 0.2]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let model = RiskZoneModel::fit(&store, &ZoneModelConfig::default().with_zones(2))?;
//! let zones = model.assignments();
//! assert_eq!(zones[0], zones[1]);
//! assert_ne!(zones[0], zones[2]);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;
mod kmeans;
mod model;
mod scaler;

pub use config::ZoneModelConfig;
pub use error::ModelFitError;
pub use model::{RiskZoneModel, ZoneId, ZoneSummary};
pub use scaler::{StandardScaler, Standardised};
