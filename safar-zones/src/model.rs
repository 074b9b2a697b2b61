//! The fitted risk zone model.

use std::fmt;

use safar_core::{FeatureVector, IncidentStore};

use crate::kmeans::{self, Clustering};
use crate::scaler::{StandardScaler, Standardised};
use crate::{ModelFitError, ZoneModelConfig};

/// Identifier of one risk zone, in `0..K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneId(usize);

impl ZoneId {
    /// Position of the zone in [`RiskZoneModel::zone_risk`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone {}", self.0)
    }
}

/// Size and mean risk of one zone, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSummary {
    /// Zone being described.
    pub zone: ZoneId,
    /// Number of incidents assigned to the zone.
    pub incidents: usize,
    /// Mean risk weight of those incidents, `0.0` when there are none.
    pub mean_risk: f64,
}

/// Incidents grouped into `K` clusters by their standardised feature vectors,
/// each cluster carrying the mean risk weight of its members.
///
/// The model is built once at startup and then only read.
///
/// # Examples
/// ```
/// use safar_core::test_support::incident_with_risk;
/// use safar_core::IncidentStore;
/// use safar_zones::{RiskZoneModel, ZoneModelConfig};
///
/// # fn main() -> Result<(), safar_zones::ModelFitError> {
/// let store: IncidentStore = (0..8)
///     .map(|i| incident_with_risk(28.6, 77.2, f64::from(i % 2) * 50.0))
///     .collect();
/// let model = RiskZoneModel::fit(&store, &ZoneModelConfig::default().with_zones(2))?;
/// assert_eq!(model.zone_count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RiskZoneModel {
    scaler: StandardScaler,
    centroids: Vec<Standardised>,
    assignments: Vec<ZoneId>,
    zone_risk: Vec<f64>,
    zone_sizes: Vec<usize>,
    inertia: f64,
}

impl RiskZoneModel {
    /// Standardise the store's feature vectors, cluster them, and compute the
    /// mean risk of every zone.
    ///
    /// # Errors
    /// Returns [`ModelFitError`] when the store is empty, holds fewer
    /// incidents than zones, or the configuration is unusable.
    pub fn fit(store: &IncidentStore, config: &ZoneModelConfig) -> Result<Self, ModelFitError> {
        let features = store.feature_vectors();
        let scaler = StandardScaler::fit(&features)?;
        let standardised: Vec<Standardised> = features.iter().map(|f| scaler.transform(f)).collect();
        let Clustering {
            centroids, inertia, ..
        } = kmeans::cluster(&standardised, config)?;

        let assignments: Vec<ZoneId> = standardised
            .iter()
            .map(|point| ZoneId(kmeans::nearest(point, &centroids)))
            .collect();
        let (zone_risk, zone_sizes) =
            zone_means(&assignments, &store.risk_weights(), centroids.len());

        log::info!(
            "fitted {} risk zones over {} incidents (inertia {inertia:.3})",
            centroids.len(),
            store.len()
        );
        for (zone, (risk, size)) in zone_risk.iter().zip(&zone_sizes).enumerate() {
            log::debug!("zone {zone}: {size} incidents, mean risk {risk:.3}");
        }

        Ok(Self {
            scaler,
            centroids,
            assignments,
            zone_risk,
            zone_sizes,
            inertia,
        })
    }

    /// Number of zones `K`.
    #[must_use]
    pub fn zone_count(&self) -> usize {
        self.centroids.len()
    }

    /// Zone whose centroid is nearest to an already standardised vector.
    ///
    /// Ties resolve to the lowest zone index.
    #[must_use]
    pub fn assign(&self, standardised: &Standardised) -> ZoneId {
        ZoneId(kmeans::nearest(standardised, &self.centroids))
    }

    /// Standardise `features` with the fitted scaler and assign a zone.
    #[must_use]
    pub fn zone_for(&self, features: &FeatureVector) -> ZoneId {
        self.assign(&self.scaler.transform(features))
    }

    /// Mean risk weight per zone, indexed by [`ZoneId::index`].
    #[must_use]
    pub fn zone_risk(&self) -> &[f64] {
        &self.zone_risk
    }

    /// Mean risk weight of one zone, `None` when the id is out of range.
    #[must_use]
    pub fn risk_of(&self, zone: ZoneId) -> Option<f64> {
        self.zone_risk.get(zone.index()).copied()
    }

    /// Zone of every fitted incident, in load order.
    #[must_use]
    pub fn assignments(&self) -> &[ZoneId] {
        &self.assignments
    }

    /// Per-zone incident counts and mean risks.
    #[must_use]
    pub fn zones(&self) -> Vec<ZoneSummary> {
        self.zone_risk
            .iter()
            .zip(&self.zone_sizes)
            .enumerate()
            .map(|(index, (&mean_risk, &incidents))| ZoneSummary {
                zone: ZoneId(index),
                incidents,
                mean_risk,
            })
            .collect()
    }

    /// Fitted standardisation.
    #[must_use]
    pub const fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Sum of squared distances from each incident to its zone centroid.
    #[must_use]
    pub const fn inertia(&self) -> f64 {
        self.inertia
    }
}

/// Mean risk and member count per zone, accumulated in load order.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "zone risk is the arithmetic mean of member risk weights"
)]
fn zone_means(assignments: &[ZoneId], risks: &[f64], zones: usize) -> (Vec<f64>, Vec<usize>) {
    let mut sums = vec![0.0; zones];
    let mut counts = vec![0_usize; zones];
    for (zone, risk) in assignments.iter().zip(risks) {
        if let (Some(sum), Some(count)) = (sums.get_mut(zone.index()), counts.get_mut(zone.index())) {
            *sum += risk;
            *count += 1;
        }
    }
    let means = sums
        .into_iter()
        .zip(&counts)
        .map(|(sum, &count)| if count == 0 { 0.0 } else { sum / count as f64 })
        .collect();
    (means, counts)
}
