//! In-memory incident storage.
//!
//! The store is filled once when the dataset is loaded and never mutated
//! afterwards, so it can be shared across scoring requests without locking.

use crate::{CrimeIncident, FeatureVector};

/// Read-only collection of [`CrimeIncident`] values in load order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use safar_core::{CrimeIncident, FeatureVector, IncidentStore, RiskWeights};
///
/// # fn main() -> Result<(), safar_core::IncidentError> {
/// let incident = CrimeIncident::new(
///     Coord { x: 77.2, y: 28.6 },
///     FeatureVector::new([0.0; 8]),
///     &RiskWeights::default(),
/// )?;
/// let store = IncidentStore::new(vec![incident]);
/// assert_eq!(store.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentStore {
    incidents: Vec<CrimeIncident>,
}

impl IncidentStore {
    /// Wrap an already-validated set of incidents.
    #[must_use]
    pub const fn new(incidents: Vec<CrimeIncident>) -> Self {
        Self { incidents }
    }

    /// All incidents in load order.
    #[must_use]
    pub fn incidents(&self) -> &[CrimeIncident] {
        &self.incidents
    }

    /// Number of stored incidents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Whether the store holds no incidents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Iterate over incidents in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, CrimeIncident> {
        self.incidents.iter()
    }

    /// Feature vectors in load order, as consumed by zone clustering.
    #[must_use]
    pub fn feature_vectors(&self) -> Vec<FeatureVector> {
        self.incidents.iter().map(|incident| *incident.features()).collect()
    }

    /// Risk weights in load order.
    #[must_use]
    pub fn risk_weights(&self) -> Vec<f64> {
        self.incidents.iter().map(CrimeIncident::risk_weight).collect()
    }
}

impl FromIterator<CrimeIncident> for IncidentStore {
    fn from_iter<I: IntoIterator<Item = CrimeIncident>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a IncidentStore {
    type Item = &'a CrimeIncident;
    type IntoIter = std::slice::Iter<'a, CrimeIncident>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
