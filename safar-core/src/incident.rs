//! Crime incidents and the fixed severity weighting applied to them.

use geo::Coord;
use thiserror::Error;

/// Number of numeric features recorded for every incident.
pub const FEATURE_COUNT: usize = 8;

/// Position of a value within a [`FeatureVector`].
///
/// The order matches the source dataset: seven raw severity counts followed
/// by the normalised crime-to-area ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Feature {
    /// Recorded murders.
    Murder,
    /// Recorded rapes.
    Rape,
    /// Recorded gang rapes.
    GangRape,
    /// Recorded robberies.
    Robbery,
    /// Recorded thefts.
    Theft,
    /// Recorded assault murders.
    AssaultMurder,
    /// Recorded sexual harassment cases.
    SexualHarassment,
    /// Crime count divided by area, already normalised by the source.
    CrimeAreaRatio,
}

impl Feature {
    /// Every feature in dataset order.
    pub const ALL: [Self; FEATURE_COUNT] = [
        Self::Murder,
        Self::Rape,
        Self::GangRape,
        Self::Robbery,
        Self::Theft,
        Self::AssaultMurder,
        Self::SexualHarassment,
        Self::CrimeAreaRatio,
    ];

    /// Index of this feature inside a [`FeatureVector`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Ordered severity counts for a single incident.
///
/// # Examples
/// ```
/// use safar_core::{Feature, FeatureVector};
///
/// let features = FeatureVector::new([1.0, 0.0, 0.0, 2.0, 5.0, 0.0, 1.0, 0.4]);
/// assert_eq!(features.get(Feature::Robbery), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Wrap raw feature values in dataset order.
    #[must_use]
    pub const fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Value of a single feature.
    #[must_use]
    pub const fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    /// Borrow the values in dataset order.
    #[must_use]
    pub const fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    fn first_invalid(&self) -> Option<(Feature, f64)> {
        Feature::ALL
            .into_iter()
            .map(|feature| (feature, self.get(feature)))
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
    }
}

/// Per-feature multipliers used to collapse a [`FeatureVector`] into a risk
/// weight.
///
/// Violent crimes carry more weight than property crimes; the area ratio
/// contributes a small correction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "[f64; FEATURE_COUNT]", into = "[f64; FEATURE_COUNT]")
)]
pub struct RiskWeights([f64; FEATURE_COUNT]);

impl Default for RiskWeights {
    fn default() -> Self {
        Self([10.0, 8.0, 10.0, 3.0, 1.0, 5.0, 4.0, 0.1])
    }
}

impl RiskWeights {
    /// Validate and wrap custom weights.
    ///
    /// # Errors
    /// Returns [`IncidentError::InvalidWeight`] when a weight is negative or
    /// not finite, since either would break the non-negative risk invariant.
    pub fn new(weights: [f64; FEATURE_COUNT]) -> Result<Self, IncidentError> {
        let candidate = Self(weights);
        let invalid = Feature::ALL.into_iter().find(|feature| {
            let value = candidate.weight(*feature);
            !value.is_finite() || value < 0.0
        });
        if let Some(feature) = invalid {
            return Err(IncidentError::InvalidWeight {
                feature,
                value: candidate.weight(feature),
            });
        }
        Ok(candidate)
    }

    /// Multiplier applied to `feature`.
    #[must_use]
    pub const fn weight(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    /// Weighted sum of `features`, accumulated in dataset order.
    ///
    /// # Examples
    /// ```
    /// use safar_core::{FeatureVector, RiskWeights};
    ///
    /// let features = FeatureVector::new([1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 10.0]);
    /// assert_eq!(RiskWeights::default().risk_weight(&features), 13.0);
    /// ```
    #[must_use]
    pub fn risk_weight(&self, features: &FeatureVector) -> f64 {
        Feature::ALL
            .into_iter()
            .map(|feature| features.get(feature) * self.weight(feature))
            .fold(0.0, |total, term| total + term)
    }
}

impl From<RiskWeights> for [f64; FEATURE_COUNT] {
    fn from(weights: RiskWeights) -> Self {
        weights.0
    }
}

impl TryFrom<[f64; FEATURE_COUNT]> for RiskWeights {
    type Error = IncidentError;

    fn try_from(weights: [f64; FEATURE_COUNT]) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

/// Errors returned when building a [`CrimeIncident`] or [`RiskWeights`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum IncidentError {
    /// Latitude or longitude is not a finite WGS84 coordinate.
    #[error("incident location ({lat}, {lng}) is not a valid WGS84 coordinate")]
    InvalidLocation {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lng: f64,
    },
    /// A feature count is negative or not finite.
    #[error("feature {feature:?} has invalid value {value}")]
    InvalidFeature {
        /// Offending feature.
        feature: Feature,
        /// Value supplied for it.
        value: f64,
    },
    /// A weight is negative or not finite.
    #[error("weight for {feature:?} has invalid value {value}")]
    InvalidWeight {
        /// Offending feature.
        feature: Feature,
        /// Weight supplied for it.
        value: f64,
    },
}

/// A single recorded crime entry.
///
/// Incidents are immutable once built. The risk weight is computed from the
/// feature vector at construction and is always non-negative. Decoding
/// reads `location`, `features` and optional `weights`, then rebuilds the
/// incident through [`CrimeIncident::new`]; a serialised `risk_weight` is
/// ignored.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use safar_core::{CrimeIncident, FeatureVector, RiskWeights};
///
/// # fn main() -> Result<(), safar_core::IncidentError> {
/// let incident = CrimeIncident::new(
///     Coord { x: 77.21, y: 28.61 },
///     FeatureVector::new([0.0, 0.0, 0.0, 1.0, 4.0, 0.0, 0.0, 0.0]),
///     &RiskWeights::default(),
/// )?;
/// assert_eq!(incident.risk_weight(), 7.0);
/// assert_eq!(incident.lat(), 28.61);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCrimeIncident"))]
pub struct CrimeIncident {
    location: Coord<f64>,
    features: FeatureVector,
    risk_weight: f64,
}

impl CrimeIncident {
    /// Validate the inputs and compute the incident's risk weight.
    ///
    /// `location` uses `x = longitude`, `y = latitude`.
    ///
    /// # Errors
    /// Returns [`IncidentError::InvalidLocation`] for coordinates outside
    /// WGS84 bounds and [`IncidentError::InvalidFeature`] for negative or
    /// non-finite feature values.
    pub fn new(
        location: Coord<f64>,
        features: FeatureVector,
        weights: &RiskWeights,
    ) -> Result<Self, IncidentError> {
        if !is_wgs84(location) {
            return Err(IncidentError::InvalidLocation {
                lat: location.y,
                lng: location.x,
            });
        }
        if let Some((feature, value)) = features.first_invalid() {
            return Err(IncidentError::InvalidFeature { feature, value });
        }
        Ok(Self {
            location,
            features,
            risk_weight: weights.risk_weight(&features),
        })
    }

    /// Geographic position (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.location.x
    }

    /// Raw severity features.
    #[must_use]
    pub const fn features(&self) -> &FeatureVector {
        &self.features
    }

    /// Precomputed severity score.
    #[must_use]
    pub const fn risk_weight(&self) -> f64 {
        self.risk_weight
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCrimeIncident {
    location: Coord<f64>,
    features: FeatureVector,
    #[serde(default)]
    weights: RiskWeights,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCrimeIncident> for CrimeIncident {
    type Error = IncidentError;

    fn try_from(raw: RawCrimeIncident) -> Result<Self, Self::Error> {
        Self::new(raw.location, raw.features, &raw.weights)
    }
}

pub(crate) fn is_wgs84(coord: Coord<f64>) -> bool {
    coord.x.is_finite()
        && coord.y.is_finite()
        && (-90.0..=90.0).contains(&coord.y)
        && (-180.0..=180.0).contains(&coord.x)
}
