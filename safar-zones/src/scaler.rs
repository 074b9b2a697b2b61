//! Per-feature standardisation applied before clustering.

use safar_core::{FEATURE_COUNT, Feature, FeatureVector};

use crate::ModelFitError;

/// A feature vector after standardisation.
pub type Standardised = [f64; FEATURE_COUNT];

/// Rescales each feature to zero mean and unit variance.
///
/// Variance is the population variance of the fitted rows. A feature with no
/// spread keeps a scale of `1.0`, so it standardises to zero rather than
/// dividing by zero.
///
/// # Examples
/// ```
/// use safar_core::FeatureVector;
/// use safar_zones::StandardScaler;
///
/// # fn main() -> Result<(), safar_zones::ModelFitError> {
/// let rows = [
///     FeatureVector::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]),
///     FeatureVector::new([3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]),
/// ];
/// let scaler = StandardScaler::fit(&rows)?;
/// let scaled = scaler.transform(&rows[1]);
/// assert_eq!(scaled[0], 1.0);
/// assert_eq!(scaled[7], 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Standardised,
    scale: Standardised,
}

impl StandardScaler {
    /// Learn per-feature mean and standard deviation from `rows`.
    ///
    /// # Errors
    /// Returns [`ModelFitError::Empty`] when `rows` is empty and
    /// [`ModelFitError::NonFiniteFeature`] when a value is NaN or infinite.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "mean and variance need floating-point averaging over the row count"
    )]
    pub fn fit(rows: &[FeatureVector]) -> Result<Self, ModelFitError> {
        if rows.is_empty() {
            return Err(ModelFitError::Empty);
        }
        ensure_finite(rows)?;

        let count = rows.len() as f64;
        let mut mean = [0.0; FEATURE_COUNT];
        let mut scale = [1.0; FEATURE_COUNT];
        for feature in Feature::ALL {
            let slot = feature.index();
            let avg = rows.iter().map(|row| row.get(feature)).sum::<f64>() / count;
            let variance = rows
                .iter()
                .map(|row| (row.get(feature) - avg).powi(2))
                .sum::<f64>()
                / count;
            if let Some(m) = mean.get_mut(slot) {
                *m = avg;
            }
            if let Some(s) = scale.get_mut(slot) {
                *s = if variance.is_normal() { variance.sqrt() } else { 1.0 };
            }
        }
        Ok(Self { mean, scale })
    }

    /// Standardise one feature vector with the fitted statistics.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "standardisation subtracts the mean and divides by the scale"
    )]
    pub fn transform(&self, features: &FeatureVector) -> Standardised {
        let mut out = *features.as_array();
        for ((value, mean), scale) in out.iter_mut().zip(&self.mean).zip(&self.scale) {
            *value = (*value - mean) / scale;
        }
        out
    }

    /// Fitted per-feature means in dataset column order.
    #[must_use]
    pub const fn mean(&self) -> &Standardised {
        &self.mean
    }

    /// Fitted per-feature scales in dataset column order.
    #[must_use]
    pub const fn scale(&self) -> &Standardised {
        &self.scale
    }
}

fn ensure_finite(rows: &[FeatureVector]) -> Result<(), ModelFitError> {
    for (row, features) in rows.iter().enumerate() {
        if let Some(feature) = Feature::ALL
            .into_iter()
            .find(|&feature| !features.get(feature).is_finite())
        {
            return Err(ModelFitError::NonFiniteFeature { row, feature });
        }
    }
    Ok(())
}
