//! Core traits for click-through rate estimation
//!
//! Every estimator in the workspace implements [`PointEstimator`]. The
//! bootstrap engine only ever sees this one-argument contract, so variance
//! estimation is written once and reused for every estimator.

use crate::{CampaignDataset, Result};

/// Output of a point estimator
///
/// Aggregate estimators produce a single `f64`; per-campaign estimators
/// produce one value per campaign. Resampling records the aggregate scalar.
pub trait EstimateOutput: Clone + Send {
    /// Scalar summary recorded by resampling procedures
    fn aggregate(&self) -> f64;
}

impl EstimateOutput for f64 {
    fn aggregate(&self) -> f64 {
        *self
    }
}

impl EstimateOutput for Vec<f64> {
    /// Arithmetic mean of the per-campaign values (NaN when empty)
    fn aggregate(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.iter().sum::<f64>() / self.len() as f64
    }
}

/// Pure estimator applied to a whole dataset
///
/// # Example
///
/// ```rust
/// use ctr_core::{CampaignDataset, PointEstimator, Result};
///
/// #[derive(Clone)]
/// struct PooledRatio;
///
/// impl PointEstimator for PooledRatio {
///     type Output = f64;
///
///     fn estimate(&self, dataset: &CampaignDataset) -> Result<f64> {
///         dataset.pooled_ratio()
///     }
///
///     fn name(&self) -> &'static str {
///         "Pooled Ratio"
///     }
/// }
///
/// let data = CampaignDataset::from_counts(&[(1, 10), (3, 30)]).unwrap();
/// assert!((PooledRatio.estimate(&data).unwrap() - 0.1).abs() < 1e-12);
/// ```
pub trait PointEstimator: Send + Sync {
    /// Scalar or per-campaign result
    type Output: EstimateOutput;

    /// Estimate from the given dataset
    fn estimate(&self, dataset: &CampaignDataset) -> Result<Self::Output>;

    /// Human-readable name of the estimator
    fn name(&self) -> &'static str;

    /// Whether the estimate reads the dataset's importance weights
    ///
    /// Importance resampling must not be combined with an estimator that
    /// returns `true` here, or weights would be counted twice.
    fn uses_weights(&self) -> bool {
        false
    }
}

impl<E: PointEstimator + ?Sized> PointEstimator for &E {
    type Output = E::Output;

    fn estimate(&self, dataset: &CampaignDataset) -> Result<Self::Output> {
        (**self).estimate(dataset)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn uses_weights(&self) -> bool {
        (**self).uses_weights()
    }
}
