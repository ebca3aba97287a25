//! Runtime selection among the point estimators

use crate::{
    LaplaceBayesEstimator, MeanRatioEstimator, RegressionEstimator, RegressionWeighting,
    Transform, WeightedMeanRatioEstimator,
};
use ctr_core::{CampaignDataset, EstimateOutput, PointEstimator, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying which estimator produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EstimationMethod {
    MeanRatio,
    WeightedMeanRatio,
    LaplaceBayes,
    Regression,
}

impl fmt::Display for EstimationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EstimationMethod::MeanRatio => "mean ratio",
            EstimationMethod::WeightedMeanRatio => "weighted mean ratio",
            EstimationMethod::LaplaceBayes => "Laplace-Bayes",
            EstimationMethod::Regression => "regression",
        };
        f.write_str(name)
    }
}

/// Any of the point estimators, reduced to a scalar output
///
/// Laplace-Bayes is inherently per-campaign; here it reports the mean of
/// its smoothed campaign rates.
#[derive(Debug, Clone, Copy)]
pub enum CtrEstimator {
    MeanRatio(MeanRatioEstimator),
    WeightedMeanRatio(WeightedMeanRatioEstimator),
    LaplaceBayes(LaplaceBayesEstimator),
    Regression(RegressionEstimator),
}

impl CtrEstimator {
    pub fn mean_ratio() -> Self {
        Self::MeanRatio(MeanRatioEstimator)
    }

    pub fn weighted_mean_ratio() -> Self {
        Self::WeightedMeanRatio(WeightedMeanRatioEstimator)
    }

    pub fn laplace_bayes() -> Self {
        Self::LaplaceBayes(LaplaceBayesEstimator::new())
    }

    pub fn regression(transform: Transform) -> Self {
        Self::Regression(RegressionEstimator::new().with_transform(transform))
    }

    /// Metadata tag for this variant
    pub fn method(&self) -> EstimationMethod {
        match self {
            CtrEstimator::MeanRatio(_) => EstimationMethod::MeanRatio,
            CtrEstimator::WeightedMeanRatio(_) => EstimationMethod::WeightedMeanRatio,
            CtrEstimator::LaplaceBayes(_) => EstimationMethod::LaplaceBayes,
            CtrEstimator::Regression(_) => EstimationMethod::Regression,
        }
    }

    /// Estimator to apply to each importance-resampled dataset
    ///
    /// Importance resampling already duplicates high-weight campaigns, so the
    /// per-sample estimator must ignore weights: the weighted mean becomes the
    /// plain mean ratio and weighted least squares becomes ordinary least
    /// squares. Unweighted estimators are returned unchanged.
    pub fn resampling_counterpart(&self) -> Self {
        match self {
            CtrEstimator::WeightedMeanRatio(_) => Self::mean_ratio(),
            CtrEstimator::Regression(r) => {
                Self::Regression(r.with_weighting(RegressionWeighting::Uniform))
            }
            other => *other,
        }
    }
}

impl PointEstimator for CtrEstimator {
    type Output = f64;

    fn estimate(&self, dataset: &CampaignDataset) -> Result<f64> {
        match self {
            CtrEstimator::MeanRatio(e) => e.estimate(dataset),
            CtrEstimator::WeightedMeanRatio(e) => e.estimate(dataset),
            CtrEstimator::LaplaceBayes(e) => e.estimate(dataset).map(|v| v.aggregate()),
            CtrEstimator::Regression(e) => e.estimate(dataset),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            CtrEstimator::MeanRatio(e) => e.name(),
            CtrEstimator::WeightedMeanRatio(e) => e.name(),
            CtrEstimator::LaplaceBayes(e) => e.name(),
            CtrEstimator::Regression(e) => e.name(),
        }
    }

    fn uses_weights(&self) -> bool {
        match self {
            CtrEstimator::MeanRatio(e) => e.uses_weights(),
            CtrEstimator::WeightedMeanRatio(e) => e.uses_weights(),
            CtrEstimator::LaplaceBayes(e) => e.uses_weights(),
            CtrEstimator::Regression(e) => e.uses_weights(),
        }
    }
}

impl From<MeanRatioEstimator> for CtrEstimator {
    fn from(e: MeanRatioEstimator) -> Self {
        Self::MeanRatio(e)
    }
}

impl From<WeightedMeanRatioEstimator> for CtrEstimator {
    fn from(e: WeightedMeanRatioEstimator) -> Self {
        Self::WeightedMeanRatio(e)
    }
}

impl From<LaplaceBayesEstimator> for CtrEstimator {
    fn from(e: LaplaceBayesEstimator) -> Self {
        Self::LaplaceBayes(e)
    }
}

impl From<RegressionEstimator> for CtrEstimator {
    fn from(e: RegressionEstimator) -> Self {
        Self::Regression(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_methods() {
        assert_eq!(CtrEstimator::mean_ratio().method(), EstimationMethod::MeanRatio);
        assert_eq!(
            CtrEstimator::regression(Transform::Log1p).method(),
            EstimationMethod::Regression
        );
        assert_eq!(EstimationMethod::LaplaceBayes.to_string(), "Laplace-Bayes");
    }

    #[test]
    fn test_weighted_counterpart_is_mean_ratio() {
        let counterpart = CtrEstimator::weighted_mean_ratio().resampling_counterpart();
        assert_eq!(counterpart.method(), EstimationMethod::MeanRatio);
        assert!(!counterpart.uses_weights());
    }

    #[test]
    fn test_regression_counterpart_drops_weights() {
        let weighted: CtrEstimator = RegressionEstimator::new()
            .with_transform(Transform::Sqrt)
            .with_weighting(RegressionWeighting::Dataset)
            .into();
        assert!(weighted.uses_weights());

        match weighted.resampling_counterpart() {
            CtrEstimator::Regression(r) => {
                assert_eq!(r.weighting(), RegressionWeighting::Uniform);
                assert_eq!(r.transform().name(), "sqrt");
            }
            other => panic!("unexpected counterpart {other:?}"),
        }
    }

    #[test]
    fn test_laplace_reduces_to_mean() {
        let data = CampaignDataset::from_counts(&[(0, 0), (8, 8)]).unwrap();
        let estimate = CtrEstimator::laplace_bayes().estimate(&data).unwrap();
        assert_relative_eq!(estimate, (0.5 + 0.9) / 2.0);
    }

    #[test]
    fn test_dispatch_matches_direct() {
        let data = CampaignDataset::from_counts(&[(2, 40), (9, 90)]).unwrap();
        assert_eq!(
            CtrEstimator::mean_ratio().estimate(&data).unwrap(),
            MeanRatioEstimator.estimate(&data).unwrap()
        );
        assert_eq!(
            CtrEstimator::regression(Transform::Identity)
                .estimate(&data)
                .unwrap(),
            RegressionEstimator::new().estimate(&data).unwrap()
        );
    }
}
