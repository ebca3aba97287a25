//! Point estimators for aggregate click-through rate
//!
//! All estimators implement [`ctr_core::PointEstimator`] and are pure
//! functions of a [`ctr_core::CampaignDataset`]:
//!
//! - [`MeanRatioEstimator`]: unweighted mean of per-campaign ratios
//! - [`WeightedMeanRatioEstimator`]: importance-weighted mean of ratios
//! - [`LaplaceBayesEstimator`]: per-campaign smoothed ratios
//! - [`RegressionEstimator`]: no-intercept least squares under a transform
//!
//! [`CtrEstimator`] wraps them for runtime selection.
//!
//! # Example
//!
//! ```rust
//! use ctr_core::{CampaignDataset, PointEstimator};
//! use ctr_estimators::{LaplaceBayesEstimator, MeanRatioEstimator};
//!
//! let data = CampaignDataset::from_counts(&[(0, 100), (0, 10_000)]).unwrap();
//!
//! let smoothed = LaplaceBayesEstimator::new().estimate(&data).unwrap();
//! assert!(smoothed[0] > smoothed[1]);
//!
//! assert_eq!(MeanRatioEstimator.estimate(&data).unwrap(), 0.0);
//! ```

mod laplace;
mod mean;
mod regression;
mod selection;
mod weighted_mean;

pub use laplace::{ClampPolicy, LaplaceBayesEstimator};
pub use mean::MeanRatioEstimator;
pub use regression::{RegressionEstimator, RegressionFit, RegressionWeighting, Transform};
pub use selection::{CtrEstimator, EstimationMethod};
pub use weighted_mean::WeightedMeanRatioEstimator;
