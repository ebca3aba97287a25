//! Click-through rate estimation across advertising campaigns
//!
//! Aggregate CTR over many campaigns is ambiguous: large campaigns swamp a
//! pooled ratio, a plain mean of ratios overweights tiny campaigns, and
//! zero-impression campaigns have no ratio at all. This crate bundles several
//! estimators with a bootstrap engine so their variance can be compared on
//! the same data.
//!
//! - [`ctr_core`]: datasets, the estimator trait, errors and execution engines
//! - [`ctr_estimators`]: mean-of-ratios, weighted, Laplace-smoothed and
//!   regression estimators
//! - [`ctr_confidence`]: bootstrap variance and confidence intervals
//!
//! # Example
//!
//! ```rust
//! use ctr_stats::prelude::*;
//!
//! let data = CampaignDataset::from_counts(&[(12, 400), (3, 150), (0, 60), (41, 2000)])
//!     .unwrap();
//! let config = BootstrapConfig::new().with_resamples(300).with_seed(11);
//!
//! for estimator in [
//!     CtrEstimator::mean_ratio(),
//!     CtrEstimator::laplace_bayes(),
//!     CtrEstimator::regression(Transform::Identity),
//! ] {
//!     let result = estimate_ctr(&data, &estimator, &config).unwrap();
//!     println!("{}: {:.4} ± {:.4}", result.method, result.point_estimate, result.standard_error());
//! }
//! ```

pub use ctr_confidence;
pub use ctr_core;
pub use ctr_estimators;

pub use ctr_confidence::{estimate_ctr, estimate_ctr_with_engine, BootstrapConfig, EstimationResult};
pub use ctr_core::{CampaignDataset, CampaignObservation, Error, PointEstimator, Result};
pub use ctr_estimators::{CtrEstimator, EstimationMethod};

/// Commonly used items
pub mod prelude {
    pub use ctr_confidence::{
        estimate_ctr, estimate_ctr_with_engine, BasicInterval, Bootstrap, BootstrapConfig,
        BootstrapResult, ConfidenceInterval, EstimationResult, IntervalMethod, NormalInterval,
        PercentileInterval,
    };
    pub use ctr_core::{
        CampaignDataset, CampaignObservation, Error, ExecutionEngine, PointEstimator, Result,
        WeightScheme,
    };
    pub use ctr_estimators::{
        ClampPolicy, CtrEstimator, EstimationMethod, LaplaceBayesEstimator, MeanRatioEstimator,
        RegressionEstimator, RegressionWeighting, Transform, WeightedMeanRatioEstimator,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
