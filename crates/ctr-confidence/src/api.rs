//! High-level entry point for CTR estimation with bootstrap variance
//!
//! [`estimate_ctr`] is the only place that knows about the dataset, the
//! estimator and the resampling engine at once.

use crate::{
    bootstrap::{Bootstrap, BootstrapConfig},
    bootstrap_methods::{IntervalMethod, NormalInterval, PercentileInterval},
    ConfidenceInterval,
};
use ctr_core::{
    execution::{auto_engine, ExecutionEngine},
    CampaignDataset, PointEstimator, Result,
};
use ctr_estimators::{CtrEstimator, EstimationMethod};
use serde::Serialize;
use tracing::{debug, instrument};

/// Point estimate and bootstrap variance for one estimator
#[derive(Debug, Clone, Serialize)]
pub struct EstimationResult {
    /// Estimator applied to the full dataset
    pub point_estimate: f64,
    /// Bootstrap sample variance of the estimate
    pub variance_estimate: f64,
    /// Number of bootstrap resamples performed
    pub resample_count: usize,
    /// Which estimator produced the point estimate
    pub method: EstimationMethod,
    /// Observations drawn per resample
    pub sample_size: usize,
    /// Whether importance resampling was used
    pub weighted: bool,
    /// Base seed used for resampling
    pub seed: u64,
    /// Number of campaigns in the input dataset
    pub n_campaigns: usize,
    /// Per-resample estimates in iteration order
    pub bootstrap_values: Vec<f64>,
}

impl EstimationResult {
    /// Square root of the variance estimate
    pub fn standard_error(&self) -> f64 {
        self.variance_estimate.sqrt()
    }

    /// Normal-approximation interval `point ± z·se`
    pub fn normal_interval(&self, confidence_level: f64) -> Result<ConfidenceInterval> {
        NormalInterval::from_standard_error(
            self.point_estimate,
            self.standard_error(),
            confidence_level,
        )
    }

    /// Percentile interval of the bootstrap distribution
    pub fn percentile_interval(&self, confidence_level: f64) -> Result<ConfidenceInterval> {
        PercentileInterval.calculate_interval(
            &self.bootstrap_values,
            self.point_estimate,
            confidence_level,
        )
    }
}

/// Estimate CTR and its bootstrap variance
///
/// Runs on the default engine (Rayon when the `parallel` feature is on).
///
/// # Example
///
/// ```rust
/// use ctr_core::CampaignDataset;
/// use ctr_confidence::{estimate_ctr, BootstrapConfig};
/// use ctr_estimators::CtrEstimator;
///
/// let data = CampaignDataset::from_counts(&[(3, 120), (1, 80), (9, 200), (0, 40)]).unwrap();
/// let config = BootstrapConfig::new().with_resamples(200).with_seed(42);
///
/// let result = estimate_ctr(&data, &CtrEstimator::mean_ratio(), &config).unwrap();
/// assert!(result.variance_estimate >= 0.0);
/// assert_eq!(result.resample_count, 200);
/// ```
pub fn estimate_ctr(
    dataset: &CampaignDataset,
    estimator: &CtrEstimator,
    config: &BootstrapConfig,
) -> Result<EstimationResult> {
    estimate_ctr_with_engine(auto_engine(), dataset, estimator, config)
}

/// [`estimate_ctr`] on an explicit execution engine
///
/// Resampling is weighted exactly when the estimator reads weights; the
/// `weighted` flag of `config` is overridden accordingly. Each resample is
/// then evaluated with the estimator's resampling counterpart, so weighted
/// resampling is always paired with an unweighted per-sample estimate.
#[instrument(skip(engine, dataset, config),
             fields(n_campaigns = dataset.size(), method = %estimator.method()))]
pub fn estimate_ctr_with_engine<E: ExecutionEngine>(
    engine: E,
    dataset: &CampaignDataset,
    estimator: &CtrEstimator,
    config: &BootstrapConfig,
) -> Result<EstimationResult> {
    let point_estimate = estimator.estimate(dataset)?;

    let weighted = estimator.uses_weights();
    if weighted != config.weighted {
        debug!(
            "Overriding weighted={} with weighted={} to match {}",
            config.weighted,
            weighted,
            estimator.name()
        );
    }
    let config = config.clone().with_weighted(weighted);
    let per_sample = estimator.resampling_counterpart();

    let bootstrap = Bootstrap::new(engine, config).run(dataset, &per_sample)?;

    debug!(
        "{}: point={:.6}, variance={:.6e}",
        estimator.method(),
        point_estimate,
        bootstrap.variance
    );

    Ok(EstimationResult {
        point_estimate,
        variance_estimate: bootstrap.variance,
        resample_count: bootstrap.n_resamples,
        method: estimator.method(),
        sample_size: bootstrap.sample_size,
        weighted: bootstrap.weighted,
        seed: bootstrap.seed,
        n_campaigns: dataset.size(),
        bootstrap_values: bootstrap.values,
    })
}
