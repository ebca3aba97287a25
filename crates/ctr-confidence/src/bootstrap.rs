//! Bootstrap variance estimation for any point estimator
//!
//! This module provides the resampling engine that:
//! - Treats the estimator as an opaque [`PointEstimator`]
//! - Draws indices uniformly or in proportion to importance weights
//! - Seeds every iteration independently from `(seed, iteration)`, so results
//!   are identical under sequential and parallel execution
//! - Propagates the first failing iteration instead of skipping it

use crate::{bootstrap_methods::IntervalMethod, ConfidenceInterval};
use ctr_core::{
    execution::{ExecutionEngine, SequentialEngine},
    CampaignDataset, EstimateOutput, Error, PointEstimator, Result,
};
use rand::distributions::{Distribution, Uniform, WeightedError, WeightedIndex};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use tracing::{debug, instrument};

/// Default number of bootstrap resamples
pub const DEFAULT_RESAMPLES: usize = 1000;

/// Resampling configuration
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use ctr_confidence::BootstrapConfig;
///
/// let config = BootstrapConfig::from_json(r#"{ "seed": 7 }"#).unwrap();
/// assert_eq!(config.resample_count, 1000);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of independent resample iterations (at least 2)
    pub resample_count: usize,
    /// Observations drawn per iteration; `None` means the dataset size
    pub sample_size: Option<usize>,
    /// Draw with probability proportional to weight instead of uniformly
    pub weighted: bool,
    /// Base seed; `None` draws one from the thread RNG
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            resample_count: DEFAULT_RESAMPLES,
            sample_size: None,
            weighted: false,
            seed: None,
        }
    }
}

impl BootstrapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Validation(format!("Invalid bootstrap configuration: {e}")))
    }

    /// Set the number of bootstrap resamples
    pub fn with_resamples(mut self, resample_count: usize) -> Self {
        self.resample_count = resample_count;
        self
    }

    /// Set the number of observations drawn per resample
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = Some(sample_size);
        self
    }

    /// Enable or disable importance resampling
    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration against a dataset, returning the sample size
    pub fn validate(&self, dataset: &CampaignDataset) -> Result<usize> {
        if self.resample_count < 2 {
            return Err(Error::Validation(format!(
                "resample_count must be at least 2, got {}",
                self.resample_count
            )));
        }
        let sample_size = self.sample_size.unwrap_or_else(|| dataset.size());
        if sample_size == 0 {
            return Err(Error::Validation(
                "sample_size must be at least 1".to_string(),
            ));
        }
        Ok(sample_size)
    }
}

/// Result of a bootstrap run
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapResult {
    /// Aggregate estimate of every resample, in iteration order
    pub values: Vec<f64>,
    /// Sample variance of `values` (divides by `n_resamples - 1`)
    pub variance: f64,
    /// Number of bootstrap resamples performed
    pub n_resamples: usize,
    /// Observations drawn per resample
    pub sample_size: usize,
    /// Whether indices were drawn in proportion to weight
    pub weighted: bool,
    /// Base seed actually used
    pub seed: u64,
    /// Name of the per-resample estimator
    pub estimator: &'static str,
    /// Time taken for bootstrap
    pub bootstrap_time_ms: Option<u64>,
}

impl BootstrapResult {
    /// Mean of the bootstrap distribution
    pub fn mean(&self) -> f64 {
        self.values.iter().mean()
    }

    /// Bootstrap standard error (square root of the variance)
    pub fn standard_error(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Confidence interval around `original_estimate` using `method`
    pub fn confidence_interval<M: IntervalMethod>(
        &self,
        method: &M,
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        method.calculate_interval(&self.values, original_estimate, confidence_level)
    }
}

/// How indices are drawn for one resample
enum IndexSampler {
    Uniform(Uniform<usize>),
    Weighted(WeightedIndex<f64>),
}

impl IndexSampler {
    fn new(dataset: &CampaignDataset, weighted: bool) -> Result<Self> {
        if !weighted {
            return Ok(Self::Uniform(Uniform::new(0, dataset.size())));
        }
        WeightedIndex::new(dataset.weights())
            .map(Self::Weighted)
            .map_err(|e| match e {
                WeightedError::AllWeightsZero => Error::Validation(
                    "importance resampling requires at least one positive weight".to_string(),
                ),
                other => Error::Validation(format!("invalid importance weights: {other}")),
            })
    }

    fn draw<R: Rng>(&self, rng: &mut R, sample_size: usize) -> Vec<usize> {
        match self {
            Self::Uniform(dist) => (0..sample_size).map(|_| dist.sample(rng)).collect(),
            Self::Weighted(dist) => (0..sample_size).map(|_| dist.sample(rng)).collect(),
        }
    }
}

/// Bootstrap engine
///
/// Runs `resample_count` independent iterations on the given execution
/// engine. Iteration `k` seeds its own RNG with `seed + k` (wrapping), draws
/// `sample_size` indices with replacement, builds the resampled dataset and
/// records the estimator's aggregate output.
#[derive(Debug, Clone)]
pub struct Bootstrap<E = SequentialEngine> {
    engine: E,
    config: BootstrapConfig,
}

impl Bootstrap<SequentialEngine> {
    /// Bootstrap running on the current thread
    pub fn sequential(config: BootstrapConfig) -> Self {
        Self::new(SequentialEngine, config)
    }
}

impl<E: ExecutionEngine> Bootstrap<E> {
    /// Create a new bootstrap engine
    pub fn new(engine: E, config: BootstrapConfig) -> Self {
        Self { engine, config }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run the bootstrap for `estimator` over `dataset`
    ///
    /// Under importance resampling the estimator must not read weights
    /// itself, otherwise importance would be counted twice; such a
    /// combination is rejected with [`Error::Validation`].
    #[instrument(skip(self, dataset, estimator),
                 fields(n_campaigns = dataset.size(),
                        n_resamples = self.config.resample_count,
                        weighted = self.config.weighted,
                        estimator = estimator.name()))]
    pub fn run<P: PointEstimator>(
        &self,
        dataset: &CampaignDataset,
        estimator: &P,
    ) -> Result<BootstrapResult> {
        let sample_size = self.config.validate(dataset)?;
        let weighted = self.config.weighted;

        if weighted && estimator.uses_weights() {
            return Err(Error::Validation(format!(
                "{} reads importance weights and cannot be combined with weighted resampling",
                estimator.name()
            )));
        }

        let sampler = IndexSampler::new(dataset, weighted)?;
        let seed = self.config.seed.unwrap_or_else(|| thread_rng().gen());
        let n_resamples = self.config.resample_count;

        debug!(
            "Running {} resamples of size {} (seed {}, {:?} execution)",
            n_resamples,
            sample_size,
            seed,
            self.engine.strategy()
        );

        let start_time = std::time::Instant::now();

        let values = self
            .engine
            .execute_batch(n_resamples, |k| -> Result<f64> {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(k as u64));
                let indices = sampler.draw(&mut rng, sample_size);
                let resampled = dataset.sample(&indices)?;
                estimator.estimate(&resampled).map(|output| output.aggregate())
            })
            .into_iter()
            .collect::<Result<Vec<f64>>>()?;

        let variance = values.iter().variance();

        debug!("Bootstrap completed: variance={:.6e}", variance);

        Ok(BootstrapResult {
            values,
            variance,
            n_resamples,
            sample_size,
            weighted,
            seed,
            estimator: estimator.name(),
            bootstrap_time_ms: Some(start_time.elapsed().as_millis() as u64),
        })
    }
}
