//! Bootstrap variance and confidence intervals for CTR estimators
//!
//! No closed-form variance exists for a mean of ratios, so this crate
//! estimates it by resampling:
//!
//! - **[`Bootstrap`]**: generic engine over any [`ctr_core::PointEstimator`],
//!   with uniform or importance-weighted resampling
//! - **Interval methods**: percentile, basic and normal intervals over the
//!   bootstrap distribution
//! - **[`estimate_ctr`]**: point estimate plus variance in one call
//!
//! # Example
//!
//! ```rust
//! use ctr_core::{CampaignDataset, WeightScheme};
//! use ctr_confidence::{estimate_ctr, BootstrapConfig};
//! use ctr_estimators::CtrEstimator;
//!
//! let data = CampaignDataset::from_counts(&[(4, 200), (1, 30), (12, 900), (0, 15)])
//!     .unwrap()
//!     .with_weight_scheme(WeightScheme::LogImpressions);
//!
//! let config = BootstrapConfig::new().with_resamples(500).with_seed(7);
//! let result = estimate_ctr(&data, &CtrEstimator::weighted_mean_ratio(), &config).unwrap();
//!
//! // weighted estimators are paired with importance resampling
//! assert!(result.weighted);
//! let ci = result.normal_interval(0.95).unwrap();
//! println!("{ci}");
//! ```

pub mod api;
mod bootstrap;
mod bootstrap_methods;
mod types;

// Re-exports
pub use api::{estimate_ctr, estimate_ctr_with_engine, EstimationResult};
pub use bootstrap::{Bootstrap, BootstrapConfig, BootstrapResult, DEFAULT_RESAMPLES};
pub use bootstrap_methods::{BasicInterval, IntervalMethod, NormalInterval, PercentileInterval};
pub use types::{ConfidenceInterval, ConfidenceLevel};
