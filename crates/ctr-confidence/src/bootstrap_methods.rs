//! Interval methods over a bootstrap distribution
//!
//! Each method turns the recorded resample estimates plus the original point
//! estimate into a [`ConfidenceInterval`].

use crate::{ConfidenceInterval, ConfidenceLevel};
use ctr_core::{Error, Result};
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;
use tracing::{debug, instrument};

/// Method for calculating a confidence interval from bootstrap estimates
pub trait IntervalMethod: Clone + Send + Sync {
    /// Calculate confidence interval from bootstrap distribution
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval>;

    /// Method name for documentation
    fn name(&self) -> &'static str;
}

fn sorted_estimates(bootstrap_estimates: &[f64]) -> Result<Vec<f64>> {
    if bootstrap_estimates.is_empty() {
        return Err(Error::Validation("No bootstrap estimates".to_string()));
    }
    let mut sorted = bootstrap_estimates.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Empirical quantile by index truncation
fn empirical_quantile(sorted: &[f64], p: f64) -> f64 {
    let idx = ((p * sorted.len() as f64) as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Percentile bootstrap method
///
/// Uses the empirical percentiles of the bootstrap distribution directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileInterval;

impl IntervalMethod for PercentileInterval {
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        let level = ConfidenceLevel::new(confidence_level)?;
        let sorted = sorted_estimates(bootstrap_estimates)?;

        let tail = level.tail_probability();
        Ok(ConfidenceInterval::new(
            empirical_quantile(&sorted, tail),
            empirical_quantile(&sorted, 1.0 - tail),
            original_estimate,
            confidence_level,
        ))
    }

    fn name(&self) -> &'static str {
        "Percentile Bootstrap"
    }
}

/// Basic (reverse percentile) bootstrap method
///
/// Reflects the bootstrap percentiles around the original estimate:
/// `[2θ - q(1-α/2), 2θ - q(α/2)]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicInterval;

impl IntervalMethod for BasicInterval {
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        let level = ConfidenceLevel::new(confidence_level)?;
        let sorted = sorted_estimates(bootstrap_estimates)?;

        let tail = level.tail_probability();
        let q_lower = empirical_quantile(&sorted, tail);
        let q_upper = empirical_quantile(&sorted, 1.0 - tail);

        Ok(ConfidenceInterval::new(
            2.0 * original_estimate - q_upper,
            2.0 * original_estimate - q_lower,
            original_estimate,
            confidence_level,
        ))
    }

    fn name(&self) -> &'static str {
        "Basic Bootstrap"
    }
}

/// Normal-approximation bootstrap method
///
/// `θ ± z(1-α/2) · sd(bootstrap estimates)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalInterval;

impl NormalInterval {
    /// Interval around `estimate` with the given standard error
    pub fn from_standard_error(
        estimate: f64,
        standard_error: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        let level = ConfidenceLevel::new(confidence_level)?;
        if !standard_error.is_finite() || standard_error < 0.0 {
            return Err(Error::Computation(format!(
                "Standard error must be finite and non-negative, got {standard_error}"
            )));
        }

        let normal = Normal::new(0.0, 1.0).map_err(|e| {
            Error::Computation(format!("Failed to create normal distribution: {}", e))
        })?;
        let z = normal.inverse_cdf(1.0 - level.tail_probability());
        let margin = z * standard_error;

        debug!("Normal interval: z={:.4}, se={:.6}, margin={:.6}", z, standard_error, margin);

        Ok(ConfidenceInterval::new(
            estimate - margin,
            estimate + margin,
            estimate,
            confidence_level,
        ))
    }
}

impl IntervalMethod for NormalInterval {
    #[instrument(skip(bootstrap_estimates), fields(n_estimates = bootstrap_estimates.len()))]
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        if bootstrap_estimates.len() < 2 {
            return Err(Error::Validation(format!(
                "Normal interval needs at least 2 bootstrap estimates, got {}",
                bootstrap_estimates.len()
            )));
        }
        let standard_error = bootstrap_estimates.iter().std_dev();
        Self::from_standard_error(original_estimate, standard_error, confidence_level)
    }

    fn name(&self) -> &'static str {
        "Normal Bootstrap"
    }
}
