//! Regression-based click-through rate
//!
//! Fits `clicks_i ≈ b · f(impressions_i)` without intercept by (weighted)
//! least squares:
//!
//! ```text
//! b = Σ w_i·f(n_i)·c_i / Σ w_i·f(n_i)²
//! ```
//!
//! Under the identity transform `b` is a volume-weighted rate; nonlinear
//! transforms damp the influence of very large campaigns.

use ctr_core::{CampaignDataset, Error, PointEstimator, Result};
use tracing::debug;

/// Transform applied to impressions before fitting
#[derive(Debug, Clone, Copy, Default)]
pub enum Transform {
    /// `f(x) = x`
    #[default]
    Identity,
    /// `f(x) = ln(x + 1)`
    Log1p,
    /// `f(x) = √x`
    Sqrt,
    /// Caller-supplied transform
    Custom(fn(f64) -> f64),
}

impl Transform {
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Transform::Identity => x,
            Transform::Log1p => x.ln_1p(),
            Transform::Sqrt => x.sqrt(),
            Transform::Custom(f) => f(x),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Transform::Identity => "identity",
            Transform::Log1p => "log1p",
            Transform::Sqrt => "sqrt",
            Transform::Custom(_) => "custom",
        }
    }
}

/// Whether the fit reads dataset weights
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegressionWeighting {
    /// Ordinary least squares, every campaign weighs 1
    #[default]
    Uniform,
    /// Weighted least squares using the dataset weights
    Dataset,
}

/// Fitted no-intercept model
#[derive(Debug, Clone, Copy)]
pub struct RegressionFit {
    pub coefficient: f64,
    pub transform: Transform,
}

impl RegressionFit {
    /// Predicted clicks for a campaign with `impressions`
    pub fn predict(&self, impressions: u64) -> f64 {
        self.coefficient * self.transform.apply(impressions as f64)
    }
}

/// No-intercept least-squares fit of clicks on transformed impressions
#[derive(Debug, Clone, Copy, Default)]
pub struct RegressionEstimator {
    transform: Transform,
    weighting: RegressionWeighting,
}

impl RegressionEstimator {
    /// OLS on untransformed impressions
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_weighting(mut self, weighting: RegressionWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn weighting(&self) -> RegressionWeighting {
        self.weighting
    }

    /// Fit the coefficient
    ///
    /// Fails with [`Error::DegenerateInput`] when the transformed predictor
    /// has no mass (e.g. all impressions zero under the identity) or the
    /// transform produces a non-finite value.
    pub fn fit(&self, dataset: &CampaignDataset) -> Result<RegressionFit> {
        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (index, o) in dataset.iter().enumerate() {
            let x = self.transform.apply(o.impressions as f64);
            if !x.is_finite() {
                return Err(Error::DegenerateInput(format!(
                    "{} transform of campaign {index} is not finite",
                    self.transform.name()
                )));
            }
            let w = match self.weighting {
                RegressionWeighting::Uniform => 1.0,
                RegressionWeighting::Dataset => o.weight,
            };
            numerator += w * x * o.clicks as f64;
            denominator += w * x * x;
        }

        debug!(
            "Regression fit ({}): numerator={:.6}, denominator={:.6}",
            self.transform.name(),
            numerator,
            denominator
        );

        if denominator == 0.0 || !denominator.is_finite() {
            return Err(Error::DegenerateInput(format!(
                "regression denominator is {denominator} under the {} transform",
                self.transform.name()
            )));
        }

        Ok(RegressionFit {
            coefficient: numerator / denominator,
            transform: self.transform,
        })
    }
}

impl PointEstimator for RegressionEstimator {
    type Output = f64;

    fn estimate(&self, dataset: &CampaignDataset) -> Result<f64> {
        self.fit(dataset).map(|fit| fit.coefficient)
    }

    fn name(&self) -> &'static str {
        "Regression"
    }

    fn uses_weights(&self) -> bool {
        self.weighting == RegressionWeighting::Dataset
    }
}
