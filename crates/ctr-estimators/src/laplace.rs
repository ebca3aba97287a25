//! Laplace-Bayes smoothed per-campaign click-through rates
//!
//! Each campaign starts with virtual prior counts before any data is seen.
//! With the default prior of one click in two impressions the estimate is
//! `(1 + clicks) / (2 + impressions)`: low-volume campaigns are pulled toward
//! 0.5 while high-volume campaigns stay close to their raw ratio.

use ctr_core::{CampaignDataset, Error, PointEstimator, Result};
use serde::{Deserialize, Serialize};

/// What to do with smoothed values outside `[0, 1]`
///
/// Values above one only arise when clicks exceed impressions, which the
/// dataset accepts as input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClampPolicy {
    /// Report the smoothed value as computed
    #[default]
    None,
    /// Clamp to `[0, 1]`
    UnitInterval,
}

/// Per-campaign smoothed ratio `(prior_clicks + c) / (prior_impressions + n)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaplaceBayesEstimator {
    prior_clicks: f64,
    prior_impressions: f64,
    clamp: ClampPolicy,
}

impl Default for LaplaceBayesEstimator {
    fn default() -> Self {
        Self {
            prior_clicks: 1.0,
            prior_impressions: 2.0,
            clamp: ClampPolicy::None,
        }
    }
}

impl LaplaceBayesEstimator {
    /// Estimator with the `(1, 2)` prior and no clamping
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom prior pseudo-counts
    ///
    /// `prior_clicks` must be positive and `prior_impressions` must exceed it,
    /// so every campaign with `clicks <= impressions` lands strictly inside
    /// `(0, 1)`.
    pub fn with_prior(mut self, prior_clicks: f64, prior_impressions: f64) -> Result<Self> {
        if !prior_clicks.is_finite() || !prior_impressions.is_finite() {
            return Err(Error::non_finite("Laplace prior"));
        }
        if prior_clicks <= 0.0 || prior_impressions <= prior_clicks {
            return Err(Error::Validation(format!(
                "Laplace prior requires 0 < prior_clicks < prior_impressions, got ({prior_clicks}, {prior_impressions})"
            )));
        }
        self.prior_clicks = prior_clicks;
        self.prior_impressions = prior_impressions;
        Ok(self)
    }

    /// Set the clamp policy
    pub fn with_clamp(mut self, clamp: ClampPolicy) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn prior_clicks(&self) -> f64 {
        self.prior_clicks
    }

    pub fn prior_impressions(&self) -> f64 {
        self.prior_impressions
    }

    pub fn clamp(&self) -> ClampPolicy {
        self.clamp
    }

    /// Smoothed rate for a single campaign
    pub fn estimate_campaign(&self, clicks: u64, impressions: u64) -> f64 {
        let smoothed =
            (self.prior_clicks + clicks as f64) / (self.prior_impressions + impressions as f64);
        match self.clamp {
            ClampPolicy::None => smoothed,
            ClampPolicy::UnitInterval => smoothed.clamp(0.0, 1.0),
        }
    }
}

impl PointEstimator for LaplaceBayesEstimator {
    type Output = Vec<f64>;

    fn estimate(&self, dataset: &CampaignDataset) -> Result<Vec<f64>> {
        Ok(dataset
            .iter()
            .map(|o| self.estimate_campaign(o.clicks, o.impressions))
            .collect())
    }

    fn name(&self) -> &'static str {
        "Laplace-Bayes"
    }
}
