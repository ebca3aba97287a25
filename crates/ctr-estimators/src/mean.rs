//! Unweighted mean of per-campaign click-through rates

use ctr_core::{CampaignDataset, Error, PointEstimator, Result};

/// Arithmetic mean of `clicks_i / impressions_i`
///
/// Every campaign counts equally regardless of its volume. Fails with
/// [`Error::Division`] if any campaign has zero impressions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeanRatioEstimator;

impl MeanRatioEstimator {
    pub fn new() -> Self {
        Self
    }
}

impl PointEstimator for MeanRatioEstimator {
    type Output = f64;

    fn estimate(&self, dataset: &CampaignDataset) -> Result<f64> {
        let ratios = dataset.ratios()?;
        if ratios.is_empty() {
            return Err(Error::empty_input("mean ratio"));
        }
        Ok(ratios.iter().sum::<f64>() / ratios.len() as f64)
    }

    fn name(&self) -> &'static str {
        "Mean Ratio"
    }
}
