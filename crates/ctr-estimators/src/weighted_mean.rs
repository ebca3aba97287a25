//! Importance-weighted mean of per-campaign click-through rates

use ctr_core::{CampaignDataset, Error, PointEstimator, Result};

/// `Σ w_i·(clicks_i / impressions_i) / Σ w_i`
///
/// Weights come from the dataset. Zero-weight campaigns still need positive
/// impressions; an all-zero weight vector leaves the mean undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightedMeanRatioEstimator;

impl WeightedMeanRatioEstimator {
    pub fn new() -> Self {
        Self
    }
}

impl PointEstimator for WeightedMeanRatioEstimator {
    type Output = f64;

    fn estimate(&self, dataset: &CampaignDataset) -> Result<f64> {
        let ratios = dataset.ratios()?;

        let (weighted_sum, total_weight) = dataset
            .iter()
            .zip(&ratios)
            .fold((0.0, 0.0), |(sum, total), (o, &ratio)| {
                (sum + o.weight * ratio, total + o.weight)
            });

        if total_weight <= 0.0 {
            return Err(Error::Validation(
                "weighted mean ratio is undefined when all weights are zero".to_string(),
            ));
        }
        Ok(weighted_sum / total_weight)
    }

    fn name(&self) -> &'static str {
        "Weighted Mean Ratio"
    }

    fn uses_weights(&self) -> bool {
        true
    }
}
