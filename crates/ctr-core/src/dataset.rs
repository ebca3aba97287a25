//! Campaign observations and the immutable dataset they live in
//!
//! A [`CampaignDataset`] owns its observations behind an `Arc`. Resampled
//! datasets share that storage and only carry their own index view, so a
//! bootstrap iteration never copies observation data.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn default_weight() -> f64 {
    1.0
}

/// Raw click and impression counts for one campaign
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CampaignObservation {
    /// Click-through count
    pub clicks: u64,
    /// Impression count
    pub impressions: u64,
    /// Importance weight
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl CampaignObservation {
    /// Create an observation with unit weight
    pub fn new(clicks: u64, impressions: u64) -> Self {
        Self {
            clicks,
            impressions,
            weight: 1.0,
        }
    }

    /// Set the importance weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Raw click-through rate, `None` when there are no impressions
    pub fn ratio(&self) -> Option<f64> {
        if self.impressions == 0 {
            None
        } else {
            Some(self.clicks as f64 / self.impressions as f64)
        }
    }
}

/// Rule for deriving importance weights from the observations themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightScheme {
    /// Every campaign weighs 1.0
    Uniform,
    /// `ln(1 + impressions)`
    LogImpressions,
    /// Raw impression volume
    Impressions,
}

impl WeightScheme {
    /// Weight assigned to an observation under this scheme
    pub fn weight_for(&self, observation: &CampaignObservation) -> f64 {
        match self {
            WeightScheme::Uniform => 1.0,
            WeightScheme::LogImpressions => (observation.impressions as f64).ln_1p(),
            WeightScheme::Impressions => observation.impressions as f64,
        }
    }
}

/// Immutable, ordered collection of campaign observations
#[derive(Debug, Clone)]
pub struct CampaignDataset {
    observations: Arc<[CampaignObservation]>,
    view: Option<Arc<[usize]>>,
}

impl CampaignDataset {
    /// Build a dataset, rejecting empty input and invalid weights
    ///
    /// Zero impressions are accepted here; ratio-based estimators reject
    /// them when they are invoked.
    pub fn new(observations: Vec<CampaignObservation>) -> Result<Self> {
        if observations.is_empty() {
            return Err(Error::empty_input("campaign dataset"));
        }
        validate_weights(observations.iter().map(|o| o.weight))?;

        Ok(Self {
            observations: observations.into(),
            view: None,
        })
    }

    /// Build a unit-weight dataset from `(clicks, impressions)` pairs
    pub fn from_counts(counts: &[(u64, u64)]) -> Result<Self> {
        Self::new(
            counts
                .iter()
                .map(|&(clicks, impressions)| CampaignObservation::new(clicks, impressions))
                .collect(),
        )
    }

    /// Number of observations
    pub fn size(&self) -> usize {
        match &self.view {
            Some(view) => view.len(),
            None => self.observations.len(),
        }
    }

    /// Observation at position `index`
    pub fn get(&self, index: usize) -> Option<&CampaignObservation> {
        match &self.view {
            Some(view) => view.get(index).map(|&i| &self.observations[i]),
            None => self.observations.get(index),
        }
    }

    /// Iterate observations in order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            dataset: self,
            position: 0,
        }
    }

    /// Dataset made of the observations at `indices`
    ///
    /// Indices may repeat, which is how resampling with replacement is
    /// expressed. The result shares storage with `self`.
    pub fn sample(&self, indices: &[usize]) -> Result<Self> {
        if indices.is_empty() {
            return Err(Error::empty_input("sample"));
        }

        let len = self.size();
        let view = indices
            .iter()
            .map(|&index| {
                if index >= len {
                    return Err(Error::IndexOutOfBounds { index, len });
                }
                Ok(match &self.view {
                    Some(view) => view[index],
                    None => index,
                })
            })
            .collect::<Result<Arc<[usize]>>>()?;

        Ok(Self {
            observations: Arc::clone(&self.observations),
            view: Some(view),
        })
    }

    /// Ordered importance weights (1.0 where none were supplied)
    pub fn weights(&self) -> Vec<f64> {
        self.iter().map(|o| o.weight).collect()
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f64 {
        self.iter().map(|o| o.weight).sum()
    }

    /// Copy of this dataset carrying explicit weights
    pub fn with_weights(&self, weights: &[f64]) -> Result<Self> {
        if weights.len() != self.size() {
            return Err(Error::size_mismatch(self.size(), weights.len(), "weight vector"));
        }
        validate_weights(weights.iter().copied())?;

        Self::new(
            self.iter()
                .zip(weights)
                .map(|(o, &w)| o.with_weight(w))
                .collect(),
        )
    }

    /// Copy of this dataset re-weighted by `scheme`
    pub fn with_weight_scheme(&self, scheme: WeightScheme) -> Self {
        let observations: Vec<_> = self
            .iter()
            .map(|o| o.with_weight(scheme.weight_for(o)))
            .collect();
        Self {
            observations: observations.into(),
            view: None,
        }
    }

    /// Position of the first campaign with zero impressions
    pub fn first_zero_impressions(&self) -> Option<usize> {
        self.iter().position(|o| o.impressions == 0)
    }

    /// Whether any campaign has zero impressions
    pub fn has_zero_impressions(&self) -> bool {
        self.first_zero_impressions().is_some()
    }

    /// Fail with [`Error::Division`] if any campaign has zero impressions
    pub fn require_positive_impressions(&self) -> Result<()> {
        match self.first_zero_impressions() {
            Some(index) => Err(Error::Division { index }),
            None => Ok(()),
        }
    }

    /// Per-campaign raw click-through rates
    pub fn ratios(&self) -> Result<Vec<f64>> {
        self.iter()
            .enumerate()
            .map(|(index, o)| o.ratio().ok_or(Error::Division { index }))
            .collect()
    }

    /// Total clicks across campaigns
    ///
    /// Accumulated in `u128`; per-campaign counts are `u64`, so the sum
    /// cannot overflow for any dataset that fits in memory.
    pub fn total_clicks(&self) -> u128 {
        self.iter().map(|o| u128::from(o.clicks)).sum()
    }

    /// Total impressions across campaigns, accumulated in `u128`
    pub fn total_impressions(&self) -> u128 {
        self.iter().map(|o| u128::from(o.impressions)).sum()
    }

    /// Pooled rate `Σ clicks / Σ impressions`
    pub fn pooled_ratio(&self) -> Result<f64> {
        let impressions = self.total_impressions();
        if impressions == 0 {
            return Err(Error::DegenerateInput(
                "total impressions are zero".to_string(),
            ));
        }
        Ok(self.total_clicks() as f64 / impressions as f64)
    }
}

impl TryFrom<Vec<CampaignObservation>> for CampaignDataset {
    type Error = Error;

    fn try_from(observations: Vec<CampaignObservation>) -> Result<Self> {
        Self::new(observations)
    }
}

impl<'a> IntoIterator for &'a CampaignDataset {
    type Item = &'a CampaignObservation;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the observations of a [`CampaignDataset`]
pub struct Iter<'a> {
    dataset: &'a CampaignDataset,
    position: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CampaignObservation;

    fn next(&mut self) -> Option<Self::Item> {
        let observation = self.dataset.get(self.position)?;
        self.position += 1;
        Some(observation)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.size() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

fn validate_weights(weights: impl IntoIterator<Item = f64>) -> Result<()> {
    for weight in weights {
        if !weight.is_finite() {
            return Err(Error::non_finite("weights"));
        }
        if weight < 0.0 {
            return Err(Error::Validation(format!(
                "weights must be non-negative, got {weight}"
            )));
        }
    }
    Ok(())
}
