//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use ctr_core::{CampaignDataset, CampaignObservation};

pub const EPSILON: f64 = 1e-12;

/// Dataset from `(clicks, impressions, weight)` triples
pub fn weighted_dataset(rows: &[(u64, u64, f64)]) -> CampaignDataset {
    CampaignDataset::new(
        rows.iter()
            .map(|&(c, n, w)| CampaignObservation::new(c, n).with_weight(w))
            .collect(),
    )
    .unwrap()
}

/// Assert two vectors are equal within tolerance
pub fn assert_vectors_equal(actual: &[f64], expected: &[f64], context: &str) {
    assert_eq!(actual.len(), expected.len(), "length mismatch for {}", context);
    for (&a, &e) in actual.iter().zip(expected.iter()) {
        assert_relative_eq!(a, e, epsilon = EPSILON);
    }
}
