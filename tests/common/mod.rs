//! Shared utilities for workspace integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use ctr_stats::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Binomial, LogNormal};
use statrs::statistics::Statistics;

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Campaigns with log-normal volume and binomial clicks at a fixed true CTR
pub fn synthetic_campaigns(size: usize, ctr: f64, seed: u64) -> CampaignDataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let volume = LogNormal::new(5.0, 1.2).unwrap();
    let observations = (0..size)
        .map(|_| {
            let impressions = (volume.sample(&mut rng) as u64).max(1);
            let clicks = Binomial::new(impressions, ctr).unwrap().sample(&mut rng);
            CampaignObservation::new(clicks, impressions)
        })
        .collect();
    CampaignDataset::new(observations).unwrap()
}

/// Population standard deviation of a slice
pub fn spread(values: &[f64]) -> f64 {
    values.iter().population_std_dev()
}
