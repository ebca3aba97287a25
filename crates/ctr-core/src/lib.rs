//! Core traits and types for click-through rate estimation
//!
//! This crate provides the foundation the estimator and resampling crates
//! build on:
//!
//! - [`CampaignDataset`]: immutable per-campaign click/impression data with
//!   importance weights and cheap index views for resampling
//! - [`PointEstimator`]: the one-argument contract every estimator exposes
//! - [`execution`]: sequential and Rayon-backed engines for running
//!   independent work items
//! - [`Error`]: the error type shared by every crate in the workspace
//!
//! # Example
//!
//! ```rust
//! use ctr_core::{CampaignDataset, CampaignObservation, WeightScheme};
//!
//! let data = CampaignDataset::new(vec![
//!     CampaignObservation::new(3, 120),
//!     CampaignObservation::new(0, 40),
//! ])
//! .unwrap()
//! .with_weight_scheme(WeightScheme::LogImpressions);
//!
//! assert_eq!(data.size(), 2);
//! assert!(data.weights()[0] > data.weights()[1]);
//! ```

pub mod dataset;
pub mod error;
pub mod execution;
pub mod traits;

pub use dataset::{CampaignDataset, CampaignObservation, Iter, WeightScheme};
pub use error::{Error, Result};
pub use execution::{
    auto_engine, sequential, AutoEngine, ExecutionEngine, ExecutionStrategy, SequentialEngine,
};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};
pub use traits::{EstimateOutput, PointEstimator};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
