//! Error types for click-through rate estimation
//!
//! Provides a unified error type for all ctr-stats crates.

use thiserror::Error;

/// Core error type for estimation and resampling operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed dataset or configuration
    #[error("Validation error: {0}")]
    Validation(String),

    /// A ratio-based estimator met a campaign with zero impressions
    #[error("Division error: campaign {index} has zero impressions")]
    Division { index: usize },

    /// Regression denominator vanished under the chosen transform
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Resampling index outside the dataset bounds
    #[error("Index {index} out of bounds for dataset of size {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for empty input
    pub fn empty_input(operation: &str) -> Self {
        Self::Validation(format!("{operation} requires at least one campaign"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::Validation(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Validation(format!("{context} contains NaN or infinite values"))
    }
}
