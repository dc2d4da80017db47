//! Salary prediction.
//!
//! The pipeline depends only on the [`Trainer`] and [`Predictor`] traits; the
//! bundled implementation is smartcore's random forest regressor.

mod features;
mod forest;
mod persistence;

use crate::error::EngineResult;

pub use features::FeatureMatrix;
pub use forest::{ForestRegressor, ForestTrainer};
pub use persistence::{load_model, save_model};

/// Fits a model to a feature matrix and one target per row.
pub trait Trainer {
    /// The model produced by training.
    type Model: Predictor;

    /// Trains a model.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InsufficientData`] when there is
    /// nothing to learn from: no rows, no features, a target count that does
    /// not match the rows, or non-finite values.
    fn train(&self, features: &FeatureMatrix, targets: &[f64]) -> EngineResult<Self::Model>;
}

/// Produces one raw prediction per feature row, in input order.
pub trait Predictor {
    /// Predicts targets for every row.
    fn predict(&self, features: &FeatureMatrix) -> EngineResult<Vec<f64>>;
}
