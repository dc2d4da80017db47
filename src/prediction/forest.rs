//! Random forest regression.
//!
//! Wraps smartcore's bagged CART forest. Every split considers all features
//! and bootstrap sampling is seeded, so identical inputs give identical
//! predictions.

use std::path::Path;

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use tracing::{debug, info};

use crate::config::ModelSettings;
use crate::error::{EngineError, EngineResult};

use super::features::FeatureMatrix;
use super::persistence::{load_model, persistence, save_model};
use super::{Predictor, Trainer};

type Forest = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

/// Trains [`ForestRegressor`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct ForestTrainer {
    /// Number of trees.
    pub trees: usize,
    /// Maximum depth; `None` grows until leaves are pure.
    pub max_depth: Option<usize>,
    /// Minimum samples a node needs before it is split.
    pub min_samples_split: usize,
    /// Bootstrap seed.
    pub seed: u64,
}

impl Default for ForestTrainer {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: None,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

impl From<&ModelSettings> for ForestTrainer {
    fn from(settings: &ModelSettings) -> Self {
        Self {
            trees: settings.trees,
            max_depth: settings.max_depth,
            min_samples_split: settings.min_samples_split,
            seed: settings.seed,
        }
    }
}

impl ForestTrainer {
    fn parameters(&self, n_features: usize) -> RandomForestRegressorParameters {
        let parameters = RandomForestRegressorParameters::default()
            .with_n_trees(self.trees)
            .with_min_samples_split(self.min_samples_split.max(2))
            .with_m(n_features)
            .with_seed(self.seed);
        match self.max_depth {
            Some(depth) => parameters.with_max_depth(u16::try_from(depth).unwrap_or(u16::MAX)),
            None => parameters,
        }
    }
}

impl Trainer for ForestTrainer {
    type Model = ForestRegressor;

    fn train(&self, features: &FeatureMatrix, targets: &[f64]) -> EngineResult<ForestRegressor> {
        if features.n_features() == 0 {
            return Err(insufficient("no feature columns"));
        }
        if features.n_rows() == 0 {
            return Err(insufficient("no training rows"));
        }
        if targets.len() != features.n_rows() {
            return Err(insufficient(format!(
                "{} targets for {} feature rows",
                targets.len(),
                features.n_rows()
            )));
        }
        if !features.is_finite() || !targets.iter().all(|t| t.is_finite()) {
            return Err(insufficient("features and targets must be finite"));
        }
        if self.trees == 0 {
            return Err(EngineError::CalculationError {
                message: "forest needs at least one tree".to_string(),
            });
        }

        let forest = Forest::fit(
            &dense(features),
            &targets.to_vec(),
            self.parameters(features.n_features()),
        )
        .map_err(|e| EngineError::CalculationError {
            message: format!("forest training failed: {}", e),
        })?;

        debug!(
            trees = self.trees,
            rows = features.n_rows(),
            features = features.n_features(),
            "Forest trained"
        );

        Ok(ForestRegressor {
            feature_names: features.columns().to_vec(),
            trees: self.trees,
            forest,
        })
    }
}

/// A trained random forest together with the feature columns it expects.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ForestRegressor {
    feature_names: Vec<String>,
    trees: usize,
    forest: Forest,
}

impl ForestRegressor {
    /// The feature columns the forest was trained on, in order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Number of trees.
    pub fn n_trees(&self) -> usize {
        self.trees
    }

    /// Writes the model as JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> EngineResult<()> {
        let path = path.as_ref();
        save_model(self, path)?;
        info!(path = %path.display(), trees = self.trees, "Model saved");
        Ok(())
    }

    /// Reads a model written by [`ForestRegressor::save`].
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let model: Self = load_model(path)?;
        if model.feature_names.is_empty() {
            return Err(persistence(path, "model has no feature columns"));
        }
        Ok(model)
    }
}

impl Predictor for ForestRegressor {
    fn predict(&self, features: &FeatureMatrix) -> EngineResult<Vec<f64>> {
        if features.n_features() != self.feature_names.len() {
            return Err(EngineError::CalculationError {
                message: format!(
                    "model expects {} features, got {}",
                    self.feature_names.len(),
                    features.n_features()
                ),
            });
        }
        if features.n_rows() == 0 {
            return Ok(Vec::new());
        }
        self.forest
            .predict(&dense(features))
            .map_err(|e| EngineError::CalculationError {
                message: format!("forest prediction failed: {}", e),
            })
    }
}

/// Copies a feature matrix into smartcore's column-major layout.
fn dense(features: &FeatureMatrix) -> DenseMatrix<f64> {
    let values = features.values();
    DenseMatrix::new(
        values.nrows(),
        values.ncols(),
        values.iter().copied().collect(),
        true,
    )
}

fn insufficient(message: impl Into<String>) -> EngineError {
    EngineError::InsufficientData {
        message: message.into(),
    }
}
