//! JSON model files.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{EngineError, EngineResult};

/// Writes a model as JSON, creating parent directories as needed.
pub fn save_model<M: Serialize>(model: &M, path: &Path) -> EngineResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| persistence(path, e))?;
    }
    let json = serde_json::to_string(model).map_err(|e| persistence(path, e))?;
    fs::write(path, json).map_err(|e| persistence(path, e))
}

/// Reads a model written by [`save_model`].
pub fn load_model<M: DeserializeOwned>(path: &Path) -> EngineResult<M> {
    let json = fs::read_to_string(path).map_err(|e| persistence(path, e))?;
    serde_json::from_str(&json).map_err(|e| persistence(path, e))
}

pub(crate) fn persistence(path: &Path, error: impl std::fmt::Display) -> EngineError {
    EngineError::ModelPersistence {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
