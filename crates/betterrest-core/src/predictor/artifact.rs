use std::path::{Path, PathBuf};

use super::{LinearModel, Predictor};
use crate::error::PredictionError;
use crate::inputs::PredictionInput;

/// Predictor backed by a model artifact on disk.
///
/// The artifact is read on every prediction, so a missing or broken file
/// surfaces as a failed calculation rather than a startup error.
#[derive(Debug, Clone)]
pub struct ArtifactPredictor {
    path: PathBuf,
}

impl ArtifactPredictor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<LinearModel, PredictionError> {
        LinearModel::load(&self.path)
    }
}

impl Predictor for ArtifactPredictor {
    fn predict(&self, input: &PredictionInput) -> Result<f64, PredictionError> {
        self.load()?.predict(input)
    }
}
