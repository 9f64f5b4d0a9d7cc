//! Persistence of fitted ranking models as a flat JSON artifact.
//!
//! The artifact is the sole persisted state of a training run:
//!
//! ```json
//! {
//!   "feature_version": 2,
//!   "dim": 21,
//!   "weights": [ ... ],
//!   "bias": 0.0
//! }
//! ```
//!
//! Numeric values are rounded to a fixed decimal precision so that repeated
//! runs with identical inputs produce byte-identical, diffable files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{Backend, Scalar, Tensor1D};
use crate::model::linear::{LinearParams, LinearRanker};
use crate::model::Fitted;

/// Number of decimal digits kept in the JSON artifact.
pub const ARTIFACT_PRECISION: u32 = 12;

/// The serialized model artifact consumed by the scoring side.
///
/// Consumers compute `score(x) = weights · x + bias` and rank by descending
/// score; they rely on `dim` matching the feature length used at inference
/// time. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankModel {
    /// Feature schema tag; a consumer scoring vectors produced by a
    /// different feature version must reject the model.
    pub feature_version: u32,
    pub dim: usize,
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// Errors from reading or writing the model artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("artifact dim {dim} does not match weight count {weights}")]
    DimMismatch { dim: usize, weights: usize },
}

fn round_fixed(v: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (v * scale).round() / scale
}

impl RankModel {
    /// Writes the artifact as 2-space-indented JSON.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Reads an artifact back, checking the `dim == weights.len()` invariant.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let text = fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&text)?;
        if model.dim != model.weights.len() {
            return Err(ArtifactError::DimMismatch {
                dim: model.dim,
                weights: model.weights.len(),
            });
        }
        Ok(model)
    }
}

impl<B: Backend> LinearRanker<B, Fitted> {
    /// Exports the fitted parameters as an artifact, rounding every numeric
    /// value to [`ARTIFACT_PRECISION`] decimal digits. The in-memory
    /// parameters are left untouched.
    pub fn to_artifact(&self, feature_version: u32) -> RankModel {
        let weights: Vec<f64> = self
            .params()
            .weights
            .to_vec()
            .into_iter()
            .map(|v| round_fixed(v, ARTIFACT_PRECISION))
            .collect();

        RankModel {
            feature_version,
            dim: weights.len(),
            weights,
            bias: round_fixed(self.params().bias.to_f64(), ARTIFACT_PRECISION),
        }
    }

    /// Reconstructs a fitted ranker from an artifact. Values are taken as
    /// stored; no re-rounding happens.
    pub fn from_artifact(artifact: &RankModel) -> Result<Self, ArtifactError> {
        if artifact.dim != artifact.weights.len() {
            return Err(ArtifactError::DimMismatch {
                dim: artifact.dim,
                weights: artifact.weights.len(),
            });
        }

        Ok(Self::new(LinearParams {
            weights: Tensor1D::new(artifact.weights.clone()),
            bias: Scalar::new(artifact.bias),
        }))
    }
}

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    fn fitted(weights: Vec<f64>, bias: f64) -> LinearRanker<CpuBackend, Fitted> {
        LinearRanker::<CpuBackend, Fitted>::new(LinearParams {
            weights: Tensor1D::new(weights),
            bias: Scalar::new(bias),
        })
    }

    #[test]
    fn test_round_fixed() {
        assert_eq!(round_fixed(0.123456789012349, 12), 0.123456789012);
        assert_eq!(round_fixed(-0.9999999999996, 12), -1.0);
        assert_eq!(round_fixed(2.5, 12), 2.5);
        assert_eq!(round_fixed(0.0, 12), 0.0);
    }

    #[test]
    fn test_to_artifact_rounds() {
        let model = fitted(vec![0.1234567890123456, -2.0], 0.000_000_000_000_4);
        let artifact = model.to_artifact(2);

        assert_eq!(artifact.feature_version, 2);
        assert_eq!(artifact.dim, 2);
        assert_eq!(artifact.weights, vec![0.123456789012, -2.0]);
        assert_eq!(artifact.bias, 0.0);
    }

    #[test]
    fn test_save_load_round_trip() {
        let model = fitted(vec![0.05, -0.05, 1.5], 0.25);
        let artifact = model.to_artifact(2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rank_model.json");
        artifact.save(&path).unwrap();

        let loaded = RankModel::load(&path).unwrap();
        assert_eq!(loaded, artifact);

        let restored = LinearRanker::<CpuBackend, Fitted>::from_artifact(&loaded).unwrap();
        assert_eq!(restored.params().weights.to_vec(), artifact.weights);
        assert_eq!(restored.params().bias.to_f64(), artifact.bias);
    }

    #[test]
    fn test_load_rejects_dim_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"feature_version": 2, "dim": 3, "weights": [0.1, 0.2], "bias": 0.0}"#,
        )
        .unwrap();

        let err = RankModel::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::DimMismatch { dim: 3, weights: 2 }
        ));
    }

    #[test]
    fn test_artifact_json_shape() {
        let artifact = fitted(vec![1.0], -0.5).to_artifact(7);
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["feature_version"], 7);
        assert_eq!(json["dim"], 1);
        assert_eq!(json["weights"][0], 1.0);
        assert_eq!(json["bias"], -0.5);
    }
}
