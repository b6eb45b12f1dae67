// ONNX-backed label predictor.
//
// A classifier on disk is a bundle of two files sharing a stem:
//   <stem>.onnx: the exported model, taking one input named "features"
//                 of shape [1, N] f32 and producing a score row [1, C] f32
//                 as its first output
//   <stem>.json: sidecar metadata holding class labels in output order, the
//                 input length N, and the feature-schema version the model
//                 was trained against
//
// Prediction is argmax over the score row, mapped through the sidecar's
// label list. Scores are reported as-is; whether they are probabilities
// depends on the exporting pipeline.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{LabelPredictor, Prediction};
use crate::error::FrondError;

/// Sidecar metadata stored next to each .onnx file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Class labels in the order the model's output row uses.
    pub labels: Vec<String>,
    /// Input vector length the model was trained on.
    pub feature_len: usize,
    /// Feature-schema version the training pipeline extracted with.
    pub schema_version: u32,
}

/// Local ONNX classifier. The session sits behind a Mutex because
/// `Session::run` takes `&mut self` and `LabelPredictor` requires Sync.
#[derive(Debug)]
pub struct OnnxClassifier {
    name: String,
    session: Mutex<Session>,
    metadata: ModelMetadata,
}

/// True when both halves of the bundle exist.
pub fn bundle_present(model_dir: &Path, stem: &str) -> bool {
    model_dir.join(format!("{stem}.onnx")).exists() && model_dir.join(format!("{stem}.json")).exists()
}

/// Read and parse a bundle's sidecar on its own, without an ONNX session.
/// Used by preflight checks that only need the metadata.
pub fn read_metadata(model_dir: &Path, stem: &str) -> Result<ModelMetadata> {
    let sidecar_path = model_dir.join(format!("{stem}.json"));
    let raw = std::fs::read_to_string(&sidecar_path).map_err(|e| {
        FrondError::model_load(sidecar_path.display().to_string(), e.to_string())
    })?;
    let metadata: ModelMetadata = serde_json::from_str(&raw).map_err(|e| {
        FrondError::model_load(
            sidecar_path.display().to_string(),
            format!("malformed sidecar: {e}"),
        )
    })?;
    if metadata.labels.is_empty() {
        return Err(FrondError::model_load(
            sidecar_path.display().to_string(),
            "sidecar declares no labels",
        )
        .into());
    }
    Ok(metadata)
}

impl OnnxClassifier {
    /// Load the `<stem>.onnx` + `<stem>.json` bundle from `model_dir`.
    pub fn load(model_dir: &Path, stem: &str) -> Result<Self> {
        let model_path = model_dir.join(format!("{stem}.onnx"));
        if !model_path.exists() {
            return Err(FrondError::model_load(
                model_path.display().to_string(),
                "file not found",
            )
            .into());
        }

        let metadata = read_metadata(model_dir, stem)?;

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .map_err(|e| FrondError::model_load(model_path.display().to_string(), e.to_string()))?;

        debug!(
            model = stem,
            labels = metadata.labels.len(),
            feature_len = metadata.feature_len,
            "Loaded ONNX classifier"
        );

        Ok(Self {
            name: stem.to_string(),
            session: Mutex::new(session),
            metadata,
        })
    }
}

impl LabelPredictor for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn expected_len(&self) -> usize {
        self.metadata.feature_len
    }

    fn schema_version(&self) -> u32 {
        self.metadata.schema_version
    }

    fn predict(&self, features: &[f32]) -> Result<Prediction> {
        let shape = [1i64, features.len() as i64];
        let input = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create feature tensor")?;

        let scores = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| anyhow::anyhow!("Session lock poisoned: {e}"))?;

            let outputs = session
                .run(ort::inputs! { "features" => input })
                .with_context(|| format!("ONNX inference failed for '{}'", self.name))?;

            // First output: one score per class, shape [1, C].
            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .context("Failed to extract score tensor")?;
            data.to_vec()
        };

        let (label, score) = best_label(&self.metadata.labels, &scores).with_context(|| {
            format!(
                "'{}' returned {} scores for {} labels",
                self.name,
                scores.len(),
                self.metadata.labels.len()
            )
        })?;

        debug!(model = %self.name, label = %label, score, "Classified feature vector");

        Ok(Prediction {
            label: label.to_string(),
            score,
        })
    }
}

/// Argmax over the score row, mapped through the label list.
fn best_label<'a>(labels: &'a [String], scores: &[f32]) -> Result<(&'a str, f32)> {
    if scores.len() != labels.len() || scores.is_empty() {
        anyhow::bail!("score/label count mismatch");
    }
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
    }
    Ok((labels[best].as_str(), scores[best]))
}
