use thiserror::Error;

/// Domain errors for the leaf-analysis flow.
///
/// Everything else in the crate reports through `anyhow`; these three get
/// their own type because callers branch on them: batch extraction skips
/// `InvalidImage` files and keeps going, while the two startup failures
/// are fatal for any command that predicts.
#[derive(Error, Debug)]
pub enum FrondError {
    #[error("invalid image '{path}': {reason}")]
    InvalidImage { path: String, reason: String },

    #[error("failed to load model '{path}': {reason}")]
    ModelLoadFailure { path: String, reason: String },

    #[error(
        "feature schema mismatch for '{model}': extractor produces {extractor_len} values \
         (schema v{schema_version}), model expects {model_len} (trained against v{model_version})"
    )]
    ShapeMismatch {
        model: String,
        schema_version: u32,
        extractor_len: usize,
        model_version: u32,
        model_len: usize,
    },
}

impl FrondError {
    pub fn invalid_image(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn model_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelLoadFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
