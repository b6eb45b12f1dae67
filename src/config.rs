use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// Everything has a sensible default so `frond schema` and the text tools
/// work out of the box. The .env file is loaded automatically at startup
/// via dotenvy.
pub struct Config {
    /// Directory containing the ONNX model files and their JSON sidecars
    pub model_dir: PathBuf,
    /// CSV table the `ask` command retrieves from (FROND_QA_DATA env var)
    pub qa_data_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let model_dir = env::var("FROND_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./models"));

        let qa_data_path = env::var("FROND_QA_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/loan_approvals.csv"));

        Ok(Self {
            model_dir,
            qa_data_path,
        })
    }

    /// Check that both classifier bundles (model + sidecar) are on disk.
    /// Call this before any command that runs predictions.
    pub fn require_models(&self) -> Result<()> {
        let missing: Vec<String> = crate::classify::MODEL_STEMS
            .iter()
            .filter(|stem| !crate::classify::onnx::bundle_present(&self.model_dir, stem))
            .map(|stem| format!("{stem}.onnx / {stem}.json"))
            .collect();
        if !missing.is_empty() {
            anyhow::bail!(
                "Classifier files not found in {}: {}\n\
                 Place the exported models and their metadata sidecars there,\n\
                 or point FROND_MODEL_DIR at the directory that holds them.",
                self.model_dir.display(),
                missing.join(", ")
            );
        }
        Ok(())
    }

    /// Check that the QA dataset exists.
    /// Call this before the `ask` command touches the retriever.
    pub fn require_qa_data(&self) -> Result<()> {
        if !self.qa_data_path.exists() {
            anyhow::bail!(
                "QA dataset not found at {}\n\
                 Set FROND_QA_DATA in your .env file or pass --data explicitly.",
                self.qa_data_path.display()
            );
        }
        Ok(())
    }
}
