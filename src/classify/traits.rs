// Label predictor trait: the seam between the analysis flow and the
// ONNX backend.
//
// The flow only needs "vector in, label out" plus enough metadata to verify
// schema compatibility at startup, so tests drive the whole pipeline with
// stub implementations and never touch a model file.

use anyhow::Result;

/// One classifier's answer for a feature vector.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Prediction {
    pub label: String,
    /// Raw winning score from the model's output row. Scale depends on the
    /// exporting pipeline (probability or margin) and is reported as-is.
    pub score: f32,
}

/// Trait for turning a feature vector into a label.
pub trait LabelPredictor: Send + Sync {
    /// Name used in logs and mismatch errors (usually the file stem).
    fn name(&self) -> &str;

    /// Input length the model was trained on.
    fn expected_len(&self) -> usize;

    /// Feature-schema version the model was trained against.
    fn schema_version(&self) -> u32;

    /// Predict a label for the feature vector.
    fn predict(&self, features: &[f32]) -> Result<Prediction>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPredictor;

    impl LabelPredictor for FixedPredictor {
        fn name(&self) -> &str {
            "fixed"
        }
        fn expected_len(&self) -> usize {
            4
        }
        fn schema_version(&self) -> u32 {
            1
        }
        fn predict(&self, features: &[f32]) -> Result<Prediction> {
            Ok(Prediction {
                label: "leaf".to_string(),
                score: features.iter().sum(),
            })
        }
    }

    #[test]
    fn test_trait_objects_box_cleanly() {
        let boxed: Box<dyn LabelPredictor> = Box::new(FixedPredictor);
        let p = boxed.predict(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(p.label, "leaf");
        assert_eq!(p.score, 10.0);
    }
}
