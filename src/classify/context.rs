// Application context: everything the analysis flow needs, loaded once.
//
// Both classifiers and the feature schema are read at startup and held
// read-only for the process lifetime. Construction is the fail-fast point:
// a missing bundle surfaces as ModelLoadFailure and a schema disagreement
// as ShapeMismatch, so prediction commands never discover either mid-run.

use anyhow::Result;
use tracing::info;

use super::onnx::OnnxClassifier;
use super::traits::LabelPredictor;
use super::{FERTILIZER_STEM, SPECIES_STEM};
use crate::config::Config;
use crate::features::schema::FeatureSchema;

pub struct AppContext {
    pub schema: FeatureSchema,
    pub species: Box<dyn LabelPredictor>,
    pub fertilizer: Box<dyn LabelPredictor>,
}

// Manual impl: the predictor trait objects aren't Debug, so show their names.
impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("schema", &self.schema)
            .field("species", &self.species.name())
            .field("fertilizer", &self.fertilizer.name())
            .finish()
    }
}

impl AppContext {
    /// Load both ONNX bundles from the configured model directory and
    /// verify them against the extractor's current schema.
    pub fn load(config: &Config) -> Result<Self> {
        let species = OnnxClassifier::load(&config.model_dir, SPECIES_STEM)?;
        let fertilizer = OnnxClassifier::load(&config.model_dir, FERTILIZER_STEM)?;
        let ctx = Self::with_predictors(Box::new(species), Box::new(fertilizer))?;
        info!(
            model_dir = %config.model_dir.display(),
            schema_version = ctx.schema.version,
            feature_len = ctx.schema.total_len(),
            "Classifiers ready"
        );
        Ok(ctx)
    }

    /// Build a context around arbitrary predictors, still enforcing the
    /// schema check. Tests drive the flow through this with stubs.
    pub fn with_predictors(
        species: Box<dyn LabelPredictor>,
        fertilizer: Box<dyn LabelPredictor>,
    ) -> Result<Self> {
        let schema = FeatureSchema::current();
        for predictor in [species.as_ref(), fertilizer.as_ref()] {
            schema.check_model(
                predictor.name(),
                predictor.schema_version(),
                predictor.expected_len(),
            )?;
        }
        Ok(Self {
            schema,
            species,
            fertilizer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::traits::Prediction;
    use crate::error::FrondError;

    struct StubPredictor {
        name: &'static str,
        len: usize,
        version: u32,
    }

    impl LabelPredictor for StubPredictor {
        fn name(&self) -> &str {
            self.name
        }
        fn expected_len(&self) -> usize {
            self.len
        }
        fn schema_version(&self) -> u32 {
            self.version
        }
        fn predict(&self, _features: &[f32]) -> Result<Prediction> {
            Ok(Prediction {
                label: "stub".to_string(),
                score: 1.0,
            })
        }
    }

    fn stub(name: &'static str, len: usize, version: u32) -> Box<dyn LabelPredictor> {
        Box::new(StubPredictor { name, len, version })
    }

    #[test]
    fn test_matching_predictors_build_a_context() {
        let expected = FeatureSchema::current().total_len();
        let ctx = AppContext::with_predictors(
            stub("species_model", expected, 1),
            stub("fertilizer_model", expected, 1),
        )
        .unwrap();
        assert_eq!(ctx.schema.total_len(), expected);
    }

    #[test]
    fn test_wrong_length_fails_fast() {
        let expected = FeatureSchema::current().total_len();
        let err = AppContext::with_predictors(
            stub("species_model", expected - 1, 1),
            stub("fertilizer_model", expected, 1),
        )
        .unwrap_err();
        let domain = err.downcast_ref::<FrondError>().expect("typed error");
        assert!(matches!(domain, FrondError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_wrong_version_fails_fast() {
        let expected = FeatureSchema::current().total_len();
        let err = AppContext::with_predictors(
            stub("species_model", expected, 1),
            stub("fertilizer_model", expected, 7),
        )
        .unwrap_err();
        assert!(err.to_string().contains("fertilizer_model"));
    }
}
