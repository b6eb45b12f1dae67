// Versioned descriptor of the feature-vector layout.
//
// The extractor and the trained classifiers are coupled by vector order and
// length alone, so the layout is written down once here and checked against
// every model's sidecar at startup. Bump SCHEMA_VERSION whenever a segment
// changes length, order, or normalization.

use serde::{Deserialize, Serialize};

use crate::error::FrondError;
use crate::features::{color, hog, lbp};

/// Version of the layout produced by the current extractor.
pub const SCHEMA_VERSION: u32 = 1;

/// One named contiguous run of values inside the feature vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSegment {
    pub name: String,
    pub len: usize,
}

/// The full layout: ordered segments plus the version they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub version: u32,
    pub segments: Vec<FeatureSegment>,
}

impl FeatureSchema {
    /// The layout the extractor currently produces.
    pub fn current() -> Self {
        let segment = |name: &str, len: usize| FeatureSegment {
            name: name.to_string(),
            len,
        };
        Self {
            version: SCHEMA_VERSION,
            segments: vec![
                segment("mean_bgr", 3),
                segment("color_hist", 3 * color::HIST_BINS),
                segment("lbp_hist", lbp::LBP_BINS),
                segment("hog", hog::HOG_LEN),
            ],
        }
    }

    /// Total feature-vector length.
    pub fn total_len(&self) -> usize {
        self.segments.iter().map(|s| s.len).sum()
    }

    /// Validate a model's declared expectation against this layout.
    /// A model trained against a different version or length cannot be served.
    pub fn check_model(
        &self,
        model_name: &str,
        model_version: u32,
        model_len: usize,
    ) -> Result<(), FrondError> {
        if model_version != self.version || model_len != self.total_len() {
            return Err(FrondError::ShapeMismatch {
                model: model_name.to_string(),
                schema_version: self.version,
                extractor_len: self.total_len(),
                model_version,
                model_len,
            });
        }
        Ok(())
    }
}
