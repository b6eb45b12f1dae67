// Classifier layer: ONNX-backed species/fertilizer models, the rule-based
// fertilizer-need tier, and the startup context that holds them.

pub mod analysis;
pub mod context;
pub mod fertilizer;
pub mod onnx;
pub mod traits;

/// File stem of the species classifier bundle.
pub const SPECIES_STEM: &str = "species_model";
/// File stem of the fertilizer classifier bundle.
pub const FERTILIZER_STEM: &str = "fertilizer_model";
/// Both bundles, in load order.
pub const MODEL_STEMS: [&str; 2] = [SPECIES_STEM, FERTILIZER_STEM];
