// Leaf analysis: orchestrates one image through the whole flow.
//
// Given a path, this module:
// 1. Decodes the image (jpg/jpeg/png only)
// 2. Extracts the feature vector and the average color
// 3. Runs the species and fertilizer classifiers on the vector
// 4. Applies the rule-based fertilizer-need tier to the green mean
// 5. Returns a complete LeafAnalysis ready for display

use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use tracing::debug;

use super::context::AppContext;
use super::fertilizer::NeedTier;
use super::traits::Prediction;
use crate::features::{self, AverageColor};

/// Everything one analyzed image produces.
#[derive(Debug, Clone, Serialize)]
pub struct LeafAnalysis {
    pub image_path: String,
    pub species: Prediction,
    /// Rule-based tier from the green mean. This is the displayed answer.
    pub fertilizer_need: NeedTier,
    /// The fertilizer model's own label, carried for reference.
    pub fertilizer_model: Prediction,
    pub average_color: AverageColor,
    pub feature_len: usize,
    pub analyzed_at: String,
}

/// Analyze a single image file against the loaded classifiers.
pub fn analyze_leaf(ctx: &AppContext, path: &Path) -> Result<LeafAnalysis> {
    let img = features::load_image(path)?;
    let (vector, average_color) = features::extract(&img);

    let species = ctx.species.predict(vector.as_slice())?;
    let fertilizer_model = ctx.fertilizer.predict(vector.as_slice())?;
    let fertilizer_need = NeedTier::from_green_mean(average_color.green);

    debug!(
        image = %path.display(),
        species = %species.label,
        need = %fertilizer_need,
        model_label = %fertilizer_model.label,
        green_mean = average_color.green,
        "Analyzed leaf"
    );

    Ok(LeafAnalysis {
        image_path: path.display().to_string(),
        species,
        fertilizer_need,
        fertilizer_model,
        average_color,
        feature_len: vector.len(),
        analyzed_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    })
}
