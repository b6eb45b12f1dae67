// Handcrafted image features for the leaf classifiers.
//
// The pipeline is a fixed sequence of pure steps, and the order is load-
// bearing: it defines the vector layout the classifiers were trained on.
//   1. resize to the 128x128 working resolution (bilinear)
//   2. per-channel means (B, G, R)                          ->    3 values
//   3. per-channel 16-bin histograms, each summing to 1     ->   48 values
//   4. grayscale -> uniform LBP histogram                   ->    9 values
//   5. grayscale resized to 64x128 -> HOG descriptor        -> 3780 values
//   6. concatenate 2-5                                      -> 3840 total
//
// Everything here is deterministic: the same image always produces a
// bit-identical vector.

pub mod color;
pub mod hog;
pub mod lbp;
pub mod schema;

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::FrondError;

/// Side length of the square working image every input is resized to.
pub const WORKING_SIZE: u32 = 128;

/// File extensions the analyzer accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Mean channel intensities of the working image.
///
/// The green channel is the sole input to the fertilizer-need rule, so the
/// fields are named rather than indexed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageColor {
    pub blue: f32,
    pub green: f32,
    pub red: f32,
}

impl AverageColor {
    /// Channel means in the order they appear in the feature vector.
    pub fn as_bgr(&self) -> [f32; 3] {
        [self.blue, self.green, self.red]
    }
}

/// The fixed-length vector fed to the classifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Decode an image from disk, enforcing the supported-extension allowlist.
/// Failures come back as `InvalidImage` so batch callers can skip and move on.
pub fn load_image(path: &Path) -> Result<RgbImage, FrondError> {
    let shown = path.display().to_string();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(FrondError::invalid_image(
            &shown,
            format!("unsupported extension '{ext}' (expected jpg, jpeg, or png)"),
        ));
    }
    let img = image::open(path).map_err(|e| FrondError::invalid_image(&shown, e.to_string()))?;
    Ok(img.to_rgb8())
}

/// Resize to the working resolution the whole pipeline operates at.
pub fn working_image(img: &RgbImage) -> RgbImage {
    imageops::resize(img, WORKING_SIZE, WORKING_SIZE, FilterType::Triangle)
}

/// Rec. 601 luma, the coefficients the classifiers' training data used.
pub fn grayscale(img: &RgbImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        let luma = 0.299 * p[0] as f32 + 0.587 * p[1] as f32 + 0.114 * p[2] as f32;
        image::Luma([luma.round() as u8])
    })
}

/// Extract the full feature vector and the average-color summary.
pub fn extract(img: &RgbImage) -> (FeatureVector, AverageColor) {
    let working = working_image(img);

    let means = color::channel_means(&working);
    let hists = color::channel_histograms(&working);

    let gray = grayscale(&working);
    let lbp_hist = lbp::histogram(&lbp::uniform_codes(&gray));

    let gray_tall = imageops::resize(&gray, hog::HOG_WIDTH, hog::HOG_HEIGHT, FilterType::Triangle);
    let hog_desc = hog::descriptor(&gray_tall);

    let schema = schema::FeatureSchema::current();
    let mut values = Vec::with_capacity(schema.total_len());
    values.extend_from_slice(&means);
    values.extend_from_slice(&hists);
    values.extend_from_slice(&lbp_hist);
    values.extend_from_slice(&hog_desc);
    debug_assert_eq!(values.len(), schema.total_len());

    let average_color = AverageColor {
        blue: means[0],
        green: means[1],
        red: means[2],
    };
    (FeatureVector { values }, average_color)
}
