// Gradient-magnitude rendering of the analyzed leaf.
//
// The classify command can save an edge-energy view of the working image:
// central-difference gradient magnitude over the 128x128 grayscale, with
// intensities rescaled from (0, 10) to the full 8-bit range so faint vein
// structure is visible rather than a near-black frame.

use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, RgbImage};

use crate::features;

/// Magnitudes at or above this map to full white.
const RESCALE_MAX: f32 = 10.0;

/// Render the visualization for an already-decoded image.
pub fn render(img: &RgbImage) -> GrayImage {
    let working = features::working_image(img);
    gradient_magnitude(&features::grayscale(&working))
}

/// Central-difference gradient magnitude, rescaled into 0..=255.
pub fn gradient_magnitude(gray: &GrayImage) -> GrayImage {
    let w = gray.width() as usize;
    let h = gray.height() as usize;
    let img: Vec<f32> = gray.as_raw().iter().map(|&v| v as f32).collect();

    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let (x, y) = (x as usize, y as usize);
        let gx = if x == 0 || x == w - 1 {
            0.0
        } else {
            img[y * w + x + 1] - img[y * w + x - 1]
        };
        let gy = if y == 0 || y == h - 1 {
            0.0
        } else {
            img[(y + 1) * w + x] - img[(y - 1) * w + x]
        };
        let magnitude = (gx * gx + gy * gy).sqrt();
        let scaled = (magnitude / RESCALE_MAX * 255.0).clamp(0.0, 255.0);
        image::Luma([scaled.round() as u8])
    })
}

/// Write the rendered view to disk as a PNG.
pub fn save_png(img: &GrayImage, path: &Path) -> Result<()> {
    img.save(path)
        .with_context(|| format!("Failed to write visualization to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_image_renders_black() {
        let gray = GrayImage::from_pixel(32, 32, image::Luma([140]));
        let rendered = gradient_magnitude(&gray);
        assert!(rendered.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_dimensions_are_preserved() {
        let gray = GrayImage::new(48, 96);
        let rendered = gradient_magnitude(&gray);
        assert_eq!((rendered.width(), rendered.height()), (48, 96));
    }

    #[test]
    fn test_step_edge_saturates() {
        // A hard vertical step has |gx| = 255 across the seam, far past
        // the rescale ceiling.
        let gray = GrayImage::from_fn(32, 32, |x, _| {
            image::Luma([if x < 16 { 0 } else { 255 }])
        });
        let rendered = gradient_magnitude(&gray);
        assert_eq!(rendered.get_pixel(16, 10)[0], 255);
        assert_eq!(rendered.get_pixel(2, 10)[0], 0);
    }

    #[test]
    fn test_render_uses_working_resolution() {
        let img = RgbImage::new(500, 300);
        let rendered = render(&img);
        assert_eq!(
            (rendered.width(), rendered.height()),
            (features::WORKING_SIZE, features::WORKING_SIZE)
        );
    }
}
