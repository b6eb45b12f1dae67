// Per-channel color statistics over the resized working image.
//
// Channel order everywhere in this module is B, G, R, the order the
// classifiers were trained on. Decoded buffers arrive as RGB, so the
// loops walk subpixel indices through BGR_SUBPIXELS.

use image::RgbImage;

/// Bins per channel histogram. 256 intensity levels / 16 bins = width 16.
pub const HIST_BINS: usize = 16;

/// RGB subpixel indices visited in B, G, R order.
const BGR_SUBPIXELS: [usize; 3] = [2, 1, 0];

/// Mean intensity per channel over all pixels, returned as [B, G, R].
pub fn channel_means(img: &RgbImage) -> [f32; 3] {
    let n = (img.width() as u64 * img.height() as u64) as f64;
    if n == 0.0 {
        return [0.0; 3];
    }

    let mut sums = [0.0f64; 3];
    for pixel in img.pixels() {
        for (out, &sub) in sums.iter_mut().zip(&BGR_SUBPIXELS) {
            *out += pixel[sub] as f64;
        }
    }
    [
        (sums[0] / n) as f32,
        (sums[1] / n) as f32,
        (sums[2] / n) as f32,
    ]
}

/// 16-bin intensity histogram for each channel over [0, 256), each channel
/// normalized to sum to 1. Returns 48 values: 16 B bins, 16 G, 16 R.
pub fn channel_histograms(img: &RgbImage) -> Vec<f32> {
    let n = (img.width() as u64 * img.height() as u64) as f64;
    let mut out = Vec::with_capacity(3 * HIST_BINS);

    for &sub in &BGR_SUBPIXELS {
        let mut counts = [0u32; HIST_BINS];
        for pixel in img.pixels() {
            counts[(pixel[sub] >> 4) as usize] += 1;
        }
        if n == 0.0 {
            out.extend(std::iter::repeat(0.0f32).take(HIST_BINS));
        } else {
            out.extend(counts.iter().map(|&c| (c as f64 / n) as f32));
        }
    }
    out
}
