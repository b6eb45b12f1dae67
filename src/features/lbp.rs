// Rotation-invariant uniform local binary patterns, P=8 samples at R=1.
//
// Each pixel is encoded by comparing 8 neighbors (bilinear-interpolated at
// the sub-pixel positions on the radius-1 circle) against the center.
// Samples falling outside the image read as zero, so border codes differ
// from the interior. A pattern is "uniform" when its circular bit string
// has at most two 0/1 transitions; uniform patterns map to their popcount
// (0..=8) and all non-uniform patterns collapse into class 9.
//
// The histogram reproduces NumPy's behavior for bin edges 0,1,...,9:
// nine bins, the last of which is right-inclusive, so classes 8 and 9
// share the final bin. The denominator carries a small epsilon.

use image::GrayImage;

const LBP_P: usize = 8;
/// Non-uniform patterns collapse into this class.
const NON_UNIFORM: u8 = (LBP_P + 1) as u8;

/// Effective histogram bin count for edges 0..=9.
pub const LBP_BINS: usize = 9;

const HIST_EPS: f64 = 1e-6;

/// Build the uniform LBP lookup table: raw 8-bit pattern -> texture class.
fn build_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    for val in 0u16..256 {
        let v = val as u8;
        let mut transitions = 0u32;
        for i in 0..8u32 {
            let b0 = (v >> i) & 1;
            let b1 = (v >> ((i + 1) % 8)) & 1;
            if b0 != b1 {
                transitions += 1;
            }
        }
        lut[val as usize] = if transitions <= 2 {
            v.count_ones() as u8
        } else {
            NON_UNIFORM
        };
    }
    lut
}

/// Bilinear interpolation at sub-pixel (ry, rx), zero outside the image.
/// f64 arithmetic so the >= comparison against the center is stable.
#[inline]
fn bilinear(img: &[f32], h: usize, w: usize, ry: f64, rx: f64) -> f64 {
    let fy = ry.floor() as i64;
    let fx = rx.floor() as i64;
    let ty = ry - fy as f64;
    let tx = rx - fx as f64;
    let at = |r: i64, c: i64| -> f64 {
        if r < 0 || r >= h as i64 || c < 0 || c >= w as i64 {
            0.0
        } else {
            img[r as usize * w + c as usize] as f64
        }
    };
    let top = (1.0 - tx) * at(fy, fx) + tx * at(fy, fx + 1);
    let bottom = (1.0 - tx) * at(fy + 1, fx) + tx * at(fy + 1, fx + 1);
    (1.0 - ty) * top + ty * bottom
}

/// Compute the uniform LBP class for every pixel. Values are in 0..=9.
pub fn uniform_codes(gray: &GrayImage) -> Vec<u8> {
    let w = gray.width() as usize;
    let h = gray.height() as usize;
    let img: Vec<f32> = gray.as_raw().iter().map(|&v| v as f32).collect();
    let lut = build_lut();

    // Neighbor offsets on the radius-1 circle:
    // r_k = -R * sin(2pi*k/P), c_k = R * cos(2pi*k/P)
    let s2 = std::f64::consts::FRAC_1_SQRT_2;
    let dr: [f64; 8] = [0.0, -s2, -1.0, -s2, 0.0, s2, 1.0, s2];
    let dc: [f64; 8] = [1.0, s2, 0.0, -s2, -1.0, -s2, 0.0, s2];

    let mut out = vec![0u8; h * w];
    for r in 0..h {
        let rf = r as f64;
        for c in 0..w {
            let cf = c as f64;
            let center = img[r * w + c] as f64;
            let mut code: u8 = 0;
            for k in 0..LBP_P {
                let val = bilinear(&img, h, w, rf + dr[k], cf + dc[k]);
                if val >= center {
                    code |= 1 << k;
                }
            }
            out[r * w + c] = lut[code as usize];
        }
    }
    out
}

/// Bin LBP classes into LBP_BINS bins and normalize by (count + epsilon).
pub fn histogram(codes: &[u8]) -> [f32; LBP_BINS] {
    let mut counts = [0u32; LBP_BINS];
    for &code in codes {
        // Edges 0..=9: the final bin is right-inclusive, merging 8 and 9.
        counts[(code as usize).min(LBP_BINS - 1)] += 1;
    }
    let denom = codes.len() as f64 + HIST_EPS;
    let mut out = [0.0f32; LBP_BINS];
    for (o, &c) in out.iter_mut().zip(&counts) {
        *o = (c as f64 / denom) as f32;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lut_uniform_patterns_map_to_popcount() {
        let lut = build_lut();
        assert_eq!(lut[0b0000_0000], 0);
        assert_eq!(lut[0b0000_0001], 1);
        assert_eq!(lut[0b0000_0111], 3);
        assert_eq!(lut[0b1111_1111], 8);
        // Wrapped run of ones is still uniform (two transitions).
        assert_eq!(lut[0b1000_0011], 3);
    }

    #[test]
    fn test_lut_non_uniform_patterns_collapse() {
        let lut = build_lut();
        assert_eq!(lut[0b0101_0101], NON_UNIFORM);
        assert_eq!(lut[0b0010_0100], NON_UNIFORM);
    }

    #[test]
    fn test_flat_image_interior_codes_are_eight() {
        // Equal neighbors compare >= center: all bits set, popcount 8.
        let gray = GrayImage::from_pixel(12, 12, image::Luma([77]));
        let codes = uniform_codes(&gray);
        for r in 1..11 {
            for c in 1..11 {
                assert_eq!(codes[r * 12 + c], 8, "pixel ({r}, {c})");
            }
        }
    }

    #[test]
    fn test_flat_image_border_reads_zero_padding() {
        // Outside samples read 0 < 200: edges keep five set bits (code 5),
        // corners three (code 3).
        let gray = GrayImage::from_pixel(10, 10, image::Luma([200]));
        let codes = uniform_codes(&gray);
        assert_eq!(codes[0], 3);
        assert_eq!(codes[5], 5);
        assert_eq!(codes[5 * 10], 5);
        assert_eq!(codes[9 * 10 + 9], 3);
    }

    #[test]
    fn test_black_image_codes_are_all_eight() {
        // Zero padding compares equal to a zero center everywhere.
        let gray = GrayImage::from_pixel(12, 12, image::Luma([0]));
        let codes = uniform_codes(&gray);
        assert!(codes.iter().all(|&c| c == 8));
    }

    #[test]
    fn test_codes_never_exceed_non_uniform_class() {
        let gray = GrayImage::from_fn(16, 16, |x, y| image::Luma([((x * 31 + y * 17) % 256) as u8]));
        let codes = uniform_codes(&gray);
        assert!(codes.iter().all(|&c| c <= NON_UNIFORM));
    }

    #[test]
    fn test_histogram_sums_to_one_within_epsilon() {
        let gray = GrayImage::from_fn(16, 16, |x, y| image::Luma([((x * 7 + y * 13) % 256) as u8]));
        let hist = histogram(&uniform_codes(&gray));
        let sum: f32 = hist.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4, "histogram sum was {sum}");
    }

    #[test]
    fn test_flat_image_histogram_splits_interior_and_border() {
        // 10x10 flat: 64 interior pixels code 8, 32 edge pixels code 5,
        // 4 corner pixels code 3.
        let gray = GrayImage::from_pixel(10, 10, image::Luma([200]));
        let hist = histogram(&uniform_codes(&gray));
        assert!((hist[8] - 0.64).abs() < 1e-4);
        assert!((hist[5] - 0.32).abs() < 1e-4);
        assert!((hist[3] - 0.04).abs() < 1e-4);
    }

    #[test]
    fn test_final_bin_merges_classes_eight_and_nine() {
        let hist = histogram(&[8, 9, 9, 8]);
        assert!((hist[LBP_BINS - 1] - 1.0).abs() < 1e-4);
    }
}
