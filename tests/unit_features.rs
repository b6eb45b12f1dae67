// Unit tests for the feature extraction stages.
//
// Tests isolated pure stages: histogram bin placement, LBP code values on
// constructed neighborhoods, HOG orientation binning, schema arithmetic,
// and image loading edge cases. No models are involved anywhere here.

use image::{GrayImage, Luma, Rgb, RgbImage};

use frond::classify::fertilizer::NeedTier;
use frond::features::schema::{FeatureSchema, SCHEMA_VERSION};
use frond::features::{color, extract, hog, lbp, load_image};

// ============================================================
// Color histograms: bin placement
// ============================================================

#[test]
fn white_pixels_land_in_the_top_bin() {
    // Pure blue in RGB terms; the blue histogram occupies slots 0..16.
    let img = RgbImage::from_pixel(8, 8, Rgb([0, 0, 255]));
    let hists = color::channel_histograms(&img);

    assert_eq!(hists[15], 1.0, "blue channel, bin 15");
    assert_eq!(hists[16], 1.0, "green channel, bin 0");
    assert_eq!(hists[32], 1.0, "red channel, bin 0");
}

#[test]
fn bin_edges_are_sixteen_wide() {
    // Intensity 16 is the first value of bin 1.
    let img = RgbImage::from_pixel(4, 4, Rgb([16, 15, 0]));
    let hists = color::channel_histograms(&img);

    // Red subpixel 16 -> red bin 1 (slot 32 + 1).
    assert_eq!(hists[33], 1.0);
    // Green subpixel 15 -> green bin 0 (slot 16).
    assert_eq!(hists[16], 1.0);
}

#[test]
fn even_split_gives_half_weight_per_bin() {
    let img = RgbImage::from_fn(8, 8, |x, _| {
        if x < 4 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    let hists = color::channel_histograms(&img);

    for channel in 0..3 {
        let base = channel * 16;
        assert_eq!(hists[base], 0.5, "channel {channel} bin 0");
        assert_eq!(hists[base + 15], 0.5, "channel {channel} bin 15");
    }
}

#[test]
fn histograms_sum_to_one_on_textured_input() {
    let img = RgbImage::from_fn(50, 30, |x, y| {
        Rgb([
            ((x * 7 + y) % 256) as u8,
            ((x + y * 13) % 256) as u8,
            ((x * y + 3) % 256) as u8,
        ])
    });
    let hists = color::channel_histograms(&img);

    for channel in 0..3 {
        let sum: f32 = hists[channel * 16..(channel + 1) * 16].iter().sum();
        assert!((sum - 1.0).abs() < 1e-4, "channel {channel} sums to {sum}");
    }
}

// ============================================================
// Local binary patterns: code values
// ============================================================

#[test]
fn bright_center_produces_code_zero() {
    // Center strictly above every neighbor: no bits set, zero transitions.
    let mut gray = GrayImage::from_pixel(3, 3, Luma([0]));
    gray.put_pixel(1, 1, Luma([200]));

    let codes = lbp::uniform_codes(&gray);
    assert_eq!(codes[4], 0);
}

#[test]
fn dark_center_produces_code_eight() {
    // Every neighbor at or above the center: all bits set, still uniform.
    let mut gray = GrayImage::from_pixel(3, 3, Luma([200]));
    gray.put_pixel(1, 1, Luma([0]));

    let codes = lbp::uniform_codes(&gray);
    assert_eq!(codes[4], 8);
}

#[test]
fn lbp_histogram_is_normalized_on_real_texture() {
    let gray = GrayImage::from_fn(40, 40, |x, y| Luma([((x * 3 + y * 5) % 256) as u8]));
    let hist = lbp::histogram(&lbp::uniform_codes(&gray));

    let sum: f32 = hist.iter().sum();
    assert!((sum - 1.0).abs() < 1e-3, "histogram sums to {sum}");
    assert!(hist.iter().all(|v| *v >= 0.0));
}

// ============================================================
// HOG: orientation binning
// ============================================================

#[test]
fn vertical_ramp_concentrates_in_the_ninety_degree_bin() {
    // Intensity grows down the rows: gradient straight down, angle 90,
    // which falls in orientation bin 4 of 9.
    let gray = GrayImage::from_fn(hog::HOG_WIDTH, hog::HOG_HEIGHT, |_, y| Luma([(y * 2) as u8]));
    let desc = hog::descriptor(&gray);

    assert!(desc.iter().any(|v| *v > 0.0), "ramp should produce energy");
    for (i, chunk) in desc.chunks(9).enumerate() {
        for (bin, value) in chunk.iter().enumerate() {
            if bin != 4 {
                assert_eq!(*value, 0.0, "chunk {i} bin {bin} should be empty");
            }
        }
    }
}

#[test]
fn descriptor_length_matches_the_schema_segment() {
    let schema = FeatureSchema::current();
    let hog_segment = schema
        .segments
        .iter()
        .find(|s| s.name == "hog")
        .expect("hog segment");
    assert_eq!(hog_segment.len, hog::HOG_LEN);
    assert_eq!(hog::HOG_LEN, 3780);
}

// ============================================================
// Schema: version pin and mismatch reporting
// ============================================================

#[test]
fn schema_version_is_pinned_to_one() {
    assert_eq!(SCHEMA_VERSION, 1);
    assert_eq!(FeatureSchema::current().total_len(), 3840);
}

#[test]
fn mismatch_error_names_both_sides() {
    let err = FeatureSchema::current()
        .check_model("species_model", 2, 100)
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("species_model"), "{msg}");
    assert!(msg.contains("schema v1"), "{msg}");
    assert!(msg.contains("100"), "{msg}");
}

// ============================================================
// Rule-based tier: boundaries driven through real extraction
// ============================================================

#[test]
fn tier_boundaries_hold_through_the_extractor() {
    let cases = [
        (54u8, "High Need"),
        (55, "Moderate Need"),
        (149, "Moderate Need"),
        (150, "Low Need"),
    ];
    for (green, expected) in cases {
        let img = RgbImage::from_pixel(32, 32, Rgb([0, green, 0]));
        let (_, avg) = extract(&img);
        assert_eq!(avg.green, green as f32);
        assert_eq!(
            NeedTier::from_green_mean(avg.green).as_str(),
            expected,
            "green mean {green}"
        );
    }
}

// ============================================================
// Image loading: extension handling
// ============================================================

#[test]
fn uppercase_extensions_are_accepted() {
    let path = std::env::temp_dir().join("frond_unit_load.PNG");
    RgbImage::from_pixel(12, 9, Rgb([5, 6, 7])).save(&path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.dimensions(), (12, 9));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn corrupt_file_reports_invalid_image() {
    let path = std::env::temp_dir().join("frond_unit_corrupt.png");
    std::fs::write(&path, b"not actually a png").unwrap();

    let err = load_image(&path).unwrap_err();
    assert!(err.to_string().contains("invalid image"), "{err}");

    let _ = std::fs::remove_file(&path);
}
