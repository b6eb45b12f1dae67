// Batch feature extraction: sweep images into a feature CSV.
//
// Walks a directory (or an explicit file list), runs the full extraction
// pipeline on each image, and appends one row per image to the output CSV.
// Unreadable or unsupported files are skipped with a warning instead of
// aborting, so one bad file cannot sink a whole batch. Column names come
// from the feature schema, one column per vector slot plus the image name.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::features::{self, schema, SUPPORTED_EXTENSIONS};

/// Counts for one extraction run.
#[derive(Debug, Clone, Copy)]
pub struct BatchSummary {
    pub extracted: usize,
    pub skipped: usize,
}

/// Supported image files directly under `dir`, sorted by path.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut images: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    images.sort();

    if images.is_empty() {
        bail!(
            "No supported images ({}) found in {}",
            SUPPORTED_EXTENSIONS.join(", "),
            dir.display()
        );
    }
    Ok(images)
}

/// Extract features for every image and write them to `out` as CSV.
///
/// Returns how many images made it into the file and how many were skipped.
pub fn extract_to_csv(images: &[PathBuf], out: &Path) -> Result<BatchSummary> {
    let mut writer = csv::Writer::from_path(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;
    writer
        .write_record(header_row())
        .context("Failed to write CSV header")?;

    let pb = ProgressBar::new(images.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Extracting [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let mut extracted = 0;
    let mut skipped = 0;
    for path in images {
        match features::load_image(path) {
            Ok(image) => {
                let (vector, _) = features::extract(&image);
                let mut row: Vec<String> = Vec::with_capacity(vector.len() + 1);
                row.push(display_name(path));
                row.extend(vector.as_slice().iter().map(|v| v.to_string()));
                writer
                    .write_record(&row)
                    .with_context(|| format!("Failed to write row for {}", path.display()))?;
                extracted += 1;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping image");
                skipped += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", out.display()))?;

    info!(extracted, skipped, out = %out.display(), "Feature extraction finished");
    Ok(BatchSummary { extracted, skipped })
}

/// "image" plus one `segment_index` column per feature slot.
fn header_row() -> Vec<String> {
    let mut header = vec!["image".to_string()];
    for segment in &schema::FeatureSchema::current().segments {
        for i in 0..segment.len {
            header.push(format!("{}_{i}", segment.name));
        }
    }
    header
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .unwrap_or_else(|| path.display().to_string())
}
