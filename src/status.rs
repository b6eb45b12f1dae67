// System status display: model bundles, schema compatibility, QA dataset.

use anyhow::Result;

use crate::classify::{onnx, MODEL_STEMS};
use crate::config::Config;
use crate::features::schema::FeatureSchema;
use crate::qa::retriever::Table;

/// Display system status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    let schema = FeatureSchema::current();
    println!(
        "Feature schema: v{} ({} values)",
        schema.version,
        schema.total_len()
    );

    if !config.model_dir.exists() {
        println!("Model directory: {} (missing)", config.model_dir.display());
        println!("\nSet FROND_MODEL_DIR or create ./models with the model bundles.");
        return Ok(());
    }
    println!("Model directory: {}", config.model_dir.display());

    for stem in MODEL_STEMS {
        if !onnx::bundle_present(&config.model_dir, stem) {
            println!("  {stem}: missing ({stem}.onnx + {stem}.json required)");
            continue;
        }

        let model_path = config.model_dir.join(format!("{stem}.onnx"));
        let size = std::fs::metadata(&model_path)
            .map(|m| format_bytes(m.len()))
            .unwrap_or_else(|_| "unknown".to_string());

        match onnx::read_metadata(&config.model_dir, stem) {
            Ok(meta) => {
                let compat = match schema.check_model(stem, meta.schema_version, meta.feature_len)
                {
                    Ok(()) => "schema ok".to_string(),
                    Err(e) => format!("INCOMPATIBLE: {e}"),
                };
                println!(
                    "  {stem}: {} labels, {} ({})",
                    meta.labels.len(),
                    size,
                    compat
                );
            }
            Err(e) => println!("  {stem}: sidecar unreadable ({e})"),
        }
    }

    if config.qa_data_path.exists() {
        match Table::load(&config.qa_data_path) {
            Ok(table) => println!(
                "QA dataset: {} ({} rows, {} columns)",
                config.qa_data_path.display(),
                table.rows.len(),
                table.headers.len()
            ),
            Err(e) => println!("QA dataset: {} (unreadable: {e})", config.qa_data_path.display()),
        }
    } else {
        println!("QA dataset: {} (missing)", config.qa_data_path.display());
        println!("  Set FROND_QA_DATA to point `frond ask` at a CSV file");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
