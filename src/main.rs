use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use frond::classify::context::AppContext;
use frond::config::Config;

/// Frond: leaf-image analysis from handcrafted features.
///
/// Extracts color, texture, and gradient features from leaf photos, runs
/// pre-trained ONNX classifiers for species and fertilizer need, and ships
/// two text helpers: a resume matcher and a CSV question answerer.
#[derive(Parser)]
#[command(name = "frond", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one leaf image (species + fertilizer need)
    Classify {
        /// Path to the leaf image (jpg, jpeg, or png)
        image: PathBuf,

        /// Also write a gradient-magnitude visualization PNG here
        #[arg(long)]
        viz: Option<PathBuf>,

        /// Print the analysis as JSON instead of the terminal summary
        #[arg(long)]
        json: bool,
    },

    /// Extract feature vectors to a CSV (one image or a whole directory)
    Extract {
        /// Path to a single image
        image: Option<PathBuf>,

        /// Extract every supported image in this directory instead
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Output CSV path (default: features.csv)
        #[arg(long, default_value = "features.csv")]
        out: PathBuf,
    },

    /// Print the feature schema (segments, lengths, version)
    Schema,

    /// Show system status (model bundles, schema compatibility, QA data)
    Status,

    /// Compare a resume against a job description
    Match {
        /// Plain-text resume file
        resume: PathBuf,

        /// Plain-text job description file
        job: PathBuf,

        /// Max missing keywords to list (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,

        /// Also write a markdown report here
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Answer a question against the QA dataset
    Ask {
        /// The question to answer
        question: String,

        /// CSV file to search (default: FROND_QA_DATA)
        #[arg(long)]
        data: Option<PathBuf>,

        /// How many rows to retrieve (default: 5)
        #[arg(long, default_value = "5")]
        top: usize,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("frond=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { image, viz, json } => {
            let config = Config::load()?;
            config.require_models()?;
            let ctx = AppContext::load(&config)?;

            let analysis = frond::classify::analysis::analyze_leaf(&ctx, &image)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                frond::output::terminal::display_analysis(&analysis);
            }

            if let Some(viz_path) = viz {
                let source = frond::features::load_image(&image)?;
                let rendered = frond::visual::render(&source);
                frond::visual::save_png(&rendered, &viz_path)?;
                if !json {
                    println!(
                        "\n{}",
                        format!("Gradient visualization saved to: {}", viz_path.display())
                            .bold()
                    );
                }
            }
        }

        Commands::Extract { image, dir, out } => {
            let images = match (image, dir) {
                (Some(_), Some(_)) => {
                    anyhow::bail!("Pass either an image path or --dir, not both")
                }
                (Some(path), None) => vec![path],
                (None, Some(dir)) => frond::pipeline::list_images(&dir)?,
                (None, None) => anyhow::bail!("Pass an image path or --dir <DIR>"),
            };

            println!("Extracting features from {} image(s)...", images.len());
            let summary = frond::pipeline::extract_to_csv(&images, &out)?;

            println!("\n{}", "Extraction complete.".bold());
            println!("  Rows written: {}", summary.extracted);
            if summary.skipped > 0 {
                println!("  Skipped: {}", summary.skipped);
            }
            println!("  Output: {}", out.display());
        }

        Commands::Schema => {
            let schema = frond::features::schema::FeatureSchema::current();
            frond::output::terminal::display_schema(&schema);
        }

        Commands::Status => {
            let config = Config::load()?;
            frond::status::show(&config)?;
        }

        Commands::Match {
            resume,
            job,
            top,
            report,
        } => {
            let resume_text = std::fs::read_to_string(&resume)
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;
            let job_text = std::fs::read_to_string(&job)
                .with_context(|| format!("Failed to read job description {}", job.display()))?;

            let match_report =
                frond::textmatch::similarity::build_match_report(&resume_text, &job_text, top)?;

            let resume_name = resume.display().to_string();
            let job_name = job.display().to_string();
            frond::output::terminal::display_match(&match_report, &resume_name, &job_name);

            if let Some(report_path) = report {
                frond::output::markdown::generate_report(
                    &match_report,
                    &resume_name,
                    &job_name,
                    &report_path,
                )?;
                println!(
                    "\n{}",
                    format!("Markdown report saved to: {}", report_path.display()).bold()
                );
            }
        }

        Commands::Ask {
            question,
            data,
            top,
        } => {
            let config = Config::load()?;
            let data_path = match data {
                Some(path) => path,
                None => {
                    config.require_qa_data()?;
                    config.qa_data_path.clone()
                }
            };

            let retriever = frond::qa::retriever::Retriever::load(&data_path)?;
            println!(
                "Searching {} rows in {}...",
                retriever.row_count(),
                data_path.display()
            );

            let answer = frond::qa::answer::answer_question(&retriever, &question, top);
            frond::output::terminal::display_answer(&answer);
        }
    }

    Ok(())
}
