// Colored terminal output for analyses, matches, and answers.
//
// This module handles all terminal-specific formatting: colors, alignment,
// summaries. The main.rs display functions delegate here.

use colored::Colorize;

use crate::classify::analysis::LeafAnalysis;
use crate::classify::fertilizer::NeedTier;
use crate::features::schema::FeatureSchema;
use crate::qa::answer::Answer;
use crate::textmatch::similarity::MatchReport;

/// Display one analyzed leaf.
pub fn display_analysis(analysis: &LeafAnalysis) {
    println!(
        "\n{}",
        format!("=== Leaf Analysis: {} ===", analysis.image_path).bold()
    );
    println!();
    println!(
        "  Species: {} (confidence {:.2})",
        analysis.species.label.bold(),
        analysis.species.score
    );
    println!(
        "  Fertilizer need: {}",
        colorize_tier(analysis.fertilizer_need)
    );
    println!(
        "  Model tier: {} (confidence {:.2})",
        analysis.fertilizer_model.label, analysis.fertilizer_model.score
    );

    let bgr = analysis.average_color.as_bgr();
    println!(
        "  Mean color (BGR): {:.1}, {:.1}, {:.1}",
        bgr[0], bgr[1], bgr[2]
    );
    println!("  Features: {} values", analysis.feature_len);
    println!("  Analyzed: {}", analysis.analyzed_at.dimmed());
}

/// Display a resume match with its keyword gaps.
pub fn display_match(report: &MatchReport, resume_name: &str, job_name: &str) {
    println!("\n{}", "=== Resume Match ===".bold());
    println!();
    println!("  Resume: {} ({} words)", resume_name, report.resume_word_count);
    println!("  Posting: {} ({} words)", job_name, report.job_word_count);
    println!();
    println!("  Match score: {}", colorize_score(report.score_percent()));

    if !report.common_keywords.is_empty() {
        let joined = report.common_keywords.join(", ");
        println!();
        println!(
            "  Common keywords ({}): {}",
            report.common_keywords.len(),
            super::truncate_chars(&joined, 160).dimmed()
        );
    }

    if report.missing_keywords.is_empty() {
        println!();
        println!("  {} The resume covers every posting keyword.", "ok".green());
    } else {
        println!();
        println!(
            "  Missing from resume ({}):",
            report.missing_keywords.len()
        );
        for (i, word) in report.missing_keywords.iter().enumerate() {
            println!("    {}. {}", i + 1, word.yellow());
        }
    }
}

/// Display an answer with its supporting rows.
pub fn display_answer(answer: &Answer) {
    println!("\n{}", "=== Answer ===".bold());
    println!();
    println!("  {}", answer.text.bold());

    if !answer.rows.is_empty() {
        println!();
        println!("  Supporting rows:");
        for (i, row) in answer.rows.iter().enumerate() {
            let preview = super::truncate_chars(&row.text, 140);
            println!("    {}. [{:.2}] {}", i + 1, row.score, preview.dimmed());
        }
    }
    println!();
}

/// Display the feature schema layout.
pub fn display_schema(schema: &FeatureSchema) {
    println!(
        "\n{}",
        format!("=== Feature Schema (v{}) ===", schema.version).bold()
    );
    println!();
    println!("  {:<12} {:>6}", "Segment".dimmed(), "Length".dimmed());
    println!("  {}", "-".repeat(19).dimmed());
    for segment in &schema.segments {
        println!("  {:<12} {:>6}", segment.name, segment.len);
    }
    println!("  {}", "-".repeat(19).dimmed());
    println!("  {:<12} {:>6}", "total".bold(), schema.total_len());
    println!();
}

/// Colorize a fertilizer tier.
fn colorize_tier(tier: NeedTier) -> colored::ColoredString {
    match tier {
        NeedTier::High => tier.as_str().red().bold(),
        NeedTier::Moderate => tier.as_str().yellow(),
        NeedTier::Low => tier.as_str().green(),
    }
}

/// Colorize a match percentage by band.
fn colorize_score(percent: f64) -> colored::ColoredString {
    let text = format!("{percent:.1}%");
    if percent >= 70.0 {
        text.green().bold()
    } else if percent >= 40.0 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}
