// Markdown report generation for resume matches.
//
// Writes a standalone report with the score, keyword coverage table, and
// the ranked gap list. Sections with nothing to say are omitted. All
// user-supplied text that lands inside a table cell has pipes escaped.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::textmatch::similarity::MatchReport;

/// Write a match report to `path`.
pub fn generate_report(
    report: &MatchReport,
    resume_name: &str,
    job_name: &str,
    path: &Path,
) -> Result<()> {
    let mut md = String::new();

    md.push_str("# Frond Match Report\n\n");
    md.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "Resume: `{}` ({} words)\n",
        escape_pipes(resume_name),
        report.resume_word_count
    ));
    md.push_str(&format!(
        "Posting: `{}` ({} words)\n\n",
        escape_pipes(job_name),
        report.job_word_count
    ));

    md.push_str("## Score\n\n");
    md.push_str(&format!(
        "**{:.1}%** (cosine similarity {:.4})\n\n",
        report.score_percent(),
        report.score
    ));

    let common = report.common_keywords.len();
    let missing = report.missing_keywords.len();
    md.push_str("## Keyword Coverage\n\n");
    md.push_str("| Keywords | Count |\n");
    md.push_str("|----------|-------|\n");
    md.push_str(&format!("| Common | {common} |\n"));
    md.push_str(&format!("| Missing | {missing} |\n"));
    md.push_str(&format!("| **Total** | **{}** |\n\n", common + missing));

    if !report.common_keywords.is_empty() {
        md.push_str("## Common Keywords\n\n");
        let joined: Vec<String> = report
            .common_keywords
            .iter()
            .map(|w| escape_pipes(w))
            .collect();
        md.push_str(&joined.join(", "));
        md.push_str("\n\n");
    }

    if !report.missing_keywords.is_empty() {
        md.push_str("## Missing Keywords\n\n");
        md.push_str("Posting terms the resume never mentions, most prominent first.\n\n");
        md.push_str("| Rank | Keyword |\n");
        md.push_str("|------|---------|\n");
        for (i, word) in report.missing_keywords.iter().enumerate() {
            md.push_str(&format!("| {} | {} |\n", i + 1, escape_pipes(word)));
        }
        md.push_str("\n");
    }

    fs::write(path, md).with_context(|| format!("Failed to write report to {}", path.display()))
}

/// Escape pipe characters so user text cannot break table cells.
fn escape_pipes(text: &str) -> String {
    text.replace('|', "\\|")
}
