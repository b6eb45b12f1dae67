// Resume vs. job-description comparison.
//
// Both documents are reduced to TF-IDF weight maps over their two-document
// corpus (raw term counts scaled by a smoothed idf, L2-normalized) and
// compared with cosine similarity. Keyword gaps come out of the same token
// sets: terms the posting uses that the resume never mentions, ranked by
// TF-IDF prominence so the most distinctive omissions surface first.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use serde::Serialize;
use stop_words::{get, LANGUAGE};
use tracing::debug;

use crate::textmatch::preprocess;

/// How many ranked corpus terms to scan when picking suggestions.
const RANKED_POOL: usize = 200;

/// Outcome of comparing a resume against one job description.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    /// Cosine similarity of the two TF-IDF vectors, 0.0 to 1.0.
    pub score: f64,
    /// Terms both documents share, alphabetical.
    pub common_keywords: Vec<String>,
    /// Posting terms absent from the resume, most prominent first.
    pub missing_keywords: Vec<String>,
    pub resume_word_count: usize,
    pub job_word_count: usize,
}

impl MatchReport {
    pub fn score_percent(&self) -> f64 {
        self.score * 100.0
    }
}

/// Compare a resume against a job description.
///
/// `max_suggestions` caps the ranked missing-keyword list. Fails when either
/// document has no content tokens left after preprocessing.
pub fn build_match_report(
    resume_text: &str,
    job_text: &str,
    max_suggestions: usize,
) -> Result<MatchReport> {
    let resume_tokens = preprocess::tokenize(resume_text);
    let job_tokens = preprocess::tokenize(job_text);

    if resume_tokens.is_empty() {
        bail!("Resume has no usable words after preprocessing");
    }
    if job_tokens.is_empty() {
        bail!("Job description has no usable words after preprocessing");
    }

    let weights = tfidf_weights(&[&resume_tokens, &job_tokens]);
    let score = cosine_from_weights(&weights[0], &weights[1]);

    let resume_set: HashSet<&str> = resume_tokens.iter().map(|s| s.as_str()).collect();
    let job_set: HashSet<&str> = job_tokens.iter().map(|s| s.as_str()).collect();

    let mut common_keywords: Vec<String> = job_set
        .intersection(&resume_set)
        .map(|w| w.to_string())
        .collect();
    common_keywords.sort();

    let missing_keywords =
        ranked_missing_keywords(resume_text, job_text, &resume_set, &job_set, max_suggestions);

    debug!(
        score = format!("{score:.4}"),
        common = common_keywords.len(),
        missing = missing_keywords.len(),
        "Match computed"
    );

    Ok(MatchReport {
        score,
        common_keywords,
        missing_keywords,
        resume_word_count: resume_tokens.len(),
        job_word_count: job_tokens.len(),
    })
}

/// TF-IDF weight map per document: term count scaled by the smoothed
/// idf `ln((1 + n) / (1 + df)) + 1`, then L2-normalized.
pub fn tfidf_weights(token_docs: &[&Vec<String>]) -> Vec<HashMap<String, f64>> {
    let n_docs = token_docs.len() as f64;

    let mut df: HashMap<&str, f64> = HashMap::new();
    for doc in token_docs {
        let unique: HashSet<&str> = doc.iter().map(|s| s.as_str()).collect();
        for word in unique {
            *df.entry(word).or_insert(0.0) += 1.0;
        }
    }

    token_docs
        .iter()
        .map(|doc| {
            let mut weights: HashMap<String, f64> = HashMap::new();
            for word in doc.iter() {
                *weights.entry(word.clone()).or_insert(0.0) += 1.0;
            }
            for (word, weight) in weights.iter_mut() {
                let seen_in = df.get(word.as_str()).copied().unwrap_or(1.0);
                *weight *= ((1.0 + n_docs) / (1.0 + seen_in)).ln() + 1.0;
            }
            let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > f64::EPSILON {
                for weight in weights.values_mut() {
                    *weight /= norm;
                }
            }
            weights
        })
        .collect()
}

/// Cosine similarity between two sparse weight maps.
pub fn cosine_from_weights(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(word, wa)| b.get(word).map(|wb| wa * wb))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a <= f64::EPSILON || norm_b <= f64::EPSILON {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Posting-only terms ranked by TF-IDF prominence across the pair.
///
/// Ranked terms the extractor never surfaces (past the scan pool) fall back
/// to the end alphabetically, so every gap is reported even on short texts.
fn ranked_missing_keywords(
    resume_text: &str,
    job_text: &str,
    resume_set: &HashSet<&str>,
    job_set: &HashSet<&str>,
    max_suggestions: usize,
) -> Vec<String> {
    let mut missing: HashSet<&str> = job_set.difference(resume_set).copied().collect();
    if missing.is_empty() || max_suggestions == 0 {
        return Vec::new();
    }

    let documents = vec![resume_text.to_string(), job_text.to_string()];
    let stop_words: Vec<String> = get(LANGUAGE::English);
    let tf_idf = TfIdf::new(TfIdfParams::UnprocessedDocuments(&documents, &stop_words, None));

    let mut ranked: Vec<String> = Vec::new();
    for (word, _) in tf_idf.get_ranked_word_scores(RANKED_POOL) {
        if missing.remove(word.as_str()) {
            ranked.push(word);
            if ranked.len() == max_suggestions {
                return ranked;
            }
        }
    }

    let mut rest: Vec<String> = missing.into_iter().map(|w| w.to_string()).collect();
    rest.sort();
    ranked.extend(rest);
    ranked.truncate(max_suggestions);
    ranked
}
