// Row retrieval over a small CSV table.
//
// Every row is flattened into one "col: value | col: value" chunk. Queries
// and chunks share the matcher's tokenizer, and a chunk scores the sum of
// idf weights of the query tokens it contains, so rows holding rarer terms
// outrank rows full of common ones. Small tables only: everything stays in
// memory and scoring walks all rows per question.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::textmatch::preprocess;

/// A CSV file pulled into memory, headers split from data rows.
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open QA dataset {}", path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read headers from {}", path.display()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        if headers.is_empty() {
            bail!("QA dataset {} has no columns", path.display());
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.with_context(|| format!("Malformed row in {}", path.display()))?;
            rows.push(record.iter().map(|v| v.trim().to_string()).collect());
        }
        if rows.is_empty() {
            bail!("QA dataset {} has headers but no data rows", path.display());
        }

        debug!(
            rows = rows.len(),
            columns = headers.len(),
            "QA dataset loaded"
        );
        Ok(Table { headers, rows })
    }
}

/// A row returned for a question, with its chunk text and score.
#[derive(Debug, Clone)]
pub struct Retrieved {
    pub row_index: usize,
    pub text: String,
    pub score: f64,
}

/// Precomputed chunks and idf weights for one table.
#[derive(Debug)]
pub struct Retriever {
    table: Table,
    chunks: Vec<String>,
    chunk_tokens: Vec<HashSet<String>>,
    idf: HashMap<String, f64>,
}

impl Retriever {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_table(Table::load(path)?))
    }

    pub fn from_table(table: Table) -> Self {
        let chunks: Vec<String> = table.rows.iter().map(|row| chunk_text(&table, row)).collect();
        let chunk_tokens: Vec<HashSet<String>> =
            chunks.iter().map(|c| preprocess::token_set(c)).collect();

        // idf = ln(rows / (1 + rows containing the token)) + 1
        let row_count = chunks.len() as f64;
        let mut idf: HashMap<String, f64> = HashMap::new();
        for tokens in &chunk_tokens {
            for token in tokens {
                *idf.entry(token.clone()).or_insert(0.0) += 1.0;
            }
        }
        for weight in idf.values_mut() {
            *weight = (row_count / (1.0 + *weight)).ln() + 1.0;
        }

        Retriever { table, chunks, chunk_tokens, idf }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn row_count(&self) -> usize {
        self.table.rows.len()
    }

    /// Rows most relevant to the question, best first, at most `k`.
    ///
    /// Rows sharing no token with the question are never returned, so the
    /// result can be shorter than `k` or empty. Ties keep row order.
    pub fn top_k(&self, question: &str, k: usize) -> Vec<Retrieved> {
        let query_tokens = preprocess::token_set(question);
        if query_tokens.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut hits: Vec<Retrieved> = self
            .chunk_tokens
            .iter()
            .enumerate()
            .filter_map(|(row_index, tokens)| {
                let score: f64 = query_tokens
                    .iter()
                    .filter(|t| tokens.contains(*t))
                    .filter_map(|t| self.idf.get(t))
                    .sum();
                (score > 0.0).then(|| Retrieved {
                    row_index,
                    text: self.chunks[row_index].clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        hits
    }
}

fn chunk_text(table: &Table, row: &[String]) -> String {
    table
        .headers
        .iter()
        .zip(row.iter())
        .map(|(header, value)| format!("{header}: {value}"))
        .collect::<Vec<_>>()
        .join(" | ")
}
