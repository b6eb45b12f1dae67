// Deterministic answers composed from retrieved rows.
//
// Yes/no questions are the intended usage: when the question targets a
// binary-valued column (or is phrased as a yes/no question), the answer is
// the majority of that column across the retrieved rows. Anything else gets
// a hit count plus the closest row. The retrieved rows ride along in the
// answer so callers can always show the supporting context.

use std::collections::HashSet;

use tracing::debug;

use crate::qa::retriever::{Retriever, Retrieved, Table};

/// Question openers that signal a yes/no question.
const YES_NO_STARTERS: [&str; 16] = [
    "is", "are", "was", "were", "am", "do", "does", "did", "can", "could", "will", "would",
    "should", "has", "have", "had",
];

/// An answer with the rows that back it.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub rows: Vec<Retrieved>,
}

/// Answer a question against the retriever's table using its `k` closest rows.
pub fn answer_question(retriever: &Retriever, question: &str, k: usize) -> Answer {
    let hits = retriever.top_k(question, k);
    if hits.is_empty() {
        return Answer {
            text: "No rows in the dataset match the question.".to_string(),
            rows: hits,
        };
    }

    if let Some((column, header)) = target_binary_column(retriever.table(), question) {
        let (yes, no) = tally(retriever.table(), &hits, column);
        if yes + no > 0 {
            debug!(column = header, yes, no, "Tallied binary column");
            let text = majority_text(header, yes, no);
            return Answer { text, rows: hits };
        }
    }

    let text = format!(
        "Found {} matching rows. Closest: {}",
        hits.len(),
        hits[0].text
    );
    Answer { text, rows: hits }
}

fn majority_text(header: &str, yes: usize, no: usize) -> String {
    let counted = yes + no;
    if yes > no {
        format!("Yes, based on '{header}': {yes} of {counted} retrieved rows are affirmative.")
    } else if no > yes {
        format!("No, based on '{header}': {no} of {counted} retrieved rows are negative.")
    } else {
        format!("Split decision on '{header}': {yes} yes and {no} no across {counted} retrieved rows.")
    }
}

/// Pick the binary column the question is about.
///
/// A binary column named in the question wins. Failing that, a question
/// phrased in yes/no form falls back to the first binary column.
fn target_binary_column<'a>(table: &'a Table, question: &str) -> Option<(usize, &'a str)> {
    let question_words = words(question);
    let binary: Vec<(usize, &str)> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(idx, _)| is_binary_column(table, *idx))
        .map(|(idx, header)| (idx, header.as_str()))
        .collect();

    for (idx, header) in &binary {
        if words(header).iter().any(|w| question_words.contains(w)) {
            return Some((*idx, *header));
        }
    }

    let first_word = question
        .split_whitespace()
        .next()
        .map(|w| w.to_lowercase())
        .unwrap_or_default();
    if YES_NO_STARTERS.contains(&first_word.as_str()) {
        return binary.first().copied();
    }
    None
}

/// Lowercased alphanumeric words, split on everything else. Unlike the
/// matcher's tokenizer this keeps stop words, so openers like "is" survive
/// and headers like "self_employed" break apart for matching.
fn words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

fn is_binary_column(table: &Table, column: usize) -> bool {
    let mut seen_value = false;
    for row in &table.rows {
        match row.get(column).map(|v| v.as_str()) {
            Some("") | None => continue,
            Some(value) => {
                if as_binary(value).is_none() {
                    return false;
                }
                seen_value = true;
            }
        }
    }
    seen_value
}

fn as_binary(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "approved" => Some(true),
        "no" | "n" | "false" | "0" | "denied" | "rejected" => Some(false),
        _ => None,
    }
}

fn tally(table: &Table, hits: &[Retrieved], column: usize) -> (usize, usize) {
    let mut yes = 0;
    let mut no = 0;
    for hit in hits {
        let value = table
            .rows
            .get(hit.row_index)
            .and_then(|row| row.get(column));
        match value.and_then(|v| as_binary(v)) {
            Some(true) => yes += 1,
            Some(false) => no += 1,
            None => {}
        }
    }
    (yes, no)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loans_table() -> Table {
        Table {
            headers: vec!["applicant".into(), "area".into(), "approved".into()],
            rows: vec![
                vec!["alice".into(), "urban".into(), "yes".into()],
                vec!["bob".into(), "rural".into(), "no".into()],
                vec!["carol".into(), "urban".into(), "yes".into()],
                vec!["dave".into(), "rural".into(), "no".into()],
            ],
        }
    }

    #[test]
    fn test_affirmative_majority() {
        let retriever = Retriever::from_table(loans_table());
        let answer = answer_question(&retriever, "Is alice approved?", 1);
        assert!(answer.text.starts_with("Yes, based on 'approved'"), "{}", answer.text);
        assert_eq!(answer.rows.len(), 1);
        assert_eq!(answer.rows[0].row_index, 0);
    }

    #[test]
    fn test_negative_majority() {
        let retriever = Retriever::from_table(loans_table());
        let answer = answer_question(&retriever, "Was bob approved?", 1);
        assert!(answer.text.starts_with("No, based on 'approved'"), "{}", answer.text);
    }

    #[test]
    fn test_split_tally() {
        let retriever = Retriever::from_table(loans_table());
        // "approved" names the binary column and matches every row chunk.
        let answer = answer_question(&retriever, "approved", 10);
        assert!(answer.text.starts_with("Split decision"), "{}", answer.text);
        assert_eq!(answer.rows.len(), 4);
    }

    #[test]
    fn test_non_binary_question_summarizes() {
        let retriever = Retriever::from_table(loans_table());
        let answer = answer_question(&retriever, "Which applicants come from an urban area?", 10);
        assert!(answer.text.starts_with("Found"), "{}", answer.text);
        assert!(answer.text.contains("urban"));
    }

    #[test]
    fn test_no_matching_rows() {
        let retriever = Retriever::from_table(loans_table());
        let answer = answer_question(&retriever, "submarine", 5);
        assert_eq!(answer.text, "No rows in the dataset match the question.");
        assert!(answer.rows.is_empty());
    }

    #[test]
    fn test_binary_detection_rejects_free_text() {
        let table = loans_table();
        assert!(is_binary_column(&table, 2));
        assert!(!is_binary_column(&table, 0));
        assert!(!is_binary_column(&table, 1));
    }

    #[test]
    fn test_binary_value_forms() {
        assert_eq!(as_binary("Yes"), Some(true));
        assert_eq!(as_binary(" N "), Some(false));
        assert_eq!(as_binary("1"), Some(true));
        assert_eq!(as_binary("maybe"), None);
    }
}
