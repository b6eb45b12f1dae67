// Text normalization shared by the matcher and the table retriever.
//
// lowercase -> strip everything but letters and whitespace (punctuation and
// digits go) -> split on whitespace -> drop English stop words. Hyphenated
// and slashed compounds collapse into single tokens, which keeps phrases
// like "ci/cd" matchable as one unit on both sides.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

static NON_LETTERS: OnceLock<Regex> = OnceLock::new();
static STOP_WORDS: OnceLock<HashSet<String>> = OnceLock::new();

fn non_letters() -> &'static Regex {
    NON_LETTERS.get_or_init(|| Regex::new(r"[^a-z\s]").expect("fixed pattern"))
}

fn stop_words() -> &'static HashSet<String> {
    STOP_WORDS.get_or_init(|| get(LANGUAGE::English).into_iter().collect())
}

/// Normalize text into content tokens, in document order, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let stripped = non_letters().replace_all(&lower, "");
    stripped
        .split_whitespace()
        .filter(|w| !stop_words().contains(*w))
        .map(|w| w.to_string())
        .collect()
}

/// Unique content tokens of a text.
pub fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}
