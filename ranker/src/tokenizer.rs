use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref ENGLISH: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = [
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has",
        "have", "he", "her", "his", "i", "if", "in", "into", "is", "it", "its", "of", "on",
        "or", "our", "she", "so", "such", "than", "that", "the", "their", "them", "then",
        "there", "these", "they", "this", "to", "was", "we", "were", "what", "when", "which",
        "who", "will", "with", "you", "your",
    ]
    .into_iter()
    .collect();
}

/// Text analysis shared by indexing and query-time tokenization.
///
/// Text is NFKC-normalized and lowercased, split into letter-initial words,
/// then optionally filtered against an English stopword list and stemmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tokenizer {
    pub stem: bool,
    pub remove_stopwords: bool,
}

impl Default for Tokenizer {
    fn default() -> Self { Self { stem: true, remove_stopwords: true } }
}

impl Tokenizer {
    pub fn terms(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        WORD.find_iter(&normalized)
            .map(|m| m.as_str())
            .filter(|w| !(self.remove_stopwords && STOPWORDS.contains(w)))
            .map(|w| if self.stem { ENGLISH.stem(w).into_owned() } else { w.to_string() })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_by_default() {
        let terms = Tokenizer::default().terms("Running, runner's run!");
        assert!(terms.iter().any(|w| w == "run"));
    }

    #[test]
    fn raw_words_when_disabled() {
        let tok = Tokenizer { stem: false, remove_stopwords: false };
        assert_eq!(tok.terms("The Cats"), vec!["the".to_string(), "cats".to_string()]);
    }
}
