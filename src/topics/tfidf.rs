// TF-IDF document-term weighting.
//
// Tokens are lowercase runs of two or more word characters. Stop words are
// removed before counting. A term enters the vocabulary when it appears in
// at least `min_doc_freq` documents and in no more than
// `max_doc_freq_ratio * n_docs` of them; the vocabulary is sorted, and that
// order is the tie-break order for everything downstream.
//
// Weights are raw counts times the smoothed inverse document frequency
// ln((1 + n) / (1 + df)) + 1, with each document row scaled to unit length.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::matrix::Matrix;
use crate::error::{AnalyticsError, Result};

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Split text into lowercase word tokens (stop words included).
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// English stop words from the `stop-words` crate, lowercased.
pub fn english_stop_words() -> HashSet<String> {
    let words: Vec<String> = get(LANGUAGE::English);
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

/// A weighted document-term matrix and its vocabulary.
#[derive(Debug, Clone)]
pub struct TermMatrix {
    /// Sorted vocabulary; column `j` of `weights` is `vocabulary[j]`
    pub vocabulary: Vec<String>,
    /// Documents x terms
    pub weights: Matrix,
}

impl TermMatrix {
    pub fn documents(&self) -> usize {
        self.weights.rows()
    }

    pub fn terms(&self) -> usize {
        self.weights.cols()
    }
}

/// Fits a vocabulary to a document set and weights it by TF-IDF.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    pub min_doc_freq: usize,
    pub max_doc_freq_ratio: f64,
    stop_words: HashSet<String>,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(2, 0.95)
    }
}

impl TfIdfVectorizer {
    pub fn new(min_doc_freq: usize, max_doc_freq_ratio: f64) -> Self {
        Self {
            min_doc_freq,
            max_doc_freq_ratio,
            stop_words: english_stop_words(),
        }
    }

    /// Also drop these words (case-insensitive).
    pub fn with_extra_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Build the vocabulary from `documents` and return their weighted matrix.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<TermMatrix> {
        let n_docs = documents.len();
        if n_docs == 0 {
            return Err(AnalyticsError::insufficient("no documents to vectorize"));
        }

        let counts: Vec<BTreeMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = BTreeMap::new();
                for token in tokenize(doc.as_ref()) {
                    if !self.stop_words.contains(&token) {
                        *tf.entry(token).or_insert(0) += 1;
                    }
                }
                tf
            })
            .collect();

        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let max_doc_count = self.max_doc_freq_ratio * n_docs as f64;
        if max_doc_count < self.min_doc_freq as f64 {
            return Err(AnalyticsError::insufficient(format!(
                "{n_docs} documents: a term may appear in at most {max_doc_count:.2} \
                 of them but must appear in at least {}",
                self.min_doc_freq
            )));
        }

        let mut vocabulary: Vec<String> = doc_freq
            .iter()
            .filter(|&(_, &df)| df >= self.min_doc_freq && df as f64 <= max_doc_count)
            .map(|(term, _)| term.to_string())
            .collect();
        vocabulary.sort();

        if vocabulary.is_empty() {
            return Err(AnalyticsError::insufficient(format!(
                "no terms left after stop-word and frequency filtering of {n_docs} documents"
            )));
        }

        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq[term.as_str()] as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let mut weights = Matrix::zeros(n_docs, vocabulary.len());
        for (d, tf) in counts.iter().enumerate() {
            for (j, term) in vocabulary.iter().enumerate() {
                if let Some(&count) = tf.get(term) {
                    weights.set(d, j, count as f64 * idf[j]);
                }
            }
            let row = weights.row_mut(d);
            let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.iter_mut().for_each(|w| *w /= norm);
            }
        }

        debug!(
            documents = n_docs,
            candidate_terms = doc_freq.len(),
            vocabulary = vocabulary.len(),
            "Built TF-IDF matrix"
        );

        Ok(TermMatrix {
            vocabulary,
            weights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer(min_df: usize, max_ratio: f64) -> TfIdfVectorizer {
        TfIdfVectorizer::new(min_df, max_ratio)
    }

    #[test]
    fn tokenize_drops_single_characters() {
        assert_eq!(tokenize("A portal, an App!"), vec!["portal", "an", "app"]);
    }

    #[test]
    fn vocabulary_is_sorted_and_filtered() {
        let docs = [
            "withdrawal delayed portal",
            "portal delayed again",
            "withdrawal portal broken",
        ];
        let m = vectorizer(2, 0.95).fit_transform(&docs).unwrap();
        // "portal" is in all 3 (> 2.85) and the rest appear once
        assert_eq!(m.vocabulary, vec!["delayed", "withdrawal"]);
        assert_eq!(m.documents(), 3);
    }

    #[test]
    fn rows_are_unit_length() {
        let docs = ["slow portal slow", "slow withdrawal", "portal withdrawal"];
        let m = vectorizer(1, 1.0).fit_transform(&docs).unwrap();
        for d in 0..m.documents() {
            let norm: f64 = m.weights.row(d).iter().map(|w| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn stop_words_never_enter_vocabulary() {
        let docs = ["the and of portal", "the and of portal"];
        let m = vectorizer(1, 1.0).fit_transform(&docs).unwrap();
        assert_eq!(m.vocabulary, vec!["portal"]);
    }

    #[test]
    fn ratio_below_min_doc_freq_is_insufficient() {
        let docs = ["slow portal", "slow withdrawal"];
        let err = vectorizer(2, 0.95).fit_transform(&docs).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn empty_vocabulary_is_insufficient() {
        let docs = ["alpha beta", "gamma delta", "epsilon zeta"];
        let err = vectorizer(2, 0.95).fit_transform(&docs).unwrap_err();
        assert!(matches!(err, AnalyticsError::InsufficientData(_)));
    }
}
