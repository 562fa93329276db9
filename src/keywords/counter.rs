// Keyword counter.
//
// All document texts are joined with single spaces into one lowercase
// stream, then each keyword is counted as a plain substring with a
// left-to-right, non-overlapping scan. "aa" occurs once in "aaa".
//
// Substring semantics mean "plan" also matches inside "planning". That is
// how the report has always counted; callers wanting whole-word counts
// should pass phrases that cannot occur inside other words.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::corpus::models::Corpus;
use crate::error::{AnalyticsError, Result};

/// One keyword and how often it occurs in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Occurrence counts for every requested keyword, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordFrequencies {
    entries: Vec<KeywordCount>,
}

impl KeywordFrequencies {
    /// Count for `keyword`, if it was requested.
    pub fn get(&self, keyword: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.keyword == keyword)
            .map(|e| e.count)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KeywordCount> {
        self.entries.iter()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.keyword.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Entries ordered for a bar chart: highest count first, request order on ties.
    pub fn ranked(&self) -> Vec<&KeywordCount> {
        let mut ranked: Vec<&KeywordCount> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

/// Reject empty, blank, or duplicate keywords.
pub fn validate_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<()> {
    let mut seen = HashSet::new();
    for (i, keyword) in keywords.iter().enumerate() {
        let keyword = keyword.as_ref();
        if keyword.trim().is_empty() {
            return Err(AnalyticsError::config(format!(
                "keyword at position {i} is empty"
            )));
        }
        if !seen.insert(keyword.to_lowercase()) {
            return Err(AnalyticsError::config(format!(
                "keyword {keyword:?} is listed more than once"
            )));
        }
    }
    Ok(())
}

/// Count case-insensitive occurrences of each keyword across the corpus.
pub fn count_keywords<S: AsRef<str>>(corpus: &Corpus, keywords: &[S]) -> Result<KeywordFrequencies> {
    validate_keywords(keywords)?;

    let stream = corpus.texts().collect::<Vec<_>>().join(" ").to_lowercase();

    let entries: Vec<KeywordCount> = keywords
        .iter()
        .map(|keyword| {
            let keyword = keyword.as_ref();
            let count = stream.matches(keyword.to_lowercase().as_str()).count();
            KeywordCount {
                keyword: keyword.to_string(),
                count,
            }
        })
        .collect();

    debug!(
        documents = corpus.len(),
        keywords = entries.len(),
        "Counted keywords"
    );

    Ok(KeywordFrequencies { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_case_insensitive() {
        let corpus = Corpus::from_texts(["Compliance and COMPLIANCE reporting"]);
        let freq = count_keywords(&corpus, &["compliance", "reporting"]).unwrap();
        assert_eq!(freq.get("compliance"), Some(2));
        assert_eq!(freq.get("reporting"), Some(1));
    }

    #[test]
    fn overlapping_matches_counted_once() {
        let corpus = Corpus::from_texts(["aaa"]);
        let freq = count_keywords(&corpus, &["aa"]).unwrap();
        assert_eq!(freq.get("aa"), Some(1));
    }

    #[test]
    fn empty_keyword_rejected() {
        let corpus = Corpus::from_texts(["anything"]);
        let err = count_keywords(&corpus, &["crm", ""]).unwrap_err();
        assert!(matches!(err, AnalyticsError::Config(_)));
    }

    #[test]
    fn ranked_keeps_request_order_on_ties() {
        let corpus = Corpus::from_texts(["crm excel"]);
        let freq = count_keywords(&corpus, &["excel", "crm", "database"]).unwrap();
        let order: Vec<&str> = freq.ranked().iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(order, vec!["excel", "crm", "database"]);
    }
}
