// Unit tests for keyword counting.
//
// Tests the counting contract: non-overlapping substring counts over the
// lowercased, space-joined corpus, output keyed exactly by the requested
// keywords in request order, and rejection of invalid keyword lists.

use clientvoice::corpus::models::{Corpus, Document};
use clientvoice::error::AnalyticsError;
use clientvoice::keywords::counter::count_keywords;
use clientvoice::keywords::presets::{KeywordSet, Preset, RESPONSIBILITIES, TOOLS};

// ============================================================
// Counting semantics
// ============================================================

#[test]
fn overlapping_occurrences_not_double_counted() {
    let corpus = Corpus::from_texts(["aaa"]);
    let freq = count_keywords(&corpus, &["aa"]).unwrap();
    assert_eq!(freq.get("aa"), Some(1));
}

#[test]
fn adjacent_occurrences_each_counted() {
    let corpus = Corpus::from_texts(["aaaa", "abab"]);
    let freq = count_keywords(&corpus, &["aa", "ab"]).unwrap();
    assert_eq!(freq.get("aa"), Some(2));
    assert_eq!(freq.get("ab"), Some(2));
}

#[test]
fn multi_word_phrase_requires_exact_spacing() {
    let corpus = Corpus::from_texts([
        "Owns the annual review process",
        "annual  review with two spaces",
        "annual-review hyphenated",
    ]);
    let freq = count_keywords(&corpus, &["annual review"]).unwrap();
    assert_eq!(freq.get("annual review"), Some(1));
}

#[test]
fn uppercase_keyword_matches_case_insensitively() {
    let corpus = Corpus::from_texts(["Uses CRM daily", "crm admin"]);
    let freq = count_keywords(&corpus, &["CRM"]).unwrap();
    assert_eq!(freq.get("CRM"), Some(2));
}

#[test]
fn substring_inside_longer_word_counts() {
    // "plan" inside "planning" is counted; this is substring semantics
    let corpus = Corpus::from_texts(["financial planning and a financial plan"]);
    let freq = count_keywords(&corpus, &["financial plan"]).unwrap();
    assert_eq!(freq.get("financial plan"), Some(2));
}

#[test]
fn documents_joined_with_a_space() {
    let corpus = Corpus::from_texts(["client", "relationship manager"]);
    let freq = count_keywords(&corpus, &["client relationship"]).unwrap();
    assert_eq!(freq.get("client relationship"), Some(1));
}

#[test]
fn missing_text_treated_as_empty() {
    let corpus = Corpus::new(vec![
        Document::default(),
        Document::new("compliance reporting"),
        Document::default(),
    ]);
    let freq = count_keywords(&corpus, &["compliance", "nan"]).unwrap();
    assert_eq!(freq.get("compliance"), Some(1));
    assert_eq!(freq.get("nan"), Some(0));
}

// ============================================================
// Result shape
// ============================================================

#[test]
fn empty_corpus_yields_all_zero_counts() {
    let freq = count_keywords(&Corpus::empty(), TOOLS).unwrap();
    assert_eq!(freq.len(), TOOLS.len());
    assert!(freq.iter().all(|e| e.count == 0));
    assert_eq!(freq.total(), 0);
}

#[test]
fn key_set_and_order_match_request() {
    let corpus = Corpus::from_texts(["reporting reporting onboarding"]);
    let freq = count_keywords(&corpus, RESPONSIBILITIES).unwrap();
    let keys: Vec<&str> = freq.keywords().collect();
    assert_eq!(keys, RESPONSIBILITIES.to_vec());
}

#[test]
fn unrequested_keyword_is_absent() {
    let freq = count_keywords(&Corpus::from_texts(["excel"]), &["excel"]).unwrap();
    assert_eq!(freq.get("crm"), None);
}

#[test]
fn serializes_in_request_order() {
    let corpus = Corpus::from_texts(["excel crm crm"]);
    let freq = count_keywords(&corpus, &["excel", "crm"]).unwrap();
    let json = serde_json::to_value(&freq).unwrap();
    assert_eq!(json[0]["keyword"], "excel");
    assert_eq!(json[0]["count"], 1);
    assert_eq!(json[1]["keyword"], "crm");
    assert_eq!(json[1]["count"], 2);
}

// ============================================================
// Rejected keyword lists
// ============================================================

#[test]
fn empty_keyword_is_configuration_error() {
    let err = count_keywords(&Corpus::empty(), &[""]).unwrap_err();
    assert!(matches!(err, AnalyticsError::Config(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn whitespace_keyword_is_configuration_error() {
    let err = count_keywords(&Corpus::empty(), &["excel", "  "]).unwrap_err();
    assert!(matches!(err, AnalyticsError::Config(_)));
}

#[test]
fn duplicate_keyword_is_configuration_error() {
    let err = count_keywords(&Corpus::empty(), &["crm", "CRM"]).unwrap_err();
    assert!(matches!(err, AnalyticsError::Config(_)));
}

// ============================================================
// Presets
// ============================================================

#[test]
fn presets_cover_both_lists() {
    let sets = KeywordSet::presets();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0].name, "responsibilities");
    assert_eq!(sets[1], KeywordSet::from(Preset::Tools));
}
