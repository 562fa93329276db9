// Unit tests for sentiment scoring and group rollups.
//
// Tests the score range and neutrality contract, determinism, the effect of
// the rule adjustments, and the group summary's absence semantics.

use std::collections::HashMap;

use clientvoice::corpus::models::{Corpus, Document};
use clientvoice::sentiment::lexicon::PolarityLexicon;
use clientvoice::sentiment::summary::{score_corpus, GroupKey};
use clientvoice::sentiment::traits::SentimentScorer;
use clientvoice::sentiment::vader::LexiconScorer;

fn scorer() -> LexiconScorer {
    LexiconScorer::new(PolarityLexicon::bundled().unwrap())
}

/// Scores +1.0 for anything mentioning "perfect", 0.0 otherwise.
struct FixedScorer;

impl SentimentScorer for FixedScorer {
    fn score_text(&self, text: &str) -> f64 {
        if text.contains("perfect") {
            1.0
        } else {
            0.0
        }
    }
}

// ============================================================
// Score range and neutrality
// ============================================================

#[test]
fn empty_string_scores_exactly_zero() {
    assert_eq!(scorer().score_text(""), 0.0);
}

#[test]
fn punctuation_only_scores_zero() {
    assert_eq!(scorer().score_text("!!! ??? ..."), 0.0);
}

#[test]
fn scores_stay_in_range() {
    let s = scorer();
    let texts = [
        "worst worst worst WORST terrible awful horrible disaster!!!!",
        "best best best BEST superb outstanding amazing love!!!!",
        "not bad",
        "never so good",
        "this is kind of good",
        "???",
        "🙂 emoji only",
        "mixed: great advisor but terrible app, slow portal and rude staff",
    ];
    for text in texts {
        let score = s.score_text(text);
        assert!((-1.0..=1.0).contains(&score), "{text:?} scored {score}");
    }
}

#[test]
fn scoring_is_deterministic() {
    let s = scorer();
    let text = "Confusing portal and delayed withdrawal, but the advisor was lovely";
    let first = s.score_text(text);
    for _ in 0..5 {
        assert_eq!(s.score_text(text), first);
    }
}

#[test]
fn batch_matches_individual_scores() {
    let s = scorer();
    let texts = ["great service", "awful service", ""];
    let batch = s.score_batch(&texts);
    let single: Vec<f64> = texts.iter().map(|t| s.score_text(t)).collect();
    assert_eq!(batch, single);
}

// ============================================================
// Rule adjustments
// ============================================================

#[test]
fn negation_reverses_polarity() {
    let s = scorer();
    assert!(s.score_text("helpful") > 0.0);
    assert!(s.score_text("not helpful") < 0.0);
    assert!(s.score_text("wasn't helpful at all") < 0.0);
}

#[test]
fn never_so_intensifies_rather_than_negates() {
    let s = scorer();
    assert!(s.score_text("never so happy") > 0.0);
    assert!(s.score_text("never so happy") > s.score_text("so happy"));
}

#[test]
fn kind_of_is_not_positive() {
    let s = scorer();
    assert_eq!(s.score_text("kind of"), 0.0);
    assert!(s.score_text("a kind advisor") > 0.0);
}

#[test]
fn multiple_question_marks_add_emphasis() {
    let s = scorer();
    assert!(s.score_text("why so slow??") < s.score_text("why so slow"));
}

#[test]
fn custom_lexicon_replaces_bundled() {
    let valences: HashMap<String, f64> = [("meh".to_string(), -1.0)].into();
    let s = LexiconScorer::new(PolarityLexicon::with_valences(valences));
    assert!(s.score_text("meh") < 0.0);
    assert_eq!(s.score_text("great"), 0.0);
}

#[test]
fn malformed_lexicon_file_is_an_error_not_an_empty_lexicon() {
    let path = std::env::temp_dir().join(format!(
        "clientvoice-{}-bad-lexicon.tsv",
        std::process::id()
    ));
    std::fs::write(&path, "great\t3.1\nslow\tvery\n").unwrap();
    let result = PolarityLexicon::from_path(&path);
    std::fs::remove_file(&path).ok();

    assert!(result.is_err());
}

#[test]
fn bundled_lexicon_is_populated() {
    let lexicon = PolarityLexicon::bundled().unwrap();
    assert!(!lexicon.is_empty());
    assert!(scorer().score_text("slow portal") < 0.0);
}

// ============================================================
// Group summary
// ============================================================

#[test]
fn all_positive_group_averages_to_one() {
    let corpus = Corpus::from_grouped(vec![
        ("perfect", Some("Quilter")),
        ("perfect again", Some("Quilter")),
        ("fine", Some("Ascot Lloyd")),
    ]);
    let summary = score_corpus(&FixedScorer, &corpus).group_summary();
    assert_eq!(summary.mean("Quilter"), Some(1.0));
    assert_eq!(summary.mean("Ascot Lloyd"), Some(0.0));
}

#[test]
fn group_without_documents_is_absent() {
    let corpus = Corpus::from_grouped(vec![("perfect", Some("Quilter"))]);
    let summary = score_corpus(&FixedScorer, &corpus).group_summary();
    assert_eq!(summary.mean("Succession Group"), None);
    assert!(summary
        .get(&GroupKey::Named("Succession Group".to_string()))
        .is_none());
}

#[test]
fn unlabeled_documents_form_ungrouped_bucket() {
    let corpus = Corpus::new(vec![
        Document::new("perfect"),
        Document::grouped("meh", "True Potential"),
    ]);
    let summary = score_corpus(&FixedScorer, &corpus).group_summary();
    assert_eq!(summary.ungrouped_mean(), Some(1.0));
    assert_eq!(summary.len(), 2);

    let named: Vec<&str> = summary.named().map(|(label, _)| label).collect();
    assert_eq!(named, vec!["True Potential"]);
}

#[test]
fn empty_corpus_has_empty_summary() {
    let scored = score_corpus(&scorer(), &Corpus::empty());
    assert!(scored.is_empty());
    assert!(scored.group_summary().is_empty());
}

#[test]
fn missing_text_scores_neutral() {
    let corpus = Corpus::new(vec![Document {
        text: None,
        group: Some("Quilter".to_string()),
        category: None,
    }]);
    let scored = score_corpus(&scorer(), &corpus);
    assert_eq!(scored.documents[0].score, 0.0);
    assert_eq!(scored.documents[0].text, "");
}

#[test]
fn most_negative_respects_threshold_and_order() {
    let corpus = Corpus::from_texts(["perfect", "meh", "perfect again"]);
    let scored = score_corpus(&FixedScorer, &corpus);

    // Nothing below the default threshold
    assert!(scored.most_negative(0.0, 3).is_empty());

    // A raised threshold pulls the neutral review in, lowest first
    let picked = scored.most_negative(0.5, 3);
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].text, "meh");

    let all = scored.most_negative(2.0, 2);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].text, "meh");
}
