// Sentiment scoring: trait-based abstraction over a polarity lexicon model.
//
// The SentimentScorer trait defines the interface. LexiconScorer implements
// it with a rule-based compound polarity model; summary.rs attaches scores to
// a corpus and rolls them up per group.

pub mod lexicon;
pub mod summary;
pub mod traits;
pub mod vader;
