// Sentiment scorer trait.
//
// Scoring is a pure function of the text: no I/O, no randomness, no state
// carried between calls. Implementations return the compound polarity in
// [-1.0, 1.0], with 0.0 for text that carries no signal (including "").

/// Trait for assigning a polarity score to text.
pub trait SentimentScorer: Send + Sync {
    /// Score a single text.
    fn score_text(&self, text: &str) -> f64;

    /// Score multiple texts, returning results in the same order.
    fn score_batch(&self, texts: &[&str]) -> Vec<f64> {
        texts.iter().map(|text| self.score_text(text)).collect()
    }
}
