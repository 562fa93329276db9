// NMF topic extraction over a filtered document set.
//
// Steps: validate options, vectorize with TF-IDF, factor into K topics,
// then label each topic with its N heaviest terms. negative_topics() is the
// report's entry point: it keeps only documents scoring below the sentiment
// threshold before extracting.

use tracing::info;

use super::model::{top_indices, Topic, TopicModel};
use super::nmf::Nmf;
use super::tfidf::TfIdfVectorizer;
use super::traits::TopicExtractor;
use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, Result};
use crate::sentiment::summary::ScoredCorpus;

/// TF-IDF + NMF topic extractor.
#[derive(Debug, Clone)]
pub struct NmfTopicExtractor {
    config: AnalyticsConfig,
    vectorizer: TfIdfVectorizer,
}

impl Default for NmfTopicExtractor {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}

impl NmfTopicExtractor {
    pub fn new(config: AnalyticsConfig) -> Self {
        let vectorizer = TfIdfVectorizer::new(config.min_doc_freq, config.max_doc_freq_ratio);
        Self { config, vectorizer }
    }

    /// Drop additional domain words (firm names, "review", ...) from the vocabulary.
    pub fn with_extra_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.vectorizer = self.vectorizer.with_extra_stop_words(words);
        self
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }
}

impl TopicExtractor for NmfTopicExtractor {
    fn extract(&self, documents: &[&str]) -> Result<TopicModel> {
        self.config.validate()?;

        if documents.is_empty() {
            return Ok(TopicModel::empty());
        }

        let k = self.config.topic_count;
        if documents.len() < k {
            return Err(AnalyticsError::insufficient(format!(
                "{} documents cannot support {k} topics",
                documents.len()
            )));
        }

        let matrix = self.vectorizer.fit_transform(documents)?;

        let n = self.config.top_terms_per_topic;
        if n > matrix.terms() {
            return Err(AnalyticsError::config(format!(
                "top_terms_per_topic ({n}) exceeds the vocabulary size ({})",
                matrix.terms()
            )));
        }

        let nmf = Nmf {
            components: k,
            max_iter: self.config.nmf_max_iter,
            tolerance: self.config.nmf_tolerance,
            seed: self.config.random_seed,
        };
        let fit = nmf.fit(&matrix.weights)?;

        let topics: Vec<Topic> = (0..k)
            .map(|t| {
                let weights = fit.topic_term.row(t);
                let top = top_indices(weights, n);
                Topic {
                    index: t + 1,
                    terms: top.iter().map(|&j| matrix.vocabulary[j].clone()).collect(),
                    weights: top.iter().map(|&j| weights[j]).collect(),
                }
            })
            .collect();

        info!(
            documents = documents.len(),
            vocabulary = matrix.terms(),
            topics = topics.len(),
            iterations = fit.iterations,
            "Extracted topics"
        );

        Ok(TopicModel {
            topics,
            documents: documents.len(),
            vocabulary_size: matrix.terms(),
        })
    }
}

/// Extract topics from the documents scoring strictly below `threshold`.
pub fn negative_topics(
    extractor: &dyn TopicExtractor,
    scored: &ScoredCorpus,
    threshold: f64,
) -> Result<TopicModel> {
    let texts: Vec<&str> = scored.below(threshold).map(|d| d.text.as_str()).collect();
    extractor.extract(&texts)
}
