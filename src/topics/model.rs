// Topic model result types.

use serde::{Deserialize, Serialize};

/// One latent topic, described by its highest-weighted terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// 1-based position in the model
    pub index: usize,
    /// Top terms, highest weight first
    pub terms: Vec<String>,
    /// Weight of each term in `terms`
    pub weights: Vec<f64>,
}

impl Topic {
    /// Human-readable label, e.g. "Topic 1: delay, portal, withdrawal".
    pub fn label(&self) -> String {
        format!("Topic {}: {}", self.index, self.terms.join(", "))
    }
}

/// The ordered topics extracted from one document set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicModel {
    pub topics: Vec<Topic>,
    /// Number of documents the model was fit on
    pub documents: usize,
    /// Vocabulary size after filtering
    pub vocabulary_size: usize,
}

impl TopicModel {
    /// The result for an empty document set.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn labels(&self) -> Vec<String> {
        self.topics.iter().map(Topic::label).collect()
    }
}

/// Indices of the `n` largest weights, descending; equal weights keep
/// ascending index order.
pub fn top_indices(weights: &[f64], n: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]).then(a.cmp(&b)));
    order.truncate(n);
    order
}
