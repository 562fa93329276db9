// Topic extractor trait: swap-ready abstraction.
//
// The default implementation factors a TF-IDF matrix with NMF, but any
// approach that turns a document set into ranked topics fits here.

use super::model::TopicModel;
use crate::error::Result;

/// Trait for extracting topics from a set of document texts.
pub trait TopicExtractor {
    /// Analyze a set of texts and produce a topic model. An empty set
    /// yields an empty model, not an error.
    fn extract(&self, documents: &[&str]) -> Result<TopicModel>;
}
