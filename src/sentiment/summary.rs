// Per-document scores and per-group rollups.
//
// score_corpus attaches a polarity score to every document; the group
// summary is the mean score of each group's documents. Documents without a
// group label land in their own Ungrouped bucket. A group with no documents
// has no entry at all, never a numeric placeholder.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::info;

use super::traits::SentimentScorer;
use crate::corpus::models::{Corpus, Document};

/// A document paired with its polarity score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub text: String,
    pub group: Option<String>,
    pub score: f64,
}

/// Every document of a corpus with its score, in corpus order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoredCorpus {
    pub documents: Vec<ScoredDocument>,
}

impl ScoredCorpus {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.documents.iter().map(|d| d.score)
    }

    /// Documents scoring strictly below `threshold`.
    pub fn below(&self, threshold: f64) -> impl Iterator<Item = &ScoredDocument> {
        self.documents.iter().filter(move |d| d.score < threshold)
    }

    /// Up to `count` documents below `threshold`, most negative first.
    pub fn most_negative(&self, threshold: f64, count: usize) -> Vec<&ScoredDocument> {
        let mut docs: Vec<&ScoredDocument> = self.below(threshold).collect();
        docs.sort_by(|a, b| a.score.total_cmp(&b.score));
        docs.truncate(count);
        docs
    }

    /// Mean score per group label.
    pub fn group_summary(&self) -> GroupSentimentSummary {
        let mut sums: BTreeMap<GroupKey, (f64, usize)> = BTreeMap::new();
        for doc in &self.documents {
            let entry = sums.entry(GroupKey::from(doc.group.as_deref())).or_insert((0.0, 0));
            entry.0 += doc.score;
            entry.1 += 1;
        }

        let groups = sums
            .into_iter()
            .map(|(key, (sum, count))| {
                (
                    key,
                    GroupSentiment {
                        mean: sum / count as f64,
                        documents: count,
                    },
                )
            })
            .collect();

        GroupSentimentSummary { groups }
    }
}

/// Score every document in a corpus.
pub fn score_corpus(scorer: &dyn SentimentScorer, corpus: &Corpus) -> ScoredCorpus {
    let documents: Vec<ScoredDocument> = corpus
        .iter()
        .map(|doc: &Document| ScoredDocument {
            text: doc.text().to_string(),
            group: doc.group.clone(),
            score: scorer.score_text(doc.text()),
        })
        .collect();

    let negative = documents.iter().filter(|d| d.score < 0.0).count();
    info!(
        documents = documents.len(),
        negative,
        "Scored corpus sentiment"
    );

    ScoredCorpus { documents }
}

/// Key of a group summary entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Named(String),
    Ungrouped,
}

impl GroupKey {
    pub fn label(&self) -> Option<&str> {
        match self {
            GroupKey::Named(name) => Some(name),
            GroupKey::Ungrouped => None,
        }
    }
}

impl From<Option<&str>> for GroupKey {
    fn from(label: Option<&str>) -> Self {
        match label {
            Some(name) => GroupKey::Named(name.to_string()),
            None => GroupKey::Ungrouped,
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.label().serialize(serializer)
    }
}

/// Mean score of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupSentiment {
    pub mean: f64,
    pub documents: usize,
}

/// Mean sentiment per group. Named groups sort by label; Ungrouped last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSentimentSummary {
    groups: BTreeMap<GroupKey, GroupSentiment>,
}

impl GroupSentimentSummary {
    /// Mean for a named group, or None if it has no documents.
    pub fn mean(&self, group: &str) -> Option<f64> {
        self.groups
            .get(&GroupKey::Named(group.to_string()))
            .map(|g| g.mean)
    }

    /// Mean of documents without a group label.
    pub fn ungrouped_mean(&self) -> Option<f64> {
        self.groups.get(&GroupKey::Ungrouped).map(|g| g.mean)
    }

    pub fn get(&self, key: &GroupKey) -> Option<&GroupSentiment> {
        self.groups.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &GroupSentiment)> {
        self.groups.iter()
    }

    /// Only the named groups, for per-firm rollups.
    pub fn named(&self) -> impl Iterator<Item = (&str, &GroupSentiment)> {
        self.groups
            .iter()
            .filter_map(|(key, g)| key.label().map(|label| (label, g)))
    }

    pub fn without_ungrouped(&self) -> Self {
        Self {
            groups: self
                .groups
                .iter()
                .filter(|(key, _)| matches!(key, GroupKey::Named(_)))
                .map(|(key, g)| (key.clone(), *g))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Serialize)]
struct GroupRow<'a> {
    group: &'a GroupKey,
    mean: f64,
    documents: usize,
}

impl Serialize for GroupSentimentSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.groups.iter().map(|(group, g)| GroupRow {
            group,
            mean: g.mean,
            documents: g.documents,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(group: Option<&str>, score: f64) -> ScoredDocument {
        ScoredDocument {
            text: String::new(),
            group: group.map(str::to_string),
            score,
        }
    }

    #[test]
    fn means_per_group_with_ungrouped_bucket() {
        let corpus = ScoredCorpus {
            documents: vec![
                scored(Some("A"), -0.5),
                scored(Some("B"), 0.8),
                scored(Some("A"), -0.1),
                scored(None, 0.4),
            ],
        };
        let summary = corpus.group_summary();
        assert!((summary.mean("A").unwrap() - (-0.3)).abs() < 1e-12);
        assert_eq!(summary.mean("B"), Some(0.8));
        assert_eq!(summary.ungrouped_mean(), Some(0.4));
        assert_eq!(summary.mean("C"), None);
        assert_eq!(summary.without_ungrouped().len(), 2);
    }

    #[test]
    fn ungrouped_sorts_last() {
        let corpus = ScoredCorpus {
            documents: vec![scored(None, 0.0), scored(Some("Z"), 0.0)],
        };
        let summary = corpus.group_summary();
        let keys: Vec<Option<&str>> = summary.iter().map(|(k, _)| k.label()).collect();
        assert_eq!(keys, vec![Some("Z"), None]);
    }

    #[test]
    fn serializes_as_rows() {
        let corpus = ScoredCorpus {
            documents: vec![scored(Some("A"), 1.0), scored(None, -1.0)],
        };
        let json = serde_json::to_value(corpus.group_summary()).unwrap();
        assert_eq!(json[0]["group"], "A");
        assert_eq!(json[0]["mean"], 1.0);
        assert!(json[1]["group"].is_null());
    }
}
