// Volume breakdowns: documents per group and categories within a group.

use std::collections::HashMap;

use serde::Serialize;

use super::models::Corpus;

/// A label with the number of documents carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// Documents per group label, most frequent first (ties by label).
/// Documents without a group are not counted.
pub fn group_counts(corpus: &Corpus) -> Vec<LabelCount> {
    ranked(corpus.iter().filter_map(|d| d.group()))
}

/// The `limit` most frequent categories among documents in `group`.
pub fn top_categories(corpus: &Corpus, group: &str, limit: usize) -> Vec<LabelCount> {
    let mut counts = ranked(
        corpus
            .iter()
            .filter(|d| d.group() == Some(group))
            .filter_map(|d| d.category.as_deref()),
    );
    counts.truncate(limit);
    counts
}

/// Document count for one group; 0 when the group is absent.
pub fn count_for_group(corpus: &Corpus, group: &str) -> usize {
    corpus.iter().filter(|d| d.group() == Some(group)).count()
}

fn ranked<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<LabelCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut out: Vec<LabelCount> = counts
        .into_iter()
        .map(|(label, count)| LabelCount {
            label: label.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::models::Document;

    fn posting(group: &str, category: &str) -> Document {
        Document {
            text: Some(String::new()),
            group: Some(group.to_string()),
            category: Some(category.to_string()),
        }
    }

    #[test]
    fn group_counts_rank_by_volume_then_label() {
        let corpus = Corpus::from_grouped(vec![
            ("a", Some("Quilter")),
            ("b", Some("Ascot Lloyd")),
            ("c", Some("Quilter")),
            ("d", None),
            ("e", Some("True Potential")),
        ]);
        let counts = group_counts(&corpus);
        assert_eq!(counts[0], LabelCount { label: "Quilter".into(), count: 2 });
        assert_eq!(counts[1].label, "Ascot Lloyd");
        assert_eq!(counts[2].label, "True Potential");
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn top_categories_limited_to_one_group() {
        let corpus = Corpus::new(vec![
            posting("Quilter", "Operations"),
            posting("Quilter", "Operations"),
            posting("Quilter", "Advice"),
            posting("Ascot Lloyd", "Compliance"),
        ]);
        let top = top_categories(&corpus, "Quilter", 1);
        assert_eq!(top, vec![LabelCount { label: "Operations".into(), count: 2 }]);
        assert!(top_categories(&corpus, "Succession Group", 10).is_empty());
        assert_eq!(count_for_group(&corpus, "Ascot Lloyd"), 1);
    }
}
