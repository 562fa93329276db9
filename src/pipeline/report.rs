// Report pipeline: loads both tables through the cache, then runs the
// three analytics components once.
//
// Keyword counting runs over job descriptions. Sentiment runs over reviews,
// and topic extraction consumes the reviews scored below the threshold. A
// topic step that fails for lack of data is recorded as skipped and the
// report still completes; configuration errors abort the run.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{AnalyticsConfig, Config};
use crate::corpus::cache::CorpusCache;
use crate::corpus::loader::TableSource;
use crate::corpus::models::Corpus;
use crate::corpus::stats::{self, LabelCount};
use crate::error::AnalyticsError;
use crate::keywords::counter::{count_keywords, KeywordFrequencies};
use crate::keywords::presets::KeywordSet;
use crate::sentiment::summary::{score_corpus, GroupSentimentSummary, ScoredCorpus};
use crate::sentiment::traits::SentimentScorer;
use crate::topics::extractor::negative_topics;
use crate::topics::model::TopicModel;
use crate::topics::traits::TopicExtractor;

/// Departments shown per firm in the hiring breakdown.
pub const TOP_CATEGORIES_PER_GROUP: usize = 10;

/// The two tables a report reads.
#[derive(Debug, Clone)]
pub struct ReportInputs {
    pub hiring: Arc<Corpus>,
    pub reviews: Arc<Corpus>,
}

impl ReportInputs {
    /// Load both tables through `cache`; missing files become empty corpora.
    pub fn load(cache: &mut CorpusCache, config: &Config) -> Result<Self> {
        let hiring = cache.get_or_load(&TableSource::hiring(&config.hiring_path))?;
        let reviews = cache.get_or_load(&TableSource::reviews(&config.reviews_path))?;
        Ok(Self { hiring, reviews })
    }
}

/// Keyword counts for one named list.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordSection {
    pub name: String,
    pub frequencies: KeywordFrequencies,
}

/// Category breakdown for one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupCategories {
    pub group: String,
    pub categories: Vec<LabelCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HiringSection {
    pub postings: usize,
    pub postings_by_group: Vec<LabelCount>,
    pub categories_by_group: Vec<GroupCategories>,
    pub keywords: Vec<KeywordSection>,
}

/// What happened to topic extraction in this run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TopicOutcome {
    Extracted { model: TopicModel },
    NoNegativeDocuments,
    Skipped { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewSection {
    pub reviews: usize,
    pub reviews_by_group: Vec<LabelCount>,
    pub sentiment: GroupSentimentSummary,
    pub negative_reviews: usize,
    pub topics: TopicOutcome,
}

/// Everything the report renders.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub hiring: HiringSection,
    pub reviews: ReviewSection,
}

/// Run keyword counting over hiring data.
pub fn hiring_section(
    hiring: &Corpus,
    keyword_sets: &[KeywordSet],
) -> crate::error::Result<HiringSection> {
    let postings_by_group = stats::group_counts(hiring);
    let categories_by_group = postings_by_group
        .iter()
        .map(|g| GroupCategories {
            group: g.label.clone(),
            categories: stats::top_categories(hiring, &g.label, TOP_CATEGORIES_PER_GROUP),
        })
        .collect();

    let keywords = keyword_sets
        .iter()
        .map(|set| {
            Ok(KeywordSection {
                name: set.name.clone(),
                frequencies: count_keywords(hiring, set.keywords.as_slice())?,
            })
        })
        .collect::<crate::error::Result<Vec<_>>>()?;

    Ok(HiringSection {
        postings: hiring.len(),
        postings_by_group,
        categories_by_group,
        keywords,
    })
}

/// Score reviews and extract complaint topics from the negative ones.
pub fn review_section(
    reviews: &Corpus,
    analytics: &AnalyticsConfig,
    scorer: &dyn SentimentScorer,
    extractor: &dyn TopicExtractor,
) -> crate::error::Result<(ReviewSection, ScoredCorpus)> {
    let scored = score_corpus(scorer, reviews);
    let negative_reviews = scored.below(analytics.sentiment_threshold).count();

    let topics = match negative_topics(extractor, &scored, analytics.sentiment_threshold) {
        Ok(model) if model.is_empty() => TopicOutcome::NoNegativeDocuments,
        Ok(model) => TopicOutcome::Extracted { model },
        Err(err @ AnalyticsError::InsufficientData(_)) => {
            warn!(error = %err, negative_reviews, "Skipping topic extraction");
            TopicOutcome::Skipped {
                reason: err.to_string(),
            }
        }
        Err(err) => return Err(err),
    };

    let section = ReviewSection {
        reviews: reviews.len(),
        reviews_by_group: stats::group_counts(reviews),
        sentiment: scored.group_summary(),
        negative_reviews,
        topics,
    };
    Ok((section, scored))
}

/// Build the full report from loaded inputs.
pub fn build_report(
    inputs: &ReportInputs,
    keyword_sets: &[KeywordSet],
    analytics: &AnalyticsConfig,
    scorer: &dyn SentimentScorer,
    extractor: &dyn TopicExtractor,
) -> crate::error::Result<Report> {
    analytics.validate()?;

    let hiring = hiring_section(&inputs.hiring, keyword_sets)?;
    let (reviews, _scored) = review_section(&inputs.reviews, analytics, scorer, extractor)?;

    info!(
        postings = hiring.postings,
        reviews = reviews.reviews,
        negative = reviews.negative_reviews,
        "Report built"
    );

    Ok(Report {
        generated_at: Utc::now(),
        hiring,
        reviews,
    })
}
