// Colored terminal output for keyword counts, sentiment, topics, and volume.
//
// main.rs delegates all human-readable rendering here; --json output skips
// this module entirely.

use colored::Colorize;

use super::{bar, truncate_chars};
use crate::corpus::stats::LabelCount;
use crate::keywords::counter::KeywordFrequencies;
use crate::pipeline::report::{GroupCategories, Report, TopicOutcome};
use crate::sentiment::summary::{GroupSentimentSummary, ScoredCorpus};
use crate::topics::model::TopicModel;

const BAR_WIDTH: usize = 20;

/// Display keyword counts as a ranked bar chart.
pub fn display_keywords(name: &str, frequencies: &KeywordFrequencies) {
    println!("\n{}", format!("=== Keyword frequency: {name} ===").bold());

    let max = frequencies.iter().map(|e| e.count).max().unwrap_or(0);
    if max == 0 {
        println!("  No keyword occurrences found.");
    }
    for entry in frequencies.ranked() {
        let fraction = if max > 0 {
            entry.count as f64 / max as f64
        } else {
            0.0
        };
        println!(
            "  {:<24} {} {:>6}",
            entry.keyword,
            bar(fraction, BAR_WIDTH).bright_blue(),
            entry.count
        );
    }
}

/// Display mean sentiment per group, most negative first.
pub fn display_sentiment(summary: &GroupSentimentSummary) {
    println!("\n{}", "=== Average Sentiment by Group ===".bold());

    if summary.is_empty() {
        println!("  No reviews to score.");
        return;
    }

    let mut rows: Vec<_> = summary.iter().collect();
    rows.sort_by(|a, b| a.1.mean.total_cmp(&b.1.mean));

    for (key, group) in rows {
        let label = key.label().unwrap_or("(ungrouped)");
        // Map [-1, 1] onto the bar
        let colored_bar = {
            let b = bar((group.mean + 1.0) / 2.0, BAR_WIDTH);
            if group.mean < 0.0 {
                b.red()
            } else if group.mean < 0.05 {
                b.yellow()
            } else {
                b.green()
            }
        };
        println!(
            "  {:<28} {} {:>+.3}  ({} docs)",
            label, colored_bar, group.mean, group.documents
        );
    }
}

/// Display the most negative documents (those below `threshold`) as evidence.
pub fn display_most_negative(scored: &ScoredCorpus, threshold: f64, count: usize) {
    let docs = scored.most_negative(threshold, count);
    if docs.is_empty() {
        return;
    }

    println!("\n  {} most negative:", docs.len());
    for (i, doc) in docs.iter().enumerate() {
        let preview = truncate_chars(&doc.text, 120);
        println!(
            "    {}. [{:+.2}] {} {}",
            i + 1,
            doc.score,
            doc.group.as_deref().unwrap_or("-").bold(),
            preview.dimmed()
        );
    }
}

/// Display extracted topics.
pub fn display_topics(model: &TopicModel) {
    println!(
        "\n{}",
        format!(
            "=== Complaint Topics ({} documents, {} terms) ===",
            model.documents, model.vocabulary_size
        )
        .bold()
    );
    if model.is_empty() {
        println!("  No negative documents available for topic modeling.");
        return;
    }
    for label in model.labels() {
        println!("  - {label}");
    }
}

pub fn display_topic_outcome(outcome: &TopicOutcome) {
    match outcome {
        TopicOutcome::Extracted { model } => display_topics(model),
        TopicOutcome::NoNegativeDocuments => {
            println!("\n{}", "=== Complaint Topics ===".bold());
            println!("  No negative documents available for topic modeling.");
        }
        TopicOutcome::Skipped { reason } => {
            println!("\n{}", "=== Complaint Topics ===".bold());
            println!("  {} {}", "Skipped:".yellow(), reason);
        }
    }
}

/// Display per-group document volume.
pub fn display_volume(title: &str, counts: &[LabelCount]) {
    println!("\n{}", format!("=== {title} ===").bold());
    if counts.is_empty() {
        println!("  No data available.");
        return;
    }
    let max = counts.iter().map(|c| c.count).max().unwrap_or(1).max(1);
    for c in counts {
        println!(
            "  {:<28} {} {:>6}",
            c.label,
            bar(c.count as f64 / max as f64, BAR_WIDTH).bright_blue(),
            c.count
        );
    }
}

pub fn display_categories(groups: &[GroupCategories]) {
    for g in groups {
        display_volume(&format!("{}: top departments", g.group), &g.categories);
    }
}

/// Display the whole report.
pub fn display_report(report: &Report) {
    println!(
        "{}",
        format!(
            "Report generated {}",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .dimmed()
    );

    display_volume("Job Postings by Firm", &report.hiring.postings_by_group);
    display_categories(&report.hiring.categories_by_group);
    for section in &report.hiring.keywords {
        display_keywords(&section.name, &section.frequencies);
    }

    display_volume("Client Reviews by Firm", &report.reviews.reviews_by_group);
    display_sentiment(&report.reviews.sentiment);
    println!(
        "  {} of {} reviews scored negative",
        report.reviews.negative_reviews, report.reviews.reviews
    );
    display_topic_outcome(&report.reviews.topics);
}
