// Data source status: shows which input tables exist and how big they are.

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::corpus::cache::CorpusCache;
use crate::corpus::loader::TableSource;
use crate::sentiment::lexicon::PolarityLexicon;

/// Display system status to the terminal.
pub fn show(config: &Config, cache: &mut CorpusCache) -> Result<()> {
    for source in [
        TableSource::hiring(&config.hiring_path),
        TableSource::reviews(&config.reviews_path),
    ] {
        show_source(&source, cache)?;
    }

    match &config.lexicon_path {
        Some(path) => println!("Lexicon: {} (custom)", path.display()),
        None => println!(
            "Lexicon: bundled ({} entries)",
            PolarityLexicon::bundled()?.len()
        ),
    }

    let a = &config.analytics;
    println!(
        "Topics: {} topics x {} terms, threshold {:+.2}, doc freq {}..{:.0}%, seed {}",
        a.topic_count,
        a.top_terms_per_topic,
        a.sentiment_threshold,
        a.min_doc_freq,
        a.max_doc_freq_ratio * 100.0,
        a.random_seed
    );
    Ok(())
}

fn show_source(source: &TableSource, cache: &mut CorpusCache) -> Result<()> {
    let name = &source.spec.name;
    if !source.path.is_file() {
        println!("{name}: {} (not found)", source.path.display());
        println!("  Analyses over this table will run on an empty corpus.");
        return Ok(());
    }

    let file_size = file_size(&source.path);
    let corpus = cache.get_or_load(source)?;
    let missing_text = corpus.iter().filter(|d| d.text.is_none()).count();
    let ungrouped = corpus.iter().filter(|d| d.group.is_none()).count();
    println!(
        "{name}: {} ({}) - {} rows, {} without text, {} without group",
        source.path.display(),
        file_size,
        corpus.len(),
        missing_text,
        ungrouped
    );
    Ok(())
}

fn file_size(path: &Path) -> String {
    std::fs::metadata(path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
