use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

use clientvoice::config::{AnalyticsConfig, Config};
use clientvoice::corpus::cache::CorpusCache;
use clientvoice::corpus::stats;
use clientvoice::keywords::counter::count_keywords;
use clientvoice::keywords::presets::{KeywordSet, Preset};
use clientvoice::output::terminal;
use clientvoice::pipeline::report::{self, ReportInputs};
use clientvoice::sentiment::lexicon::PolarityLexicon;
use clientvoice::sentiment::summary::score_corpus;
use clientvoice::sentiment::vader::LexiconScorer;
use clientvoice::topics::extractor::{negative_topics, NmfTopicExtractor};

/// Clientvoice: text analytics for hiring and client-review reports.
///
/// Counts responsibility and tooling keywords in job postings, scores client
/// reviews for sentiment per firm, and surfaces the topics behind negative
/// reviews.
#[derive(Parser)]
#[command(name = "clientvoice", version, about)]
struct Cli {
    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count keyword occurrences in job descriptions
    Keywords {
        /// Built-in keyword list to count
        #[arg(long, value_enum, default_value = "all")]
        preset: PresetArg,

        /// Count these keywords instead of a preset (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },

    /// Average review sentiment per firm
    Sentiment {
        /// Include reviews without a firm label as their own row
        #[arg(long)]
        include_ungrouped: bool,

        /// Show this many of the most negative reviews (default: 3)
        #[arg(long, default_value = "3")]
        show_negative: usize,
    },

    /// Extract complaint topics from negative reviews
    Topics {
        /// Reviews scoring below this are modeled
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<f64>,

        /// Number of topics
        #[arg(long)]
        topics: Option<usize>,

        /// Terms per topic
        #[arg(long)]
        top_terms: Option<usize>,

        /// Minimum number of reviews a term must appear in
        #[arg(long)]
        min_doc_freq: Option<usize>,

        /// Random seed for the factorization
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Document volume per firm, or department breakdown for one firm
    Volume {
        /// Count reviews instead of job postings
        #[arg(long)]
        reviews: bool,

        /// Show the top departments for this firm
        #[arg(long)]
        group: Option<String>,
    },

    /// Run every analysis and print the full report
    Report,

    /// Show data source status
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Responsibilities,
    Tools,
    All,
}

impl PresetArg {
    fn keyword_sets(self) -> Vec<KeywordSet> {
        match self {
            PresetArg::Responsibilities => vec![Preset::Responsibilities.into()],
            PresetArg::Tools => vec![Preset::Tools.into()],
            PresetArg::All => KeywordSet::presets(),
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("clientvoice=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut cache = CorpusCache::new();

    match cli.command {
        Commands::Keywords { preset, keywords } => {
            let inputs = ReportInputs::load(&mut cache, &config)?;
            let sets = if keywords.is_empty() {
                preset.keyword_sets()
            } else {
                vec![KeywordSet::new("custom", keywords)]
            };

            let mut results = Vec::with_capacity(sets.len());
            for set in sets {
                let frequencies = count_keywords(&inputs.hiring, set.keywords.as_slice())?;
                results.push(report::KeywordSection {
                    name: set.name,
                    frequencies,
                });
            }

            if cli.json {
                print_json(&results)?;
            } else {
                for section in &results {
                    terminal::display_keywords(&section.name, &section.frequencies);
                }
            }
        }

        Commands::Sentiment {
            include_ungrouped,
            show_negative,
        } => {
            let inputs = ReportInputs::load(&mut cache, &config)?;
            let scorer = build_scorer(&config)?;
            let scored = score_corpus(&scorer, &inputs.reviews);
            let mut summary = scored.group_summary();
            if !include_ungrouped {
                summary = summary.without_ungrouped();
            }

            if cli.json {
                print_json(&summary)?;
            } else {
                terminal::display_sentiment(&summary);
                terminal::display_most_negative(
                    &scored,
                    config.analytics.sentiment_threshold,
                    show_negative,
                );
            }
        }

        Commands::Topics {
            threshold,
            topics,
            top_terms,
            min_doc_freq,
            seed,
        } => {
            let analytics = AnalyticsConfig {
                sentiment_threshold: threshold.unwrap_or(config.analytics.sentiment_threshold),
                topic_count: topics.unwrap_or(config.analytics.topic_count),
                top_terms_per_topic: top_terms.unwrap_or(config.analytics.top_terms_per_topic),
                min_doc_freq: min_doc_freq.unwrap_or(config.analytics.min_doc_freq),
                random_seed: seed.unwrap_or(config.analytics.random_seed),
                ..config.analytics.clone()
            };

            let inputs = ReportInputs::load(&mut cache, &config)?;
            let scorer = build_scorer(&config)?;
            let scored = score_corpus(&scorer, &inputs.reviews);
            let extractor = NmfTopicExtractor::new(analytics.clone());
            let model = negative_topics(&extractor, &scored, analytics.sentiment_threshold)?;

            if cli.json {
                print_json(&model)?;
            } else {
                terminal::display_topics(&model);
            }
        }

        Commands::Volume { reviews, group } => {
            let inputs = ReportInputs::load(&mut cache, &config)?;
            let (corpus, title) = if reviews {
                (&inputs.reviews, "Client Reviews by Firm")
            } else {
                (&inputs.hiring, "Job Postings by Firm")
            };

            let counts = match &group {
                Some(g) => stats::top_categories(corpus, g, report::TOP_CATEGORIES_PER_GROUP),
                None => stats::group_counts(corpus),
            };

            if cli.json {
                print_json(&counts)?;
            } else if let Some(g) = &group {
                if stats::count_for_group(corpus, g) == 0 {
                    println!("No data for {g}.");
                } else {
                    terminal::display_volume(&format!("{g}: top departments"), &counts);
                }
            } else {
                terminal::display_volume(title, &counts);
            }
        }

        Commands::Report => {
            let inputs = ReportInputs::load(&mut cache, &config)?;
            let scorer = build_scorer(&config)?;
            let extractor = NmfTopicExtractor::new(config.analytics.clone());
            let report = report::build_report(
                &inputs,
                &KeywordSet::presets(),
                &config.analytics,
                &scorer,
                &extractor,
            )?;

            if cli.json {
                print_json(&report)?;
            } else {
                terminal::display_report(&report);
            }
        }

        Commands::Status => {
            clientvoice::status::show(&config, &mut cache)?;
        }
    }

    Ok(())
}

/// Build the sentiment scorer, from a custom lexicon if one is configured.
fn build_scorer(config: &Config) -> Result<LexiconScorer> {
    let lexicon = match &config.lexicon_path {
        Some(path) => {
            let lexicon = PolarityLexicon::from_path(path)?;
            info!(path = %path.display(), entries = lexicon.len(), "Loaded custom lexicon");
            lexicon
        }
        None => PolarityLexicon::bundled()?,
    };
    if lexicon.is_empty() {
        warn!("Lexicon is empty, every score will be 0.0");
    }
    Ok(LexiconScorer::new(lexicon))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
