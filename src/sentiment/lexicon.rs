// Polarity lexicon: word valences plus the modifier vocabularies the rule
// model needs (intensity boosters and negations).
//
// Valences use the VADER scale, roughly -4 (extremely negative) to +4
// (extremely positive). The bundled table covers general service and
// product-review vocabulary, a subset of the full VADER lexicon. To score
// with the complete table, point CLIENTVOICE_LEXICON_PATH at a VADER-format
// file (`word<TAB>mean<TAB>...`, e.g. `vader_lexicon.txt`); it replaces the
// bundled one.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::Context;

use crate::error::{AnalyticsError, Result};

const BUNDLED_LEXICON: &str = include_str!("../../data/polarity_lexicon.tsv");

/// Intensity shift applied by a booster word.
pub const BOOST_INCREMENT: f64 = 0.293;
/// Intensity shift applied by a dampener word.
pub const BOOST_DECREMENT: f64 = -0.293;

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly",
    "deeply", "enormously", "entirely", "especially", "exceptionally", "extremely",
    "fabulously", "greatly", "highly", "hugely", "incredibly", "intensely", "majorly",
    "more", "most", "particularly", "purely", "quite", "really", "remarkably", "so",
    "substantially", "thoroughly", "totally", "tremendously", "uber", "unbelievably",
    "unusually", "utterly", "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "less", "little", "marginally", "occasionally",
    "partly", "scarcely", "slightly", "somewhat",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt",
    "don't", "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt",
    "neither", "never", "none", "nope", "nor", "not", "nothing", "nowhere",
    "shant", "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
    "rarely", "seldom", "despite",
];

/// Word valences and modifier vocabularies for the rule-based scorer.
#[derive(Debug, Clone)]
pub struct PolarityLexicon {
    valences: HashMap<String, f64>,
    boosters: HashMap<String, f64>,
    negations: HashSet<String>,
}

impl PolarityLexicon {
    /// The bundled lexicon.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_LEXICON)
    }

    /// Parse VADER-format lines: a token, a tab, its mean valence, and
    /// optionally more tab-separated columns that are ignored.
    pub fn parse(source: &str) -> Result<Self> {
        let mut valences = HashMap::new();
        for (line_no, line) in source.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let word = fields.next().unwrap_or_default().trim();
            let valence = fields
                .next()
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite());
            match (word.is_empty(), valence) {
                (false, Some(valence)) => {
                    valences.insert(word.to_lowercase(), valence);
                }
                _ => {
                    return Err(AnalyticsError::config(format!(
                        "lexicon line {} is not `word<TAB>valence`: {line:?}",
                        line_no + 1
                    )));
                }
            }
        }
        Ok(Self::with_valences(valences))
    }

    /// Load a lexicon file from disk.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon {}", path.display()))?;
        let lexicon = Self::parse(&source)
            .with_context(|| format!("Invalid lexicon {}", path.display()))?;
        Ok(lexicon)
    }

    /// Build a lexicon from explicit valences with the standard modifiers.
    pub fn with_valences(valences: HashMap<String, f64>) -> Self {
        let boosters = BOOSTERS_UP
            .iter()
            .map(|w| (w.to_string(), BOOST_INCREMENT))
            .chain(BOOSTERS_DOWN.iter().map(|w| (w.to_string(), BOOST_DECREMENT)))
            .collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();
        Self {
            valences,
            boosters,
            negations,
        }
    }

    /// Valence of a lowercase token.
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.valences.contains_key(word)
    }

    /// Booster shift of a lowercase token (positive intensifies, negative dampens).
    pub fn booster(&self, word: &str) -> Option<f64> {
        self.boosters.get(word).copied()
    }

    /// Whether a lowercase token negates what follows.
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word) || word.contains("n't")
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}
