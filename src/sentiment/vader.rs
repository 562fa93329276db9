// Rule-based compound polarity scorer.
//
// Each token found in the lexicon contributes its valence, adjusted by the
// words around it:
//   - a booster/dampener up to three tokens back shifts intensity
//     (decayed by distance: full, 95%, 90%)
//   - a negation up to three tokens back flips and damps the valence
//   - ALL-CAPS tokens are emphasized when the text mixes case
//   - "but" halves what came before it and amplifies what comes after
// Exclamation and question marks add emphasis in the direction of the total.
// The total is squashed into [-1, 1] with x / sqrt(x^2 + 15).

use super::lexicon::PolarityLexicon;
use super::traits::SentimentScorer;

/// Emphasis added to an ALL-CAPS sentiment word in mixed-case text.
const CAPS_INCREMENT: f64 = 0.733;
/// Multiplier applied to a negated valence.
const NEGATION_SCALAR: f64 = -0.74;
/// Normalization constant; approximates the maximum expected total.
const NORMALIZATION_ALPHA: f64 = 15.0;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// Compound polarity scorer over a PolarityLexicon.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: PolarityLexicon,
}

impl LexiconScorer {
    pub fn new(lexicon: PolarityLexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &PolarityLexicon {
        &self.lexicon
    }

    fn token_valence(&self, tokens: &[Token], i: usize, caps_differ: bool) -> f64 {
        let token = &tokens[i];
        let lower = token.lower.as_str();

        if self.lexicon.booster(lower).is_some() {
            return 0.0;
        }
        if lower == "kind" && tokens.get(i + 1).is_some_and(|next| next.lower == "of") {
            return 0.0;
        }
        let Some(mut valence) = self.lexicon.valence(lower) else {
            return 0.0;
        };

        if caps_differ && token.is_upper {
            valence += CAPS_INCREMENT.copysign(valence);
        }

        for distance in 0..3 {
            if i <= distance {
                break;
            }
            let prev = &tokens[i - distance - 1];
            if self.lexicon.contains(&prev.lower) {
                continue;
            }
            let mut shift = self.booster_shift(prev, valence, caps_differ);
            match distance {
                1 => shift *= 0.95,
                2 => shift *= 0.9,
                _ => {}
            }
            valence += shift;
            valence = self.apply_negation(valence, tokens, i, distance);
        }

        valence
    }

    /// Intensity shift a booster word applies to a following valence.
    fn booster_shift(&self, word: &Token, valence: f64, caps_differ: bool) -> f64 {
        let Some(mut shift) = self.lexicon.booster(&word.lower) else {
            return 0.0;
        };
        if valence < 0.0 {
            shift = -shift;
        }
        if caps_differ && word.is_upper {
            shift += CAPS_INCREMENT.copysign(valence);
        }
        shift
    }

    fn apply_negation(&self, valence: f64, tokens: &[Token], i: usize, distance: usize) -> f64 {
        let word = |back: usize| tokens[i - back].lower.as_str();
        let emphatic = |w: &str| w == "so" || w == "this";

        match distance {
            0 => {
                if self.lexicon.is_negation(word(1)) {
                    return valence * NEGATION_SCALAR;
                }
            }
            1 => {
                if word(2) == "never" && emphatic(word(1)) {
                    return valence * 1.25;
                }
                if word(2) == "without" && word(1) == "doubt" {
                    return valence;
                }
                if self.lexicon.is_negation(word(2)) {
                    return valence * NEGATION_SCALAR;
                }
            }
            2 => {
                if word(3) == "never" && (emphatic(word(2)) || emphatic(word(1))) {
                    return valence * 1.25;
                }
                if word(3) == "without" && (word(2) == "doubt" || word(1) == "doubt") {
                    return valence;
                }
                if self.lexicon.is_negation(word(3)) {
                    return valence * NEGATION_SCALAR;
                }
            }
            _ => {}
        }
        valence
    }
}

impl SentimentScorer for LexiconScorer {
    fn score_text(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let upper_count = tokens.iter().filter(|t| t.is_upper).count();
        let caps_differ = upper_count > 0 && upper_count < tokens.len();

        let mut sentiments: Vec<f64> = (0..tokens.len())
            .map(|i| self.token_valence(&tokens, i, caps_differ))
            .collect();

        if let Some(pivot) = tokens.iter().position(|t| t.lower == "but") {
            for (i, s) in sentiments.iter_mut().enumerate() {
                if i < pivot {
                    *s *= 0.5;
                } else if i > pivot {
                    *s *= 1.5;
                }
            }
        }

        let mut total: f64 = sentiments.iter().sum();
        let emphasis = punctuation_emphasis(text);
        if total > 0.0 {
            total += emphasis;
        } else if total < 0.0 {
            total -= emphasis;
        }

        round4(normalize(total))
    }
}

struct Token {
    lower: String,
    is_upper: bool,
}

/// Whitespace tokens with surrounding punctuation stripped. Short tokens
/// keep their punctuation so emoticons survive; single characters are dropped.
fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let stripped = raw.trim_matches(|c: char| c.is_ascii_punctuation());
            let word = if stripped.chars().count() <= 2 { raw } else { stripped };
            if word.chars().count() <= 1 {
                return None;
            }
            Some(Token {
                lower: word.to_lowercase(),
                is_upper: is_upper(word),
            })
        })
        .collect()
}

fn is_upper(word: &str) -> bool {
    let mut cased = false;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * QUESTION_INCREMENT,
        _ => QUESTION_CAP,
    };
    exclamations as f64 * EXCLAMATION_INCREMENT + question_emphasis
}

fn normalize(total: f64) -> f64 {
    let score = total / (total * total + NORMALIZATION_ALPHA).sqrt();
    score.clamp(-1.0, 1.0)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::new(PolarityLexicon::bundled().unwrap()).score_text(text)
    }

    #[test]
    fn empty_text_is_exactly_neutral() {
        assert_eq!(score(""), 0.0);
        assert_eq!(score("   "), 0.0);
    }

    #[test]
    fn no_lexicon_words_is_neutral() {
        assert_eq!(score("the portal opened on tuesday"), 0.0);
    }

    #[test]
    fn polarity_direction() {
        assert!(score("great advisor, very responsive") > 0.0);
        assert!(score("slow response times and app crashes") < 0.0);
    }

    #[test]
    fn negation_flips() {
        assert!(score("the service was good") > 0.0);
        assert!(score("the service was not good") < 0.0);
    }

    #[test]
    fn boosters_intensify() {
        assert!(score("very helpful staff") > score("helpful staff"));
        assert!(score("slightly helpful staff") < score("helpful staff"));
    }

    #[test]
    fn caps_and_exclamations_emphasize() {
        assert!(score("the advisor was GREAT") > score("the advisor was great"));
        assert!(score("great advisor!!!") > score("great advisor"));
    }

    #[test]
    fn but_shifts_weight_to_second_clause() {
        assert!(score("the app is good but the fees are terrible") < 0.0);
    }

    #[test]
    fn extreme_text_stays_in_range() {
        let text = "GREAT AMAZING EXCELLENT superb wonderful perfect outstanding!!!!!!";
        let s = score(text);
        assert!((-1.0..=1.0).contains(&s));
        assert!(s > 0.9);
    }
}
