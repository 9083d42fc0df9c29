use regex::Regex;
use std::sync::LazyLock;

use crate::settings::settings;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+(?:['\u{2019}][a-z]+)?").unwrap());

pub const LEXICON: &[(&str, f32)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("happy", 0.8),
    ("glad", 0.5),
    ("pleased", 0.5),
    ("pleasure", 0.6),
    ("wonderful", 1.0),
    ("nice", 0.6),
    ("kind", 0.6),
    ("helpful", 0.5),
    ("appreciate", 0.5),
    ("appreciated", 0.5),
    ("grateful", 0.6),
    ("sure", 0.5),
    ("welcome", 0.8),
    ("resolved", 0.3),
    ("quick", 0.33),
    ("easy", 0.43),
    ("clear", 0.1),
    ("important", 0.4),
    ("sorry", -0.5),
    ("unfortunately", -0.5),
    ("bad", -0.7),
    ("poor", -0.4),
    ("wrong", -0.5),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("frustrating", -0.4),
    ("frustrated", -0.7),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("difficult", -0.5),
    ("late", -0.3),
    ("delayed", -0.2),
    ("denied", -0.4),
    ("rejected", -0.5),
    ("impossible", -0.67),
    ("unacceptable", -0.8),
    ("fail", -0.5),
    ("failed", -0.5),
    ("problem", -0.3),
    ("issue", -0.1),
];

pub const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("truly", 1.2),
    ("highly", 1.3),
    ("quite", 1.1),
];

const NEGATORS: &[&str] = &["not", "never", "no", "cannot", "nothing", "hardly"];

const NEGATION_FACTOR: f32 = -0.5;

/// Polarity in [-1.0, 1.0]. Zero means neutral or no sentiment-bearing words.
pub trait SentimentAnalyzer {
    fn polarity(&self, text: &str) -> f32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentiment;

fn lookup(table: &[(&str, f32)], word: &str) -> Option<f32> {
    table.iter().find(|(w, _)| *w == word).map(|(_, v)| *v)
}

fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't") || word.ends_with("n\u{2019}t")
}

impl SentimentAnalyzer for LexiconSentiment {
    fn polarity(&self, text: &str) -> f32 {
        let text_lower = text.to_lowercase();
        let words: Vec<&str> = WORD_PATTERN
            .find_iter(&text_lower)
            .map(|m| m.as_str())
            .collect();

        let mut contributions = Vec::new();

        for (i, word) in words.iter().enumerate() {
            let Some(mut value) = lookup(LEXICON, word) else {
                continue;
            };

            if i >= 1 {
                if let Some(factor) = lookup(INTENSIFIERS, words[i - 1]) {
                    value *= factor;
                }
            }

            let window = &words[i.saturating_sub(2)..i];
            if window.iter().any(|w| is_negator(w)) {
                value *= NEGATION_FACTOR;
            }

            contributions.push(value.clamp(-1.0, 1.0));
        }

        if contributions.is_empty() {
            return 0.0;
        }

        let mean = contributions.iter().sum::<f32>() / contributions.len() as f32;
        mean.clamp(-1.0, 1.0)
    }
}

pub fn tone_score(polarity: f32) -> u8 {
    let t = &settings().scoring.tone;
    if polarity > t.warm_above {
        t.warm_score
    } else if polarity > 0.0 {
        t.positive_score
    } else if polarity == 0.0 {
        t.neutral_score
    } else {
        t.negative_score
    }
}

pub fn check_tone<S: SentimentAnalyzer>(analyzer: &S, text: &str) -> (u8, f32) {
    let polarity = analyzer.polarity(text);
    (tone_score(polarity), polarity)
}
