use regex::Regex;
use std::sync::LazyLock;

use crate::settings::settings;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9]+(?:['\u{2019}][A-Za-z]+)?").unwrap());
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

/// Ease-of-reading score: higher means easier text.
pub trait ReadabilityFormula {
    fn readability(&self, text: &str) -> f32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FleschReadingEase;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
}

pub fn text_stats(text: &str) -> TextStats {
    let words: Vec<&str> = WORD_PATTERN.find_iter(text).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return TextStats::default();
    }

    let sentences = SENTENCE_END.find_iter(text.trim_end()).count().max(1);
    let syllables = words.iter().map(|w| count_syllables(w)).sum();

    TextStats {
        words: words.len(),
        sentences,
        syllables,
    }
}

pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let letters: Vec<char> = word.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if letters.is_empty() {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');

    let mut groups = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    let n = letters.len();
    // silent trailing "e", except the "-le" ending
    if n > 2 && letters[n - 1] == 'e' && !is_vowel(letters[n - 2]) && letters[n - 2] != 'l' {
        groups -= 1;
    }

    groups.max(1)
}

impl ReadabilityFormula for FleschReadingEase {
    fn readability(&self, text: &str) -> f32 {
        let stats = text_stats(text);
        if stats.words == 0 {
            return 0.0;
        }

        let words = stats.words as f32;
        let words_per_sentence = words / stats.sentences as f32;
        let syllables_per_word = stats.syllables as f32 / words;

        206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word
    }
}

pub fn clarity_score(readability: f32) -> u8 {
    let c = &settings().scoring.clarity;
    if readability > c.easy_above {
        c.easy_score
    } else if readability > c.fair_above {
        c.fair_score
    } else {
        c.hard_score
    }
}

pub fn check_clarity<R: ReadabilityFormula>(formula: &R, text: &str) -> (u8, f32) {
    let readability = formula.readability(text);
    (clarity_score(readability), readability)
}
