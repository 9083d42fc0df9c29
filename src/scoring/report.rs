use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSubmission {
    pub agent_name: String,
    pub email_text: String,
}

impl EmailSubmission {
    pub fn new(agent_name: impl Into<String>, email_text: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            email_text: email_text.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.email_text.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Dimension {
    #[strum(to_string = "Spelling & Grammar")]
    SpellingGrammar,
    #[strum(to_string = "Tone & Empathy")]
    Tone,
    #[strum(to_string = "Clarity")]
    Clarity,
    #[strum(to_string = "Structure")]
    Structure,
    #[strum(to_string = "Overall")]
    Overall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub agent_name: String,
    pub spelling_grammar_score: u8,
    pub tone_score: u8,
    pub clarity_score: u8,
    pub structure_score: u8,
    pub overall_score: f32,
    pub grammar_issues: Vec<String>,
    pub sentiment_polarity: f32,
    pub readability_raw: f32,
}

impl ScoreReport {
    pub fn score(&self, dimension: Dimension) -> f32 {
        match dimension {
            Dimension::SpellingGrammar => self.spelling_grammar_score as f32,
            Dimension::Tone => self.tone_score as f32,
            Dimension::Clarity => self.clarity_score as f32,
            Dimension::Structure => self.structure_score as f32,
            Dimension::Overall => self.overall_score,
        }
    }

    /// The four sub-scores followed by the overall score.
    pub fn dimension_scores(&self) -> Vec<(Dimension, f32)> {
        Dimension::iter().map(|d| (d, self.score(d))).collect()
    }

    pub fn grammar_issues_summary(&self) -> String {
        if self.grammar_issues.is_empty() {
            "None".to_string()
        } else {
            self.grammar_issues.join(", ")
        }
    }
}

pub fn overall_score(sub_scores: [u8; 4]) -> f32 {
    let total: u32 = sub_scores.iter().map(|&s| s as u32).sum();
    round2(total as f32 / sub_scores.len() as f32)
}

pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
