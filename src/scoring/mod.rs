pub mod clarity;
pub mod grammar;
pub mod languagetool;
pub mod report;
pub mod structure;
pub mod tone;

use anyhow::Result;
use strum::Display;

pub use clarity::{check_clarity, FleschReadingEase, ReadabilityFormula};
pub use grammar::{check_spelling_grammar, GrammarMatch, GrammarOutcome, GrammarService};
pub use languagetool::LanguageToolClient;
pub use report::{overall_score, round2, Dimension, EmailSubmission, ScoreReport};
pub use structure::{check_structure, structure_cues, StructureCue, StructureCues};
pub use tone::{check_tone, LexiconSentiment, SentimentAnalyzer};

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EvaluationError {
    #[strum(serialize = "no email content provided")]
    EmptyInput,
}

impl std::error::Error for EvaluationError {}

/// Scores emails against one set of collaborators. Build it once and reuse it.
pub struct EmailScorer<G = LanguageToolClient, S = LexiconSentiment, R = FleschReadingEase> {
    grammar: G,
    sentiment: S,
    readability: R,
}

impl EmailScorer {
    pub fn from_settings() -> Result<Self> {
        Ok(Self::new(
            LanguageToolClient::from_settings()?,
            LexiconSentiment,
            FleschReadingEase,
        ))
    }
}

impl<G, S, R> EmailScorer<G, S, R>
where
    G: GrammarService,
    S: SentimentAnalyzer,
    R: ReadabilityFormula,
{
    pub fn new(grammar: G, sentiment: S, readability: R) -> Self {
        Self {
            grammar,
            sentiment,
            readability,
        }
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    pub async fn evaluate(
        &self,
        submission: &EmailSubmission,
    ) -> Result<ScoreReport, EvaluationError> {
        if submission.is_blank() {
            return Err(EvaluationError::EmptyInput);
        }

        let text = submission.email_text.as_str();

        let grammar = check_spelling_grammar(&self.grammar, text).await;
        let (tone_score, polarity) = check_tone(&self.sentiment, text);
        let (clarity_score, readability) = check_clarity(&self.readability, text);
        let structure_score = check_structure(text);

        let spelling_grammar_score = grammar.score();

        Ok(ScoreReport {
            agent_name: submission.agent_name.clone(),
            spelling_grammar_score,
            tone_score,
            clarity_score,
            structure_score,
            overall_score: overall_score([
                spelling_grammar_score,
                tone_score,
                clarity_score,
                structure_score,
            ]),
            grammar_issues: grammar.issues(),
            sentiment_polarity: round2(polarity),
            readability_raw: round2(readability),
        })
    }

    pub async fn evaluate_email(
        &self,
        agent_name: &str,
        text: &str,
    ) -> Result<ScoreReport, EvaluationError> {
        self.evaluate(&EmailSubmission::new(agent_name, text)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingGrammar {
        calls: Cell<usize>,
        matches: usize,
        down: bool,
    }

    impl GrammarService for CountingGrammar {
        async fn check(&self, _text: &str) -> Result<Vec<GrammarMatch>> {
            self.calls.set(self.calls.get() + 1);
            if self.down {
                bail!("service unavailable");
            }
            Ok((0..self.matches)
                .map(|i| GrammarMatch {
                    message: format!("issue {i}"),
                    ..Default::default()
                })
                .collect())
        }
    }

    #[derive(Default)]
    struct CountingSentiment {
        calls: Cell<usize>,
        polarity: f32,
    }

    impl SentimentAnalyzer for CountingSentiment {
        fn polarity(&self, _text: &str) -> f32 {
            self.calls.set(self.calls.get() + 1);
            self.polarity
        }
    }

    #[derive(Default)]
    struct CountingReadability {
        calls: Cell<usize>,
        value: f32,
    }

    impl ReadabilityFormula for CountingReadability {
        fn readability(&self, _text: &str) -> f32 {
            self.calls.set(self.calls.get() + 1);
            self.value
        }
    }

    const WELL_FORMED: &str = "Dear Ms. Lee,\n\nHere is an update on your claim. \
        We approved it today.\n\nBest regards,\nClaims Team\nContact: support@example.com";

    fn scorer(
        matches: usize,
        polarity: f32,
        readability: f32,
    ) -> EmailScorer<CountingGrammar, CountingSentiment, CountingReadability> {
        EmailScorer::new(
            CountingGrammar {
                matches,
                ..Default::default()
            },
            CountingSentiment {
                polarity,
                ..Default::default()
            },
            CountingReadability {
                value: readability,
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_blank_text_skips_collaborators() {
        let scorer = scorer(0, 0.5, 70.0);
        let result = scorer.evaluate_email("Agent A", "   ").await;

        assert_eq!(result, Err(EvaluationError::EmptyInput));
        assert_eq!(scorer.grammar.calls.get(), 0);
        assert_eq!(scorer.sentiment.calls.get(), 0);
        assert_eq!(scorer.readability.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_full_report() {
        let scorer = scorer(2, 0.3456, 64.567);
        let report = scorer.evaluate_email("Agent A", WELL_FORMED).await.unwrap();

        assert_eq!(report.agent_name, "Agent A");
        assert_eq!(report.spelling_grammar_score, 9);
        assert_eq!(report.tone_score, 9);
        assert_eq!(report.clarity_score, 9);
        assert_eq!(report.structure_score, 10);
        assert_eq!(report.overall_score, 9.25);
        assert_eq!(report.grammar_issues, vec!["issue 0", "issue 1"]);
        assert_eq!(report.sentiment_polarity, 0.35);
        assert_eq!(report.readability_raw, 64.57);

        assert_eq!(scorer.grammar.calls.get(), 1);
        assert_eq!(scorer.sentiment.calls.get(), 1);
        assert_eq!(scorer.readability.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_overall_is_mean_of_sub_scores() {
        let cases = [(0, 0.0, 40.0), (12, -0.4, 55.0), (7, 0.1, 80.0)];
        for (matches, polarity, readability) in cases {
            let report = scorer(matches, polarity, readability)
                .evaluate_email("Agent B", "plain words with no cues")
                .await
                .unwrap();

            let subs = [
                report.spelling_grammar_score,
                report.tone_score,
                report.clarity_score,
                report.structure_score,
            ];
            assert!(subs.iter().all(|s| *s <= 10));
            let mean = subs.iter().map(|&s| s as f32).sum::<f32>() / 4.0;
            assert_eq!(report.overall_score, round2(mean));
        }
    }

    #[tokio::test]
    async fn test_grammar_outage_does_not_fail_evaluation() {
        let scorer = EmailScorer::new(
            CountingGrammar {
                down: true,
                ..Default::default()
            },
            CountingSentiment::default(),
            CountingReadability::default(),
        );
        let report = scorer.evaluate_email("Agent C", WELL_FORMED).await.unwrap();

        assert_eq!(report.spelling_grammar_score, 6);
        assert_eq!(report.grammar_issues, vec!["LanguageTool server issue."]);
        assert_eq!(report.tone_score, 7);
        assert_eq!(report.clarity_score, 7);
        assert_eq!(report.overall_score, 7.5);
    }

    #[tokio::test]
    async fn test_evaluation_is_repeatable() {
        let scorer = EmailScorer::new(
            CountingGrammar {
                matches: 3,
                ..Default::default()
            },
            LexiconSentiment,
            FleschReadingEase,
        );
        let first = scorer.evaluate_email("Agent D", WELL_FORMED).await.unwrap();
        let second = scorer.evaluate_email("Agent D", WELL_FORMED).await.unwrap();
        assert_eq!(first, second);
    }
}
