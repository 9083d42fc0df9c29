use anyhow::Result;

use crate::settings::settings;
use crate::utils::log_grammar_unavailable;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrammarMatch {
    pub message: String,
    pub offset: usize,
    pub length: usize,
    pub rule_id: String,
}

/// Spelling and grammar checker. Matches are returned in text order.
#[allow(async_fn_in_trait)]
pub trait GrammarService {
    async fn check(&self, text: &str) -> Result<Vec<GrammarMatch>>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum GrammarOutcome {
    Checked { score: u8, issues: Vec<String> },
    ServiceDown { score: u8, issue: String },
}

impl GrammarOutcome {
    pub fn score(&self) -> u8 {
        match self {
            Self::Checked { score, .. } | Self::ServiceDown { score, .. } => *score,
        }
    }

    pub fn issues(&self) -> Vec<String> {
        match self {
            Self::Checked { issues, .. } => issues.clone(),
            Self::ServiceDown { issue, .. } => vec![issue.clone()],
        }
    }

    pub fn is_service_down(&self) -> bool {
        matches!(self, Self::ServiceDown { .. })
    }
}

pub fn grammar_score(issue_count: usize) -> u8 {
    let b = &settings().scoring.grammar;
    if issue_count == 0 {
        b.clean_score
    } else if issue_count < b.few_below {
        b.few_score
    } else if issue_count < b.some_below {
        b.some_score
    } else {
        b.many_score
    }
}

pub async fn check_spelling_grammar<G: GrammarService>(service: &G, text: &str) -> GrammarOutcome {
    match service.check(text).await {
        Ok(matches) => GrammarOutcome::Checked {
            score: grammar_score(matches.len()),
            issues: matches.into_iter().map(|m| m.message).collect(),
        },
        Err(e) => {
            log_grammar_unavailable(&e.to_string());
            let g = &settings().grammar;
            GrammarOutcome::ServiceDown {
                score: g.fallback_score,
                issue: g.fallback_issue.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    struct FixedMatches(Vec<&'static str>);

    impl GrammarService for FixedMatches {
        async fn check(&self, _text: &str) -> Result<Vec<GrammarMatch>> {
            Ok(self
                .0
                .iter()
                .map(|m| GrammarMatch {
                    message: m.to_string(),
                    ..Default::default()
                })
                .collect())
        }
    }

    struct Unreachable;

    impl GrammarService for Unreachable {
        async fn check(&self, _text: &str) -> Result<Vec<GrammarMatch>> {
            bail!("connection refused")
        }
    }

    #[test]
    fn test_grammar_score_buckets() {
        assert_eq!(grammar_score(0), 10);
        assert_eq!(grammar_score(1), 9);
        assert_eq!(grammar_score(4), 9);
        assert_eq!(grammar_score(5), 8);
        assert_eq!(grammar_score(9), 8);
        assert_eq!(grammar_score(10), 6);
        assert_eq!(grammar_score(250), 6);
    }

    #[test]
    fn test_grammar_score_never_seven() {
        assert!((0..40).all(|n| grammar_score(n) != 7));
    }

    #[tokio::test]
    async fn test_issues_keep_service_order() {
        let service = FixedMatches(vec!["first", "second", "third"]);
        let outcome = check_spelling_grammar(&service, "some text").await;
        assert_eq!(
            outcome,
            GrammarOutcome::Checked {
                score: 9,
                issues: vec!["first".into(), "second".into(), "third".into()],
            }
        );
    }

    #[tokio::test]
    async fn test_clean_text_scores_ten() {
        let outcome = check_spelling_grammar(&FixedMatches(vec![]), "Hello there.").await;
        assert_eq!(outcome.score(), 10);
        assert!(outcome.issues().is_empty());
    }

    #[tokio::test]
    async fn test_service_down_falls_back() {
        let outcome = check_spelling_grammar(&Unreachable, "Hello there.").await;
        assert!(outcome.is_service_down());
        assert_eq!(outcome.score(), 6);
        assert_eq!(outcome.issues(), vec!["LanguageTool server issue.".to_string()]);
    }
}
