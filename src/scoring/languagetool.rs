use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

use super::grammar::{GrammarMatch, GrammarService};
use crate::settings::settings;

#[derive(Debug, Deserialize)]
struct CheckResponse {
    matches: Vec<CheckMatch>,
}

#[derive(Debug, Deserialize)]
struct CheckMatch {
    message: String,
    #[serde(default)]
    offset: usize,
    #[serde(default)]
    length: usize,
    rule: Option<CheckRule>,
}

#[derive(Debug, Deserialize)]
struct CheckRule {
    id: String,
}

impl From<CheckMatch> for GrammarMatch {
    fn from(m: CheckMatch) -> Self {
        GrammarMatch {
            message: m.message,
            offset: m.offset,
            length: m.length,
            rule_id: m.rule.map(|r| r.id).unwrap_or_default(),
        }
    }
}

/// Client for a LanguageTool server (the public API or a self-hosted one).
#[derive(Debug, Clone)]
pub struct LanguageToolClient {
    client: reqwest::Client,
    api_url: String,
    language: String,
}

impl LanguageToolClient {
    pub fn new(api_url: &str, language: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build LanguageTool HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            language: language.to_string(),
        })
    }

    pub fn from_settings() -> Result<Self> {
        let g = &settings().grammar;
        Self::new(
            &g.api_url,
            &g.language,
            Duration::from_secs(g.timeout_secs),
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn form_body(&self, text: &str) -> String {
        format!(
            "text={}&language={}",
            urlencoding::encode(text),
            urlencoding::encode(&self.language)
        )
    }
}

impl GrammarService for LanguageToolClient {
    async fn check(&self, text: &str) -> Result<Vec<GrammarMatch>> {
        let url = format!("{}/v2/check", self.api_url);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(self.form_body(text))
            .send()
            .await
            .context("LanguageTool request failed")?;

        if !response.status().is_success() {
            bail!("LanguageTool API error: {}", response.status());
        }

        let body: CheckResponse = response
            .json()
            .await
            .context("Failed to parse LanguageTool response")?;

        Ok(parse_matches(body))
    }
}

fn parse_matches(body: CheckResponse) -> Vec<GrammarMatch> {
    body.matches.into_iter().map(GrammarMatch::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::grammar::check_spelling_grammar;

    const SAMPLE_RESPONSE: &str = r#"{
        "software": {"name": "LanguageTool", "version": "6.5"},
        "language": {"name": "English (US)", "code": "en-US"},
        "matches": [
            {
                "message": "Possible spelling mistake found.",
                "shortMessage": "Spelling mistake",
                "offset": 6,
                "length": 5,
                "rule": {"id": "MORFOLOGIK_RULE_EN_US", "description": "Possible spelling mistake"}
            },
            {
                "message": "This sentence does not start with an uppercase letter.",
                "offset": 20,
                "length": 3,
                "rule": {"id": "UPPERCASE_SENTENCE_START"}
            }
        ]
    }"#;

    #[test]
    fn test_parse_matches() {
        let body: CheckResponse = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        let matches = parse_matches(body);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].message, "Possible spelling mistake found.");
        assert_eq!(matches[0].offset, 6);
        assert_eq!(matches[0].length, 5);
        assert_eq!(matches[0].rule_id, "MORFOLOGIK_RULE_EN_US");
        assert_eq!(matches[1].rule_id, "UPPERCASE_SENTENCE_START");
    }

    #[test]
    fn test_parse_empty_matches() {
        let body: CheckResponse = serde_json::from_str(r#"{"matches": []}"#).unwrap();
        assert!(parse_matches(body).is_empty());
    }

    #[test]
    fn test_form_body_is_encoded() {
        let client =
            LanguageToolClient::new("http://localhost:8081/", "en-US", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.api_url(), "http://localhost:8081");
        assert_eq!(
            client.form_body("Hi & bye"),
            "text=Hi%20%26%20bye&language=en-US"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_falls_back() {
        let client =
            LanguageToolClient::new("http://127.0.0.1:1", "en-US", Duration::from_secs(2)).unwrap();
        let outcome = check_spelling_grammar(&client, "Hello there.").await;
        assert!(outcome.is_service_down());
        assert_eq!(outcome.score(), 6);
        assert_eq!(outcome.issues().len(), 1);
    }
}
