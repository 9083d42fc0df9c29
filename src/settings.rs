use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use crate::utils::log_settings_invalid;

static SETTINGS: OnceLock<Settings> = OnceLock::new();

pub const MAX_SCORE: u8 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grammar: Grammar,
    pub scoring: Scoring,
    pub export: Export,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grammar {
    pub api_url: String,
    pub language: String,
    pub timeout_secs: u64,
    pub fallback_score: u8,
    pub fallback_issue: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoring {
    pub grammar: GrammarBuckets,
    pub tone: ToneThresholds,
    pub clarity: ClarityThresholds,
    pub structure: StructureRules,
}

/// Issue-count buckets. `few_below` and `some_below` are exclusive upper bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarBuckets {
    pub few_below: usize,
    pub some_below: usize,
    pub clean_score: u8,
    pub few_score: u8,
    pub some_score: u8,
    pub many_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneThresholds {
    pub warm_above: f32,
    pub warm_score: u8,
    pub positive_score: u8,
    pub neutral_score: u8,
    pub negative_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClarityThresholds {
    pub easy_above: f32,
    pub fair_above: f32,
    pub easy_score: u8,
    pub fair_score: u8,
    pub hard_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureRules {
    pub max_score: u8,
    pub missing_cue_penalty: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Export {
    pub report_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grammar: Grammar {
                api_url: "https://api.languagetool.org".to_string(),
                language: "en-US".to_string(),
                timeout_secs: 20,
                fallback_score: 6,
                fallback_issue: "LanguageTool server issue.".to_string(),
            },
            scoring: Scoring {
                grammar: GrammarBuckets {
                    few_below: 5,
                    some_below: 10,
                    clean_score: 10,
                    few_score: 9,
                    some_score: 8,
                    many_score: 6,
                },
                tone: ToneThresholds {
                    warm_above: 0.2,
                    warm_score: 9,
                    positive_score: 8,
                    neutral_score: 7,
                    negative_score: 6,
                },
                clarity: ClarityThresholds {
                    easy_above: 60.0,
                    fair_above: 50.0,
                    easy_score: 9,
                    fair_score: 8,
                    hard_score: 7,
                },
                structure: StructureRules {
                    max_score: 10,
                    missing_cue_penalty: 2,
                },
            },
            export: Export {
                report_path: "email_qc_report.csv".to_string(),
            },
        }
    }
}

impl Settings {
    pub fn load() -> &'static Settings {
        SETTINGS.get_or_init(Self::load_from_files)
    }

    fn load_from_files() -> Settings {
        let default_path = Path::new("settings.default.ron");
        let override_path = Path::new("settings.ron");

        let mut settings = if default_path.exists() {
            fs::read_to_string(default_path)
                .ok()
                .and_then(|content| ron::from_str(&content).ok())
                .unwrap_or_default()
        } else {
            Settings::default()
        };

        if override_path.exists() {
            if let Ok(content) = fs::read_to_string(override_path) {
                if let Ok(overrides) = ron::from_str::<Settings>(&content) {
                    settings = overrides;
                }
            }
        }

        if let Err(e) = settings.validate() {
            log_settings_invalid(&e.to_string());
            settings = Settings::default();
        }

        settings.apply_env();
        settings
    }

    /// Every configured score must fit the 0-10 scale and thresholds must be ordered.
    pub fn validate(&self) -> Result<()> {
        let g = &self.scoring.grammar;
        let t = &self.scoring.tone;
        let c = &self.scoring.clarity;
        let st = &self.scoring.structure;

        let scores = [
            ("grammar.fallback_score", self.grammar.fallback_score),
            ("scoring.grammar.clean_score", g.clean_score),
            ("scoring.grammar.few_score", g.few_score),
            ("scoring.grammar.some_score", g.some_score),
            ("scoring.grammar.many_score", g.many_score),
            ("scoring.tone.warm_score", t.warm_score),
            ("scoring.tone.positive_score", t.positive_score),
            ("scoring.tone.neutral_score", t.neutral_score),
            ("scoring.tone.negative_score", t.negative_score),
            ("scoring.clarity.easy_score", c.easy_score),
            ("scoring.clarity.fair_score", c.fair_score),
            ("scoring.clarity.hard_score", c.hard_score),
            ("scoring.structure.max_score", st.max_score),
        ];
        for (name, score) in scores {
            ensure!(score <= MAX_SCORE, "{name} is {score}, above {MAX_SCORE}");
        }

        ensure!(
            g.few_below >= 1 && g.few_below <= g.some_below,
            "scoring.grammar needs 1 <= few_below <= some_below"
        );
        ensure!(
            t.warm_above >= 0.0,
            "scoring.tone.warm_above must not be negative"
        );
        ensure!(
            c.fair_above <= c.easy_above,
            "scoring.clarity needs fair_above <= easy_above"
        );

        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("LANGUAGETOOL_URL") {
            self.grammar.api_url = url;
        }
        if let Ok(language) = std::env::var("LANGUAGETOOL_LANGUAGE") {
            self.grammar.language = language;
        }
        if let Ok(path) = std::env::var("EMAIL_QC_REPORT") {
            self.export.report_path = path;
        }
    }
}

pub fn settings() -> &'static Settings {
    Settings::load()
}
