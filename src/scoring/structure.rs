use regex::Regex;
use std::sync::LazyLock;
use strum::Display;

use crate::settings::settings;

static GREETING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(hello|hi|dear|hey|greetings)\b").unwrap());
static SIGN_OFF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(regards|best|thank you|sincerely)\b").unwrap());
static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)update on your claim|important information").unwrap());
static FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)contact|support@|www\.").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StructureCue {
    #[strum(serialize = "greeting")]
    Greeting,
    #[strum(serialize = "sign-off")]
    SignOff,
    #[strum(serialize = "header")]
    Header,
    #[strum(serialize = "footer")]
    Footer,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureCues {
    pub has_greeting: bool,
    pub has_sign_off: bool,
    pub has_header: bool,
    pub has_footer: bool,
}

impl StructureCues {
    pub fn missing(&self) -> Vec<StructureCue> {
        [
            (self.has_greeting, StructureCue::Greeting),
            (self.has_sign_off, StructureCue::SignOff),
            (self.has_header, StructureCue::Header),
            (self.has_footer, StructureCue::Footer),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, cue)| cue)
        .collect()
    }
}

pub fn structure_cues(text: &str) -> StructureCues {
    StructureCues {
        has_greeting: GREETING.is_match(text),
        has_sign_off: SIGN_OFF.is_match(text),
        has_header: HEADER.is_match(text),
        has_footer: FOOTER.is_match(text),
    }
}

pub fn check_structure(text: &str) -> u8 {
    let rules = &settings().scoring.structure;
    let missing = structure_cues(text).missing().len() as u8;
    rules
        .max_score
        .saturating_sub(missing.saturating_mul(rules.missing_cue_penalty))
}
