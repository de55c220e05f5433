//! Intent classification for incoming turns

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

use crate::history::ConversationHistory;
use crate::llm::{LlmMessage, LlmRequest, LlmService};

/// How many earlier turns the LLM classifier sees
const CLASSIFIER_HISTORY: usize = 6;

static LAUNCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:launch(?:ing)?|campaign\s+setup|(?:create|set\s*up|setup|start|run|new|build)\s+(?:an?\s+|my\s+|the\s+|some\s+|new\s+)?(?:campaigns?|ads?|creatives?))\b",
    )
    .expect("launch vocabulary pattern")
});

static REPORTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:reports?|reporting|performance|results?|analytics|stats|statistics|insights?|ctr|roas|conversions?|breakdown|metrics)\b",
    )
    .expect("reporting vocabulary pattern")
});

// "spend" is a reporting noun unless an amount follows it
static SPEND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bspend\b(\s*(?:\$|€)?\s*\d)?").expect("spend pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Launch,
    Reporting,
    Ambiguous,
    Mixed,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Launch => "LAUNCH",
            Intent::Reporting => "REPORTING",
            Intent::Ambiguous => "AMBIGUOUS",
            Intent::Mixed => "MIXED",
        }
    }

    /// Parse a bare label; anything other than exactly one of the four is rejected
    pub fn from_label(label: &str) -> Option<Self> {
        let cleaned = label
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '`')
            .trim()
            .to_ascii_uppercase();
        match cleaned.as_str() {
            "LAUNCH" => Some(Intent::Launch),
            "REPORTING" => Some(Intent::Reporting),
            "AMBIGUOUS" => Some(Intent::Ambiguous),
            "MIXED" => Some(Intent::Mixed),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the classifier knows about the conversation besides its text
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyContext {
    /// A launch session exists and has not completed
    pub launch_ongoing: bool,
}

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(
        &self,
        history: &ConversationHistory,
        text: &str,
        ctx: ClassifyContext,
    ) -> Intent;
}

/// Vocabulary-based classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn classify_text(text: &str, ctx: ClassifyContext) -> Intent {
        let launch = LAUNCH_RE.is_match(text);
        let reporting = has_reporting_vocabulary(text);
        match (launch, reporting) {
            (true, true) => Intent::Mixed,
            (true, false) => Intent::Launch,
            (false, true) => Intent::Reporting,
            // Answers to launch questions carry no launch verbs
            (false, false) if ctx.launch_ongoing => Intent::Launch,
            (false, false) => Intent::Ambiguous,
        }
    }
}

fn has_reporting_vocabulary(text: &str) -> bool {
    REPORTING_RE.is_match(text)
        || SPEND_RE
            .captures_iter(text)
            .any(|caps| caps.get(1).is_none())
}

#[async_trait]
impl IntentClassifier for KeywordClassifier {
    async fn classify(
        &self,
        _history: &ConversationHistory,
        text: &str,
        ctx: ClassifyContext,
    ) -> Intent {
        Self::classify_text(text, ctx)
    }
}

/// LLM-backed classifier.
///
/// The model only ever picks a label. Any answer that is not exactly one of
/// the four labels, or any request failure, falls back to the keyword rules.
pub struct LlmClassifier {
    llm: Arc<dyn LlmService>,
}

impl LlmClassifier {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }

    fn system_prompt(ctx: ClassifyContext) -> String {
        let mut prompt = String::from(
            "You route messages for an advertising assistant. Classify the user's latest message \
             and answer with exactly one label and nothing else: LAUNCH, REPORTING, AMBIGUOUS, or MIXED.\n\
             LAUNCH: launching or setting up a campaign, ads, or creatives.\n\
             REPORTING: performance, results, analytics, stats, insights, spend, CTR, ROAS, conversions, breakdowns.\n\
             MIXED: both launching and reporting in one message.\n\
             AMBIGUOUS: neither is clear.",
        );
        if ctx.launch_ongoing {
            prompt.push_str(
                "\nA campaign launch is in progress; replies to its questions are LAUNCH.",
            );
        }
        prompt
    }
}

#[async_trait]
impl IntentClassifier for LlmClassifier {
    async fn classify(
        &self,
        history: &ConversationHistory,
        text: &str,
        ctx: ClassifyContext,
    ) -> Intent {
        let mut messages = history.recent_messages(CLASSIFIER_HISTORY);
        messages.push(LlmMessage::user(text));
        let request = LlmRequest::new(Self::system_prompt(ctx), messages).with_max_tokens(8);

        match self.llm.complete(&request).await {
            Ok(response) => match Intent::from_label(&response.text) {
                Some(intent) => intent,
                None => {
                    tracing::warn!(
                        label = %response.text,
                        "Classifier answered outside the label set, using keyword rules"
                    );
                    KeywordClassifier::classify_text(text, ctx)
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Classifier request failed, using keyword rules");
                KeywordClassifier::classify_text(text, ctx)
            }
        }
    }
}
