//! Environment-driven configuration, read once at startup

use thiserror::Error;

use crate::llm::LlmConfig;
use crate::state_machine::state::DEFAULT_CREATIVE_COUNT;
use crate::state_machine::FlowContext;

/// Upper bound the generation tool accepts
const MAX_CREATIVE_COUNT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierKind {
    #[default]
    Keyword,
    Llm,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ADFLOW_CLASSIFIER must be `keyword` or `llm`, got `{0}`")]
    UnknownClassifier(String),
    #[error("ADFLOW_CREATIVE_COUNT must be a whole number between 1 and 10, got `{0}`")]
    InvalidCreativeCount(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub classifier: ClassifierKind,
    pub creative_count: u32,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let classifier = match lookup("ADFLOW_CLASSIFIER") {
            Some(raw) => parse_classifier(&raw)?,
            None => ClassifierKind::default(),
        };
        let creative_count = match lookup("ADFLOW_CREATIVE_COUNT") {
            Some(raw) => parse_creative_count(&raw)?,
            None => DEFAULT_CREATIVE_COUNT,
        };
        Ok(Self {
            classifier,
            creative_count,
            llm: LlmConfig::from_env(),
        })
    }

    pub fn flow_context(&self) -> FlowContext {
        FlowContext {
            creative_count: self.creative_count,
        }
    }
}

fn parse_classifier(raw: &str) -> Result<ClassifierKind, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "keyword" => Ok(ClassifierKind::Keyword),
        "llm" => Ok(ClassifierKind::Llm),
        _ => Err(ConfigError::UnknownClassifier(raw.to_string())),
    }
}

fn parse_creative_count(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(count) if (1..=MAX_CREATIVE_COUNT).contains(&count) => Ok(count),
        _ => Err(ConfigError::InvalidCreativeCount(raw.to_string())),
    }
}
