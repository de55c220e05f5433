//! Launch state types

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Tool Input Types - Strongly typed inputs for each tool
// ============================================================================

/// Default number of creatives requested from the generation tool
pub const DEFAULT_CREATIVE_COUNT: u32 = 3;

/// Input for the `generate_creatives` tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCreativesInput {
    pub product_url: String,
    #[serde(default = "default_creative_count")]
    pub count: u32,
}

fn default_creative_count() -> u32 {
    DEFAULT_CREATIVE_COUNT
}

/// Input for the `launch_campaign` tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchCampaignInput {
    pub objective: String,
    pub geo: String,
    pub daily_budget: u64,
    pub creative_urls: Vec<String>,
}

/// Input for the `fetch_report` tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchReportInput {
    pub campaign_id: String,
}

/// Typed tool input - the tag doubles as the tool name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_tool", rename_all = "snake_case")]
pub enum ToolInput {
    GenerateCreatives(GenerateCreativesInput),
    LaunchCampaign(LaunchCampaignInput),
    FetchReport(FetchReportInput),
}

impl ToolInput {
    /// Get the tool name
    pub fn tool_name(&self) -> &'static str {
        match self {
            ToolInput::GenerateCreatives(_) => "generate_creatives",
            ToolInput::LaunchCampaign(_) => "launch_campaign",
            ToolInput::FetchReport(_) => "fetch_report",
        }
    }

    /// Convert to JSON Value for tool execution
    pub fn to_value(&self) -> Value {
        match self {
            ToolInput::GenerateCreatives(input) => {
                serde_json::to_value(input).unwrap_or(Value::Null)
            }
            ToolInput::LaunchCampaign(input) => serde_json::to_value(input).unwrap_or(Value::Null),
            ToolInput::FetchReport(input) => serde_json::to_value(input).unwrap_or(Value::Null),
        }
    }
}

// ============================================================================
// Tool Call - A tool invocation with ID and typed input
// ============================================================================

/// A tool invocation requested by the launch flow or the router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub input: ToolInput,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, input: ToolInput) -> Self {
        Self {
            id: id.into(),
            input,
        }
    }

    /// Get the tool name
    pub fn name(&self) -> &'static str {
        self.input.tool_name()
    }
}

/// Outstanding tool request awaiting its result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingToolCall {
    pub id: String,
    pub name: String,
}

/// Result of an external tool call, as read back from history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub tool_name: String,
    pub content: String,
    #[serde(default)]
    pub is_error: bool,
}

// ============================================================================
// Launch State
// ============================================================================

/// Ordered phases of the launch flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[derive(Default)]
pub enum Stage {
    #[default]
    CampaignInfo,
    Creative,
    Launching,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::CampaignInfo => "CAMPAIGN_INFO",
            Stage::Creative => "CREATIVE",
            Stage::Launching => "LAUNCHING",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[derive(Default)]
pub enum LaunchStatus {
    #[default]
    Ongoing,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreativeMode {
    Generate,
    UserProvided,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confirmation {
    Yes,
    No,
}

/// Fields the launch flow can ask about, in the order they are asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Objective,
    Geo,
    DailyBudget,
    StartTime,
    EndTime,
    CreativeMode,
    ProductUrl,
    CreativeUrls,
    UserConfirmation,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Objective => "objective",
            Field::Geo => "geo",
            Field::DailyBudget => "daily_budget",
            Field::StartTime => "start_time",
            Field::EndTime => "end_time",
            Field::CreativeMode => "creative_mode",
            Field::ProductUrl => "product_url",
            Field::CreativeUrls => "creative_urls",
            Field::UserConfirmation => "user_confirmation",
        }
    }
}

/// Priority order for campaign-info follow-up questions
pub const CAMPAIGN_INFO_PRIORITY: [Field; 4] = [
    Field::Objective,
    Field::Geo,
    Field::DailyBudget,
    Field::StartTime,
];

/// Flat, stage-driven state of one launch session.
///
/// Values are replaced whole between turns: `advance` reads one record and
/// returns the next, never editing the caller's copy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchState {
    pub stage: Stage,
    pub status: LaunchStatus,

    // Stage 1 - CAMPAIGN_INFO
    pub objective: Option<String>,
    pub geo: Option<String>,
    pub daily_budget: Option<u64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,

    // Stage 2 - CREATIVE
    pub creative_mode: Option<CreativeMode>,
    pub creative_urls: Option<Vec<String>>,
    pub product_url: Option<String>,

    // Stage 3 - LAUNCHING
    pub user_confirmation: Option<Confirmation>,

    /// Single question to ask the user next
    pub follow_up_question: Option<String>,

    /// Tool request issued on a previous turn whose result has not been folded in
    #[serde(default)]
    pub pending_tool_call: Option<PendingToolCall>,
    /// Number of tool requests issued so far; source of deterministic call ids
    #[serde(default)]
    pub tool_calls_issued: u32,
}

impl LaunchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self) -> bool {
        self.status == LaunchStatus::Completed
    }

    /// First campaign-info field still unset, in question priority order
    pub fn missing_campaign_info(&self) -> Option<Field> {
        CAMPAIGN_INFO_PRIORITY
            .into_iter()
            .find(|field| !self.has_field(*field))
    }

    pub fn has_creative_urls(&self) -> bool {
        self.creative_urls.as_ref().is_some_and(|urls| !urls.is_empty())
    }

    fn has_field(&self, field: Field) -> bool {
        match field {
            Field::Objective => self.objective.is_some(),
            Field::Geo => self.geo.is_some(),
            Field::DailyBudget => self.daily_budget.is_some(),
            Field::StartTime => self.start_time.is_some(),
            Field::EndTime => self.end_time.is_some(),
            Field::CreativeMode => self.creative_mode.is_some(),
            Field::ProductUrl => self.product_url.is_some(),
            Field::CreativeUrls => self.has_creative_urls(),
            Field::UserConfirmation => self.user_confirmation.is_some(),
        }
    }

    /// Whether a tool request with this name is outstanding
    pub fn is_waiting_on(&self, tool_name: &str) -> bool {
        self.pending_tool_call
            .as_ref()
            .is_some_and(|pending| pending.name == tool_name)
    }
}
